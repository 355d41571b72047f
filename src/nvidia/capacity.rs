//! Per-SM hardware unit counts
//!
//! Each compute-capability version has fixed shader/tensor/raytracing unit
//! counts per streaming multiprocessor. These are architectural constants
//! published per capability version, keyed by exact (major, minor) match.
//! A miss means the table does not know the version; callers get `None`
//! ("not determined"), which is distinct from a legitimate zero count —
//! plenty of architectures genuinely have zero tensor or RT units per SM.

use serde::{Deserialize, Serialize};

/// Fixed unit counts for one streaming multiprocessor of a given
/// compute-capability version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSmCapacity {
    /// Unified shader units (CUDA cores) per SM
    pub shader_units: u32,
    /// Tensor units per SM (0 before Volta)
    pub tensor_units: u32,
    /// Raytracing units per SM (0 before Turing)
    pub raytracing_units: u32,
}

/// Whole-device unit totals, scaled by multiprocessor count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapacity {
    pub shader_units: u64,
    pub tensor_units: u64,
    pub raytracing_units: u64,
}

impl PerSmCapacity {
    const fn new(shader_units: u32, tensor_units: u32, raytracing_units: u32) -> Self {
        PerSmCapacity { shader_units, tensor_units, raytracing_units }
    }

    /// Total device capacity for a given multiprocessor count.
    ///
    /// u64 arithmetic: per-SM counts stay below 10^3 and realistic SM
    /// counts below 10^4, so the products are nowhere near overflow.
    pub fn scale(&self, multiprocessor_count: u32) -> DeviceCapacity {
        let sms = u64::from(multiprocessor_count);
        DeviceCapacity {
            shader_units: u64::from(self.shader_units) * sms,
            tensor_units: u64::from(self.tensor_units) * sms,
            raytracing_units: u64::from(self.raytracing_units) * sms,
        }
    }
}

/// One capacity table row
#[derive(Debug, Clone, Copy)]
pub struct CapacityEntry {
    pub major: u32,
    pub minor: u32,
    pub per_sm: PerSmCapacity,
}

const fn entry(major: u32, minor: u32, shader: u32, tensor: u32, rt: u32) -> CapacityEntry {
    CapacityEntry { major, minor, per_sm: PerSmCapacity::new(shader, tensor, rt) }
}

/// Per-SM unit counts by compute capability
pub static CAPACITIES: &[CapacityEntry] = &[
    // Tesla
    entry(1, 0, 8, 0, 0),
    entry(1, 1, 8, 0, 0),
    entry(1, 2, 8, 0, 0),
    entry(1, 3, 8, 0, 0),
    // Fermi
    entry(2, 0, 32, 0, 0),
    entry(2, 1, 48, 0, 0),
    // Kepler
    entry(3, 0, 192, 0, 0),
    entry(3, 2, 192, 0, 0),
    entry(3, 5, 192, 0, 0),
    entry(3, 7, 192, 0, 0),
    // Maxwell
    entry(5, 0, 128, 0, 0),
    entry(5, 2, 128, 0, 0),
    entry(5, 3, 128, 0, 0),
    // Pascal
    entry(6, 0, 64, 0, 0),
    entry(6, 1, 128, 0, 0),
    entry(6, 2, 128, 0, 0),
    // Volta
    entry(7, 0, 64, 8, 0),
    entry(7, 2, 64, 8, 0),
    // Turing
    entry(7, 5, 64, 8, 1),
    // Ampere
    entry(8, 0, 64, 4, 0),
    entry(8, 6, 128, 4, 1),
    entry(8, 7, 128, 4, 1),
    // Ada Lovelace
    entry(8, 9, 128, 4, 1),
    // Hopper
    entry(9, 0, 128, 4, 0),
    // Blackwell
    entry(10, 0, 128, 4, 0),
    entry(12, 0, 128, 4, 1),
];

/// Look up the per-SM capacity for an exact compute-capability version.
///
/// `None` means the version is not in the table ("not determined"), which
/// callers must keep distinct from zero counts.
pub fn lookup(major: u32, minor: u32) -> Option<PerSmCapacity> {
    CAPACITIES
        .iter()
        .find(|e| e.major == major && e.minor == minor)
        .map(|e| e.per_sm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nvidia::arch::{classify, CudaArchitecture};

    #[test]
    fn every_table_row_round_trips() {
        for row in CAPACITIES {
            assert_eq!(lookup(row.major, row.minor), Some(row.per_sm));
        }
    }

    #[test]
    fn absent_versions_are_not_determined() {
        assert_eq!(lookup(4, 0), None);
        assert_eq!(lookup(8, 8), None);
        assert_eq!(lookup(99, 99), None);
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        for (i, a) in CAPACITIES.iter().enumerate() {
            for b in &CAPACITIES[i + 1..] {
                assert!(
                    (a.major, a.minor) != (b.major, b.minor),
                    "duplicate capacity entry for {}.{}",
                    a.major,
                    a.minor
                );
            }
        }
    }

    #[test]
    fn every_capacity_version_belongs_to_a_known_architecture() {
        for row in CAPACITIES {
            assert_ne!(
                classify(row.major, row.minor),
                CudaArchitecture::Unknown,
                "capacity entry {}.{} has no architecture range",
                row.major,
                row.minor
            );
        }
    }

    #[test]
    fn scaling_multiplies_by_multiprocessor_count() {
        // GA104 laptop part: capability 8.6 with 30 SMs
        let per_sm = lookup(8, 6).expect("8.6 is a known capability");
        let total = per_sm.scale(30);
        assert_eq!(total.shader_units, u64::from(per_sm.shader_units) * 30);
        assert_eq!(total.shader_units, 3840);
        assert_eq!(total.tensor_units, 120);
        assert_eq!(total.raytracing_units, 30);
    }

    #[test]
    fn scaling_by_zero_sms_is_zero() {
        let per_sm = lookup(7, 5).unwrap();
        let total = per_sm.scale(0);
        assert_eq!(total.shader_units, 0);
        assert_eq!(total.tensor_units, 0);
        assert_eq!(total.raytracing_units, 0);
    }

    #[test]
    fn pre_volta_has_no_tensor_or_rt_units() {
        let pascal = lookup(6, 1).unwrap();
        assert_eq!(pascal.tensor_units, 0);
        assert_eq!(pascal.raytracing_units, 0);
        // zero here is a real count, not a sentinel
        assert!(lookup(6, 1).is_some());
    }
}
