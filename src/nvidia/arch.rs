//! CUDA microarchitecture classification
//!
//! Maps a compute-capability (major, minor) pair to the NVIDIA
//! microarchitecture generation it belongs to. The table is a fixed,
//! ordered list of inclusive capability ranges; the first matching range
//! wins and an unmatched pair classifies as `Unknown` rather than erroring,
//! so unreleased future capabilities degrade gracefully.

use serde::{Deserialize, Serialize};

/// A compute-capability version pair. Ordering is lexicographic
/// (major first), which matches how NVIDIA versions capabilities.
pub type Capability = (u32, u32);

/// NVIDIA microarchitecture generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CudaArchitecture {
    Tesla,
    Fermi,
    Kepler,
    Maxwell,
    Pascal,
    Volta,
    Turing,
    Ampere,
    AdaLovelace,
    Hopper,
    Blackwell,
    Unknown,
}

impl std::fmt::Display for CudaArchitecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CudaArchitecture::Tesla => write!(f, "Tesla"),
            CudaArchitecture::Fermi => write!(f, "Fermi"),
            CudaArchitecture::Kepler => write!(f, "Kepler"),
            CudaArchitecture::Maxwell => write!(f, "Maxwell"),
            CudaArchitecture::Pascal => write!(f, "Pascal"),
            CudaArchitecture::Volta => write!(f, "Volta"),
            CudaArchitecture::Turing => write!(f, "Turing"),
            CudaArchitecture::Ampere => write!(f, "Ampere"),
            CudaArchitecture::AdaLovelace => write!(f, "Ada Lovelace"),
            CudaArchitecture::Hopper => write!(f, "Hopper"),
            CudaArchitecture::Blackwell => write!(f, "Blackwell"),
            CudaArchitecture::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One architecture generation's inclusive compute-capability range
#[derive(Debug, Clone, Copy)]
pub struct ArchRange {
    /// Lowest capability of the generation (inclusive)
    pub min: Capability,
    /// Highest capability of the generation (inclusive). Ranges are kept
    /// fully bounded so that capabilities newer than the table classify as
    /// `Unknown` instead of being folded into the last known generation.
    pub max: Capability,
    /// Generation name
    pub arch: CudaArchitecture,
}

/// Architecture generations ordered by capability, ascending. Ranges must
/// not overlap (first-match semantics would silently mask the later entry);
/// a test below asserts exclusivity.
pub static ARCHITECTURES: &[ArchRange] = &[
    ArchRange { min: (1, 0), max: (1, 3), arch: CudaArchitecture::Tesla },
    ArchRange { min: (2, 0), max: (2, 1), arch: CudaArchitecture::Fermi },
    ArchRange { min: (3, 0), max: (3, 7), arch: CudaArchitecture::Kepler },
    ArchRange { min: (5, 0), max: (5, 3), arch: CudaArchitecture::Maxwell },
    ArchRange { min: (6, 0), max: (6, 2), arch: CudaArchitecture::Pascal },
    ArchRange { min: (7, 0), max: (7, 2), arch: CudaArchitecture::Volta },
    ArchRange { min: (7, 5), max: (7, 5), arch: CudaArchitecture::Turing },
    ArchRange { min: (8, 0), max: (8, 7), arch: CudaArchitecture::Ampere },
    ArchRange { min: (8, 9), max: (8, 9), arch: CudaArchitecture::AdaLovelace },
    ArchRange { min: (9, 0), max: (9, 0), arch: CudaArchitecture::Hopper },
    ArchRange { min: (10, 0), max: (12, 9), arch: CudaArchitecture::Blackwell },
];

impl ArchRange {
    fn contains(&self, capability: Capability) -> bool {
        self.min <= capability && capability <= self.max
    }
}

/// Classify a compute capability into its microarchitecture generation.
///
/// First matching range wins; a pair outside every range (including future
/// capabilities the table does not know yet) returns
/// [`CudaArchitecture::Unknown`].
pub fn classify(major: u32, minor: u32) -> CudaArchitecture {
    ARCHITECTURES
        .iter()
        .find(|range| range.contains((major, minor)))
        .map(|range| range.arch)
        .unwrap_or(CudaArchitecture::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_capabilities_classify() {
        assert_eq!(classify(3, 5), CudaArchitecture::Kepler);
        assert_eq!(classify(6, 1), CudaArchitecture::Pascal);
        assert_eq!(classify(7, 0), CudaArchitecture::Volta);
        assert_eq!(classify(7, 5), CudaArchitecture::Turing);
        assert_eq!(classify(8, 0), CudaArchitecture::Ampere);
        assert_eq!(classify(8, 6), CudaArchitecture::Ampere);
        assert_eq!(classify(8, 9), CudaArchitecture::AdaLovelace);
        assert_eq!(classify(9, 0), CudaArchitecture::Hopper);
        assert_eq!(classify(12, 0), CudaArchitecture::Blackwell);
    }

    #[test]
    fn gaps_and_future_capabilities_are_unknown() {
        // 4.x was never released
        assert_eq!(classify(4, 0), CudaArchitecture::Unknown);
        // between Volta and Turing
        assert_eq!(classify(7, 3), CudaArchitecture::Unknown);
        // between Ampere and Ada
        assert_eq!(classify(8, 8), CudaArchitecture::Unknown);
        // unreleased future capability must not fold into a known range
        assert_eq!(classify(99, 99), CudaArchitecture::Unknown);
    }

    #[test]
    fn ranges_are_ordered_and_mutually_exclusive() {
        for pair in ARCHITECTURES.windows(2) {
            assert!(
                pair[0].max < pair[1].min,
                "{} range overlaps or is mis-ordered with {}",
                pair[0].arch,
                pair[1].arch
            );
        }
        // Exhaustive scan: no capability may match two ranges
        for major in 0..16 {
            for minor in 0..10 {
                let matches = ARCHITECTURES
                    .iter()
                    .filter(|r| r.contains((major, minor)))
                    .count();
                assert!(matches <= 1, "capability {major}.{minor} matches {matches} ranges");
            }
        }
    }

    #[test]
    fn ranges_are_internally_consistent() {
        for range in ARCHITECTURES {
            assert!(range.min <= range.max, "{} range is inverted", range.arch);
        }
    }
}
