//! Memory section of a GPU descriptor

use serde::Serialize;

/// Memory configuration of one adapter
#[derive(Debug, Clone, Serialize)]
pub struct MemoryInfo {
    size_bytes: Option<u64>,
    bus_width_bits: Option<u32>,
}

impl MemoryInfo {
    pub fn builder() -> MemoryInfoBuilder {
        MemoryInfoBuilder::default()
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }

    pub fn bus_width_bits(&self) -> Option<u32> {
        self.bus_width_bits
    }
}

#[derive(Default)]
pub struct MemoryInfoBuilder {
    size_bytes: Option<u64>,
    bus_width_bits: Option<u32>,
}

impl MemoryInfoBuilder {
    pub fn size_bytes(mut self, bytes: u64) -> Self {
        self.size_bytes = Some(bytes);
        self
    }

    pub fn bus_width_bits(mut self, bits: u32) -> Self {
        self.bus_width_bits = Some(bits);
        self
    }

    pub fn build(self) -> MemoryInfo {
        MemoryInfo {
            size_bytes: self.size_bytes,
            bus_width_bits: self.bus_width_bits,
        }
    }
}

/// Render a byte count with the largest binary unit that keeps the value
/// at or above one (e.g., 8589934592 -> "8.0 GiB").
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sentinels() {
        let memory = MemoryInfo::builder().build();
        assert_eq!(memory.size_bytes(), None);
        assert_eq!(memory.bus_width_bits(), None);
    }

    #[test]
    fn format_bytes_picks_the_right_unit() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(8 * 1024 * 1024), "8.0 MiB");
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0 GiB");
        assert_eq!(format_bytes(12 * 1024 * 1024 * 1024 + 512 * 1024 * 1024), "12.5 GiB");
    }
}
