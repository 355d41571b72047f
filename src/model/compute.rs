//! Compute capacity section of a GPU descriptor

use serde::Serialize;

/// Compute unit totals for one adapter. `None` means the count could not
/// be determined, which is different from a count of zero (architectures
/// without tensor or RT hardware report a real zero).
#[derive(Debug, Clone, Serialize)]
pub struct ComputeInfo {
    compute_units: Option<u32>,
    unified_shader_units: Option<u64>,
    tensor_units: Option<u64>,
    raytracing_units: Option<u64>,
    // No known query source for these two yet; always sentinel.
    raster_operation_units: Option<u32>,
    texture_mapping_units: Option<u32>,
}

impl ComputeInfo {
    pub fn builder() -> ComputeInfoBuilder {
        ComputeInfoBuilder::default()
    }

    pub fn compute_units(&self) -> Option<u32> {
        self.compute_units
    }

    pub fn unified_shader_units(&self) -> Option<u64> {
        self.unified_shader_units
    }

    pub fn tensor_units(&self) -> Option<u64> {
        self.tensor_units
    }

    pub fn raytracing_units(&self) -> Option<u64> {
        self.raytracing_units
    }

    pub fn raster_operation_units(&self) -> Option<u32> {
        self.raster_operation_units
    }

    pub fn texture_mapping_units(&self) -> Option<u32> {
        self.texture_mapping_units
    }
}

/// Builder for [`ComputeInfo`]; every field defaults to "not determined".
#[derive(Default)]
pub struct ComputeInfoBuilder {
    compute_units: Option<u32>,
    unified_shader_units: Option<u64>,
    tensor_units: Option<u64>,
    raytracing_units: Option<u64>,
    raster_operation_units: Option<u32>,
    texture_mapping_units: Option<u32>,
}

impl ComputeInfoBuilder {
    pub fn compute_units(mut self, count: u32) -> Self {
        self.compute_units = Some(count);
        self
    }

    pub fn unified_shader_units(mut self, count: u64) -> Self {
        self.unified_shader_units = Some(count);
        self
    }

    pub fn tensor_units(mut self, count: u64) -> Self {
        self.tensor_units = Some(count);
        self
    }

    pub fn raytracing_units(mut self, count: u64) -> Self {
        self.raytracing_units = Some(count);
        self
    }

    pub fn raster_operation_units(mut self, count: u32) -> Self {
        self.raster_operation_units = Some(count);
        self
    }

    pub fn texture_mapping_units(mut self, count: u32) -> Self {
        self.texture_mapping_units = Some(count);
        self
    }

    pub fn build(self) -> ComputeInfo {
        ComputeInfo {
            compute_units: self.compute_units,
            unified_shader_units: self.unified_shader_units,
            tensor_units: self.tensor_units,
            raytracing_units: self.raytracing_units,
            raster_operation_units: self.raster_operation_units,
            texture_mapping_units: self.texture_mapping_units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_is_all_sentinels() {
        let compute = ComputeInfo::builder().build();
        assert_eq!(compute.compute_units(), None);
        assert_eq!(compute.unified_shader_units(), None);
        assert_eq!(compute.tensor_units(), None);
        assert_eq!(compute.raytracing_units(), None);
        assert_eq!(compute.raster_operation_units(), None);
        assert_eq!(compute.texture_mapping_units(), None);
    }

    #[test]
    fn zero_is_a_real_count_not_a_sentinel() {
        let compute = ComputeInfo::builder().tensor_units(0).build();
        assert_eq!(compute.tensor_units(), Some(0));
    }
}
