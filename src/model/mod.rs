//! Immutable GPU descriptor records
//!
//! One descriptor per physical adapter, assembled once and never mutated.
//! Each nested section is built through a builder whose optional fields
//! default to explicit "unknown / not determined" sentinels.

pub mod compute;
pub mod driver;
pub mod general;
pub mod memory;

pub use compute::ComputeInfo;
pub use driver::DriverInfo;
pub use general::GeneralInfo;
pub use memory::MemoryInfo;

use serde::Serialize;

/// Full descriptor for one physical GPU
#[derive(Debug, Clone, Serialize)]
pub struct GpuDescriptor {
    general: GeneralInfo,
    compute: ComputeInfo,
    memory: MemoryInfo,
    driver: DriverInfo,
}

impl GpuDescriptor {
    pub fn new(
        general: GeneralInfo,
        compute: ComputeInfo,
        memory: MemoryInfo,
        driver: DriverInfo,
    ) -> Self {
        GpuDescriptor { general, compute, memory, driver }
    }

    pub fn general(&self) -> &GeneralInfo {
        &self.general
    }

    pub fn compute(&self) -> &ComputeInfo {
        &self.compute
    }

    pub fn memory(&self) -> &MemoryInfo {
        &self.memory
    }

    pub fn driver(&self) -> &DriverInfo {
        &self.driver
    }
}
