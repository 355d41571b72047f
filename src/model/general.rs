//! General identity section of a GPU descriptor

use serde::Serialize;

use crate::hardware::GpuVendor;
use crate::nvidia::CudaArchitecture;

/// General identity of one adapter. Frozen once built; fields that could
/// not be determined carry explicit sentinels (`None` / `Unknown`) so a
/// caller can tell "queried and absent" from "not yet queried".
#[derive(Debug, Clone, Serialize)]
pub struct GeneralInfo {
    product_name: String,
    vendor: GpuVendor,
    architecture: CudaArchitecture,
    device_id: Option<String>,
    vbios_version: Option<String>,
}

impl GeneralInfo {
    /// Start building; only the product name is mandatory.
    pub fn builder(product_name: impl Into<String>) -> GeneralInfoBuilder {
        GeneralInfoBuilder {
            product_name: product_name.into(),
            vendor: GpuVendor::Unknown,
            architecture: CudaArchitecture::Unknown,
            device_id: None,
            vbios_version: None,
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn vendor(&self) -> GpuVendor {
        self.vendor
    }

    pub fn architecture(&self) -> CudaArchitecture {
        self.architecture
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn vbios_version(&self) -> Option<&str> {
        self.vbios_version.as_deref()
    }
}

/// Builder for [`GeneralInfo`]; every optional field defaults to its
/// unknown sentinel.
pub struct GeneralInfoBuilder {
    product_name: String,
    vendor: GpuVendor,
    architecture: CudaArchitecture,
    device_id: Option<String>,
    vbios_version: Option<String>,
}

impl GeneralInfoBuilder {
    pub fn vendor(mut self, vendor: GpuVendor) -> Self {
        self.vendor = vendor;
        self
    }

    pub fn architecture(mut self, architecture: CudaArchitecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn vbios_version(mut self, vbios_version: impl Into<String>) -> Self {
        self.vbios_version = Some(vbios_version.into());
        self
    }

    pub fn build(self) -> GeneralInfo {
        GeneralInfo {
            product_name: self.product_name,
            vendor: self.vendor,
            architecture: self.architecture,
            device_id: self.device_id,
            vbios_version: self.vbios_version,
        }
    }
}
