//! CUDA device query session
//!
//! Opens a scoped CUDA driver session against the first device and reads
//! its compute capability and multiprocessor count. The session lives for
//! exactly one `snapshot` call: the driver handle is dropped on every exit
//! path, so native resources are released deterministically whether the
//! query succeeds or fails.
//!
//! The probe sits behind a trait so the assembler can run (and be tested)
//! without CUDA hardware; builds without the `cuda` feature get a stub
//! that reports the device as unavailable.

use serde::Serialize;
use thiserror::Error;

/// One ephemeral reading from the compute driver. Produced per query,
/// consumed immediately by the assembler, never persisted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeviceSnapshot {
    /// Compute capability major version
    pub major: u32,
    /// Compute capability minor version
    pub minor: u32,
    /// Number of streaming multiprocessors
    pub multiprocessor_count: u32,
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("no compatible compute device found")]
    DeviceUnavailable,

    #[error("CUDA driver error: {0}")]
    Driver(String),

    #[error("compute probing not compiled in (build with the `cuda` feature)")]
    Unsupported,
}

/// Source of compute-capability snapshots.
pub trait ComputeProbe {
    /// Query the first compute device. Errors are expected on machines
    /// without a compatible device and are absorbed into sentinel fields
    /// by the caller.
    fn snapshot(&self) -> Result<DeviceSnapshot, ProbeError>;
}

/// Probe for builds without CUDA support compiled in.
pub struct NullProbe;

impl ComputeProbe for NullProbe {
    fn snapshot(&self) -> Result<DeviceSnapshot, ProbeError> {
        Err(ProbeError::Unsupported)
    }
}

#[cfg(feature = "cuda")]
pub use cuda::CudaProbe;

#[cfg(feature = "cuda")]
mod cuda {
    use super::{ComputeProbe, DeviceSnapshot, ProbeError};
    use cudarc::driver::sys::CUdevice_attribute;
    use cudarc::driver::CudaDevice;

    /// CUDA driver probe (first device only).
    pub struct CudaProbe;

    impl ComputeProbe for CudaProbe {
        fn snapshot(&self) -> Result<DeviceSnapshot, ProbeError> {
            // Arc<CudaDevice> owns the driver context; dropping it at the
            // end of this scope releases the native handle on every path.
            let device =
                CudaDevice::new(0).map_err(|_| ProbeError::DeviceUnavailable)?;

            let read = |attr: CUdevice_attribute| -> Result<u32, ProbeError> {
                let value = device
                    .attribute(attr)
                    .map_err(|e| ProbeError::Driver(e.to_string()))?;
                u32::try_from(value)
                    .map_err(|_| ProbeError::Driver(format!("negative attribute value {value}")))
            };

            let major = read(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MAJOR)?;
            let minor = read(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MINOR)?;
            let multiprocessor_count =
                read(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MULTIPROCESSOR_COUNT)?;

            Ok(DeviceSnapshot { major, minor, multiprocessor_count })
        }
    }
}

/// The probe this build supports.
pub fn platform_probe() -> Box<dyn ComputeProbe> {
    #[cfg(feature = "cuda")]
    return Box::new(CudaProbe);

    #[cfg(not(feature = "cuda"))]
    Box::new(NullProbe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_probe_reports_unsupported() {
        let err = NullProbe.snapshot().unwrap_err();
        assert!(matches!(err, ProbeError::Unsupported));
    }
}
