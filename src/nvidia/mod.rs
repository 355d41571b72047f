//! NVIDIA compute-capability core
//!
//! Static architecture/capacity tables keyed by compute capability, plus
//! the scoped CUDA driver probe that produces the (major, minor, SM count)
//! snapshot those tables are consulted with.

pub mod arch;
pub mod capacity;
pub mod probe;

pub use arch::{classify, CudaArchitecture};
pub use capacity::{lookup, DeviceCapacity, PerSmCapacity};
pub use probe::{platform_probe, ComputeProbe, DeviceSnapshot, NullProbe, ProbeError};
