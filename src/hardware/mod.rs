//! Hardware enumeration module
//!
//! Lists physical graphics adapters using OS facilities (lspci/sysfs on
//! Linux, WMI on Windows, nvidia-smi where installed) and classifies
//! vendors from their reported name strings.

pub mod adapter;

pub use adapter::{enumerate, AdapterInfo, GpuVendor, UnitTerms};
