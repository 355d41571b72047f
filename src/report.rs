//! GPU report assembly
//!
//! Single stateless pass: enumerate adapters, take one compute snapshot
//! from the driver probe, resolve architecture and unit totals from the
//! static tables, and freeze everything into immutable descriptors.

use anyhow::Result;
use serde::Serialize;
use sysinfo::System;
use tracing::debug;

use crate::hardware::{self, AdapterInfo, GpuVendor};
use crate::model::{ComputeInfo, DriverInfo, GeneralInfo, GpuDescriptor, MemoryInfo};
use crate::nvidia::{self, ComputeProbe, DeviceSnapshot};

/// All descriptors collected in one pass, plus the host they came from
#[derive(Debug, Serialize)]
pub struct GpuReport {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: Option<String>,
    /// One descriptor per enumerated adapter (empty when none were found)
    pub devices: Vec<GpuDescriptor>,
}

impl GpuReport {
    /// Collect descriptors for every adapter the OS reports.
    ///
    /// The probe is consulted at most once per call; its session is opened
    /// and closed inside `snapshot`. A probe failure only blanks the
    /// compute-derived fields, enumeration data still flows through.
    pub fn collect(probe: &dyn ComputeProbe) -> Result<Self> {
        let adapters = hardware::enumerate()?;

        let snapshot = if adapters.iter().any(|a| a.vendor == GpuVendor::Nvidia) {
            match probe.snapshot() {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    debug!("compute probe unavailable: {e}");
                    None
                }
            }
        } else {
            None
        };

        let mut nvidia_snapshot = snapshot;
        let devices = adapters
            .into_iter()
            .map(|adapter| {
                // Only the first NVIDIA adapter gets the snapshot; the
                // probe queried device 0 and cannot tell twins apart.
                let snapshot = if adapter.vendor == GpuVendor::Nvidia {
                    nvidia_snapshot.take()
                } else {
                    None
                };
                assemble(adapter, snapshot)
            })
            .collect();

        let os = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version();

        Ok(GpuReport { os, os_version, devices })
    }

    /// Display the report as a formatted string
    pub fn display(&self) -> String {
        const WIDTH: usize = 62;
        let mut output = String::new();

        output.push_str(&format!("╔{}╗\n", "═".repeat(WIDTH)));
        output.push_str(&format!("║{:^WIDTH$}║\n", "GPU INFORMATION"));

        if self.devices.is_empty() {
            output.push_str(&format!("╠{}╣\n", "═".repeat(WIDTH)));
            output.push_str(&format!("║{:^WIDTH$}║\n", "No graphics adapters detected"));
        }

        for descriptor in &self.devices {
            render_descriptor(&mut output, descriptor, WIDTH);
        }

        output.push_str(&format!("╠{}╣\n", "═".repeat(WIDTH)));
        let os_str = match &self.os_version {
            Some(ver) => format!("{} {}", self.os, ver),
            None => self.os.clone(),
        };
        output.push_str(&format_line("OS:  ", &os_str, WIDTH));
        output.push_str(&format!("╚{}╝", "═".repeat(WIDTH)));

        output
    }
}

/// Build one immutable descriptor from enumerator data plus an optional
/// compute snapshot.
fn assemble(adapter: AdapterInfo, snapshot: Option<DeviceSnapshot>) -> GpuDescriptor {
    let mut general = GeneralInfo::builder(&adapter.name).vendor(adapter.vendor);
    if let Some(device_id) = &adapter.device_id {
        general = general.device_id(device_id);
    }

    let mut compute = ComputeInfo::builder();
    if let Some(snapshot) = snapshot {
        general = general.architecture(nvidia::classify(snapshot.major, snapshot.minor));
        compute = compute.compute_units(snapshot.multiprocessor_count);
        // A capability missing from the capacity table leaves the unit
        // totals as "not determined"; the SM count above still stands.
        if let Some(per_sm) = nvidia::lookup(snapshot.major, snapshot.minor) {
            let total = per_sm.scale(snapshot.multiprocessor_count);
            compute = compute
                .unified_shader_units(total.shader_units)
                .tensor_units(total.tensor_units)
                .raytracing_units(total.raytracing_units);
        }
    }

    let mut memory = MemoryInfo::builder();
    if let Some(vram_mb) = adapter.vram_mb {
        memory = memory.size_bytes(vram_mb * 1024 * 1024);
    }

    let mut driver = DriverInfo::builder();
    if let Some(version) = &adapter.driver_version {
        driver = driver.version(version);
    }

    GpuDescriptor::new(general.build(), compute.build(), memory.build(), driver.build())
}

/// Format one line with proper padding
fn format_line(label: &str, content: &str, width: usize) -> String {
    let content_width = width.saturating_sub(2); // Space for "║" and "║"
    let label_len = label.len();
    if label_len < content_width {
        format!(
            "║ {}{:<content_width$}║\n",
            label,
            content,
            content_width = content_width - label_len
        )
    } else {
        format!(
            "║ {}{}║\n",
            label,
            &content[..content_width.saturating_sub(label_len)]
        )
    }
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "Unknown".to_string(), |v| v.to_string())
}

fn render_descriptor(output: &mut String, descriptor: &GpuDescriptor, width: usize) {
    let general = descriptor.general();
    let compute = descriptor.compute();
    let memory = descriptor.memory();
    let driver = descriptor.driver();
    let terms = general.vendor().terms();

    let line = |output: &mut String, label: &str, content: &str| {
        output.push_str(&format_line(label, content, width));
    };

    output.push_str(&format!("╠{}╣\n", "═".repeat(width)));

    // General section
    line(output, "GPU: ", general.product_name());
    line(output, "      ", &format!("Vendor: {}", general.vendor()));
    line(
        output,
        "      ",
        &format!("Architecture: {}", general.architecture()),
    );
    if let Some(device_id) = general.device_id() {
        line(output, "      ", &format!("Device ID: {}", device_id));
    }
    if let Some(vbios) = general.vbios_version() {
        line(output, "      ", &format!("VBIOS: {}", vbios));
    }

    // Compute section
    line(
        output,
        "      ",
        &format!("{}: {}", terms.compute_units, or_unknown(compute.compute_units())),
    );
    line(
        output,
        "      ",
        &format!(
            "{}: {}",
            terms.shader_units,
            or_unknown(compute.unified_shader_units())
        ),
    );
    line(
        output,
        "      ",
        &format!("{}: {}", terms.tensor_units, or_unknown(compute.tensor_units())),
    );
    line(
        output,
        "      ",
        &format!(
            "{}: {}",
            terms.raytracing_units,
            or_unknown(compute.raytracing_units())
        ),
    );

    // Memory section
    let size = compute_memory_label(memory.size_bytes());
    line(output, "      ", &format!("Memory: {}", size));
    if let Some(bus) = memory.bus_width_bits() {
        line(output, "      ", &format!("Bus Width: {}-bit", bus));
    }

    // Driver section
    line(
        output,
        "      ",
        &format!("Driver: {}", driver.version().unwrap_or("Unknown")),
    );
    if let Some(date) = driver.date() {
        line(output, "      ", &format!("Driver Date: {}", date));
    }
}

fn compute_memory_label(size_bytes: Option<u64>) -> String {
    size_bytes.map_or_else(
        || "Unknown".to_string(),
        crate::model::memory::format_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nvidia::CudaArchitecture;

    fn ampere_adapter() -> AdapterInfo {
        AdapterInfo {
            name: "NVIDIA GeForce RTX 3070".to_string(),
            vendor_string: "NVIDIA Corporation".to_string(),
            vendor: GpuVendor::Nvidia,
            device_id: Some("01:00.0".to_string()),
            vram_mb: Some(8192),
            driver_version: Some("555.58.02".to_string()),
        }
    }

    #[test]
    fn ampere_snapshot_resolves_architecture_and_totals() {
        let snapshot = DeviceSnapshot { major: 8, minor: 6, multiprocessor_count: 30 };
        let descriptor = assemble(ampere_adapter(), Some(snapshot));

        assert_eq!(descriptor.general().architecture(), CudaArchitecture::Ampere);
        assert_eq!(descriptor.compute().compute_units(), Some(30));
        assert_eq!(descriptor.compute().unified_shader_units(), Some(3840));
        assert_eq!(descriptor.compute().tensor_units(), Some(120));
        assert_eq!(descriptor.compute().raytracing_units(), Some(30));
    }

    #[test]
    fn future_capability_degrades_to_sentinels() {
        let snapshot = DeviceSnapshot { major: 99, minor: 99, multiprocessor_count: 30 };
        let descriptor = assemble(ampere_adapter(), Some(snapshot));

        assert_eq!(descriptor.general().architecture(), CudaArchitecture::Unknown);
        // the SM count itself was still measured
        assert_eq!(descriptor.compute().compute_units(), Some(30));
        assert_eq!(descriptor.compute().unified_shader_units(), None);
        assert_eq!(descriptor.compute().tensor_units(), None);
        assert_eq!(descriptor.compute().raytracing_units(), None);
    }

    #[test]
    fn missing_snapshot_leaves_compute_not_determined() {
        let descriptor = assemble(ampere_adapter(), None);

        assert_eq!(descriptor.general().architecture(), CudaArchitecture::Unknown);
        assert_eq!(descriptor.compute().compute_units(), None);
        assert_eq!(descriptor.compute().unified_shader_units(), None);
        // enumerator-provided fields still flow through
        assert_eq!(descriptor.general().product_name(), "NVIDIA GeForce RTX 3070");
        assert_eq!(descriptor.memory().size_bytes(), Some(8192 * 1024 * 1024));
        assert_eq!(descriptor.driver().version(), Some("555.58.02"));
    }

    #[test]
    fn rops_and_tmus_are_always_sentinel() {
        let snapshot = DeviceSnapshot { major: 8, minor: 6, multiprocessor_count: 30 };
        let descriptor = assemble(ampere_adapter(), Some(snapshot));
        assert_eq!(descriptor.compute().raster_operation_units(), None);
        assert_eq!(descriptor.compute().texture_mapping_units(), None);
    }

    #[test]
    fn empty_report_renders_without_panicking() {
        let report = GpuReport {
            os: "Linux".to_string(),
            os_version: Some("6.8".to_string()),
            devices: Vec::new(),
        };
        let rendered = report.display();
        assert!(rendered.contains("No graphics adapters detected"));
    }

    #[test]
    fn report_serializes_to_json() {
        let snapshot = DeviceSnapshot { major: 8, minor: 6, multiprocessor_count: 30 };
        let report = GpuReport {
            os: "Linux".to_string(),
            os_version: None,
            devices: vec![assemble(ampere_adapter(), Some(snapshot))],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["devices"][0]["general"]["architecture"], "Ampere");
        assert_eq!(json["devices"][0]["compute"]["unified_shader_units"], 3840);
        assert!(json["devices"][0]["compute"]["raster_operation_units"].is_null());
    }
}
