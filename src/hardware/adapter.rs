//! Graphics adapter enumeration
//!
//! Lists the physical display adapters the operating system knows about:
//! - Linux: Parse lspci output, fall back to /sys/class/drm
//! - Windows: WMI (wmic)
//! - NVIDIA: nvidia-smi enriches adapters with VRAM and driver version
//!
//! Enumeration never fails outright: a machine with no detectable adapter
//! yields an empty list, and per-method errors only demote us to the next
//! detection method.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::process::Command;
use tracing::debug;

#[cfg(target_os = "linux")]
use std::fs;
#[cfg(target_os = "linux")]
use std::path::Path;

/// GPU vendor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    Unknown,
}

impl std::fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuVendor::Nvidia => write!(f, "NVIDIA"),
            GpuVendor::Amd => write!(f, "AMD"),
            GpuVendor::Intel => write!(f, "Intel"),
            GpuVendor::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Vendor-specific marketing names for compute hardware units.
#[derive(Debug, Clone, Copy)]
pub struct UnitTerms {
    pub compute_units: &'static str,
    pub shader_units: &'static str,
    pub tensor_units: &'static str,
    pub raytracing_units: &'static str,
}

impl GpuVendor {
    /// Classify a vendor string by case-insensitive substring match.
    ///
    /// This is a heuristic (a PCI vendor id match would be exact): "NVIDIA
    /// Corporation", "nvidia" and "NVidia Corp" all classify the same way.
    /// First match wins; unmatched strings are `Unknown`, not an error.
    pub fn classify(vendor: &str) -> Self {
        let vendor = vendor.to_lowercase();
        if vendor.contains("nvidia") {
            GpuVendor::Nvidia
        } else if vendor.contains("amd") {
            GpuVendor::Amd
        } else if vendor.contains("intel") {
            GpuVendor::Intel
        } else {
            GpuVendor::Unknown
        }
    }

    /// PCI vendor id mapping (exact, used by the sysfs path).
    pub fn from_pci_id(id: &str) -> Self {
        match id {
            "0x10de" => GpuVendor::Nvidia,
            "0x1002" => GpuVendor::Amd,
            "0x8086" => GpuVendor::Intel,
            _ => GpuVendor::Unknown,
        }
    }

    /// Marketing terms used when rendering compute unit counts.
    pub fn terms(&self) -> UnitTerms {
        match self {
            GpuVendor::Nvidia => UnitTerms {
                compute_units: "SMs",
                shader_units: "CUDA Cores",
                tensor_units: "Tensor Cores",
                raytracing_units: "RT Cores",
            },
            GpuVendor::Amd => UnitTerms {
                compute_units: "CUs",
                shader_units: "Stream Processors",
                tensor_units: "AI Accelerators",
                raytracing_units: "Ray Accelerators",
            },
            GpuVendor::Intel => UnitTerms {
                compute_units: "Xe Cores",
                shader_units: "Shader Units",
                tensor_units: "XMX Engines",
                raytracing_units: "RT Units",
            },
            GpuVendor::Unknown => UnitTerms {
                compute_units: "Compute Units",
                shader_units: "Shader Units",
                tensor_units: "Tensor Units",
                raytracing_units: "Raytracing Units",
            },
        }
    }
}

/// One physical display adapter as reported by the OS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Adapter name (e.g., "NVIDIA GeForce RTX 3070")
    pub name: String,
    /// Raw vendor string as the OS reported it
    pub vendor_string: String,
    /// Classified vendor
    pub vendor: GpuVendor,
    /// Device identifier (PCI address or PCI_ID), if known
    pub device_id: Option<String>,
    /// VRAM in MB (if detectable)
    pub vram_mb: Option<u64>,
    /// Driver version (if detectable)
    pub driver_version: Option<String>,
}

/// Enumerate all physical graphics adapters.
///
/// Detection methods are tried in order of reliability; the first method
/// that yields at least one adapter wins. NVIDIA adapters are then enriched
/// with nvidia-smi data when the tool is present. Returns an empty list when
/// nothing is detectable.
pub fn enumerate() -> Result<Vec<AdapterInfo>> {
    let mut adapters = Vec::new();

    #[cfg(target_os = "linux")]
    {
        match detect_lspci() {
            Ok(found) => adapters = found,
            Err(e) => debug!("lspci enumeration unavailable: {e:#}"),
        }
        if adapters.is_empty() {
            match detect_sysfs() {
                Ok(found) => adapters = found,
                Err(e) => debug!("sysfs enumeration unavailable: {e:#}"),
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        match detect_wmi() {
            Ok(found) => adapters = found,
            Err(e) => debug!("WMI enumeration unavailable: {e:#}"),
        }
    }

    match detect_nvidia_smi() {
        Ok(nvidia) => merge_nvidia(&mut adapters, nvidia),
        Err(e) => debug!("nvidia-smi unavailable: {e:#}"),
    }

    Ok(adapters)
}

/// Fold nvidia-smi results into the OS-enumerated list: enrich matching
/// NVIDIA adapters in place, append the rest (covers OSes where no other
/// method worked, and boxes with more GPUs than OS enumeration slots).
/// Each nvidia-smi line is a distinct physical device, so unmatched
/// entries are always appended.
fn merge_nvidia(adapters: &mut Vec<AdapterInfo>, nvidia: Vec<AdapterInfo>) {
    for extra in nvidia {
        let slot = adapters
            .iter()
            .position(|a| a.vendor == GpuVendor::Nvidia && a.vram_mb.is_none());
        match slot {
            Some(idx) => {
                let existing = &mut adapters[idx];
                existing.name = extra.name;
                existing.vram_mb = extra.vram_mb;
                existing.driver_version = extra.driver_version;
            }
            None => adapters.push(extra),
        }
    }
}

/// Detect NVIDIA adapters using nvidia-smi (cross-platform)
fn detect_nvidia_smi() -> Result<Vec<AdapterInfo>> {
    let output = Command::new("nvidia-smi")
        .args([
            "--query-gpu=name,memory.total,driver_version",
            "--format=csv,noheader,nounits",
        ])
        .output()
        .context("nvidia-smi not found")?;

    if !output.status.success() {
        anyhow::bail!("nvidia-smi failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut adapters = Vec::new();

    for line in stdout.lines() {
        let parts: Vec<&str> = line.split(", ").collect();
        if parts.len() < 3 {
            continue;
        }

        let raw_name = parts[0].trim();
        let name = if raw_name.starts_with("NVIDIA") {
            raw_name.to_string()
        } else {
            format!("NVIDIA {}", raw_name)
        };
        let vram_mb = parts[1].trim().parse::<u64>().ok();
        let driver_version = Some(parts[2].trim().to_string());

        adapters.push(AdapterInfo {
            name,
            vendor_string: "NVIDIA Corporation".to_string(),
            vendor: GpuVendor::Nvidia,
            device_id: None,
            vram_mb,
            driver_version,
        });
    }

    if adapters.is_empty() {
        anyhow::bail!("No GPU found in nvidia-smi output");
    }
    Ok(adapters)
}

/// Detect adapters using lspci (Linux only)
#[cfg(target_os = "linux")]
fn detect_lspci() -> Result<Vec<AdapterInfo>> {
    let output = Command::new("lspci").output().context("lspci not found")?;

    if !output.status.success() {
        anyhow::bail!("lspci failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut adapters = Vec::new();

    // Look for VGA or 3D controllers
    for line in stdout.lines() {
        if line.contains("VGA") || line.contains("3D controller") {
            let (vendor_string, name) = parse_lspci_line(line);
            let vendor = GpuVendor::classify(&vendor_string);
            adapters.push(AdapterInfo {
                name,
                vendor_string,
                vendor,
                device_id: Some(line.split_whitespace().next().unwrap_or("").to_string()),
                vram_mb: None,
                driver_version: None,
            });
        }
    }

    if adapters.is_empty() {
        anyhow::bail!("No GPU found in lspci output");
    }
    Ok(adapters)
}

/// Parse a single lspci line
///
/// Format: "01:00.0 VGA compatible controller: NVIDIA Corporation GA104 [GeForce RTX 3070] (rev a1)"
#[cfg(target_os = "linux")]
fn parse_lspci_line(line: &str) -> (String, String) {
    let name = if let Some(idx) = line.find(": ") {
        let after_colon = &line[idx + 2..];
        // Remove revision info
        if let Some(rev_idx) = after_colon.rfind(" (rev") {
            after_colon[..rev_idx].to_string()
        } else {
            after_colon.to_string()
        }
    } else {
        line.to_string()
    };

    // The vendor is the leading word(s) of the device description; a
    // substring classify over the whole description works just as well.
    (name.clone(), name)
}

/// Detect adapters using sysfs (Linux only)
#[cfg(target_os = "linux")]
fn detect_sysfs() -> Result<Vec<AdapterInfo>> {
    let drm_path = Path::new("/sys/class/drm");
    if !drm_path.exists() {
        anyhow::bail!("/sys/class/drm not found");
    }

    let mut adapters = Vec::new();

    // Look for card0, card1, etc.
    for entry in fs::read_dir(drm_path)? {
        let entry = entry?;
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        if name_str.starts_with("card") && !name_str.contains('-') {
            let device_path = entry.path().join("device");

            let vendor_path = device_path.join("vendor");
            if let Ok(vendor_id) = fs::read_to_string(&vendor_path) {
                let vendor_id = vendor_id.trim().to_string();
                let vendor = GpuVendor::from_pci_id(&vendor_id);

                // PCI_ID from uevent doubles as device id and display name
                let uevent_path = device_path.join("uevent");
                let pci_id = fs::read_to_string(&uevent_path)
                    .ok()
                    .and_then(|uevent| {
                        uevent
                            .lines()
                            .find(|l| l.starts_with("PCI_ID="))
                            .map(|l| l.replace("PCI_ID=", ""))
                    });

                adapters.push(AdapterInfo {
                    name: format!("{} GPU", vendor),
                    vendor_string: vendor_id,
                    vendor,
                    device_id: pci_id,
                    vram_mb: None,
                    driver_version: None,
                });
            }
        }
    }

    if adapters.is_empty() {
        anyhow::bail!("No GPU found in sysfs");
    }
    Ok(adapters)
}

/// Detect adapters using WMI on Windows
#[cfg(target_os = "windows")]
fn detect_wmi() -> Result<Vec<AdapterInfo>> {
    // Use wmic to query video controllers
    let output = Command::new("wmic")
        .args([
            "path",
            "win32_VideoController",
            "get",
            "Name,AdapterRAM,DriverVersion,PNPDeviceID",
            "/format:csv",
        ])
        .output()
        .context("wmic not found")?;

    if !output.status.success() {
        anyhow::bail!("wmic failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut adapters = Vec::new();

    // Parse CSV output (skip header)
    for line in stdout.lines().skip(1) {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() >= 5 {
            let ram_str = parts[1].trim();
            let driver = parts[2].trim().to_string();
            let name = parts[3].trim().to_string();
            let pnp_id = parts[4].trim().to_string();

            if name.is_empty() || name == "Name" {
                continue;
            }

            // WMI returns bytes
            let vram_mb = ram_str.parse::<u64>().ok().map(|bytes| bytes / 1024 / 1024);

            adapters.push(AdapterInfo {
                vendor: GpuVendor::classify(&name),
                vendor_string: name.clone(),
                name,
                device_id: if pnp_id.is_empty() { None } else { Some(pnp_id) },
                vram_mb,
                driver_version: if driver.is_empty() {
                    None
                } else {
                    Some(driver)
                },
            });
        }
    }

    if adapters.is_empty() {
        anyhow::bail!("No GPU found in WMI output");
    }
    Ok(adapters)
}
