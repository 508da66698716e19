use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// GPU vendor as declared by the user.
///
/// Parsed leniently from free text: unknown vendors are kept verbatim in
/// `Other` and scored as discrete GPUs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    AppleSilicon,
    Other(String),
}

impl GpuVendor {
    pub fn label(&self) -> &str {
        match self {
            GpuVendor::Nvidia => "NVIDIA",
            GpuVendor::Amd => "AMD",
            GpuVendor::Intel => "Intel",
            GpuVendor::AppleSilicon => "Apple Silicon",
            GpuVendor::Other(name) => name,
        }
    }
}

impl From<&str> for GpuVendor {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "nvidia" => GpuVendor::Nvidia,
            "amd" | "radeon" => GpuVendor::Amd,
            "intel" => GpuVendor::Intel,
            "apple silicon" | "apple-silicon" | "apple" => GpuVendor::AppleSilicon,
            _ => GpuVendor::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for GpuVendor {
    fn from(value: String) -> Self {
        GpuVendor::from(value.as_str())
    }
}

impl From<GpuVendor> for String {
    fn from(value: GpuVendor) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// CPU family as declared by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CpuType {
    IntelAmd,
    AppleSilicon,
    Other(String),
}

impl CpuType {
    pub fn label(&self) -> &str {
        match self {
            CpuType::IntelAmd => "Intel/AMD",
            CpuType::AppleSilicon => "Apple Silicon",
            CpuType::Other(name) => name,
        }
    }
}

impl From<&str> for CpuType {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "intel/amd" | "intel" | "amd" | "x86" | "x86_64" => CpuType::IntelAmd,
            "apple silicon" | "apple-silicon" | "apple" => CpuType::AppleSilicon,
            _ => CpuType::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for CpuType {
    fn from(value: String) -> Self {
        CpuType::from(value.as_str())
    }
}

impl From<CpuType> for String {
    fn from(value: CpuType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for CpuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hardware snapshot supplied with every query.
///
/// Numeric fields are taken as-is: zero or negative values flow through the
/// scoring formulas unclamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareProfile {
    #[serde(alias = "gpuVendor")]
    pub gpu_vendor: GpuVendor,
    #[serde(alias = "vram")]
    pub vram_gb: f64,
    #[serde(alias = "ram")]
    pub ram_gb: f64,
    #[serde(alias = "cpuType")]
    pub cpu_type: CpuType,
    pub os: String,
    #[serde(alias = "diskSpace")]
    pub disk_space_gb: f64,
}

impl Default for HardwareProfile {
    fn default() -> Self {
        Self {
            gpu_vendor: GpuVendor::Nvidia,
            vram_gb: 8.0,
            ram_gb: 16.0,
            cpu_type: CpuType::IntelAmd,
            os: "Windows".to_string(),
            disk_space_gb: 64.0,
        }
    }
}

impl HardwareProfile {
    pub fn class(&self) -> HardwareClass {
        HardwareClass::of(self)
    }

    /// Parse a profile from JSON. Missing fields fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidProfile)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Memory architecture derived from a [`HardwareProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareClass {
    /// CPU and GPU share one RAM pool (Apple Silicon).
    UnifiedMemory,
    /// Integrated graphics carving VRAM out of system RAM.
    IntegratedShared,
    /// Dedicated GPU with its own VRAM.
    Discrete,
}

impl HardwareClass {
    pub fn of(hardware: &HardwareProfile) -> Self {
        if hardware.gpu_vendor == GpuVendor::AppleSilicon
            || hardware.cpu_type == CpuType::AppleSilicon
        {
            HardwareClass::UnifiedMemory
        } else if hardware.gpu_vendor == GpuVendor::Intel {
            HardwareClass::IntegratedShared
        } else {
            HardwareClass::Discrete
        }
    }

    pub fn is_shared_memory(self) -> bool {
        matches!(
            self,
            HardwareClass::UnifiedMemory | HardwareClass::IntegratedShared
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            HardwareClass::UnifiedMemory => "Unified memory",
            HardwareClass::IntegratedShared => "Shared graphics memory",
            HardwareClass::Discrete => "Discrete GPU",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gpu: &str, cpu: &str) -> HardwareProfile {
        HardwareProfile {
            gpu_vendor: GpuVendor::from(gpu),
            cpu_type: CpuType::from(cpu),
            ..HardwareProfile::default()
        }
    }

    #[test]
    fn test_vendor_parsing() {
        assert_eq!(GpuVendor::from("NVIDIA"), GpuVendor::Nvidia);
        assert_eq!(GpuVendor::from(" apple silicon "), GpuVendor::AppleSilicon);
        assert_eq!(GpuVendor::from("Intel"), GpuVendor::Intel);
        assert_eq!(
            GpuVendor::from("Moore Threads"),
            GpuVendor::Other("Moore Threads".to_string())
        );
        assert_eq!(CpuType::from("Intel/AMD"), CpuType::IntelAmd);
        assert_eq!(CpuType::from("Apple Silicon"), CpuType::AppleSilicon);
    }

    #[test]
    fn test_hardware_class() {
        assert_eq!(
            profile("NVIDIA", "Intel/AMD").class(),
            HardwareClass::Discrete
        );
        assert_eq!(
            profile("Apple Silicon", "Apple Silicon").class(),
            HardwareClass::UnifiedMemory
        );
        // Apple CPU alone is enough, whatever GPU was picked
        assert_eq!(
            profile("NVIDIA", "Apple Silicon").class(),
            HardwareClass::UnifiedMemory
        );
        assert_eq!(
            profile("Intel", "Intel/AMD").class(),
            HardwareClass::IntegratedShared
        );
        assert_eq!(profile("AMD", "Intel/AMD").class(), HardwareClass::Discrete);
        assert_eq!(
            profile("Unknown", "Intel/AMD").class(),
            HardwareClass::Discrete
        );
    }

    #[test]
    fn test_shared_memory() {
        assert!(HardwareClass::UnifiedMemory.is_shared_memory());
        assert!(HardwareClass::IntegratedShared.is_shared_memory());
        assert!(!HardwareClass::Discrete.is_shared_memory());
    }

    #[test]
    fn test_default_profile() {
        let hw = HardwareProfile::default();
        assert_eq!(hw.gpu_vendor, GpuVendor::Nvidia);
        assert_eq!(hw.vram_gb, 8.0);
        assert_eq!(hw.ram_gb, 16.0);
        assert_eq!(hw.cpu_type, CpuType::IntelAmd);
        assert_eq!(hw.os, "Windows");
        assert_eq!(hw.disk_space_gb, 64.0);
    }

    #[test]
    fn test_profile_from_json() {
        let hw = HardwareProfile::from_json_str(
            r#"{"gpu_vendor": "Apple Silicon", "ram_gb": 32, "cpu_type": "Apple Silicon"}"#,
        )
        .unwrap();
        assert_eq!(hw.class(), HardwareClass::UnifiedMemory);
        assert_eq!(hw.ram_gb, 32.0);
        // Unspecified fields keep their defaults
        assert_eq!(hw.disk_space_gb, 64.0);

        let legacy =
            HardwareProfile::from_json_str(r#"{"gpuVendor": "Intel", "vram": 0.5, "ram": 8}"#)
                .unwrap();
        assert_eq!(legacy.gpu_vendor, GpuVendor::Intel);
        assert_eq!(legacy.vram_gb, 0.5);
    }

    #[test]
    fn test_profile_from_invalid_json() {
        let err = HardwareProfile::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::InvalidProfile(_)));
    }

    #[test]
    fn test_profile_serializes_vendor_labels() {
        let json = serde_json::to_value(HardwareProfile::default()).unwrap();
        assert_eq!(json["gpu_vendor"], "NVIDIA");
        assert_eq!(json["cpu_type"], "Intel/AMD");
    }
}
