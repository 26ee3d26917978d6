use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    OpenField,
    SingleGreenhouse,
    MultiGreenhouse,
    GlassGreenhouse,
    SmartFarm,
}

impl FacilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityType::OpenField => "Open Field",
            FacilityType::SingleGreenhouse => "Single-Span Greenhouse",
            FacilityType::MultiGreenhouse => "Multi-Span Greenhouse",
            FacilityType::GlassGreenhouse => "Glass Greenhouse",
            FacilityType::SmartFarm => "Smart Farm",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "open_field" | "noji" | "field" => Some(FacilityType::OpenField),
            "single_greenhouse" | "greenhouse" | "vinyl_single" => {
                Some(FacilityType::SingleGreenhouse)
            }
            "multi_greenhouse" | "vinyl_multi" => Some(FacilityType::MultiGreenhouse),
            "glass_greenhouse" | "glass" => Some(FacilityType::GlassGreenhouse),
            "smart_farm" | "smartfarm" => Some(FacilityType::SmartFarm),
            _ => None,
        }
    }

    /// Plastic greenhouse family (single and multi-span).
    pub fn is_greenhouse(&self) -> bool {
        matches!(
            self,
            FacilityType::SingleGreenhouse | FacilityType::MultiGreenhouse
        )
    }

    /// Glass greenhouse and smart farm carry automation and the
    /// maintenance overhead that comes with it.
    pub fn is_high_tech(&self) -> bool {
        matches!(self, FacilityType::GlassGreenhouse | FacilityType::SmartFarm)
    }
}

impl std::fmt::Display for FacilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CultivationMethod {
    #[default]
    Soil,
    Hydroponics,
}

impl CultivationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CultivationMethod::Soil => "Soil",
            CultivationMethod::Hydroponics => "Hydroponics",
        }
    }
}

impl std::fmt::Display for CultivationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterSource {
    Tap,
    River,
    Ground,
}

impl WaterSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterSource::Tap => "Tap Water",
            WaterSource::River => "River Water",
            WaterSource::Ground => "Groundwater",
        }
    }
}

impl std::fmt::Display for WaterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightClass {
    Low,
    /// 4-5m eave height
    Medium,
    /// 6m and above
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineOwnership {
    Owned,
    Rented,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// Machine identifier, e.g. "tractor", "transplanter", "potato_harvester".
    pub name: String,
    pub ownership: MachineOwnership,
}

impl Machine {
    pub fn owned(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ownership: MachineOwnership::Owned,
        }
    }

    pub fn rented(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ownership: MachineOwnership::Rented,
        }
    }
}

/// Growing-facility description supplied by the field-registration layer.
/// The engine only reads it; registration owns the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilitySpecs {
    /// Structure dimensions in meters, when surveyed.
    pub width_m: Option<f64>,
    pub length_m: Option<f64>,
    pub height: Option<HeightClass>,
    #[serde(default)]
    pub cultivation: CultivationMethod,
    #[serde(default)]
    pub heating: bool,
    /// Low tunnel over open-field rows.
    #[serde(default)]
    pub tunnel: bool,
    pub water_source: Option<WaterSource>,
    #[serde(default)]
    pub has_filter: bool,
    #[serde(default)]
    pub machines: Vec<Machine>,
    /// Region used for the heating-energy term; the baseline region
    /// applies when absent.
    pub region: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_type_from_str_valid() {
        assert_eq!(
            FacilityType::from_str("open_field"),
            Some(FacilityType::OpenField)
        );
        assert_eq!(FacilityType::from_str("noji"), Some(FacilityType::OpenField));
        assert_eq!(
            FacilityType::from_str("greenhouse"),
            Some(FacilityType::SingleGreenhouse)
        );
        assert_eq!(
            FacilityType::from_str("Glass Greenhouse"),
            Some(FacilityType::GlassGreenhouse)
        );
        assert_eq!(
            FacilityType::from_str("smart_farm"),
            Some(FacilityType::SmartFarm)
        );
    }

    #[test]
    fn facility_type_from_str_invalid() {
        assert_eq!(FacilityType::from_str("barn"), None);
        assert_eq!(FacilityType::from_str(""), None);
    }

    #[test]
    fn facility_families() {
        assert!(FacilityType::SingleGreenhouse.is_greenhouse());
        assert!(FacilityType::MultiGreenhouse.is_greenhouse());
        assert!(!FacilityType::GlassGreenhouse.is_greenhouse());
        assert!(FacilityType::GlassGreenhouse.is_high_tech());
        assert!(FacilityType::SmartFarm.is_high_tech());
        assert!(!FacilityType::OpenField.is_greenhouse());
        assert!(!FacilityType::OpenField.is_high_tech());
    }
}
