use crate::error::{Result, SoilLabError};
use crate::models::{FacilitySpecs, FacilityType, SoilSample, WaterSample};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub field: FieldConfig,
    pub market: MarketConfig,
}

/// The registered field this installation plans for. Chemistry test
/// lists are kept most recent first; the engine reads only the head.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldConfig {
    pub name: String,
    pub region: String,
    pub area_pyeong: f64,
    pub facility_type: FacilityType,
    #[serde(default)]
    pub specs: FacilitySpecs,
    #[serde(default)]
    pub soil_tests: Vec<SoilSample>,
    #[serde(default)]
    pub water_tests: Vec<WaterSample>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Base URL of the market-ingestion pipeline's published series.
    pub base_url: String,
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_market() -> String {
    "garak".into()
}

fn default_unit() -> String {
    "kg".into()
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SoilLabError::Config(format!(
                "Config file not found at {:?}. Run `soillab init` to create one.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SoilLabError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| SoilLabError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("soillab").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| SoilLabError::Config("Cannot determine config directory".into()))?
            .join("soillab")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Default path for writing new config files (~/.config/soillab/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SoilLabError::Config("Cannot determine config directory".into()))?
            .join("soillab");
        Ok(config_dir.join("config.yaml"))
    }

    /// Write a commented example config to the default path and return it.
    pub fn write_example() -> Result<PathBuf> {
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&Config::default())
            .map_err(|e| SoilLabError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# SoilLab Configuration\n# Generated by `soillab init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        Ok(config_path)
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("SOILLAB_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SoilLabError::Config("Cannot determine data directory".into()))?
            .join("soillab");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("soillab.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig {
                name: "본밭".into(),
                region: "서울/경기".into(),
                area_pyeong: 300.0,
                facility_type: FacilityType::OpenField,
                specs: FacilitySpecs::default(),
                soil_tests: Vec::new(),
                water_tests: Vec::new(),
            },
            market: MarketConfig {
                base_url: "http://localhost:8080".into(),
                market: default_market(),
                unit: default_unit(),
            },
        }
    }
}
