//! Tunable simulation coefficients.
//!
//! The only stateful piece of the engine: a small persisted table of
//! multipliers and day reductions that an administrator may tune at
//! runtime. Every estimator call reloads it fresh; there is no
//! in-memory cache to invalidate.

use crate::db::Database;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Facility base yield multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacilityMultipliers {
    pub open_field: f64,
    pub single_greenhouse: f64,
    pub multi_greenhouse: f64,
    pub glass_greenhouse: f64,
    pub smart_farm: f64,
}

/// Multipliers for detailed facility specs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecMultipliers {
    /// 4-5m eave height
    pub height_medium: f64,
    /// 6m+
    pub height_high: f64,
    pub heating: f64,
    pub hydroponics: f64,
    /// Open-field low tunnel
    pub tunnel: f64,
}

/// Growth-period adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateReductions {
    /// Days removed when heating is installed.
    pub heating: f64,
    /// Days removed for an open-field tunnel.
    pub tunnel: f64,
    /// 0.9 means the greenhouse family needs 90% of the open-field days.
    pub greenhouse_factor: f64,
    /// Glass greenhouse / smart farm compression.
    pub smart_farm_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationCoefficientSet {
    pub facility: FacilityMultipliers,
    pub specs: SpecMultipliers,
    pub date_reduction: DateReductions,
}

impl Default for SimulationCoefficientSet {
    fn default() -> Self {
        Self {
            facility: FacilityMultipliers {
                open_field: 1.0,
                single_greenhouse: 1.3,
                multi_greenhouse: 1.5,
                glass_greenhouse: 2.0,
                smart_farm: 3.5,
            },
            specs: SpecMultipliers {
                height_medium: 1.1,
                height_high: 1.3,
                heating: 1.2,
                hydroponics: 1.5,
                tunnel: 1.25,
            },
            date_reduction: DateReductions {
                heating: 20.0,
                tunnel: 15.0,
                greenhouse_factor: 0.9,
                smart_farm_factor: 0.8,
            },
        }
    }
}

/// Shallow-merge a stored JSON blob over the built-in defaults: stored
/// top-level sections replace the default section, missing sections keep
/// their defaults. Future coefficient sections inherit defaults without
/// migration code. Any shape problem falls back to pure defaults.
pub fn merge_with_defaults(stored: &serde_json::Value) -> SimulationCoefficientSet {
    let defaults = SimulationCoefficientSet::default();

    let mut merged = match serde_json::to_value(defaults) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => return defaults,
    };

    if let serde_json::Value::Object(overrides) = stored {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }

    match serde_json::from_value(serde_json::Value::Object(merged)) {
        Ok(set) => set,
        Err(e) => {
            warn!("Stored simulation coefficients malformed, using defaults: {}", e);
            defaults
        }
    }
}

const COEFFICIENTS_KEY: &str = "simulation_coefficients";
const EDIT_ALLOWED_KEY: &str = "simulation_edit_allowed";

/// Persistence front for the coefficient set. Last writer wins; edits
/// are infrequent and gated by a single permission flag, so there is no
/// locking beyond the connection mutex.
pub struct CoefficientStore {
    db: Database,
}

impl CoefficientStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the effective coefficient set. A missing row, corrupt JSON
    /// or storage error silently yields the built-in defaults.
    pub fn load(&self) -> SimulationCoefficientSet {
        let stored = match self.db.get_setting(COEFFICIENTS_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read simulation coefficients: {}", e);
                None
            }
        };

        match stored {
            Some(raw) => match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => merge_with_defaults(&value),
                Err(e) => {
                    warn!("Failed to parse simulation coefficients: {}", e);
                    SimulationCoefficientSet::default()
                }
            },
            None => SimulationCoefficientSet::default(),
        }
    }

    /// Persist a coefficient set verbatim.
    pub fn save(&self, set: &SimulationCoefficientSet) -> crate::error::Result<()> {
        let json = serde_json::to_string(set)?;
        self.db.set_setting(COEFFICIENTS_KEY, &json)
    }

    /// Drop the override so [`load`](Self::load) returns defaults again.
    pub fn reset_to_default(&self) -> crate::error::Result<()> {
        self.db.delete_setting(COEFFICIENTS_KEY)
    }

    /// Bare permission flag. The engine performs no enforcement; the
    /// admin command layer decides what to do with it.
    pub fn is_edit_allowed(&self) -> bool {
        matches!(
            self.db.get_setting(EDIT_ALLOWED_KEY),
            Ok(Some(v)) if v == "true"
        )
    }

    pub fn set_edit_allowed(&self, allowed: bool) -> crate::error::Result<()> {
        self.db
            .set_setting(EDIT_ALLOWED_KEY, if allowed { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_reference_values() {
        let d = SimulationCoefficientSet::default();
        assert_eq!(d.facility.smart_farm, 3.5);
        assert_eq!(d.specs.hydroponics, 1.5);
        assert_eq!(d.date_reduction.heating, 20.0);
        assert_eq!(d.date_reduction.greenhouse_factor, 0.9);
    }

    #[test]
    fn merge_empty_object_yields_defaults() {
        let merged = merge_with_defaults(&json!({}));
        assert_eq!(merged, SimulationCoefficientSet::default());
    }

    #[test]
    fn merge_replaces_present_sections() {
        let merged = merge_with_defaults(&json!({
            "facility": {
                "open_field": 1.0,
                "single_greenhouse": 1.4,
                "multi_greenhouse": 1.5,
                "glass_greenhouse": 2.0,
                "smart_farm": 4.0
            }
        }));
        assert_eq!(merged.facility.single_greenhouse, 1.4);
        assert_eq!(merged.facility.smart_farm, 4.0);
        // Untouched sections keep defaults
        assert_eq!(merged.specs, SimulationCoefficientSet::default().specs);
    }

    #[test]
    fn merge_malformed_falls_back_to_defaults() {
        let merged = merge_with_defaults(&json!({"facility": "not an object"}));
        assert_eq!(merged, SimulationCoefficientSet::default());
        let merged = merge_with_defaults(&json!(42));
        assert_eq!(merged, SimulationCoefficientSet::default());
    }

    #[test]
    fn store_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let store = CoefficientStore::new(db);

        let mut set = SimulationCoefficientSet::default();
        set.facility.glass_greenhouse = 2.5;
        store.save(&set).unwrap();
        assert_eq!(store.load().facility.glass_greenhouse, 2.5);
    }

    #[test]
    fn load_after_reset_deep_equals_defaults() {
        let db = Database::open_in_memory().unwrap();
        let store = CoefficientStore::new(db);

        let mut set = SimulationCoefficientSet::default();
        set.date_reduction.tunnel = 99.0;
        store.save(&set).unwrap();
        store.reset_to_default().unwrap();
        assert_eq!(store.load(), SimulationCoefficientSet::default());
    }

    #[test]
    fn corrupt_blob_yields_defaults() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting("simulation_coefficients", "{not json").unwrap();
        let store = CoefficientStore::new(db);
        assert_eq!(store.load(), SimulationCoefficientSet::default());
    }

    #[test]
    fn edit_flag_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let store = CoefficientStore::new(db);

        assert!(!store.is_edit_allowed());
        store.set_edit_allowed(true).unwrap();
        assert!(store.is_edit_allowed());
        store.set_edit_allowed(false).unwrap();
        assert!(!store.is_edit_allowed());
    }
}
