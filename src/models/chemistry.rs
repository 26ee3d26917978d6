use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Soil test result. Callers keep sample slices ordered most recent
/// first; the engine only ever reads index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilSample {
    pub date: NaiveDate,
    pub ph: Option<f64>,
    /// Electrical conductivity (dS/m).
    pub ec: Option<f64>,
    /// Organic matter (g/kg).
    pub om: Option<f64>,
    /// Available phosphate (mg/kg).
    pub p2o5: Option<f64>,
    /// Exchangeable potassium (cmol+/kg).
    pub k: Option<f64>,
    /// Exchangeable calcium (cmol+/kg).
    pub ca: Option<f64>,
    /// Exchangeable magnesium (cmol+/kg).
    pub mg: Option<f64>,
}

impl SoilSample {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ph: None,
            ec: None,
            om: None,
            p2o5: None,
            k: None,
            ca: None,
            mg: None,
        }
    }
}

/// Source-water test result, same ordering contract as [`SoilSample`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterSample {
    pub date: NaiveDate,
    pub ph: Option<f64>,
    pub ec: Option<f64>,
    /// Nitrate nitrogen (mg/L).
    pub no3_n: Option<f64>,
    /// Bicarbonate (mg/L).
    pub hco3: Option<f64>,
}

impl WaterSample {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ph: None,
            ec: None,
            no3_n: None,
            hco3: None,
        }
    }
}
