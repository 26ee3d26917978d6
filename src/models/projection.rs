use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fractional split of a harvest into the wholesale market quality
/// tiers (특/상/중/하). Fractions always sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub premium: f64,
    pub grade1: f64,
    pub grade2: f64,
    pub grade3: f64,
}

impl QualityDistribution {
    pub fn total(&self) -> f64 {
        self.premium + self.grade1 + self.grade2 + self.grade3
    }
}

/// Projected harvest outcome for one crop plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldProjection {
    pub harvest_date: NaiveDate,
    /// Expected yield in kg, rounded to whole kilograms.
    pub expected_yield: f64,
    pub quality: QualityDistribution,
}

/// Projected production cost in KRW, with the corrections that were
/// applied listed as human-readable breakdown lines in application order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostProjection {
    pub base: f64,
    pub energy: f64,
    pub total: f64,
    pub breakdown: Vec<String>,
}

/// N/P/K correction factors actually applied to the standard rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NutrientFactors {
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

/// Site-corrected fertilizer requirement in kg for the given area.
#[derive(Debug, Clone, Serialize)]
pub struct FertilizerRequirement {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub unit: &'static str,
    pub factors: NutrientFactors,
    /// Area normalized to m², rounded.
    pub area_m2: f64,
}
