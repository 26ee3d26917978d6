use serde::Serialize;

/// Inclusive temperature band in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

/// Inclusive pH band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhRange {
    pub min: f64,
    pub max: f64,
}

/// Per-crop growth parameters, reference data from the RDA agricultural
/// guide. Static; entries live in [`crate::logic::crops`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CropProfile {
    pub name: &'static str,
    pub days_to_maturity: u32,
    /// kg per pyeong under open-field baseline conditions.
    pub base_yield_per_pyeong: f64,
    /// Standard management cost per pyeong in KRW, energy excluded.
    pub base_cost_per_pyeong: f64,
    pub labor_hours_per_pyeong: f64,
    pub optimal_temp: TempRange,
    /// Below this temperature heating is mandatory or damage occurs.
    pub critical_low_temp: f64,
    pub optimal_ph: Option<PhRange>,
    /// Machines commonly used for this crop.
    pub machines: &'static [&'static str],
}
