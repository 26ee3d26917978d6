//! Production cost projection: materials, chemistry corrections,
//! labor/machinery and heating energy.
//!
//! Chemistry corrections are binary flat fees per pyeong, not
//! proportional to the measured deviation. Machine labor reductions
//! compound multiplicatively, and the resulting wage saving is credited
//! against the base cost separately from the machine fees themselves.

use crate::logic::climate;
use crate::models::{
    CostProjection, CropProfile, CultivationMethod, FacilitySpecs, FacilityType, MachineOwnership,
    SoilSample, WaterSample, WaterSource,
};
use chrono::NaiveDate;
use tracing::debug;

const HYDROPONICS_SURCHARGE: f64 = 1.3;
const HIGH_TECH_SURCHARGE: f64 = 1.2;

// Flat per-pyeong water fees (KRW)
const TAP_WATER_FEE: f64 = 2000.0;
const RIVER_FILTER_FEE: f64 = 500.0;
const GROUNDWATER_FEE: f64 = 300.0;
const WATER_PH_FEE: f64 = 500.0;
const WATER_PH_MIN: f64 = 5.5;
const WATER_PH_MAX: f64 = 7.5;

// Flat per-pyeong soil correction fees (KRW)
const LIME_FEE: f64 = 500.0;
const SULFUR_FEE: f64 = 800.0;
const COMPOST_FEE: f64 = 1000.0;
const LOW_OM_THRESHOLD: f64 = 20.0;

// Labor and machinery
const HOURLY_WAGE: f64 = 20_000.0;
const RENTAL_RATE_PER_DAY: f64 = 50_000.0;
const AREA_PER_SERVICE_DAY: f64 = 500.0;
const OWNED_TRACTOR_FEE_PER_PYEONG: f64 = 1000.0;
const OWNED_MACHINE_FEE_PER_PYEONG: f64 = 500.0;
const HYDROPONIC_LABOR_REDUCTION: f64 = 0.5;

// Heating energy
const PYEONG_M2: f64 = 3.3;
const ENVELOPE_FACTOR: f64 = 1.5;
const PRICE_PER_KWH: f64 = 80.0;

/// Fraction of remaining labor hours a machine category removes.
fn labor_reduction(machine_name: &str) -> f64 {
    if machine_name.contains("tractor") {
        0.40
    } else if machine_name.contains("planter") || machine_name.contains("transplanter") {
        0.25
    } else if machine_name.contains("harvester") {
        0.25
    } else if machine_name.contains("dryer") {
        0.05
    } else {
        0.0
    }
}

/// Facility thermal-loss coefficient (W/m²K equivalent). Open field is
/// effectively uninsulated; a smart farm envelope loses the least.
fn thermal_loss_coefficient(facility: FacilityType) -> f64 {
    match facility {
        FacilityType::OpenField => 10.0,
        FacilityType::SingleGreenhouse => 6.0,
        FacilityType::MultiGreenhouse => 4.5,
        FacilityType::GlassGreenhouse => 3.5,
        FacilityType::SmartFarm => 2.0,
    }
}

/// Group a KRW amount with thousands separators for display.
pub fn won(amount: f64) -> String {
    let mut n = amount.round() as i64;
    let negative = n < 0;
    n = n.abs();
    let digits = n.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Project the total production cost for one crop plan.
///
/// Chemistry is read from index 0 of the sample slices; callers keep
/// them ordered most recent first. The energy term is computed only
/// when both the heating flag and a target temperature are supplied.
#[allow(clippy::too_many_arguments)]
pub fn compute_cost(
    crop: &CropProfile,
    area_pyeong: f64,
    facility: FacilityType,
    planting: NaiveDate,
    specs: &FacilitySpecs,
    soil_samples: &[SoilSample],
    water_samples: &[WaterSample],
    target_temp: Option<f64>,
) -> CostProjection {
    let mut breakdown: Vec<String> = Vec::new();
    let mut cost_per_pyeong = crop.base_cost_per_pyeong;
    let hydroponic = specs.cultivation == CultivationMethod::Hydroponics;

    // --- Cultivation corrections ---
    if hydroponic {
        cost_per_pyeong *= HYDROPONICS_SURCHARGE;
        breakdown.push("Hydroponic nutrient materials (+30%)".into());

        match specs.water_source {
            Some(WaterSource::Tap) => {
                cost_per_pyeong += TAP_WATER_FEE;
                breakdown.push(format!("Tap water supply fee (+{}₩/pyeong)", won(TAP_WATER_FEE)));
            }
            Some(WaterSource::River) => {
                if specs.has_filter {
                    cost_per_pyeong += RIVER_FILTER_FEE;
                    breakdown.push(format!(
                        "River water filter upkeep (+{}₩/pyeong)",
                        won(RIVER_FILTER_FEE)
                    ));
                }
            }
            Some(WaterSource::Ground) => {
                cost_per_pyeong += GROUNDWATER_FEE;
                breakdown.push(format!(
                    "Groundwater pumping cost (+{}₩/pyeong)",
                    won(GROUNDWATER_FEE)
                ));
            }
            None => {}
        }

        // Acid/base dosing when the source water is out of band
        if let Some(ph) = water_samples.first().and_then(|s| s.ph) {
            if !(WATER_PH_MIN..=WATER_PH_MAX).contains(&ph) {
                cost_per_pyeong += WATER_PH_FEE;
                breakdown.push(format!(
                    "Source water pH {:.1} correction agents (+{}₩/pyeong)",
                    ph,
                    won(WATER_PH_FEE)
                ));
            }
        }
    } else {
        let sample = soil_samples.first();

        if let (Some(ph), Some(band)) = (sample.and_then(|s| s.ph), crop.optimal_ph) {
            if ph < band.min {
                cost_per_pyeong += LIME_FEE;
                breakdown.push(format!(
                    "Acidic soil (pH {:.1}): lime application (+{}₩/pyeong)",
                    ph,
                    won(LIME_FEE)
                ));
            } else if ph > band.max {
                cost_per_pyeong += SULFUR_FEE;
                breakdown.push(format!(
                    "Alkaline soil (pH {:.1}): sulfur/peat moss (+{}₩/pyeong)",
                    ph,
                    won(SULFUR_FEE)
                ));
            }
        }

        if let Some(om) = sample.and_then(|s| s.om) {
            if om < LOW_OM_THRESHOLD {
                cost_per_pyeong += COMPOST_FEE;
                breakdown.push(format!(
                    "Low organic matter ({:.0} g/kg): extra compost (+{}₩/pyeong)",
                    om,
                    won(COMPOST_FEE)
                ));
            }
        }
    }

    // --- Facility maintenance ---
    if facility.is_high_tech() {
        cost_per_pyeong *= HIGH_TECH_SURCHARGE;
        breakdown.push("High-tech facility maintenance (+20%)".into());
    }

    let mut total_base = cost_per_pyeong * area_pyeong;

    // --- Labor and machinery ---
    let standard_labor_hours = crop.labor_hours_per_pyeong * area_pyeong;
    let mut labor_hours = standard_labor_hours;

    if hydroponic {
        labor_hours *= 1.0 - HYDROPONIC_LABOR_REDUCTION;
        breakdown.push("Hydroponic automation: labor hours halved".into());
    } else {
        for machine in &specs.machines {
            labor_hours *= 1.0 - labor_reduction(&machine.name);

            match machine.ownership {
                MachineOwnership::Rented => {
                    let days = (area_pyeong / AREA_PER_SERVICE_DAY).ceil().max(1.0);
                    let fee = RENTAL_RATE_PER_DAY * days;
                    total_base += fee;
                    breakdown.push(format!(
                        "{} rental ({} days): labor saved, fee {}₩",
                        machine.name,
                        days as u32,
                        won(fee)
                    ));
                }
                MachineOwnership::Owned => {
                    let per_pyeong = if machine.name.contains("tractor") {
                        OWNED_TRACTOR_FEE_PER_PYEONG
                    } else {
                        OWNED_MACHINE_FEE_PER_PYEONG
                    };
                    let fee = per_pyeong * area_pyeong;
                    total_base += fee;
                    breakdown.push(format!(
                        "{} owned: labor saved, depreciation/upkeep {}₩",
                        machine.name,
                        won(fee)
                    ));
                }
            }
        }
    }

    let labor_saving = (standard_labor_hours - labor_hours) * HOURLY_WAGE;
    if labor_saving > 0.0 {
        total_base -= labor_saving;
        breakdown.push(format!("Mechanization labor saving: -{}₩", won(labor_saving)));
    }

    // --- Heating energy ---
    let mut energy_cost = 0.0;
    if let (true, Some(target)) = (specs.heating, target_temp) {
        let region = specs.region.as_deref().unwrap_or(climate::BASELINE_REGION);
        let hdd = climate::heating_degree_days(region, planting, crop.days_to_maturity, target);
        debug!(region, hdd, target, "heating demand");

        if hdd > 0.0 {
            let mut u_value = thermal_loss_coefficient(facility);
            if specs.tunnel {
                u_value *= 0.8;
            }

            let surface_m2 = area_pyeong * PYEONG_M2 * ENVELOPE_FACTOR;
            let required_kwh = u_value * surface_m2 * 24.0 * hdd / 1000.0;
            energy_cost = required_kwh * PRICE_PER_KWH;

            breakdown.push(format!("Estimated heating energy: {} kWh", won(required_kwh)));
            breakdown.push(format!(
                "Heating cost (@{}₩/kWh): {}₩",
                won(PRICE_PER_KWH),
                won(energy_cost)
            ));
        }
    }

    CostProjection {
        base: total_base.round(),
        energy: energy_cost.round(),
        total: (total_base + energy_cost).round(),
        breakdown,
    }
}
