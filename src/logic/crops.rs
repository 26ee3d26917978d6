//! Static crop growth catalog (Ref: RDA agricultural guide).

use crate::models::{CropProfile, PhRange, TempRange};

const CROPS: &[CropProfile] = &[
    CropProfile {
        name: "한지형 마늘",
        days_to_maturity: 240,
        base_yield_per_pyeong: 4.5,
        base_cost_per_pyeong: 15_000.0,
        labor_hours_per_pyeong: 0.6,
        optimal_temp: TempRange { min: 15.0, max: 20.0 },
        critical_low_temp: -7.0,
        optimal_ph: Some(PhRange { min: 6.0, max: 7.0 }),
        machines: &["tractor", "rotary", "mulcher"],
    },
    CropProfile {
        name: "배추 (가을)",
        days_to_maturity: 80,
        base_yield_per_pyeong: 35.0,
        base_cost_per_pyeong: 8_000.0,
        labor_hours_per_pyeong: 0.3,
        optimal_temp: TempRange { min: 18.0, max: 21.0 },
        critical_low_temp: 4.0,
        optimal_ph: Some(PhRange { min: 6.0, max: 6.8 }),
        machines: &["tractor", "transplanter"],
    },
    CropProfile {
        name: "노지 고추",
        days_to_maturity: 150,
        base_yield_per_pyeong: 8.0,
        base_cost_per_pyeong: 12_000.0,
        labor_hours_per_pyeong: 0.8,
        optimal_temp: TempRange { min: 25.0, max: 28.0 },
        critical_low_temp: 10.0,
        optimal_ph: Some(PhRange { min: 6.0, max: 6.5 }),
        machines: &["tractor", "transplanter", "dryer"],
    },
    CropProfile {
        name: "봄 감자",
        days_to_maturity: 100,
        base_yield_per_pyeong: 25.0,
        base_cost_per_pyeong: 10_000.0,
        labor_hours_per_pyeong: 0.4,
        optimal_temp: TempRange { min: 18.0, max: 23.0 },
        critical_low_temp: 5.0,
        // Acidic soil preferred (scab prevention)
        optimal_ph: Some(PhRange { min: 5.0, max: 6.0 }),
        machines: &["tractor", "potato_planter", "potato_harvester"],
    },
    CropProfile {
        name: "콩 (서리태)",
        days_to_maturity: 130,
        base_yield_per_pyeong: 0.8,
        base_cost_per_pyeong: 5_000.0,
        labor_hours_per_pyeong: 0.2,
        optimal_temp: TempRange { min: 20.0, max: 25.0 },
        critical_low_temp: 10.0,
        optimal_ph: Some(PhRange { min: 6.0, max: 7.0 }),
        machines: &["tractor", "seeder", "combine_harvester", "thresher"],
    },
    CropProfile {
        name: "고구마",
        days_to_maturity: 120,
        base_yield_per_pyeong: 15.0,
        base_cost_per_pyeong: 9_000.0,
        labor_hours_per_pyeong: 0.4,
        optimal_temp: TempRange { min: 22.0, max: 28.0 },
        critical_low_temp: 15.0,
        optimal_ph: None,
        machines: &["tractor", "sweet_potato_harvester"],
    },
    CropProfile {
        name: "양파",
        days_to_maturity: 230,
        base_yield_per_pyeong: 22.0,
        base_cost_per_pyeong: 14_000.0,
        labor_hours_per_pyeong: 0.5,
        optimal_temp: TempRange { min: 15.0, max: 20.0 },
        critical_low_temp: -5.0,
        optimal_ph: None,
        machines: &["tractor", "onion_transplanter", "onion_harvester"],
    },
    CropProfile {
        name: "대파",
        days_to_maturity: 180,
        base_yield_per_pyeong: 12.0,
        base_cost_per_pyeong: 11_000.0,
        labor_hours_per_pyeong: 0.5,
        optimal_temp: TempRange { min: 15.0, max: 20.0 },
        critical_low_temp: 0.0,
        optimal_ph: None,
        machines: &["tractor", "transplanter"],
    },
    CropProfile {
        name: "토마토",
        days_to_maturity: 100,
        base_yield_per_pyeong: 20.0,
        base_cost_per_pyeong: 18_000.0,
        labor_hours_per_pyeong: 1.5,
        optimal_temp: TempRange { min: 21.0, max: 25.0 },
        critical_low_temp: 10.0,
        optimal_ph: Some(PhRange { min: 6.0, max: 6.5 }),
        machines: &[],
    },
    CropProfile {
        name: "딸기",
        days_to_maturity: 150,
        base_yield_per_pyeong: 12.0,
        base_cost_per_pyeong: 20_000.0,
        labor_hours_per_pyeong: 2.0,
        optimal_temp: TempRange { min: 17.0, max: 23.0 },
        critical_low_temp: 5.0,
        optimal_ph: Some(PhRange { min: 5.5, max: 6.5 }),
        machines: &[],
    },
    CropProfile {
        name: "감귤",
        days_to_maturity: 180,
        base_yield_per_pyeong: 15.0,
        base_cost_per_pyeong: 15_000.0,
        labor_hours_per_pyeong: 1.0,
        optimal_temp: TempRange { min: 20.0, max: 25.0 },
        critical_low_temp: 3.0,
        optimal_ph: None,
        machines: &[],
    },
];

/// Look up a crop's growth parameters. Exact name first, then the first
/// catalog entry whose name is contained in the query, so
/// cultivar-qualified display names like "노지 고추 (청양)" still
/// resolve. `None` means the crop is unsupported, not an error.
pub fn lookup(name: &str) -> Option<&'static CropProfile> {
    CROPS
        .iter()
        .find(|c| c.name == name)
        .or_else(|| CROPS.iter().find(|c| name.contains(c.name)))
}

/// Machines commonly used for a crop; a bare tractor when the crop is
/// unknown or has no specific list.
pub fn machines_for(name: &str) -> &'static [&'static str] {
    match lookup(name) {
        Some(crop) if !crop.machines.is_empty() => crop.machines,
        _ => &["tractor"],
    }
}

/// All catalog entries, in catalog order.
pub fn all() -> &'static [CropProfile] {
    CROPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_exact_name() {
        let crop = lookup("노지 고추").unwrap();
        assert_eq!(crop.days_to_maturity, 150);
        assert_eq!(crop.base_yield_per_pyeong, 8.0);
    }

    #[test]
    fn lookup_cultivar_qualified_name() {
        let crop = lookup("노지 고추 (청양)").unwrap();
        assert_eq!(crop.name, "노지 고추");
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup("망고").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn machines_for_known_crop() {
        assert_eq!(
            machines_for("봄 감자"),
            &["tractor", "potato_planter", "potato_harvester"]
        );
    }

    #[test]
    fn machines_for_unknown_crop_defaults_to_tractor() {
        assert_eq!(machines_for("망고"), &["tractor"]);
        // Known crop without a specific list also falls back
        assert_eq!(machines_for("토마토"), &["tractor"]);
    }

    #[test]
    fn catalog_parameters_sane() {
        for crop in all() {
            assert!(crop.days_to_maturity > 0, "{}", crop.name);
            assert!(crop.base_yield_per_pyeong > 0.0, "{}", crop.name);
            assert!(crop.optimal_temp.min < crop.optimal_temp.max, "{}", crop.name);
            if let Some(ph) = crop.optimal_ph {
                assert!(ph.min < ph.max, "{}", crop.name);
            }
        }
    }
}
