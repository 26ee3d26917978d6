//! Harvest date, yield quantity and quality-grade projection.

use crate::logic::coefficients::SimulationCoefficientSet;
use crate::models::{
    CropProfile, FacilitySpecs, FacilityType, HeightClass, QualityDistribution, YieldProjection,
};
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Regions whose climate shortens the growth period by 5 days.
const WARM_REGIONS: &[&str] = &["경북", "전남", "경남", "제주"];
/// Regions that extend it by 10 days.
const COLD_REGIONS: &[&str] = &["강원", "경기 북부"];

pub struct YieldEstimator<'a> {
    coeffs: &'a SimulationCoefficientSet,
}

impl<'a> YieldEstimator<'a> {
    pub fn new(coeffs: &'a SimulationCoefficientSet) -> Self {
        Self { coeffs }
    }

    /// Expected harvest date: the crop's maturity days compressed by the
    /// facility class, minus fixed reductions for heating and open-field
    /// tunnels, shifted by the regional offset. The final day count is
    /// floored before being added to the planting date.
    pub fn project_harvest_date(
        &self,
        planting: NaiveDate,
        crop: &CropProfile,
        facility: FacilityType,
        region: &str,
        specs: &FacilitySpecs,
    ) -> NaiveDate {
        let dr = &self.coeffs.date_reduction;
        let mut days = crop.days_to_maturity as f64;

        if facility.is_greenhouse() {
            days *= dr.greenhouse_factor;
        } else if facility.is_high_tech() {
            days *= dr.smart_farm_factor;
        }

        if specs.heating {
            days -= dr.heating;
        }
        // Tunnel reduction only applies to open-field cultivation
        if facility == FacilityType::OpenField && specs.tunnel {
            days -= dr.tunnel;
        }

        if WARM_REGIONS.iter().any(|r| region.contains(r)) {
            days -= 5.0;
        } else if COLD_REGIONS.iter().any(|r| region.contains(r)) {
            days += 10.0;
        }

        planting + Duration::days(days.floor() as i64)
    }

    /// Expected yield in kg: base yield for the area scaled by the
    /// product of all applicable multipliers. Factors compose
    /// multiplicatively and order-independently; new ones only need a
    /// new entry in the list.
    pub fn project_yield(
        &self,
        crop: &CropProfile,
        area_pyeong: f64,
        facility: FacilityType,
        specs: &FacilitySpecs,
    ) -> f64 {
        let base = crop.base_yield_per_pyeong * area_pyeong;
        let factors = self.yield_factors(facility, specs);

        let multiplier: f64 = factors.iter().map(|(_, f)| f).product();
        for (label, factor) in &factors {
            debug!(crop = crop.name, %label, factor, "yield factor");
        }

        (base * multiplier).round()
    }

    /// The ordered (label, factor) list behind [`project_yield`](Self::project_yield).
    pub fn yield_factors(
        &self,
        facility: FacilityType,
        specs: &FacilitySpecs,
    ) -> Vec<(&'static str, f64)> {
        let fm = &self.coeffs.facility;
        let sm = &self.coeffs.specs;

        let mut factors = vec![(
            "facility",
            match facility {
                FacilityType::OpenField => fm.open_field,
                FacilityType::SingleGreenhouse => fm.single_greenhouse,
                FacilityType::MultiGreenhouse => fm.multi_greenhouse,
                FacilityType::GlassGreenhouse => fm.glass_greenhouse,
                FacilityType::SmartFarm => fm.smart_farm,
            },
        )];

        // Structure height only pays off under covered cultivation
        if facility.is_greenhouse() || facility.is_high_tech() {
            match specs.height {
                Some(HeightClass::High) => factors.push(("height_high", sm.height_high)),
                Some(HeightClass::Medium) => factors.push(("height_medium", sm.height_medium)),
                _ => {}
            }
        }

        if specs.cultivation == crate::models::CultivationMethod::Hydroponics {
            factors.push(("hydroponics", sm.hydroponics));
        }
        if specs.heating {
            factors.push(("heating", sm.heating));
        }
        if facility == FacilityType::OpenField && specs.tunnel {
            factors.push(("tunnel", sm.tunnel));
        }

        factors
    }

    /// Full projection value object for the report layer.
    pub fn project(
        &self,
        planting: NaiveDate,
        crop: &CropProfile,
        area_pyeong: f64,
        facility: FacilityType,
        region: &str,
        specs: &FacilitySpecs,
    ) -> YieldProjection {
        YieldProjection {
            harvest_date: self.project_harvest_date(planting, crop, facility, region, specs),
            expected_yield: self.project_yield(crop, area_pyeong, facility, specs),
            quality: quality_distribution(facility),
        }
    }
}

/// Quality-grade split by facility type. Controlled environments push
/// fruit into the premium tiers; open field carries the largest
/// lowest-grade share.
pub fn quality_distribution(facility: FacilityType) -> QualityDistribution {
    match facility {
        FacilityType::GlassGreenhouse | FacilityType::SmartFarm => QualityDistribution {
            premium: 0.6,
            grade1: 0.3,
            grade2: 0.1,
            grade3: 0.0,
        },
        FacilityType::MultiGreenhouse => QualityDistribution {
            premium: 0.45,
            grade1: 0.35,
            grade2: 0.15,
            grade3: 0.05,
        },
        FacilityType::SingleGreenhouse => QualityDistribution {
            premium: 0.35,
            grade1: 0.35,
            grade2: 0.2,
            grade3: 0.1,
        },
        FacilityType::OpenField => QualityDistribution {
            premium: 0.2,
            grade1: 0.3,
            grade2: 0.3,
            grade3: 0.2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::crops;
    use crate::models::{CultivationMethod, Machine};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn coeffs() -> SimulationCoefficientSet {
        SimulationCoefficientSet::default()
    }

    #[test]
    fn open_field_no_specs_neutral_region_is_exact_maturity() {
        let c = coeffs();
        let est = YieldEstimator::new(&c);
        let crop = crops::lookup("노지 고추").unwrap();
        assert_eq!(crop.days_to_maturity, 150);

        let harvest = est.project_harvest_date(
            date(2025, 1, 1),
            crop,
            FacilityType::OpenField,
            "충청북도",
            &FacilitySpecs::default(),
        );
        assert_eq!(harvest, date(2025, 1, 1) + Duration::days(150));
    }

    #[test]
    fn greenhouse_compresses_growth_period() {
        let c = coeffs();
        let est = YieldEstimator::new(&c);
        let crop = crops::lookup("노지 고추").unwrap();

        let harvest = est.project_harvest_date(
            date(2025, 1, 1),
            crop,
            FacilityType::SingleGreenhouse,
            "충청북도",
            &FacilitySpecs::default(),
        );
        // 150 * 0.9 = 135
        assert_eq!(harvest, date(2025, 1, 1) + Duration::days(135));

        let harvest = est.project_harvest_date(
            date(2025, 1, 1),
            crop,
            FacilityType::SmartFarm,
            "충청북도",
            &FacilitySpecs::default(),
        );
        // 150 * 0.8 = 120
        assert_eq!(harvest, date(2025, 1, 1) + Duration::days(120));
    }

    #[test]
    fn heating_and_regional_offsets_shift_harvest() {
        let c = coeffs();
        let est = YieldEstimator::new(&c);
        let crop = crops::lookup("노지 고추").unwrap();
        let specs = FacilitySpecs {
            heating: true,
            ..Default::default()
        };

        // 150 - 20 (heating) - 5 (warm region)
        let harvest = est.project_harvest_date(
            date(2025, 1, 1),
            crop,
            FacilityType::OpenField,
            "경남 밀양시",
            &specs,
        );
        assert_eq!(harvest, date(2025, 1, 1) + Duration::days(125));

        // 150 + 10 (cold region)
        let harvest = est.project_harvest_date(
            date(2025, 1, 1),
            crop,
            FacilityType::OpenField,
            "강원 평창군",
            &FacilitySpecs::default(),
        );
        assert_eq!(harvest, date(2025, 1, 1) + Duration::days(160));
    }

    #[test]
    fn tunnel_reduction_only_for_open_field() {
        let c = coeffs();
        let est = YieldEstimator::new(&c);
        let crop = crops::lookup("노지 고추").unwrap();
        let specs = FacilitySpecs {
            tunnel: true,
            ..Default::default()
        };

        let open = est.project_harvest_date(
            date(2025, 1, 1),
            crop,
            FacilityType::OpenField,
            "충청북도",
            &specs,
        );
        assert_eq!(open, date(2025, 1, 1) + Duration::days(135));

        // Tunnel flag is ignored under glass
        let glass = est.project_harvest_date(
            date(2025, 1, 1),
            crop,
            FacilityType::GlassGreenhouse,
            "충청북도",
            &specs,
        );
        assert_eq!(glass, date(2025, 1, 1) + Duration::days(120));
    }

    #[test]
    fn fractional_compression_floors_final_day_count() {
        let mut tuned = coeffs();
        tuned.date_reduction.greenhouse_factor = 0.85;
        let est = YieldEstimator::new(&tuned);
        let pepper = crops::lookup("노지 고추").unwrap();

        // 150 * 0.85 = 127.5 -> floored to 127
        let harvest = est.project_harvest_date(
            date(2025, 1, 1),
            pepper,
            FacilityType::SingleGreenhouse,
            "충청북도",
            &FacilitySpecs::default(),
        );
        assert_eq!(harvest, date(2025, 1, 1) + Duration::days(127));
    }

    #[test]
    fn yield_composes_multiplicatively() {
        let c = coeffs();
        let est = YieldEstimator::new(&c);
        let crop = crops::lookup("토마토").unwrap();
        let specs = FacilitySpecs {
            cultivation: CultivationMethod::Hydroponics,
            heating: true,
            height: Some(HeightClass::High),
            machines: vec![Machine::owned("tractor")],
            ..Default::default()
        };

        // 20 kg/pyeong * 100 pyeong * 3.5 * 1.3 * 1.5 * 1.2
        let expected = (20.0 * 100.0 * 3.5 * 1.3 * 1.5 * 1.2_f64).round();
        assert_eq!(
            est.project_yield(crop, 100.0, FacilityType::SmartFarm, &specs),
            expected
        );
    }

    #[test]
    fn height_multiplier_ignored_in_open_field() {
        let c = coeffs();
        let est = YieldEstimator::new(&c);
        let crop = crops::lookup("토마토").unwrap();
        let specs = FacilitySpecs {
            height: Some(HeightClass::High),
            ..Default::default()
        };

        assert_eq!(
            est.project_yield(crop, 50.0, FacilityType::OpenField, &specs),
            est.project_yield(crop, 50.0, FacilityType::OpenField, &FacilitySpecs::default()),
        );
    }

    #[test]
    fn yield_non_decreasing_in_area() {
        let c = coeffs();
        let est = YieldEstimator::new(&c);
        let crop = crops::lookup("봄 감자").unwrap();
        let specs = FacilitySpecs::default();

        let mut prev = 0.0;
        for area in [1.0, 10.0, 100.0, 500.0, 1000.0] {
            let y = est.project_yield(crop, area, FacilityType::SingleGreenhouse, &specs);
            assert!(y >= prev, "yield decreased at {} pyeong", area);
            prev = y;
        }
    }

    #[test]
    fn quality_fractions_sum_to_one_for_every_facility() {
        for facility in [
            FacilityType::OpenField,
            FacilityType::SingleGreenhouse,
            FacilityType::MultiGreenhouse,
            FacilityType::GlassGreenhouse,
            FacilityType::SmartFarm,
        ] {
            let q = quality_distribution(facility);
            assert!(
                (q.total() - 1.0).abs() < 1e-9,
                "{:?} sums to {}",
                facility,
                q.total()
            );
        }
    }

    #[test]
    fn quality_skew_matches_facility_class() {
        let glass = quality_distribution(FacilityType::GlassGreenhouse);
        let open = quality_distribution(FacilityType::OpenField);
        assert!(glass.premium > open.premium);
        assert!(open.grade3 > glass.grade3);
    }
}
