//! Regional climate lookup and heating degree-day integration.
//!
//! Monthly mean temperatures (°C, Jan-Dec) from KMA 30-year normals.
//! The walk over a cultivation period approximates months as 30-day
//! blocks; that is the resolution of the source table.

/// Region every unknown location falls back to.
pub const BASELINE_REGION: &str = "서울/경기";

const REGIONAL_TEMPS: &[(&str, [f64; 12])] = &[
    (
        "서울/경기",
        [-2.4, 0.4, 5.7, 12.5, 17.8, 22.2, 24.9, 25.7, 21.2, 14.8, 7.2, 0.4],
    ),
    (
        "강원 (영서)",
        [-5.0, -2.0, 4.0, 11.0, 16.5, 21.0, 24.0, 24.5, 19.5, 12.5, 5.0, -2.0],
    ),
    (
        "강원 (영동)",
        [0.5, 2.5, 7.0, 13.0, 17.5, 21.0, 24.5, 25.0, 20.5, 15.5, 9.0, 3.0],
    ),
    (
        "충청북도",
        [-2.0, 0.5, 6.0, 13.0, 18.5, 22.5, 25.0, 25.5, 20.5, 14.0, 6.5, -0.5],
    ),
    (
        "충청남도",
        [-1.0, 1.0, 6.0, 12.5, 18.0, 22.0, 25.0, 25.5, 21.0, 14.5, 7.5, 1.0],
    ),
    (
        "전라북도",
        [0.0, 2.0, 7.0, 13.0, 18.5, 22.5, 25.5, 26.0, 21.5, 15.5, 8.5, 2.0],
    ),
    (
        "전라남도",
        [2.0, 4.0, 8.5, 14.0, 19.0, 22.5, 26.0, 26.5, 22.5, 17.0, 10.5, 4.5],
    ),
    (
        "경상북도",
        [0.0, 2.5, 7.5, 13.5, 18.5, 22.0, 25.5, 26.0, 21.0, 15.0, 8.5, 2.0],
    ),
    (
        "경상남도",
        [3.0, 5.0, 9.5, 14.5, 19.5, 23.0, 26.0, 26.5, 22.5, 17.5, 11.0, 5.5],
    ),
    (
        "제주도",
        [6.0, 7.0, 10.0, 15.0, 19.0, 22.5, 26.5, 27.5, 24.0, 19.0, 13.5, 8.5],
    ),
];

/// Exact table key match.
fn exact_match(region: &str) -> Option<&'static [f64; 12]> {
    REGIONAL_TEMPS
        .iter()
        .find(|(key, _)| *key == region)
        .map(|(_, temps)| temps)
}

/// Fuzzy phase: first table entry whose two leading characters appear
/// in the query, so "경기도 이천시" resolves via "서울/경기" failing the
/// exact phase only when no key's province prefix is present.
fn fuzzy_match(region: &str) -> Option<&'static [f64; 12]> {
    REGIONAL_TEMPS
        .iter()
        .find(|(key, _)| {
            let prefix: String = key.chars().take(2).collect();
            region.contains(&prefix)
        })
        .map(|(_, temps)| temps)
}

/// Monthly mean temperatures for a region, Jan-Dec. Unknown regions
/// fall back to the mild 서울/경기 baseline; this never fails and always
/// returns 12 values.
pub fn monthly_temperatures(region: &str) -> &'static [f64; 12] {
    exact_match(region)
        .or_else(|| fuzzy_match(region))
        .unwrap_or_else(|| {
            exact_match(BASELINE_REGION).expect("baseline region present in table")
        })
}

/// Days-weighted mean outdoor temperature over a cultivation period,
/// walking forward from the planting month in 30-day blocks.
///
/// `duration_days` must be positive; a zero-length period has no mean.
pub fn average_temperature(
    region: &str,
    start: chrono::NaiveDate,
    duration_days: u32,
) -> f64 {
    use chrono::Datelike;

    let temps = monthly_temperatures(region);
    let mut month = start.month0() as usize;
    let mut days_remaining = duration_days as i64;
    let mut weighted_sum = 0.0;
    let mut total_days = 0.0;

    while days_remaining > 0 {
        let block_days = days_remaining.min(30) as f64;
        weighted_sum += temps[month % 12] * block_days;
        total_days += block_days;
        days_remaining -= 30;
        month += 1;
    }

    weighted_sum / total_days
}

/// Heating degree-days over a cultivation period: per 30-day block,
/// `target - monthly_avg` counted only when positive. Warm months earn
/// no credit, so the result is ≥ 0 and non-decreasing in duration.
pub fn heating_degree_days(
    region: &str,
    start: chrono::NaiveDate,
    duration_days: u32,
    target_temp: f64,
) -> f64 {
    use chrono::Datelike;

    let temps = monthly_temperatures(region);
    let mut month = start.month0() as usize;
    let mut days_remaining = duration_days as i64;
    let mut degree_days = 0.0;

    while days_remaining > 0 {
        let ambient = temps[month % 12];
        let diff = target_temp - ambient;
        if diff > 0.0 {
            let block_days = days_remaining.min(30) as f64;
            degree_days += diff * block_days;
        }
        days_remaining -= 30;
        month += 1;
    }

    degree_days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn exact_match_finds_table_key() {
        assert_eq!(exact_match("제주도"), Some(monthly_temperatures("제주도")));
        assert!(exact_match("제주").is_none());
    }

    #[test]
    fn fuzzy_match_on_leading_characters() {
        // "제주시 애월읍" contains the leading "제주" of "제주도"
        let jeju = monthly_temperatures("제주도");
        assert_eq!(fuzzy_match("제주시 애월읍"), Some(jeju));
        assert!(fuzzy_match("부산광역시").is_none());
    }

    #[test]
    fn unknown_region_falls_back_to_baseline() {
        let baseline = monthly_temperatures(BASELINE_REGION);
        assert_eq!(monthly_temperatures("부산광역시"), baseline);
        assert_eq!(monthly_temperatures(""), baseline);
    }

    #[test]
    fn every_region_has_twelve_months() {
        for (key, temps) in REGIONAL_TEMPS {
            assert_eq!(temps.len(), 12, "region {} incomplete", key);
        }
    }

    #[test]
    fn average_temperature_single_month() {
        // 30 days starting Jan 1 stays inside January
        let avg = average_temperature("서울/경기", date(2025, 1, 1), 30);
        assert!((avg - (-2.4)).abs() < 1e-9);
    }

    #[test]
    fn average_temperature_weights_partial_blocks() {
        // 40 days: 30 days of Jan (-2.4) + 10 days of Feb (0.4)
        let avg = average_temperature("서울/경기", date(2025, 1, 1), 40);
        let expected = (-2.4 * 30.0 + 0.4 * 10.0) / 40.0;
        assert!((avg - expected).abs() < 1e-9);
    }

    #[test]
    fn heating_degree_days_never_negative() {
        // Jeju summer is warmer than an 8°C target everywhere
        let hdd = heating_degree_days("제주도", date(2025, 7, 1), 60, 8.0);
        assert_eq!(hdd, 0.0);
    }

    #[test]
    fn heating_degree_days_winter_block() {
        // One 30-day January block in Seoul at 18°C target
        let hdd = heating_degree_days("서울/경기", date(2025, 1, 1), 30, 18.0);
        assert!((hdd - (18.0 - (-2.4)) * 30.0).abs() < 1e-9);
    }

    #[test]
    fn heating_degree_days_monotonic_in_duration() {
        let start = date(2025, 10, 1);
        let mut prev = 0.0;
        for days in [30, 60, 90, 120, 150, 240] {
            let hdd = heating_degree_days("강원 (영서)", start, days, 15.0);
            assert!(hdd >= prev, "HDD decreased at {} days", days);
            prev = hdd;
        }
    }

    #[test]
    fn warm_months_earn_no_credit() {
        // Whole year at a target below the summer peak: equals the sum
        // of only the deficit months
        let whole_year = heating_degree_days("서울/경기", date(2025, 1, 1), 360, 10.0);
        let manual: f64 = monthly_temperatures("서울/경기")
            .iter()
            .map(|t| (10.0 - t).max(0.0) * 30.0)
            .sum();
        assert!((whole_year - manual).abs() < 1e-9);
    }
}
