//! Future unit price prediction from historical transaction series.
//!
//! For each of the past five years the series is searched for a record
//! in the same calendar month whose day-of-month is nearest the
//! target's; a yearly record only counts when it lands within a week.
//! The prediction is the unweighted mean of the qualifying years.

use crate::datasources::MarketHistoryClient;
use crate::models::{PricePrediction, PriceRecord, YearlyQuote};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

const LOOKBACK_YEARS: i32 = 5;
const MAX_DAY_GAP: i64 = 7;
const BASE_CONFIDENCE: f64 = 0.8;

pub struct PriceOracle {
    client: MarketHistoryClient,
}

impl PriceOracle {
    pub fn new(client: MarketHistoryClient) -> Self {
        Self { client }
    }

    /// Predict the unit price at `target_date`. Historical data being
    /// unavailable is not an error: the caller gets the zero-confidence
    /// fallback and decides how to render it.
    pub async fn predict(
        &self,
        crop: &str,
        market: &str,
        unit: &str,
        target_date: NaiveDate,
    ) -> PricePrediction {
        match self.client.fetch_history(crop, market, unit).await {
            Ok(records) => predict_from_history(&records, target_date),
            Err(e) => {
                warn!(crop, market, "Historical price data unavailable: {}", e);
                PricePrediction::unavailable()
            }
        }
    }
}

/// Pure prediction over an already-fetched series.
pub fn predict_from_history(records: &[PriceRecord], target_date: NaiveDate) -> PricePrediction {
    let mut history: Vec<YearlyQuote> = Vec::new();

    for years_back in 1..=LOOKBACK_YEARS {
        let year = target_date.year() - years_back;

        let nearest = records
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == target_date.month())
            .min_by_key(|r| (r.date.day() as i64 - target_date.day() as i64).abs());

        if let Some(record) = nearest {
            let gap = (record.date.day() as i64 - target_date.day() as i64).abs();
            if gap <= MAX_DAY_GAP {
                history.push(YearlyQuote {
                    year,
                    date: record.date,
                    price: record.price,
                });
            } else {
                debug!(year, gap, "nearest record outside the weekly window");
            }
        }
    }

    if history.is_empty() {
        return PricePrediction::unavailable();
    }

    let price = history.iter().map(|q| q.price).sum::<f64>() / history.len() as f64;

    PricePrediction {
        price,
        confidence: BASE_CONFIDENCE,
        history,
    }
}
