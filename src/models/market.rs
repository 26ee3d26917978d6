use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical wholesale transaction from the market-ingestion
/// pipeline's per-crop series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    /// Unit price in KRW.
    pub price: f64,
}

/// A historical record that contributed to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyQuote {
    pub year: i32,
    pub date: NaiveDate,
    pub price: f64,
}

/// Predicted future unit price from same-calendar-window records of
/// prior years. `confidence` is 0.0 when no historical record qualified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePrediction {
    pub price: f64,
    /// 0.0 ..= 1.0
    pub confidence: f64,
    pub history: Vec<YearlyQuote>,
}

impl PricePrediction {
    /// Zero-confidence fallback used whenever historical data is
    /// unavailable or empty.
    pub fn unavailable() -> Self {
        Self {
            price: 0.0,
            confidence: 0.0,
            history: Vec::new(),
        }
    }
}
