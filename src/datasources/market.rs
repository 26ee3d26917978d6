use crate::error::{Result, SoilLabError};
use crate::models::PriceRecord;
use std::collections::BTreeMap;

/// Client for the market-ingestion pipeline's per-crop historical price
/// series. The pipeline publishes one date-keyed JSON document per
/// crop/market/unit combination.
pub struct MarketHistoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl MarketHistoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the historical series for one crop. Records come back in
    /// ascending date order.
    pub async fn fetch_history(
        &self,
        crop: &str,
        market: &str,
        unit: &str,
    ) -> Result<Vec<PriceRecord>> {
        let url = format!(
            "{}/history/{}.json",
            self.base_url.trim_end_matches('/'),
            crop
        );

        let response = self
            .client
            .get(&url)
            .query(&[("market", market), ("unit", unit)])
            .send()
            .await
            .map_err(|e| {
                SoilLabError::DataSourceUnavailable(format!("Market history: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(SoilLabError::DataSourceUnavailable(format!(
                "Market history returned {} for {}",
                response.status(),
                crop
            )));
        }

        let series: BTreeMap<chrono::NaiveDate, f64> = response.json().await.map_err(|e| {
            SoilLabError::DataSourceUnavailable(format!(
                "Failed to parse market history response: {}",
                e
            ))
        })?;

        Ok(series
            .into_iter()
            .map(|(date, price)| PriceRecord { date, price })
            .collect())
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));
        let response = self.client.get(&url).send().await.map_err(|e| {
            SoilLabError::DataSourceUnavailable(format!("Market history: {}", e))
        })?;

        Ok(response.status().is_success())
    }
}
