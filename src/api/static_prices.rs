use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::Reader;
use rust_decimal::Decimal;

use super::base::{PriceMap, PricingAdapter};
use crate::app::utils::parse_decimal;

/// Fixed price table, e.g. an end-of-day export.
#[derive(Clone, Debug, Default)]
pub struct StaticPrices {
    prices: PriceMap,
}

impl StaticPrices {
    pub fn new(prices: PriceMap) -> Self {
        Self { prices }
    }

    /// Reads `symbol,price` rows (with header).
    pub fn from_csv(path: &str) -> Result<Self> {
        let mut reader = Reader::from_path(path)
            .with_context(|| format!("Failed to open price file at path: {}", path))?;
        let mut prices = PriceMap::new();

        for (row_idx, record) in reader.records().enumerate() {
            let rec = record
                .with_context(|| format!("Failed to read price record at row {}", row_idx + 1))?;

            if rec.len() < 2 {
                anyhow::bail!(
                    "Invalid price file at row {}: expected 2 columns, found {}",
                    row_idx + 1,
                    rec.len()
                );
            }

            let price = parse_decimal(rec[1].trim(), "price")
                .with_context(|| format!("Row {}", row_idx + 1))?;
            prices.insert(rec[0].trim().to_string(), price);
        }

        Ok(Self { prices })
    }

    pub fn insert(&mut self, symbol: impl Into<String>, price: Decimal) {
        self.prices.insert(symbol.into(), price);
    }

    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }
}

#[async_trait]
impl PricingAdapter for StaticPrices {
    async fn get_prices(&self, symbols: &[String]) -> Result<PriceMap> {
        self.prices.get_prices(symbols).await
    }
}
