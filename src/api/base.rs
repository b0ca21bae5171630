use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

pub type PriceMap = HashMap<String, Decimal>;

/// Source of current market prices.
///
/// Implementations return whatever they could price; a symbol missing from the
/// map means "no price", never zero. An `Err` means the source itself failed.
#[async_trait]
pub trait PricingAdapter: Send + Sync {
    async fn get_prices(&self, symbols: &[String]) -> Result<PriceMap>;
}

#[async_trait]
impl PricingAdapter for PriceMap {
    async fn get_prices(&self, symbols: &[String]) -> Result<PriceMap> {
        Ok(symbols
            .iter()
            .filter_map(|symbol| self.get(symbol).map(|price| (symbol.clone(), *price)))
            .collect())
    }
}
