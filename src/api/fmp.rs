use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{
    base::{PriceMap, PricingAdapter},
    fmp_dto::FmpQuoteDto,
    utils::{make_request, parse_response_array},
};

const BASE_URL: &str = "https://financialmodelingprep.com/stable";

pub async fn get_quote(
    symbol: &str,
    client: &Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<FmpQuoteDto>> {
    let params = [("symbol", symbol), ("apikey", api_key)];
    let res = make_request(client, base_url, "quote", &params).await?;
    parse_response_array::<FmpQuoteDto>(res, &format!("No FMP quote for symbol {}", symbol))
}

/// Financial Modeling Prep quote feed. One request per symbol, all in flight
/// at once, each bounded by `timeout`.
#[derive(Clone, Debug)]
pub struct FmpPrices {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl FmpPrices {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn latest_price(&self, symbol: &str) -> Result<Decimal> {
        let quotes = get_quote(symbol, &self.client, &self.base_url, &self.api_key)
            .await
            .with_context(|| format!("FMP ({})", symbol))?;
        let first = quotes
            .first()
            .with_context(|| format!("FMP ({}): Failed to get first entry", symbol))?;
        Ok(*first.price())
    }
}

#[async_trait]
impl PricingAdapter for FmpPrices {
    async fn get_prices(&self, symbols: &[String]) -> Result<PriceMap> {
        let requests = symbols.iter().map(|symbol| async move {
            let outcome = tokio::time::timeout(self.timeout, self.latest_price(symbol)).await;
            (symbol, outcome)
        });

        let mut prices = PriceMap::new();
        let mut errors = Vec::new();

        for (symbol, outcome) in join_all(requests).await {
            match outcome {
                Ok(Ok(price)) => {
                    prices.insert(symbol.clone(), price);
                }
                Ok(Err(err)) => {
                    warn!(symbol = %symbol, error = %err, "price lookup failed");
                    errors.push(err);
                }
                Err(_) => {
                    warn!(symbol = %symbol, timeout = ?self.timeout, "price lookup timed out");
                }
            }
        }

        if !symbols.is_empty() && errors.len() == symbols.len() {
            let first = errors.swap_remove(0);
            return Err(first.context(format!("All {} FMP price lookups failed", symbols.len())));
        }

        debug!(requested = symbols.len(), priced = prices.len(), "fetched FMP prices");
        Ok(prices)
    }
}
