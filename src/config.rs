use std::time::Duration;

use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::app::utils::{parse_bool, parse_decimal};

const DEFAULT_PRICE_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, Default, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ValuationConfig {
    /// Fail with `IncompletePricing` instead of reporting unpriced positions.
    strict_pricing: bool,
}

impl ValuationConfig {
    pub fn strict() -> Self {
        Self {
            strict_pricing: true,
        }
    }
}

#[derive(Clone, Debug, Getters)]
pub struct AppConfig {
    valuation: ValuationConfig,
    fmp_api_key: Option<String>,
    price_timeout: Duration,
    simulated_max_drift: Decimal,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strict_pricing = match lookup("STRICT_PRICING") {
            Some(value) => parse_bool(&value, "STRICT_PRICING")?,
            None => false,
        };

        let price_timeout = match lookup("PRICE_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(
                value
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("Failed to parse PRICE_TIMEOUT_SECS '{}'", value))?,
            ),
            None => Duration::from_secs(DEFAULT_PRICE_TIMEOUT_SECS),
        };

        let simulated_max_drift = match lookup("SIMULATED_MAX_DRIFT") {
            Some(value) => parse_decimal(value.trim(), "SIMULATED_MAX_DRIFT")?,
            None => dec!(0.05),
        };

        Ok(Self {
            valuation: ValuationConfig::new(strict_pricing),
            fmp_api_key: lookup("FMP_API_KEY").filter(|key| !key.trim().is_empty()),
            price_timeout,
            simulated_max_drift,
        })
    }

    pub fn with_strict_pricing(mut self, strict_pricing: bool) -> Self {
        self.valuation = ValuationConfig::new(strict_pricing);
        self
    }
}
