use std::sync::Mutex;

use anyhow::{Error, Result};
use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rust_decimal_macros::dec;
use tracing::warn;

use super::base::{PriceMap, PricingAdapter};
use crate::models::Position;

/// Stand-in market feed: every call perturbs each base price by a uniform
/// random drift in `[-max_drift, +max_drift]`.
#[derive(Debug)]
pub struct SimulatedPrices {
    base_prices: PriceMap,
    max_drift: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedPrices {
    pub fn new(base_prices: PriceMap, max_drift: Decimal, seed: Option<u64>) -> Result<Self> {
        if max_drift < Decimal::ZERO || max_drift > dec!(1) {
            return Err(Error::msg(format!(
                "Simulated drift must be between 0 and 1, got {}",
                max_drift
            )));
        }
        let max_drift = max_drift
            .to_f64()
            .ok_or_else(|| Error::msg("Failed to convert drift to f64"))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            base_prices,
            max_drift,
            rng: Mutex::new(rng),
        })
    }

    /// Seeds the simulation with each symbol's average cost, like the dashboard mock.
    pub fn from_cost_basis<'a, I>(positions: I, max_drift: Decimal, seed: Option<u64>) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Position>,
    {
        let mut base_prices = PriceMap::new();
        for position in positions {
            base_prices
                .entry(position.symbol().clone())
                .or_insert(*position.average_cost());
        }
        Self::new(base_prices, max_drift, seed)
    }
}

#[async_trait]
impl PricingAdapter for SimulatedPrices {
    async fn get_prices(&self, symbols: &[String]) -> Result<PriceMap> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::msg("Simulated price generator is poisoned"))?;
        let mut prices = PriceMap::new();

        for symbol in symbols {
            let Some(base) = self.base_prices.get(symbol) else {
                continue;
            };
            let drift = rng.gen_range(-self.max_drift..=self.max_drift);
            let factor = Decimal::from_f64(1.0 + drift)
                .ok_or_else(|| Error::msg(format!("Invalid drift factor for {}", symbol)))?;
            match base.checked_mul(factor) {
                Some(price) => {
                    prices.insert(symbol.clone(), price.round_dp(4));
                }
                None => warn!(symbol = %symbol, base = %base, "simulated price overflowed"),
            }
        }

        Ok(prices)
    }
}
