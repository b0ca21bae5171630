use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{calc, store::PositionStore};
use crate::{
    api::{PriceMap, PricingAdapter},
    config::ValuationConfig,
    error::{Result, ValuationError},
    models::{DayChange, FleetAggregate, PortfolioSnapshot, Position, PricedPosition},
};

/// Turns positions plus prices into snapshots and rollups. Holds no state
/// besides its config, so one instance can serve concurrent callers.
#[derive(Clone, Debug, Default)]
pub struct Valuator {
    config: ValuationConfig,
}

impl Valuator {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Prices `positions` through `adapter` and values them.
    ///
    /// The adapter is awaited exactly once; everything after that is synchronous.
    /// Dropping the returned future before completion produces no snapshot.
    pub async fn valuate<A>(&self, positions: &[Position], adapter: &A) -> Result<PortfolioSnapshot>
    where
        A: PricingAdapter + ?Sized,
    {
        let symbols = requested_symbols(positions);
        let prices = if symbols.is_empty() {
            PriceMap::new()
        } else {
            adapter.get_prices(&symbols).await?
        };

        self.valuate_with_prices(positions, &prices)
    }

    /// Synchronous core of [`Valuator::valuate`] for callers that already hold prices.
    pub fn valuate_with_prices(
        &self,
        positions: &[Position],
        prices: &PriceMap,
    ) -> Result<PortfolioSnapshot> {
        for position in positions {
            position.validate()?;
        }

        if *self.config.strict_pricing() {
            let missing: Vec<String> = requested_symbols(positions)
                .into_iter()
                .filter(|symbol| !prices.contains_key(symbol))
                .collect();
            if !missing.is_empty() {
                return Err(ValuationError::IncompletePricing { missing });
            }
        }

        let priced = positions
            .iter()
            .map(|position| match prices.get(position.symbol()) {
                Some(price) if *price < Decimal::ZERO => Err(ValuationError::InvalidPrice {
                    symbol: position.symbol().clone(),
                    price: *price,
                }),
                Some(price) => PricedPosition::with_price(position.clone(), *price),
                None => PricedPosition::without_price(position.clone()),
            })
            .collect::<Result<Vec<_>>>()?;

        let snapshot = PortfolioSnapshot::from_positions(priced)?;

        if *snapshot.unpriced_count() > 0 {
            let unpriced: Vec<&str> = snapshot
                .positions()
                .iter()
                .filter(|p| !p.is_priced())
                .map(|p| p.symbol())
                .collect();
            warn!(?unpriced, "positions left out of portfolio totals");
        }
        debug!(
            positions = snapshot.positions().len(),
            total_value = %snapshot.total_value(),
            "valuated portfolio"
        );

        Ok(snapshot)
    }

    /// Share of total value per symbol. Empty when the portfolio is worth nothing.
    pub fn allocation_weights(snapshot: &PortfolioSnapshot) -> BTreeMap<String, Decimal> {
        let mut weights = BTreeMap::new();
        if snapshot.total_value().is_zero() {
            return weights;
        }

        for position in snapshot.positions() {
            *weights
                .entry(position.symbol().to_string())
                .or_insert(Decimal::ZERO) += snapshot.allocation_weight(position);
        }

        weights
    }

    /// Rolls owner snapshots up into admin statistics.
    pub fn aggregate(snapshots: &BTreeMap<String, PortfolioSnapshot>) -> Result<FleetAggregate> {
        let active_users = snapshots
            .values()
            .filter(|snapshot| snapshot.has_open_positions())
            .count();
        let aggregate_value =
            calc::checked_sum(snapshots.values().map(|s| *s.total_value()), "fleet value")?;
        let aggregate_cost_basis = calc::checked_sum(
            snapshots.values().map(|s| *s.total_cost_basis()),
            "fleet cost basis",
        )?;
        let total_positions = snapshots.values().map(|s| s.positions().len()).sum();
        let unpriced_positions = snapshots.values().map(|s| *s.unpriced_count()).sum();

        let mut positions_by_month = BTreeMap::new();
        for position in snapshots.values().flat_map(|s| s.positions()) {
            if let Some(created_at) = position.position().created_at() {
                *positions_by_month
                    .entry(created_at.format("%Y-%m").to_string())
                    .or_insert(0) += 1;
            }
        }

        Ok(FleetAggregate::new(
            snapshots.len(),
            active_users,
            aggregate_value,
            aggregate_cost_basis,
            total_positions,
            unpriced_positions,
            positions_by_month,
        ))
    }

    /// Values every owner in `store` against a single price lookup.
    ///
    /// Owners share no state, so their snapshots are computed on the rayon pool.
    /// The calling task blocks until every owner is done; for very large fleets
    /// run this from a blocking-friendly context.
    ///
    /// With strict pricing every unpriced symbol across the fleet is reported at once.
    pub async fn valuate_fleet<A>(
        &self,
        store: &PositionStore,
        adapter: &A,
    ) -> Result<BTreeMap<String, PortfolioSnapshot>>
    where
        A: PricingAdapter + ?Sized,
    {
        let symbols: Vec<String> = store.symbols().into_iter().map(String::from).collect();
        let prices = if symbols.is_empty() {
            PriceMap::new()
        } else {
            adapter.get_prices(&symbols).await?
        };

        if *self.config.strict_pricing() {
            let missing: Vec<String> = symbols
                .into_iter()
                .filter(|symbol| !prices.contains_key(symbol))
                .collect();
            if !missing.is_empty() {
                return Err(ValuationError::IncompletePricing { missing });
            }
        }

        let owners: Vec<(&String, &[Position])> = store.iter().collect();
        let snapshots = owners
            .into_par_iter()
            .map(|(owner, positions)| -> Result<(String, PortfolioSnapshot)> {
                let snapshot = self.valuate_with_prices(positions, &prices)?;
                Ok((owner.clone(), snapshot))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        debug!(owners = snapshots.len(), "valuated fleet");
        Ok(snapshots)
    }

    /// Move since the previous close, over positions that have both prices.
    pub fn day_change(snapshot: &PortfolioSnapshot, previous_close: &PriceMap) -> Result<DayChange> {
        let mut change = Decimal::ZERO;
        let mut previous_value = Decimal::ZERO;
        let mut covered_positions = 0;

        for position in snapshot.positions() {
            let (Some(current), Some(previous)) =
                (position.current_value(), previous_close.get(position.symbol()))
            else {
                continue;
            };
            if *previous < Decimal::ZERO {
                return Err(ValuationError::InvalidPrice {
                    symbol: position.symbol().to_string(),
                    price: *previous,
                });
            }
            let before = calc::market_value(*position.position().quantity(), *previous)?;
            change = current
                .checked_sub(before)
                .and_then(|delta| change.checked_add(delta))
                .ok_or(ValuationError::Overflow("day change"))?;
            previous_value = previous_value
                .checked_add(before)
                .ok_or(ValuationError::Overflow("previous close value"))?;
            covered_positions += 1;
        }

        Ok(DayChange::new(
            change,
            calc::gain_percent(change, previous_value)?,
            covered_positions,
        ))
    }
}

/// Distinct symbols in first-seen order.
fn requested_symbols(positions: &[Position]) -> Vec<String> {
    let mut seen = HashSet::new();
    positions
        .iter()
        .filter(|p| seen.insert(p.symbol().as_str()))
        .map(|p| p.symbol().clone())
        .collect()
}
