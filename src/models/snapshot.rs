use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Serialize;

use super::PricedPosition;
use crate::{
    app::calc,
    error::{Result, ValuationError},
};

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    positions: Vec<PricedPosition>,
    total_value: Decimal,
    total_cost_basis: Decimal,
    total_unrealized_pnl: Decimal,
    total_unrealized_pnl_percent: Option<Decimal>,
    unpriced_count: usize,
}

impl PortfolioSnapshot {
    /// Totals only cover priced positions; unpriced ones are kept for display.
    pub fn from_positions(positions: Vec<PricedPosition>) -> Result<Self> {
        let priced = || positions.iter().filter(|p| p.is_priced());

        let total_value = calc::checked_sum(
            priced().filter_map(|p| *p.current_value()),
            "portfolio value",
        )?;
        let total_cost_basis = calc::checked_sum(
            priced().map(|p| *p.cost_basis_value()),
            "portfolio cost basis",
        )?;
        let total_unrealized_pnl = total_value
            .checked_sub(total_cost_basis)
            .ok_or(ValuationError::Overflow("portfolio pnl"))?;
        let total_unrealized_pnl_percent =
            calc::gain_percent(total_unrealized_pnl, total_cost_basis)?;
        let unpriced_count = positions.iter().filter(|p| !p.is_priced()).count();

        Ok(Self {
            total_unrealized_pnl_percent,
            positions,
            total_value,
            total_cost_basis,
            total_unrealized_pnl,
            unpriced_count,
        })
    }

    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            total_value: Decimal::ZERO,
            total_cost_basis: Decimal::ZERO,
            total_unrealized_pnl: Decimal::ZERO,
            total_unrealized_pnl_percent: None,
            unpriced_count: 0,
        }
    }

    pub fn allocation_weight(&self, position: &PricedPosition) -> Decimal {
        match position.current_value() {
            Some(value) if position.is_priced() => calc::share_of(*value, self.total_value),
            _ => Decimal::ZERO,
        }
    }

    pub fn has_open_positions(&self) -> bool {
        self.positions.iter().any(|p| p.position().is_open())
    }
}
