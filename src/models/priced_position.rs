use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Position;
use crate::{
    app::calc,
    error::{Result, ValuationError},
};

/// A position annotated with the price it was valued at. Value fields are `None`
/// when no price was available.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedPosition {
    #[serde(flatten)]
    position: Position,
    priced: bool,
    current_price: Option<Decimal>,
    current_value: Option<Decimal>,
    cost_basis_value: Decimal,
    unrealized_pnl: Option<Decimal>,
    unrealized_pnl_percent: Option<Decimal>,
}

impl PricedPosition {
    pub fn with_price(position: Position, current_price: Decimal) -> Result<Self> {
        let current_value = calc::market_value(*position.quantity(), current_price)?;
        let cost_basis_value = calc::market_value(*position.quantity(), *position.average_cost())?;
        let unrealized_pnl = current_value
            .checked_sub(cost_basis_value)
            .ok_or(ValuationError::Overflow("unrealized pnl"))?;
        let unrealized_pnl_percent = calc::percent_change(*position.average_cost(), current_price)?;

        Ok(Self {
            position,
            priced: true,
            current_price: Some(current_price),
            current_value: Some(current_value),
            cost_basis_value,
            unrealized_pnl: Some(unrealized_pnl),
            unrealized_pnl_percent,
        })
    }

    pub fn without_price(position: Position) -> Result<Self> {
        let cost_basis_value = calc::market_value(*position.quantity(), *position.average_cost())?;

        Ok(Self {
            position,
            priced: false,
            current_price: None,
            current_value: None,
            cost_basis_value,
            unrealized_pnl: None,
            unrealized_pnl_percent: None,
        })
    }

    pub fn is_priced(&self) -> bool {
        self.priced
    }

    pub fn symbol(&self) -> &str {
        self.position.symbol()
    }
}
