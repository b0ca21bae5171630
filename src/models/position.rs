use chrono::{DateTime, Utc};
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValuationError};

#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", try_from = "PositionRecord")]
pub struct Position {
    owner_id: String,
    symbol: String,
    quantity: Decimal,
    average_cost: Decimal,
    created_at: Option<DateTime<Utc>>,
}

impl Position {
    /// Builds a validated holding. A zero average cost is accepted (gifted shares)
    /// and only makes the gain percent undefined downstream.
    pub fn new(
        owner_id: impl Into<String>,
        symbol: impl Into<String>,
        quantity: Decimal,
        average_cost: Decimal,
    ) -> Result<Self> {
        let position = Self {
            owner_id: owner_id.into(),
            symbol: symbol.into(),
            quantity,
            average_cost,
            created_at: None,
        };
        position.validate()?;
        Ok(position)
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Returns the replacement holding after a trade; the original is left as is.
    pub fn superseded_by(&self, quantity: Decimal, average_cost: Decimal) -> Result<Self> {
        let mut next = self.clone();
        next.quantity = quantity;
        next.average_cost = average_cost;
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(ValuationError::InvalidPosition(format!(
                "empty symbol for owner '{}'",
                self.owner_id
            )));
        }
        if self.quantity < Decimal::ZERO {
            return Err(ValuationError::InvalidPosition(format!(
                "negative quantity {} for {}",
                self.quantity, self.symbol
            )));
        }
        if self.average_cost < Decimal::ZERO {
            return Err(ValuationError::InvalidPosition(format!(
                "negative average cost {} for {}",
                self.average_cost, self.symbol
            )));
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !self.quantity.is_zero()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionRecord {
    owner_id: String,
    symbol: String,
    quantity: Decimal,
    average_cost: Decimal,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<PositionRecord> for Position {
    type Error = ValuationError;

    fn try_from(record: PositionRecord) -> Result<Self> {
        let position = Position::new(
            record.owner_id,
            record.symbol,
            record.quantity,
            record.average_cost,
        )?;
        Ok(match record.created_at {
            Some(created_at) => position.with_created_at(created_at),
            None => position,
        })
    }
}
