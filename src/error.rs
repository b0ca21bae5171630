use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValuationError>;

#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid price {price} for symbol {symbol}")]
    InvalidPrice { symbol: String, price: Decimal },

    #[error("Incomplete pricing, no price for: {}", .missing.join(", "))]
    IncompletePricing { missing: Vec<String> },

    /// Raised by the pricing adapter itself and passed through untouched.
    #[error(transparent)]
    PricingAdapterFailure(#[from] anyhow::Error),

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}
