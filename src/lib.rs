pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

#[cfg(test)]
mod test;

pub use api::{PriceMap, PricingAdapter};
pub use app::{PositionStore, Valuator};
pub use config::{AppConfig, ValuationConfig};
pub use error::{Result, ValuationError};
pub use models::{DayChange, FleetAggregate, PortfolioSnapshot, Position, PricedPosition};
