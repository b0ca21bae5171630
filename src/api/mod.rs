pub mod base;
pub mod fmp;
pub mod fmp_dto;
pub mod simulated;
pub mod static_prices;
pub mod utils;

pub use base::{PriceMap, PricingAdapter};
pub use fmp::FmpPrices;
pub use simulated::SimulatedPrices;
pub use static_prices::StaticPrices;
