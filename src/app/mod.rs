pub mod calc;
pub mod import;
pub mod store;
pub mod utils;
pub mod valuation;

pub use store::PositionStore;
pub use valuation::Valuator;
