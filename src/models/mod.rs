pub mod fleet;
pub mod position;
pub mod priced_position;
pub mod snapshot;

pub use fleet::{DayChange, FleetAggregate};
pub use position::Position;
pub use priced_position::PricedPosition;
pub use snapshot::PortfolioSnapshot;
