pub mod valuation_service;

pub use valuation_service::{FleetReport, OwnerReport, ValuationService};
