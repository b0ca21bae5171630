use std::collections::BTreeMap;

use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

/// Rollup of many owners' snapshots for the admin view.
#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct FleetAggregate {
    total_users: usize,
    active_users: usize,
    aggregate_value: Decimal,
    aggregate_cost_basis: Decimal,
    total_positions: usize,
    unpriced_positions: usize,
    /// New positions per creation month, keyed `YYYY-MM`.
    positions_by_month: BTreeMap<String, usize>,
}

#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct DayChange {
    change: Decimal,
    change_percent: Option<Decimal>,
    covered_positions: usize,
}
