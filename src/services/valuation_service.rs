use std::{collections::BTreeMap, sync::Arc};

use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    api::{PriceMap, PricingAdapter},
    app::{PositionStore, Valuator},
    error::Result,
    models::{DayChange, FleetAggregate, PortfolioSnapshot},
};

#[derive(Clone, Debug, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReport {
    owner_id: String,
    snapshot: PortfolioSnapshot,
    allocation: BTreeMap<String, Decimal>,
    day_change: Option<DayChange>,
}

#[derive(Clone, Debug, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    aggregate: FleetAggregate,
    snapshots: BTreeMap<String, PortfolioSnapshot>,
}

pub struct ValuationService {
    valuator: Valuator,
    adapter: Arc<dyn PricingAdapter>,
}

impl ValuationService {
    pub fn new(valuator: Valuator, adapter: Arc<dyn PricingAdapter>) -> Self {
        Self { valuator, adapter }
    }

    pub async fn owner_report(
        &self,
        store: &PositionStore,
        owner_id: &str,
        previous_close: Option<&PriceMap>,
    ) -> Result<OwnerReport> {
        let snapshot = self
            .valuator
            .valuate(store.positions_for(owner_id), self.adapter.as_ref())
            .await?;
        let allocation = Valuator::allocation_weights(&snapshot);
        let day_change = previous_close
            .map(|previous| Valuator::day_change(&snapshot, previous))
            .transpose()?;

        Ok(OwnerReport {
            owner_id: owner_id.to_string(),
            snapshot,
            allocation,
            day_change,
        })
    }

    pub async fn fleet_report(&self, store: &PositionStore) -> Result<FleetReport> {
        let snapshots = self
            .valuator
            .valuate_fleet(store, self.adapter.as_ref())
            .await?;
        let aggregate = Valuator::aggregate(&snapshots)?;

        Ok(FleetReport {
            aggregate,
            snapshots,
        })
    }
}
