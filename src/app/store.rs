use std::collections::{BTreeMap, BTreeSet};

use crate::models::Position;

/// Read-only holdings grouped by owner, each owner's positions kept in input order.
#[derive(Clone, Debug, Default)]
pub struct PositionStore {
    by_owner: BTreeMap<String, Vec<Position>>,
}

impl PositionStore {
    pub fn new(positions: Vec<Position>) -> Self {
        let mut by_owner: BTreeMap<String, Vec<Position>> = BTreeMap::new();
        for position in positions {
            by_owner
                .entry(position.owner_id().clone())
                .or_default()
                .push(position);
        }
        Self { by_owner }
    }

    /// Registers owners that may hold nothing, so they still count as users.
    pub fn with_owners<I, S>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for owner in owners {
            self.by_owner.entry(owner.into()).or_default();
        }
        self
    }

    pub fn positions_for(&self, owner_id: &str) -> &[Position] {
        self.by_owner
            .get(owner_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn owners(&self) -> impl Iterator<Item = &String> {
        self.by_owner.keys()
    }

    pub fn contains_owner(&self, owner_id: &str) -> bool {
        self.by_owner.contains_key(owner_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &[Position])> {
        self.by_owner
            .iter()
            .map(|(owner, positions)| (owner, positions.as_slice()))
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.by_owner.values().flatten()
    }

    /// Distinct symbols across every owner, sorted.
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.positions().map(|p| p.symbol().as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.by_owner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
