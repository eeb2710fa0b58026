use std::collections::BTreeMap;

use serde::Serialize;

use larder_core::{MaterialCode, MaterialKind};

use crate::order::ProcessedOrder;

/// How many units of each material a batch of orders consumed.
///
/// Backed by a `BTreeMap` so iteration (and therefore printing and ledger warnings)
/// is ordered by code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ConsumptionCounts(BTreeMap<MaterialCode, u64>);

impl ConsumptionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten code lists and count occurrences.
    pub fn tally<'a, I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = &'a MaterialCode>,
    {
        let mut counts = Self::new();
        for code in lists.into_iter().flatten() {
            counts.add(code.clone(), 1);
        }
        counts
    }

    /// Tally the packaging or stock lists of processed orders.
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a ProcessedOrder>, kind: MaterialKind) -> Self {
        Self::tally(orders.into_iter().map(|order| match kind {
            MaterialKind::Packaging => &order.packaging_used,
            MaterialKind::Stock => &order.stock_used,
        }))
    }

    pub fn add(&mut self, code: MaterialCode, count: u64) {
        *self.0.entry(code).or_insert(0) += count;
    }

    /// Combine two tallies (used when consumption is applied in several batches).
    pub fn merge(mut self, other: &ConsumptionCounts) -> Self {
        for (code, count) in other.iter() {
            self.add(code.clone(), count);
        }
        self
    }

    pub fn get(&self, code: &MaterialCode) -> u64 {
        self.0.get(code).copied().unwrap_or(0)
    }

    pub fn contains(&self, code: &MaterialCode) -> bool {
        self.0.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MaterialCode, u64)> {
        self.0.iter().map(|(code, count)| (code, *count))
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MaterialCode, u64)> for ConsumptionCounts {
    fn from_iter<T: IntoIterator<Item = (MaterialCode, u64)>>(iter: T) -> Self {
        let mut counts = Self::new();
        for (code, count) in iter {
            counts.add(code, count);
        }
        counts
    }
}

impl core::fmt::Display for ConsumptionCounts {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (code, count) in self.iter() {
            writeln!(f, "{code} : {count}")?;
        }
        Ok(())
    }
}
