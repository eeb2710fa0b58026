//! Reconciliation pipeline: order listing → consumption → ledger update.
//!
//! ```text
//! OrderListing
//!   ↓
//! 1. Latest order date (keys the history snapshot and the report)
//!   ↓
//! 2. Partition takeout / dine-in (packaging only)
//!   ↓
//! 3. Resolve every row against the catalog (any unknown item aborts the batch)
//!   ↓
//! 4. Tally consumption per material code
//!   ↓
//! 5. Load ledger, apply consumption in memory, check untracked codes
//!   ↓
//! 6. Archive the pre-mutation ledger
//!   ↓
//! 7. Save the updated ledger
//! ```
//!
//! ## Ordering guarantees
//!
//! Steps 1–5 have no side effects, so every domain failure (unresolvable item, empty
//! listing, untracked material under the strict policy) leaves both the ledger and the
//! history untouched. Archive strictly precedes save: a run interrupted between the two
//! leaves the canonical ledger un-mutated and the snapshot available for recovery.
//!
//! There is no locking; two simultaneous runs against the same ledger files race.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use larder_catalog::Catalog;
use larder_core::{DomainError, MaterialCode, MaterialKind, RunId};
use larder_ledger::Ledger;
use larder_orders::{ConsumptionCounts, OrderListing, ProcessedOrder, resolve_packaging, resolve_stock};

use crate::ledger_store::{LedgerStore, LedgerStoreError};

/// What to do with consumed codes that have no ledger record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UntrackedPolicy {
    /// Log a warning per code and carry on.
    #[default]
    Lenient,
    /// Abort the run before any ledger side effect.
    Strict,
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] LedgerStoreError),
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationReport {
    pub run_id: RunId,
    pub kind: MaterialKind,
    /// Latest order date as `DD_MM_YYYY`.
    pub orders_latest_date: String,
    pub counts: ConsumptionCounts,
    pub ledger_before: Ledger,
    pub ledger_after: Ledger,
    pub untracked: Vec<(MaterialCode, u64)>,
    /// Header row of the order export.
    pub headers: Vec<String>,
    /// Packaging: dine-in rows first, then takeout. Stock: input order.
    pub orders: Vec<ProcessedOrder>,
}

impl core::fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let title = match self.kind {
            MaterialKind::Packaging => "Packaging",
            MaterialKind::Stock => "Stock",
        };
        writeln!(f, "{title} Used -")?;
        write!(f, "{}", self.counts)?;
        writeln!(f)?;
        writeln!(f, "Remaining {title}.")?;
        write!(f, "{}", self.ledger_after)
    }
}

/// Applies order consumption to a ledger store.
#[derive(Debug)]
pub struct Reconciler<S> {
    catalog: Catalog,
    store: S,
    untracked: UntrackedPolicy,
}

impl<S> Reconciler<S> {
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            catalog,
            store,
            untracked: UntrackedPolicy::default(),
        }
    }

    pub fn with_untracked_policy(mut self, untracked: UntrackedPolicy) -> Self {
        self.untracked = untracked;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (Catalog, S) {
        (self.catalog, self.store)
    }
}

impl<S: LedgerStore> Reconciler<S> {
    /// Decrement packaging for takeout orders. Dine-in orders never consume packaging.
    pub fn run_packaging(&self, listing: OrderListing, today: NaiveDate) -> Result<ReconciliationReport, ReconcileError> {
        let run_id = RunId::new();
        let span = tracing::info_span!("reconcile", %run_id, kind = %MaterialKind::Packaging);
        let _enter = span.enter();

        let orders_latest_date = listing.latest_date_label()?;
        let headers = listing.headers.clone();
        let (dine_in, takeout) = listing.partition_takeout();
        tracing::info!(dine_in = dine_in.len(), takeout = takeout.len(), %orders_latest_date, "partitioned orders");

        let takeout = takeout
            .into_iter()
            .map(|row| -> Result<ProcessedOrder, DomainError> {
                let used = resolve_packaging(&row, &self.catalog)?;
                Ok(ProcessedOrder::untouched(row).with_packaging(used))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let counts = ConsumptionCounts::from_orders(&takeout, MaterialKind::Packaging);

        let mut orders: Vec<ProcessedOrder> = dine_in.into_iter().map(ProcessedOrder::untouched).collect();
        orders.extend(takeout);

        self.commit(run_id, MaterialKind::Packaging, orders_latest_date, counts, today, headers, orders)
    }

    /// Decrement stock for every order, whatever its type.
    pub fn run_stock(&self, listing: OrderListing, today: NaiveDate) -> Result<ReconciliationReport, ReconcileError> {
        let run_id = RunId::new();
        let span = tracing::info_span!("reconcile", %run_id, kind = %MaterialKind::Stock);
        let _enter = span.enter();

        let orders_latest_date = listing.latest_date_label()?;
        let OrderListing { headers, rows } = listing;
        tracing::info!(orders = rows.len(), %orders_latest_date, "resolving stock");

        let orders = rows
            .into_iter()
            .map(|row| -> Result<ProcessedOrder, DomainError> {
                let used = resolve_stock(&row, &self.catalog)?;
                Ok(ProcessedOrder::untouched(row).with_stock(used))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let counts = ConsumptionCounts::from_orders(&orders, MaterialKind::Stock);

        self.commit(run_id, MaterialKind::Stock, orders_latest_date, counts, today, headers, orders)
    }

    #[allow(clippy::too_many_arguments)]
    fn commit(
        &self,
        run_id: RunId,
        kind: MaterialKind,
        orders_latest_date: String,
        counts: ConsumptionCounts,
        today: NaiveDate,
        headers: Vec<String>,
        orders: Vec<ProcessedOrder>,
    ) -> Result<ReconciliationReport, ReconcileError> {
        tracing::info!(materials = counts.len(), units = counts.total(), "aggregated consumption");

        let ledger_before = self.store.load(kind)?;
        let applied = ledger_before.apply_consumption(&counts, today);

        for (code, count) in &applied.untracked {
            match self.untracked {
                UntrackedPolicy::Strict => {
                    return Err(DomainError::UntrackedMaterial(code.clone()).into());
                }
                UntrackedPolicy::Lenient => {
                    tracing::warn!(%code, count, "consumed material is not tracked in the ledger; skipping");
                }
            }
        }

        self.store.archive(&ledger_before, kind, &orders_latest_date)?;
        self.store.save(&applied.ledger, kind)?;
        tracing::info!("ledger updated");

        Ok(ReconciliationReport {
            run_id,
            kind,
            orders_latest_date,
            counts,
            ledger_before,
            ledger_after: applied.ledger,
            untracked: applied.untracked,
            headers,
            orders,
        })
    }
}
