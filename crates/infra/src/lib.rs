//! Infrastructure layer: files, configuration, and the reconciliation pipeline.

pub mod chart;
pub mod config;
pub mod ledger_store;
pub mod reconcile;
pub mod report;
pub mod sources;
pub mod tabular;
