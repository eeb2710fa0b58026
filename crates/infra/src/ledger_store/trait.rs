use std::path::PathBuf;

use thiserror::Error;

use larder_core::MaterialKind;
use larder_ledger::Ledger;

/// Ledger persistence.
///
/// Implementations must make `save` all-or-nothing: a crash mid-save leaves either the
/// old or the new ledger, never a truncated file.
pub trait LedgerStore: Send + Sync {
    /// Load the current ledger for `kind`.
    fn load(&self, kind: MaterialKind) -> Result<Ledger, LedgerStoreError>;

    /// Write an immutable copy of `ledger` keyed by `kind` and the orders' date.
    fn archive(&self, ledger: &Ledger, kind: MaterialKind, orders_date: &str) -> Result<(), LedgerStoreError>;

    /// Replace the current ledger for `kind`.
    fn save(&self, ledger: &Ledger, kind: MaterialKind) -> Result<(), LedgerStoreError>;
}

#[derive(Debug, Error)]
pub enum LedgerStoreError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid ledger JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("history snapshot already exists: {location}")]
    HistoryExists { location: String },

    #[error("no {0} ledger")]
    Missing(MaterialKind),

    #[error("ledger store lock poisoned")]
    Poisoned,
}
