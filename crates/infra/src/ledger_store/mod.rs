//! Persistence boundary for material ledgers and their history snapshots.
//!
//! Layout on disk (see [`LedgerStoreConfig`]):
//!
//! ```text
//! {root}/
//!   packaging.json
//!   packaging_history/packaging_history_{DD_MM_YYYY}.json
//!   stock.json
//!   stock_history/stock_history_{DD_MM_YYYY}.json
//! ```

pub mod file;
pub mod in_memory;
pub mod r#trait;

use std::path::PathBuf;

use serde::Deserialize;

use larder_core::MaterialKind;

pub use file::FileLedgerStore;
pub use in_memory::InMemoryLedgerStore;
pub use r#trait::{LedgerStore, LedgerStoreError};

/// What `archive` does when a snapshot for the same kind and date already exists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchivePolicy {
    /// Fail; the existing snapshot is kept as the audit record.
    #[default]
    Refuse,
    /// Replace the existing snapshot.
    Overwrite,
}

/// Where a [`FileLedgerStore`] keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStoreConfig {
    pub root: PathBuf,
    pub archive_policy: ArchivePolicy,
}

impl LedgerStoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            archive_policy: ArchivePolicy::default(),
        }
    }

    pub fn with_archive_policy(mut self, archive_policy: ArchivePolicy) -> Self {
        self.archive_policy = archive_policy;
        self
    }

    pub fn ledger_path(&self, kind: MaterialKind) -> PathBuf {
        self.root.join(format!("{kind}.json"))
    }

    pub fn history_dir(&self, kind: MaterialKind) -> PathBuf {
        self.root.join(format!("{kind}_history"))
    }

    pub fn history_path(&self, kind: MaterialKind, orders_date: &str) -> PathBuf {
        self.history_dir(kind)
            .join(format!("{kind}_history_{orders_date}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_kind_and_date() {
        let config = LedgerStoreConfig::new("/srv/stock");
        assert_eq!(
            config.ledger_path(MaterialKind::Packaging),
            PathBuf::from("/srv/stock/packaging.json")
        );
        assert_eq!(
            config.history_path(MaterialKind::Stock, "09_03_2024"),
            PathBuf::from("/srv/stock/stock_history/stock_history_09_03_2024.json")
        );
    }
}
