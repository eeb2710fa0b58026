use std::collections::HashMap;
use std::sync::RwLock;

use larder_core::MaterialKind;
use larder_ledger::Ledger;

use super::ArchivePolicy;
use super::r#trait::{LedgerStore, LedgerStoreError};

/// In-memory ledger store.
///
/// Intended for tests/dev. Honors the same archive policy as the file store.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    archive_policy: ArchivePolicy,
    ledgers: RwLock<HashMap<MaterialKind, Ledger>>,
    history: RwLock<HashMap<(MaterialKind, String), Ledger>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archive_policy(mut self, archive_policy: ArchivePolicy) -> Self {
        self.archive_policy = archive_policy;
        self
    }

    /// Seed the current ledger for `kind`.
    pub fn with_ledger(self, kind: MaterialKind, ledger: Ledger) -> Self {
        if let Ok(mut ledgers) = self.ledgers.write() {
            ledgers.insert(kind, ledger);
        }
        self
    }

    pub fn history(&self, kind: MaterialKind, orders_date: &str) -> Option<Ledger> {
        self.history
            .read()
            .ok()?
            .get(&(kind, orders_date.to_string()))
            .cloned()
    }

    pub fn history_len(&self) -> usize {
        self.history.read().map(|h| h.len()).unwrap_or(0)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self, kind: MaterialKind) -> Result<Ledger, LedgerStoreError> {
        let ledgers = self.ledgers.read().map_err(|_| LedgerStoreError::Poisoned)?;
        ledgers.get(&kind).cloned().ok_or(LedgerStoreError::Missing(kind))
    }

    fn archive(&self, ledger: &Ledger, kind: MaterialKind, orders_date: &str) -> Result<(), LedgerStoreError> {
        let mut history = self.history.write().map_err(|_| LedgerStoreError::Poisoned)?;
        let key = (kind, orders_date.to_string());
        if self.archive_policy == ArchivePolicy::Refuse && history.contains_key(&key) {
            return Err(LedgerStoreError::HistoryExists {
                location: format!("{kind}@{orders_date}"),
            });
        }
        history.insert(key, ledger.clone());
        Ok(())
    }

    fn save(&self, ledger: &Ledger, kind: MaterialKind) -> Result<(), LedgerStoreError> {
        let mut ledgers = self.ledgers.write().map_err(|_| LedgerStoreError::Poisoned)?;
        ledgers.insert(kind, ledger.clone());
        Ok(())
    }
}
