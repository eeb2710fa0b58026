use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use larder_core::MaterialKind;
use larder_ledger::Ledger;

use super::r#trait::{LedgerStore, LedgerStoreError};
use super::{ArchivePolicy, LedgerStoreConfig};

/// JSON-file ledger store.
///
/// Files are 4-space indented arrays of `{product_code, stock, as_on}` objects so they
/// stay diffable and hand-editable.
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    config: LedgerStoreConfig,
}

impl FileLedgerStore {
    pub fn new(config: LedgerStoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LedgerStoreConfig {
        &self.config
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> LedgerStoreError + '_ {
    move |source| LedgerStoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn to_json(ledger: &Ledger, path: &Path) -> Result<Vec<u8>, LedgerStoreError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    ledger.serialize(&mut ser).map_err(|source| LedgerStoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(buf)
}

/// Write via a sibling temp file and rename over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), LedgerStoreError> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, bytes).map_err(io_err(&temp_path))?;
    fs::rename(&temp_path, path).map_err(io_err(path))?;
    Ok(())
}

impl LedgerStore for FileLedgerStore {
    fn load(&self, kind: MaterialKind) -> Result<Ledger, LedgerStoreError> {
        let path = self.config.ledger_path(kind);
        let raw = fs::read_to_string(&path).map_err(io_err(&path))?;
        let ledger: Ledger = serde_json::from_str(&raw).map_err(|source| LedgerStoreError::Json {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), records = ledger.len(), "loaded ledger");
        Ok(ledger)
    }

    fn archive(&self, ledger: &Ledger, kind: MaterialKind, orders_date: &str) -> Result<(), LedgerStoreError> {
        let dir = self.config.history_dir(kind);
        fs::create_dir_all(&dir).map_err(io_err(&dir))?;

        let path = self.config.history_path(kind, orders_date);
        let bytes = to_json(ledger, &path)?;

        match self.config.archive_policy {
            ArchivePolicy::Refuse => {
                let mut file = fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)
                    .map_err(|source| match source.kind() {
                        ErrorKind::AlreadyExists => LedgerStoreError::HistoryExists {
                            location: path.display().to_string(),
                        },
                        _ => LedgerStoreError::Io {
                            path: path.clone(),
                            source,
                        },
                    })?;
                file.write_all(&bytes).map_err(io_err(&path))?;
                file.sync_all().map_err(io_err(&path))?;
            }
            ArchivePolicy::Overwrite => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), "overwriting existing history snapshot");
                }
                write_atomic(&path, &bytes)?;
            }
        }

        tracing::info!(path = %path.display(), "archived ledger snapshot");
        Ok(())
    }

    fn save(&self, ledger: &Ledger, kind: MaterialKind) -> Result<(), LedgerStoreError> {
        let path = self.config.ledger_path(kind);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let bytes = to_json(ledger, &path)?;
        write_atomic(&path, &bytes)?;
        tracing::info!(path = %path.display(), records = ledger.len(), "saved ledger");
        Ok(())
    }
}
