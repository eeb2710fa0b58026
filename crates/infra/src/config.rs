//! Application configuration.
//!
//! Sources, later ones winning:
//! 1. Built-in defaults
//! 2. `larder.toml` in the working directory (optional)
//! 3. An explicit `--config` file (required when given)
//! 4. Environment variables, `LARDER__SECTION__KEY` (e.g. `LARDER__LEDGER__ROOT=/srv/stock`)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use larder_observability::LogFormat;

use crate::ledger_store::{ArchivePolicy, LedgerStoreConfig};
use crate::reconcile::UntrackedPolicy;

#[derive(Debug, Error)]
#[error("configuration: {0}")]
pub struct ConfigError(#[from] config::ConfigError);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub packaging_path: PathBuf,
    pub stock_path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            packaging_path: PathBuf::from("config/item_wise_packaging_master.csv"),
            stock_path: PathBuf::from("config/item_wise_stock_master.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    /// Holds `<kind>.json` and `<kind>_history/`.
    pub root: PathBuf,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("stock"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub dir: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/processedOrders"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderSettings {
    /// Banner rows above the header row in the point-of-sale export.
    pub skip_rows: usize,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self { skip_rows: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    pub untracked: UntrackedPolicy,
    pub archive: ArchivePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogSettings,
    pub ledger: LedgerSettings,
    pub reports: ReportSettings,
    pub orders: OrderSettings,
    pub policy: PolicySettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Load configuration from the default file, an optional explicit file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(File::with_name("larder").required(false));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix("LARDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Catalog export for one material kind.
    pub fn catalog_path(&self, kind: larder_core::MaterialKind) -> &Path {
        match kind {
            larder_core::MaterialKind::Packaging => &self.catalog.packaging_path,
            larder_core::MaterialKind::Stock => &self.catalog.stock_path,
        }
    }

    pub fn ledger_store_config(&self) -> LedgerStoreConfig {
        LedgerStoreConfig::new(self.ledger.root.clone()).with_archive_policy(self.policy.archive)
    }
}
