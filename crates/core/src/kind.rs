use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Which family of materials a catalog, consumption tally or ledger talks about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Boxes, containers and bags handed out with takeout orders.
    Packaging,
    /// Raw stock sold as-is (bottled drinks, water).
    Stock,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Packaging => "packaging",
            MaterialKind::Stock => "stock",
        }
    }
}

impl core::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "packaging" => Ok(MaterialKind::Packaging),
            "stock" => Ok(MaterialKind::Stock),
            other => Err(DomainError::validation(format!(
                "unknown material kind '{other}' (expected packaging or stock)"
            ))),
        }
    }
}
