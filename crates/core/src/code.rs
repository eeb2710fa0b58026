//! Material codes: the keys shared by catalogs, consumption counts and ledgers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Code of a packaging or stock material (e.g. `SMALL_PAPER_BOX_6x6`, `COKE_250_ML`).
///
/// Codes are compared exactly (case-sensitive); surrounding whitespace is stripped on
/// construction because catalog cells are comma-separated free text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCode(String);

impl MaterialCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(DomainError::validation("material code cannot be empty"));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a comma-separated cell into codes, skipping empty segments.
    pub fn parse_list(cell: &str) -> Vec<MaterialCode> {
        cell.split(',')
            .filter_map(|part| MaterialCode::new(part).ok())
            .collect()
    }
}

impl core::fmt::Display for MaterialCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MaterialCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for MaterialCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
