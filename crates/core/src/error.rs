//! Domain error model.

use thiserror::Error;

use crate::code::MaterialCode;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures that an operator has to fix in the
/// input data or the catalog. IO concerns belong to the infrastructure crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An ordered item matches neither an online alias nor a canonical catalog name.
    #[error("unresolvable item '{item}' in order row {line}: add it to the catalog")]
    UnresolvableItem { item: String, line: usize },

    /// Two catalog entries share a (case-insensitive) name or alias.
    #[error("duplicate catalog {field} '{name}'")]
    DuplicateCatalogName { field: &'static str, name: String },

    /// A consumed material has no ledger record (strict policy only).
    #[error("material '{0}' is consumed but not tracked in the ledger")]
    UntrackedMaterial(MaterialCode),

    /// The order listing has no rows, so there is no date to reconcile against.
    #[error("order listing is empty")]
    EmptyListing,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unresolvable(item: impl Into<String>, line: usize) -> Self {
        Self::UnresolvableItem {
            item: item.into(),
            line,
        }
    }

    pub fn duplicate(field: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateCatalogName {
            field,
            name: name.into(),
        }
    }
}
