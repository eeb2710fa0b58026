use std::collections::HashMap;

use serde::Serialize;

use larder_core::{DomainError, DomainResult, MaterialCode};

use crate::category::Category;

/// One sellable item and the materials it consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub canonical_name: String,
    /// Name used by online ordering platforms; `None` when the item has no alias.
    pub alias_name: Option<String>,
    pub category: Category,
    pub packaging_codes: Vec<MaterialCode>,
    pub stock_codes: Vec<MaterialCode>,
}

impl CatalogEntry {
    pub fn new(canonical_name: impl Into<String>, category: Category) -> Self {
        Self {
            canonical_name: canonical_name.into().trim().to_string(),
            alias_name: None,
            category,
            packaging_codes: Vec::new(),
            stock_codes: Vec::new(),
        }
    }

    /// Set the online alias. Blank aliases are treated as absent.
    pub fn with_alias(mut self, alias: impl AsRef<str>) -> Self {
        let alias = alias.as_ref().trim();
        self.alias_name = (!alias.is_empty()).then(|| alias.to_string());
        self
    }

    pub fn with_packaging(mut self, codes: Vec<MaterialCode>) -> Self {
        self.packaging_codes = codes;
        self
    }

    pub fn with_stock(mut self, codes: Vec<MaterialCode>) -> Self {
        self.stock_codes = codes;
        self
    }
}

/// Lookup key: trimmed and case-folded.
fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable, indexed set of catalog entries for one run.
///
/// Invariant: canonical names are unique (case-insensitive) and so are aliases.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_alias: HashMap<String, usize>,
    by_canonical: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> DomainResult<Self> {
        let mut by_alias = HashMap::new();
        let mut by_canonical = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            let canonical = fold(&entry.canonical_name);
            if canonical.is_empty() {
                return Err(DomainError::validation(format!(
                    "catalog entry {} has an empty name",
                    idx + 1
                )));
            }
            if by_canonical.insert(canonical, idx).is_some() {
                return Err(DomainError::duplicate("name", &entry.canonical_name));
            }

            if let Some(alias) = &entry.alias_name {
                if by_alias.insert(fold(alias), idx).is_some() {
                    return Err(DomainError::duplicate("online name", alias));
                }
            }
        }

        Ok(Self {
            entries,
            by_alias,
            by_canonical,
        })
    }

    /// Resolve an item name: online alias first, then canonical name.
    pub fn lookup(&self, item: &str) -> Option<&CatalogEntry> {
        let key = fold(item);
        self.by_alias
            .get(&key)
            .or_else(|| self.by_canonical.get(&key))
            .map(|idx| &self.entries[*idx])
    }

    pub fn by_alias(&self, alias: &str) -> Option<&CatalogEntry> {
        self.by_alias.get(&fold(alias)).map(|idx| &self.entries[*idx])
    }

    pub fn by_canonical(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_canonical.get(&fold(name)).map(|idx| &self.entries[*idx])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
