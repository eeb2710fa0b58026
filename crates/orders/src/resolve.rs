//! Consumption resolver: order items → material codes.
//!
//! Each item is looked up by online alias first, then by canonical name (both
//! case-insensitive). An item that matches neither is fatal for the whole batch: stock
//! numbers cannot be trusted while the catalog has a gap.

use larder_catalog::{Catalog, CatalogEntry};
use larder_core::{DomainError, DomainResult, MaterialCode, MaterialKind};

use crate::order::OrderRow;

fn entries<'a>(row: &'a OrderRow, catalog: &'a Catalog) -> impl Iterator<Item = DomainResult<&'a CatalogEntry>> + 'a {
    row.items.iter().map(move |item| {
        catalog
            .lookup(item)
            .ok_or_else(|| DomainError::unresolvable(item.as_str(), row.line))
    })
}

/// Packaging consumed by one order row. Drink categories contribute nothing.
pub fn resolve_packaging(row: &OrderRow, catalog: &Catalog) -> DomainResult<Vec<MaterialCode>> {
    let mut used = Vec::new();
    for entry in entries(row, catalog) {
        let entry = entry?;
        if entry.category.is_packaging_exempt() {
            continue;
        }
        used.extend(entry.packaging_codes.iter().cloned());
    }
    Ok(used)
}

/// Stock consumed by one order row. No category is exempt.
pub fn resolve_stock(row: &OrderRow, catalog: &Catalog) -> DomainResult<Vec<MaterialCode>> {
    let mut used = Vec::new();
    for entry in entries(row, catalog) {
        used.extend(entry?.stock_codes.iter().cloned());
    }
    Ok(used)
}

pub fn resolve(row: &OrderRow, catalog: &Catalog, kind: MaterialKind) -> DomainResult<Vec<MaterialCode>> {
    match kind {
        MaterialKind::Packaging => resolve_packaging(row, catalog),
        MaterialKind::Stock => resolve_stock(row, catalog),
    }
}
