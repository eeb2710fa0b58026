use std::path::Path;

use larder_catalog::{Catalog, CatalogEntry, Category};
use larder_core::{MaterialCode, MaterialKind};

use crate::tabular::{Table, TabularError, read_table};

/// Columns of the item-wise packaging/stock master files.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CatalogColumn {
    Name,
    OnlineName,
    PackagingBox,
    Stock,
    Category,
}

impl CatalogColumn {
    pub fn header(&self) -> &'static str {
        match self {
            CatalogColumn::Name => "Name",
            CatalogColumn::OnlineName => "Online_Name",
            CatalogColumn::PackagingBox => "Packaging Box",
            CatalogColumn::Stock => "Stock",
            CatalogColumn::Category => "Category",
        }
    }

    /// The material column a catalog of `kind` must carry.
    pub fn codes_for(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Packaging => CatalogColumn::PackagingBox,
            MaterialKind::Stock => CatalogColumn::Stock,
        }
    }
}

/// Load the catalog for `kind` from a master file.
///
/// The column for `kind` is required; the other material column is read when present.
pub fn load_catalog(path: &Path, kind: MaterialKind) -> Result<Catalog, TabularError> {
    let table = read_table(path, 0)?;
    let catalog = catalog_from_table(&table, kind)?;
    tracing::info!(path = %path.display(), %kind, entries = catalog.len(), "loaded catalog");
    Ok(catalog)
}

pub fn catalog_from_table(table: &Table, kind: MaterialKind) -> Result<Catalog, TabularError> {
    let name = table.column(CatalogColumn::Name.header())?;
    let category = table.column(CatalogColumn::Category.header())?;
    table.column(CatalogColumn::codes_for(kind).header())?;

    let alias = table.optional_column(CatalogColumn::OnlineName.header());
    let packaging = table.optional_column(CatalogColumn::PackagingBox.header());
    let stock = table.optional_column(CatalogColumn::Stock.header());

    let codes = |row: &[String], column: Option<usize>| -> Vec<MaterialCode> {
        column
            .map(|idx| MaterialCode::parse_list(&row[idx]))
            .unwrap_or_default()
    };

    let entries = table
        .rows
        .iter()
        .map(|row| {
            let mut entry = CatalogEntry::new(&row[name], Category::parse(&row[category]))
                .with_packaging(codes(row, packaging))
                .with_stock(codes(row, stock));
            if let Some(idx) = alias {
                entry = entry.with_alias(&row[idx]);
            }
            entry
        })
        .collect();

    Catalog::new(entries).map_err(|e| TabularError::invalid(&table.path, e))
}
