//! Adapters from tabular exports to domain values.
//!
//! Column names are closed enums so a typo is a compile error, not a missing column
//! at runtime.

pub mod catalog;
pub mod orders;
pub mod sales;

pub use catalog::{CatalogColumn, load_catalog};
pub use orders::{OrderColumn, load_order_listing, parse_created_at};
pub use sales::{load_expenses, load_sales_lines};
