//! Item catalog: which packaging and stock materials each sellable item consumes.
//!
//! Pure domain logic (no IO). Loading catalogs from files lives in `larder-infra`.

pub mod category;
pub mod entry;

pub use category::Category;
pub use entry::{Catalog, CatalogEntry};
