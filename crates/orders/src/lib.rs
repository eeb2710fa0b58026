//! Order listings and the consumption they imply.
//!
//! - [`order`]: order rows as exported by the point-of-sale system
//! - [`resolve`]: order items → packaging / stock material codes
//! - [`aggregate`]: per-material tallies across a batch of orders
//!
//! Pure domain logic; reading exports from disk lives in `larder-infra`.

pub mod aggregate;
pub mod order;
pub mod resolve;

pub use aggregate::ConsumptionCounts;
pub use order::{OrderListing, OrderRow, OrderType, ProcessedOrder};
pub use resolve::{resolve, resolve_packaging, resolve_stock};
