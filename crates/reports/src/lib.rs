//! Sales and expense breakdowns for the operator.
//!
//! Pure grouping logic; reading exports and drawing charts live in `larder-infra`.

pub mod expenses;
pub mod sales;

pub use expenses::{ExpenseLine, ExpenseSummary};
pub use sales::{CategoryBreakdown, PieSlice, SalesLine, sales_by_category};
