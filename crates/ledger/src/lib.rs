//! Material ledgers: remaining quantity per packaging/stock code.
//!
//! Pure ledger arithmetic. Persistence and history snapshots live in `larder-infra`.

pub mod ledger;

pub use ledger::{Applied, Ledger, LedgerRecord, as_on_format};
