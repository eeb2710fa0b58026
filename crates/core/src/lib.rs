//! `larder-core`: shared building blocks for stock reconciliation.
//!
//! This crate contains **pure domain** primitives (no IO, no storage).

pub mod code;
pub mod error;
pub mod id;
pub mod kind;

pub use code::MaterialCode;
pub use error::{DomainError, DomainResult};
pub use id::RunId;
pub use kind::MaterialKind;
