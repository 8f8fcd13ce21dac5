//! Shared foundational types used across the strobe binding workspace.
//!
//! Currently this is the interned identifier type used by the syntax tree,
//! scopes and diagnostics.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
