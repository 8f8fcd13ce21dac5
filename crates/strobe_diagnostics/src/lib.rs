//! Structured diagnostics emitted while binding timing controls.
//!
//! A [`Diagnostic`] carries a [`Severity`], a stable [`DiagnosticCode`], a
//! message and source [`Label`]s. Binding never fails with a Rust error for
//! user mistakes; it pushes diagnostics into a [`DiagnosticSink`] and keeps
//! going. Turning diagnostics into text is left to the host compiler.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode, ParseCodeError};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use severity::Severity;
pub use sink::DiagnosticSink;
