//! Source locations attached to syntax nodes, bound expressions and diagnostics.
//!
//! Loading and rendering source text is the job of the host compiler; this
//! crate only defines the [`FileId`] and [`Span`] coordinates that flow
//! through binding.

#![warn(missing_docs)]

pub mod file_id;
pub mod span;

pub use file_id::FileId;
pub use span::Span;
