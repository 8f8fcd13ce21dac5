//! Loading of `strobe.toml` binding options.
//!
//! [`BindOptions`] toggles the advisory diagnostics of the timing-control
//! binder and remaps warning severities through a `[lint]` table.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_options, load_options_from_str, OPTIONS_FILE};
pub use types::{BindOptions, BindingConfig, LintConfig, LintLevel};
