//! Strongly-typed contents of a `strobe.toml` file.

use serde::Deserialize;
use strobe_diagnostics::DiagnosticCode;

/// Root of the options file. Every table is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BindOptions {
    /// Toggles for advisory binder diagnostics.
    #[serde(default)]
    pub binding: BindingConfig,
    /// Severity overrides keyed by diagnostic code.
    #[serde(default)]
    pub lint: LintConfig,
}

/// The `[binding]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingConfig {
    /// Warn when an event expression is a compile-time constant (`W300`).
    #[serde(default = "enabled")]
    pub warn_constant_event: bool,
    /// Warn when a cycle delay has no default clocking in scope (`W301`).
    #[serde(default = "enabled")]
    pub warn_missing_default_clocking: bool,
}

fn enabled() -> bool {
    true
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            warn_constant_event: true,
            warn_missing_default_clocking: true,
        }
    }
}

/// The `[lint]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintConfig {
    /// Warning codes to drop.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Warning codes to report as errors.
    #[serde(default)]
    pub deny: Vec<String>,
}

/// A severity override for one diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintLevel {
    /// Suppress the diagnostic.
    Allow,
    /// Report the diagnostic as an error.
    Deny,
}

impl LintConfig {
    /// Returns the override configured for `code`, if any.
    pub fn level_for(&self, code: DiagnosticCode) -> Option<LintLevel> {
        let text = code.to_string();
        if self.deny.iter().any(|c| *c == text) {
            Some(LintLevel::Deny)
        } else if self.allow.iter().any(|c| *c == text) {
            Some(LintLevel::Allow)
        } else {
            None
        }
    }
}
