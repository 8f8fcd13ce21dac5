//! Reading and validating `strobe.toml`.

use crate::error::ConfigError;
use crate::types::BindOptions;
use std::path::Path;
use strobe_diagnostics::DiagnosticCode;

/// Name of the options file looked up in a project directory.
pub const OPTIONS_FILE: &str = "strobe.toml";

/// Loads `<dir>/strobe.toml`.
pub fn load_options(dir: &Path) -> Result<BindOptions, ConfigError> {
    let content = std::fs::read_to_string(dir.join(OPTIONS_FILE))?;
    load_options_from_str(&content)
}

/// Parses and validates options from TOML text.
pub fn load_options_from_str(content: &str) -> Result<BindOptions, ConfigError> {
    let options: BindOptions =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_options(&options)?;
    Ok(options)
}

/// Every lint entry must be a well-formed code and may not be both allowed and denied.
fn validate_options(options: &BindOptions) -> Result<(), ConfigError> {
    for code in options.lint.allow.iter().chain(&options.lint.deny) {
        code.parse::<DiagnosticCode>()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    }
    if let Some(code) = options
        .lint
        .allow
        .iter()
        .find(|c| options.lint.deny.contains(*c))
    {
        return Err(ConfigError::ValidationError(format!(
            "`{code}` is listed in both lint.allow and lint.deny"
        )));
    }
    Ok(())
}
