//! Grammar options and identifier text handling for the cmdroute parser.
//!
//! [`ParserOptions`] carries every tokenizer and extractor knob (separator,
//! option and alias prefixes, inline value separator, value delimiter, alias
//! and default-value switches). [`TextHandler`] defines how identifiers are
//! compared. Both are plain values, constructed once and shared read-only.

#![warn(missing_docs)]

mod jsonc;
mod text;

pub use jsonc::strip_jsonc;
pub use text::TextHandler;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating parser options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// JSON deserialization failed.
    #[error("invalid options JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value conflicts with the rest of the grammar.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Tokenizer and extractor configuration.
///
/// Every field has a default, so a JSON document only needs to list the
/// knobs it changes:
///
/// ```
/// let opts = cmdroute_config::load_options_from_str(r#"{
///     // inline values: --key=value
///     "option_value_separator": "=",
/// }"#).unwrap();
/// assert_eq!(opts.option_value_separator, '=');
/// assert_eq!(opts.option_prefix, "--");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserOptions {
    /// Token separator. Runs of it collapse outside quoted values.
    pub separator: char,
    /// Prefix introducing an option by id (default `--`).
    pub option_prefix: String,
    /// Prefix introducing an option by alias (default `-`).
    pub option_alias_prefix: String,
    /// Separator between an option and an inline value.
    ///
    /// Inline values only exist when this differs from
    /// [`separator`](ParserOptions::separator); with the default (a space)
    /// an option's value is the run of plain tokens that follows it.
    pub option_value_separator: char,
    /// Quote character whose span preserves separators verbatim.
    /// `None` disables quoting.
    pub value_delimiter: Option<char>,
    /// Whether alias-prefixed options are recognised.
    pub option_alias_enabled: bool,
    /// A non-boolean option written without a value takes its declared default.
    pub default_option_value_enabled: bool,
    /// Options missing from the route but declaring a default are added.
    pub default_option_enabled: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            separator: ' ',
            option_prefix: "--".into(),
            option_alias_prefix: "-".into(),
            option_value_separator: ' ',
            value_delimiter: Some('"'),
            option_alias_enabled: true,
            default_option_value_enabled: true,
            default_option_enabled: false,
        }
    }
}

impl ParserOptions {
    /// Whether `--key<sep>value` inline values are recognised.
    pub fn has_inline_values(&self) -> bool {
        self.option_value_separator != self.separator
    }

    /// Check that the options describe an unambiguous grammar.
    ///
    /// - `option_prefix` must be non-empty, and `option_alias_prefix` too
    ///   while aliases are enabled
    /// - the two prefixes must differ
    /// - neither prefix may contain the separator, the value delimiter, or
    ///   the inline value separator
    /// - the value delimiter must differ from the separator
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.option_prefix.is_empty() {
            return Err(invalid("option_prefix", "must not be empty"));
        }
        if self.option_alias_enabled && self.option_alias_prefix.is_empty() {
            return Err(invalid(
                "option_alias_prefix",
                "must not be empty while option aliases are enabled",
            ));
        }
        if self.option_prefix == self.option_alias_prefix {
            return Err(invalid(
                "option_alias_prefix",
                format!(
                    "'{}' is identical to option_prefix",
                    self.option_alias_prefix
                ),
            ));
        }

        for (field, prefix) in [
            ("option_prefix", &self.option_prefix),
            ("option_alias_prefix", &self.option_alias_prefix),
        ] {
            if prefix.contains(self.separator) {
                return Err(invalid(
                    field,
                    format!("'{prefix}' contains the separator {:?}", self.separator),
                ));
            }
            if let Some(d) = self.value_delimiter {
                if prefix.contains(d) {
                    return Err(invalid(
                        field,
                        format!("'{prefix}' contains the value delimiter {d:?}"),
                    ));
                }
            }
            if self.has_inline_values() && prefix.contains(self.option_value_separator) {
                return Err(invalid(
                    field,
                    format!(
                        "'{prefix}' contains the option value separator {:?}",
                        self.option_value_separator
                    ),
                ));
            }
        }

        if self.value_delimiter == Some(self.separator) {
            return Err(invalid(
                "value_delimiter",
                format!("{:?} is identical to the separator", self.separator),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> OptionsError {
    OptionsError::InvalidField {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Load and validate [`ParserOptions`] from a JSON or JSONC string.
///
/// Comments and trailing commas are accepted. Missing fields take their
/// defaults; the result is checked with [`ParserOptions::validate`].
pub fn load_options_from_str(s: &str) -> Result<ParserOptions, OptionsError> {
    let options: ParserOptions = serde_json::from_str(&strip_jsonc(s))?;
    options.validate()?;
    Ok(options)
}
