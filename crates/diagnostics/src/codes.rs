//! Diagnostic ID constants.
//!
//! Codes are grouped by leading digit: `1xxx` structural, `2xxx` lookup,
//! `3xxx` prefix mismatch, `4xxx` command sequence, `5xxx` cardinality,
//! `6xxx` delimiter, `7xxx` option binding, `8xxx` flagged usage (warnings).
//! Codes are stable across releases; never renumber an existing one.

use crate::Category;

/// The command route is empty or whitespace only.
pub const EMPTY_ROUTE: &str = "CR1001";

/// The first path segment is not a root and no default root is configured.
pub const INVALID_COMMAND_PREFIX: &str = "CR2001";

/// An option-prefixed token does not name a declared option.
pub const UNSUPPORTED_OPTION: &str = "CR2002";

/// An alias-prefixed token does not name a declared option alias.
pub const UNSUPPORTED_OPTION_ALIAS: &str = "CR2003";

/// An option id was written with the alias prefix or an alias with the option prefix.
pub const INVALID_OPTION_PREFIX: &str = "CR3001";

/// Path segments are out of order, nested after a subcommand, or repeated.
pub const INVALID_COMMAND_SEQUENCE: &str = "CR4001";

/// More positional tokens than the command declares arguments.
pub const UNSUPPORTED_ARGUMENTS: &str = "CR5001";

/// A quoted argument or option value has no closing delimiter.
pub const MISSING_CLOSING_DELIMITER: &str = "CR6001";

/// The same option was given more than once.
pub const DUPLICATE_OPTION: &str = "CR7001";

/// A non-boolean option was given without a value and has no default.
pub const MISSING_OPTION_VALUE: &str = "CR7002";

/// The resolved command is flagged obsolete or disabled.
pub const FLAGGED_COMMAND: &str = "CR8001";

/// A bound option is flagged obsolete or disabled.
pub const FLAGGED_OPTION: &str = "CR8002";

/// Every known code, in numeric order.
pub const ALL: &[&str] = &[
    EMPTY_ROUTE,
    INVALID_COMMAND_PREFIX,
    UNSUPPORTED_OPTION,
    UNSUPPORTED_OPTION_ALIAS,
    INVALID_OPTION_PREFIX,
    INVALID_COMMAND_SEQUENCE,
    UNSUPPORTED_ARGUMENTS,
    MISSING_CLOSING_DELIMITER,
    DUPLICATE_OPTION,
    MISSING_OPTION_VALUE,
    FLAGGED_COMMAND,
    FLAGGED_OPTION,
];

/// Map a code to its error category.
pub fn category(id: &str) -> Option<Category> {
    let category = match id {
        EMPTY_ROUTE => Category::Structural,
        INVALID_COMMAND_PREFIX | UNSUPPORTED_OPTION | UNSUPPORTED_OPTION_ALIAS => Category::Lookup,
        INVALID_OPTION_PREFIX => Category::PrefixMismatch,
        INVALID_COMMAND_SEQUENCE => Category::Sequence,
        UNSUPPORTED_ARGUMENTS => Category::Cardinality,
        MISSING_CLOSING_DELIMITER => Category::Delimiter,
        DUPLICATE_OPTION | MISSING_OPTION_VALUE => Category::Binding,
        FLAGGED_COMMAND | FLAGGED_OPTION => Category::Flagged,
        _ => return None,
    };
    Some(category)
}

pub(crate) fn explain(id: &str) -> Option<&'static str> {
    let text = match id {
        EMPTY_ROUTE => {
            "The raw command route is empty or contains only whitespace. A route must name at least one command segment, option, or argument."
        }
        INVALID_COMMAND_PREFIX => {
            "The first segment of the route does not resolve to a root command and no default root is registered to stand in for it."
        }
        UNSUPPORTED_OPTION => {
            "The option id written after the option prefix is not declared by the resolved command."
        }
        UNSUPPORTED_OPTION_ALIAS => {
            "The alias written after the alias prefix is not declared by the resolved command, or option aliases are disabled."
        }
        INVALID_OPTION_PREFIX => {
            "The identifier names a declared option but uses the wrong prefix: ids take the option prefix (for example `--`) and aliases take the alias prefix (for example `-`)."
        }
        INVALID_COMMAND_SEQUENCE => {
            "The command path is invalid: a group appears without its owning root or group, a segment follows a subcommand, or a command appears twice in the path."
        }
        UNSUPPORTED_ARGUMENTS => {
            "The route supplies more positional tokens than the resolved command declares arguments. The message lists every positional token."
        }
        MISSING_CLOSING_DELIMITER => {
            "A value opened with the value delimiter (for example `\"`) never closes. Quoting is literal: the first matching delimiter closes the value."
        }
        DUPLICATE_OPTION => {
            "The same option was supplied more than once, either by id or by alias."
        }
        MISSING_OPTION_VALUE => {
            "A non-boolean option was supplied without a value and declares no default value to fall back on."
        }
        FLAGGED_COMMAND => {
            "The route parsed, but the resolved command is marked obsolete or disabled in the registry. This is a warning; the parse still succeeds."
        }
        FLAGGED_OPTION => {
            "The route parsed, but an option it binds is marked obsolete or disabled in the registry. This is a warning; the parse still succeeds."
        }
        _ => return None,
    };
    Some(text)
}
