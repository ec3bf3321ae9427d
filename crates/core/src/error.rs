use std::collections::BTreeMap;

use cmdroute_diagnostics::{Category, Diagnostic, Span, codes};
use serde::Serialize;
use thiserror::Error;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.to_string(), $v.to_string())),+])
    };
}

/// Which path rule an [`ParseError::InvalidCommandSequence`] broke.
///
/// All three share one code and message; the violation is carried as
/// diagnostic context for tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceViolation {
    /// A root after the first segment, or a group/subcommand not owned by
    /// the segment before it.
    OutOfOrder,
    /// A segment after a subcommand.
    NestedSubcommand,
    /// A command that already appears earlier in the path.
    Duplicate,
}

impl SequenceViolation {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SequenceViolation::OutOfOrder => "out_of_order",
            SequenceViolation::NestedSubcommand => "nested_subcommand",
            SequenceViolation::Duplicate => "duplicate",
        }
    }
}

/// Why a command route was rejected.
///
/// Spans are byte offsets into the trimmed route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The route is empty or only separators and whitespace.
    #[error("the command route is empty. route={route}")]
    EmptyRoute {
        /// Correlation id of the rejected route.
        route: String,
    },

    /// The first segment is not a root and no default root is designated.
    #[error("the command prefix is not valid. command={command}")]
    InvalidCommandPrefix {
        /// The first token as written.
        command: String,
        /// Location of the token.
        span: Span,
    },

    /// A path segment is duplicated, nested under a subcommand, or not owned
    /// by the segment before it.
    #[error("the nested subcommands are not supported. command={command}")]
    InvalidCommandSequence {
        /// The offending segment as written.
        command: String,
        /// The rule that was broken.
        violation: SequenceViolation,
        /// Location of the segment.
        span: Span,
    },

    /// An option-prefixed identifier matches no declared option.
    #[error("the option is not supported. option={option}")]
    UnsupportedOption {
        /// The identifier after the prefix.
        option: String,
        /// Location of the token.
        span: Span,
    },

    /// An alias-prefixed identifier matches no declared alias, or aliases
    /// are disabled.
    #[error("the option alias is not supported. option={option}")]
    UnsupportedOptionAlias {
        /// The identifier after the prefix.
        option: String,
        /// Location of the token.
        span: Span,
    },

    /// An option id written with the alias prefix, or an alias written with
    /// the option prefix.
    #[error("the option prefix is not valid. option={option} expected_prefix={expected}")]
    InvalidOptionPrefix {
        /// The identifier after the prefix.
        option: String,
        /// The prefix this identifier must be written with.
        expected: String,
        /// Location of the token.
        span: Span,
    },

    /// More positional values than the command declares arguments.
    #[error(
        "the command does not support {} arguments. command={command} arguments={}",
        .arguments.len(),
        .arguments.join(",")
    )]
    UnsupportedArguments {
        /// The command the arguments were bound against.
        command: String,
        /// Every positional value, in order.
        arguments: Vec<String>,
        /// From the first to the last positional value.
        span: Span,
    },

    /// A quoted positional value is missing its closing delimiter.
    #[error("the argument value is missing the closing delimiter. argument={fragment}")]
    UnterminatedArgument {
        /// The unterminated text, opening delimiter included.
        fragment: String,
        /// Location of the fragment.
        span: Span,
    },

    /// A quoted option value is missing its closing delimiter.
    #[error("the option value is missing the closing delimiter. option={option} value={fragment}")]
    UnterminatedOptionValue {
        /// Id of the option being bound.
        option: String,
        /// The unterminated text, opening delimiter included.
        fragment: String,
        /// Location of the fragment.
        span: Span,
    },

    /// The same option appears twice (by id or alias).
    #[error("the option is already specified. option={option}")]
    DuplicateOption {
        /// Id of the repeated option.
        option: String,
        /// Location of the second occurrence.
        span: Span,
    },

    /// A non-boolean option has no value and no usable default.
    #[error("the option value is missing. option={option}")]
    MissingOptionValue {
        /// Id of the option.
        option: String,
        /// Location of the option token.
        span: Span,
    },
}

impl ParseError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyRoute { .. } => codes::EMPTY_ROUTE,
            ParseError::InvalidCommandPrefix { .. } => codes::INVALID_COMMAND_PREFIX,
            ParseError::InvalidCommandSequence { .. } => codes::INVALID_COMMAND_SEQUENCE,
            ParseError::UnsupportedOption { .. } => codes::UNSUPPORTED_OPTION,
            ParseError::UnsupportedOptionAlias { .. } => codes::UNSUPPORTED_OPTION_ALIAS,
            ParseError::InvalidOptionPrefix { .. } => codes::INVALID_OPTION_PREFIX,
            ParseError::UnsupportedArguments { .. } => codes::UNSUPPORTED_ARGUMENTS,
            ParseError::UnterminatedArgument { .. } | ParseError::UnterminatedOptionValue { .. } => {
                codes::MISSING_CLOSING_DELIMITER
            }
            ParseError::DuplicateOption { .. } => codes::DUPLICATE_OPTION,
            ParseError::MissingOptionValue { .. } => codes::MISSING_OPTION_VALUE,
        }
    }

    /// Error family.
    pub fn category(&self) -> Category {
        match self {
            ParseError::EmptyRoute { .. } => Category::Structural,
            ParseError::InvalidCommandPrefix { .. }
            | ParseError::UnsupportedOption { .. }
            | ParseError::UnsupportedOptionAlias { .. } => Category::Lookup,
            ParseError::InvalidOptionPrefix { .. } => Category::PrefixMismatch,
            ParseError::InvalidCommandSequence { .. } => Category::Sequence,
            ParseError::UnsupportedArguments { .. } => Category::Cardinality,
            ParseError::UnterminatedArgument { .. }
            | ParseError::UnterminatedOptionValue { .. } => Category::Delimiter,
            ParseError::DuplicateOption { .. } | ParseError::MissingOptionValue { .. } => {
                Category::Binding
            }
        }
    }

    /// Location in the trimmed route, when the error has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::EmptyRoute { .. } => None,
            ParseError::InvalidCommandPrefix { span, .. }
            | ParseError::InvalidCommandSequence { span, .. }
            | ParseError::UnsupportedOption { span, .. }
            | ParseError::UnsupportedOptionAlias { span, .. }
            | ParseError::InvalidOptionPrefix { span, .. }
            | ParseError::UnsupportedArguments { span, .. }
            | ParseError::UnterminatedArgument { span, .. }
            | ParseError::UnterminatedOptionValue { span, .. }
            | ParseError::DuplicateOption { span, .. }
            | ParseError::MissingOptionValue { span, .. } => Some(*span),
        }
    }

    /// Render as an error [`Diagnostic`] with machine-readable context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let context = match self {
            ParseError::EmptyRoute { route } => ctx!("route" => route),
            ParseError::InvalidCommandPrefix { command, .. } => ctx!("command" => command),
            ParseError::InvalidCommandSequence {
                command, violation, ..
            } => ctx!("command" => command, "violation" => violation.as_str()),
            ParseError::UnsupportedOption { option, .. }
            | ParseError::UnsupportedOptionAlias { option, .. }
            | ParseError::DuplicateOption { option, .. }
            | ParseError::MissingOptionValue { option, .. } => ctx!("option" => option),
            ParseError::InvalidOptionPrefix {
                option, expected, ..
            } => ctx!("option" => option, "expected_prefix" => expected),
            ParseError::UnsupportedArguments {
                command, arguments, ..
            } => ctx!(
                "command" => command,
                "count" => arguments.len(),
                "arguments" => arguments.join(","),
            ),
            ParseError::UnterminatedArgument { fragment, .. } => ctx!("fragment" => fragment),
            ParseError::UnterminatedOptionValue {
                option, fragment, ..
            } => ctx!("option" => option, "fragment" => fragment),
        };
        Diagnostic::error(self.code(), self.to_string(), self.span()).with_context(context)
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        err.to_diagnostic()
    }
}
