//! cmdroute core library.
//!
//! Turns a raw command line into a [`ParsedCommand`]: the route is split into
//! tokens ([`tokenize_with_options`]), its leading segments are resolved to a
//! root, groups, and a subcommand ([`resolve`]), and the rest is bound to the
//! leaf command's options and arguments ([`extract`]). [`RouteParser`] runs
//! the three steps and fails with a [`ParseError`] on the first problem.
//!
//! ```
//! use cmdroute_core::{parse_route, CommandDescriptor, CommandStore, DataType,
//!     OptionDescriptor, TextHandler};
//!
//! let store = CommandStore::new(
//!     vec![
//!         CommandDescriptor::root("root1"),
//!         CommandDescriptor::group("grp1").with_owner("root1"),
//!         CommandDescriptor::subcommand("cmd1")
//!             .with_owner("grp1")
//!             .with_option(OptionDescriptor::new("opt1", DataType::Integer)),
//!     ],
//!     None,
//!     TextHandler::Ordinal,
//! )
//! .unwrap();
//!
//! let parsed = parse_route(&store, "root1 grp1 cmd1 --opt1 34").unwrap();
//! assert_eq!(parsed.command.id, "cmd1");
//! assert_eq!(parsed.command.option("opt1").unwrap().value, "34");
//! assert_eq!(parsed.hierarchy.ids(), ["root1", "grp1", "cmd1"]);
//! ```

#![warn(missing_docs)]

/// Parse errors and their diagnostic mapping.
pub mod error;
/// Runtime command model.
pub mod model;
/// Tokenizer, resolver, extractor, and parser.
pub mod route;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Pipeline
pub use route::extract::{BOOLEAN_SHORTHAND, extract};
pub use route::hierarchy::{Hierarchy, HierarchyLink, resolve};
pub use route::lexer::{Quoting, TokKind, Token, tokenize, tokenize_with_options};
pub use route::parser::{RouteParser, parse_route};

// Model
pub use model::{
    ArgumentList, Command, CommandRoute, OptionSet, ParsedArgument, ParsedCommand, ParsedOption,
};

// Errors
pub use error::{ParseError, SequenceViolation};

// Collaborators (re-exported from the config, registry, and diagnostics crates)
pub use cmdroute_config::{ParserOptions, TextHandler};
pub use cmdroute_diagnostics::{Diagnostic, Severity, Span, codes};
pub use cmdroute_registry::{
    ArgumentDescriptor, CommandDescriptor, CommandFlag, CommandStore, CommandType, DataType,
    OptionDescriptor,
};
