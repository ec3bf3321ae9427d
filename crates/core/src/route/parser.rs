use cmdroute_config::ParserOptions;
use cmdroute_registry::{CommandFlag, CommandStore};
use tracing::{debug, debug_span};

use super::{extract::extract, hierarchy::resolve, lexer::tokenize_with_options};
use crate::error::ParseError;
use crate::model::{CommandRoute, ParsedCommand};

/// Parses command routes against a command store.
///
/// Holds only shared references and an immutable grammar, so one parser can
/// serve any number of threads. Each call builds its own tokens, hierarchy,
/// and runtime command.
///
/// `options` are used as given; [`cmdroute_config::load_options_from_str`]
/// and [`ParserOptions::validate`] are the places to reject a bad grammar.
#[derive(Debug, Clone)]
pub struct RouteParser<'s> {
    store: &'s CommandStore,
    options: ParserOptions,
}

impl<'s> RouteParser<'s> {
    /// Create a parser over `store` with the given grammar.
    pub fn new(store: &'s CommandStore, options: ParserOptions) -> Self {
        Self { store, options }
    }

    /// The store routes are resolved against.
    pub fn store(&self) -> &'s CommandStore {
        self.store
    }

    /// The grammar in use.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse one route into a bound command and its hierarchy.
    ///
    /// Leading and trailing whitespace is ignored, and error spans are byte
    /// offsets into the trimmed text. The first error aborts the parse.
    pub fn parse(&self, route: &CommandRoute) -> Result<ParsedCommand<'s>, ParseError> {
        let span = debug_span!("parse_route", route_id = %route.id);
        let _enter = span.enter();

        let result = self.parse_inner(route);
        if let Err(err) = &result {
            debug!(code = err.code(), error = %err, "route rejected");
        }
        result
    }

    fn parse_inner(&self, route: &CommandRoute) -> Result<ParsedCommand<'s>, ParseError> {
        let input = route.raw.trim();
        let empty = || ParseError::EmptyRoute {
            route: route.id.clone(),
        };
        if input.is_empty() {
            return Err(empty());
        }

        let tokens = tokenize_with_options(input, &self.options);
        debug!(tokens = tokens.len(), "tokenized route");
        if tokens.is_empty() {
            return Err(empty());
        }

        let (hierarchy, consumed) = resolve(self.store, input, &tokens)?;
        let leaf = hierarchy.leaf().command;
        for flag in [CommandFlag::Obsolete, CommandFlag::Disabled] {
            if leaf.has_flag(flag) {
                debug!(command = %leaf.id, ?flag, "flagged command resolved");
            }
        }

        let command = extract(
            leaf,
            input,
            &tokens[consumed..],
            &self.options,
            self.store.text(),
        )?;
        Ok(ParsedCommand { command, hierarchy })
    }
}

/// Parse `raw` with the default grammar. The route id is empty.
pub fn parse_route<'s>(store: &'s CommandStore, raw: &str) -> Result<ParsedCommand<'s>, ParseError> {
    RouteParser::new(store, ParserOptions::default()).parse(&CommandRoute::new("", raw))
}
