use cmdroute_config::{ParserOptions, TextHandler};
use cmdroute_diagnostics::Span;
use cmdroute_registry::{CommandDescriptor, OptionDescriptor};
use tracing::debug;

use super::lexer::{Quoting, TokKind, Token};
use crate::error::ParseError;
use crate::model::{ArgumentList, Command, OptionSet, ParsedArgument, ParsedOption};

/// Value bound to a boolean option written without one.
pub const BOOLEAN_SHORTHAND: &str = "True";

// ─── Extractor Mode State Machine ───────────────────────────────────────────

/// The extractor is either between options or collecting an option's value.
enum Mode<'a, 't> {
    /// Plain tokens become positional arguments.
    Scanning,
    /// Plain tokens are appended to the value of `descriptor`.
    OptionValue {
        descriptor: &'a OptionDescriptor,
        /// The option token, for error spans.
        token: &'t Token<'t>,
        values: Vec<&'t str>,
    },
}

/// Bind the tokens after the command path to `command`'s options and arguments.
///
/// Without inline values an option's value is every plain token up to the
/// next option or alias, joined with the separator. A boolean option with no
/// value is [`BOOLEAN_SHORTHAND`]. Plain tokens outside an option value are
/// bound to the declared arguments in order.
pub fn extract<'a>(
    command: &'a CommandDescriptor,
    input: &str,
    tokens: &[Token<'_>],
    opts: &ParserOptions,
    text: TextHandler,
) -> Result<Command<'a>, ParseError> {
    Extractor {
        command,
        input,
        opts,
        text,
        options: OptionSet::new(text),
        positional: Vec::new(),
    }
    .run(tokens)
}

struct Extractor<'a, 'i, 't> {
    command: &'a CommandDescriptor,
    input: &'i str,
    opts: &'i ParserOptions,
    text: TextHandler,
    options: OptionSet<'a>,
    positional: Vec<&'t Token<'t>>,
}

impl<'a, 'i, 't> Extractor<'a, 'i, 't> {
    fn run(mut self, tokens: &'t [Token<'t>]) -> Result<Command<'a>, ParseError> {
        let mut mode = Mode::Scanning;
        let mut iter = tokens.iter().peekable();

        while let Some(tok) = iter.next() {
            match tok.kind {
                TokKind::Value => {
                    if tok.quoting == Quoting::Unterminated {
                        let option = match &mode {
                            Mode::OptionValue { descriptor, .. } => Some(*descriptor),
                            Mode::Scanning => None,
                        };
                        return Err(self.unterminated(tok, option));
                    }
                    match &mut mode {
                        Mode::OptionValue { values, .. } => values.push(tok.text),
                        Mode::Scanning => self.positional.push(tok),
                    }
                }
                TokKind::Option | TokKind::Alias => {
                    if let Mode::OptionValue {
                        descriptor,
                        token,
                        values,
                    } = std::mem::replace(&mut mode, Mode::Scanning)
                    {
                        self.bind(descriptor, token, &values)?;
                    }

                    let descriptor = self.lookup(tok)?;
                    if self.options.get_by_id(&descriptor.id).is_some() {
                        return Err(ParseError::DuplicateOption {
                            option: descriptor.id.clone(),
                            span: span_of(tok),
                        });
                    }
                    if descriptor.obsolete || descriptor.disabled {
                        debug!(
                            option = %descriptor.id,
                            obsolete = descriptor.obsolete,
                            disabled = descriptor.disabled,
                            "flagged option used"
                        );
                    }

                    match iter.next_if(|t| t.inline) {
                        Some(value) => {
                            if value.quoting == Quoting::Unterminated {
                                return Err(self.unterminated(value, Some(descriptor)));
                            }
                            // `--key=` has no value; `--key=""` has an empty one.
                            let values: &[&str] =
                                if value.quoting == Quoting::None && value.text.is_empty() {
                                    &[]
                                } else {
                                    std::slice::from_ref(&value.text)
                                };
                            self.bind(descriptor, tok, values)?;
                        }
                        None => {
                            mode = Mode::OptionValue {
                                descriptor,
                                token: tok,
                                values: Vec::new(),
                            };
                        }
                    }
                }
            }
        }

        if let Mode::OptionValue {
            descriptor,
            token,
            values,
        } = mode
        {
            self.bind(descriptor, token, &values)?;
        }

        self.finish()
    }

    /// Find the descriptor a prefixed token names, enforcing the prefix kind.
    fn lookup(&self, tok: &Token<'_>) -> Result<&'a OptionDescriptor, ParseError> {
        let aliases = self.opts.option_alias_enabled;
        let name = tok.text;
        match tok.kind {
            TokKind::Option => {
                if let Some(d) = self.command.option_by_id(name, self.text) {
                    return Ok(d);
                }
                if aliases && self.command.option_by_alias(name, self.text).is_some() {
                    return Err(ParseError::InvalidOptionPrefix {
                        option: name.to_string(),
                        expected: self.opts.option_alias_prefix.clone(),
                        span: span_of(tok),
                    });
                }
                Err(ParseError::UnsupportedOption {
                    option: name.to_string(),
                    span: span_of(tok),
                })
            }
            _ => {
                let unsupported = || ParseError::UnsupportedOptionAlias {
                    option: name.to_string(),
                    span: span_of(tok),
                };
                if !aliases {
                    return Err(unsupported());
                }
                if let Some(d) = self.command.option_by_alias(name, self.text) {
                    return Ok(d);
                }
                if self.command.option_by_id(name, self.text).is_some() {
                    return Err(ParseError::InvalidOptionPrefix {
                        option: name.to_string(),
                        expected: self.opts.option_prefix.clone(),
                        span: span_of(tok),
                    });
                }
                Err(unsupported())
            }
        }
    }

    fn bind(
        &mut self,
        descriptor: &'a OptionDescriptor,
        token: &Token<'_>,
        values: &[&str],
    ) -> Result<(), ParseError> {
        let value = if !values.is_empty() {
            values.join(&self.opts.separator.to_string())
        } else if descriptor.is_boolean() {
            BOOLEAN_SHORTHAND.to_string()
        } else {
            match (&descriptor.default_value, self.opts.default_option_value_enabled) {
                (Some(default), true) => default.clone(),
                _ => {
                    return Err(ParseError::MissingOptionValue {
                        option: descriptor.id.clone(),
                        span: span_of(token),
                    });
                }
            }
        };
        self.push_option(descriptor, value, false);
        Ok(())
    }

    fn push_option(&mut self, descriptor: &'a OptionDescriptor, value: String, defaulted: bool) {
        let alias = if self.opts.option_alias_enabled {
            descriptor.alias.as_deref()
        } else {
            None
        };
        self.options.insert(ParsedOption {
            id: &descriptor.id,
            alias,
            value,
            defaulted,
            descriptor,
        });
    }

    /// Error for an unclosed quote, inside `option`'s value or as an argument.
    fn unterminated(&self, tok: &Token<'_>, option: Option<&OptionDescriptor>) -> ParseError {
        let fragment = self.input[tok.start..tok.end].to_string();
        let span = span_of(tok);
        match option {
            Some(descriptor) => ParseError::UnterminatedOptionValue {
                option: descriptor.id.clone(),
                fragment,
                span,
            },
            None => ParseError::UnterminatedArgument { fragment, span },
        }
    }

    fn finish(mut self) -> Result<Command<'a>, ParseError> {
        let command = self.command;
        let declared = &command.arguments;
        if self.positional.len() > declared.len() {
            let first = self.positional[0];
            let last = self.positional[self.positional.len() - 1];
            return Err(ParseError::UnsupportedArguments {
                command: command.id.clone(),
                arguments: self.positional.iter().map(|t| t.text.to_string()).collect(),
                span: Span::new(first.start, last.end),
            });
        }

        if self.opts.default_option_enabled {
            for descriptor in &command.options {
                if let Some(default) = &descriptor.default_value
                    && self.options.get_by_id(&descriptor.id).is_none()
                {
                    self.push_option(descriptor, default.clone(), true);
                }
            }
        }

        let arguments: Vec<ParsedArgument<'a>> = self
            .positional
            .iter()
            .zip(declared)
            .enumerate()
            .map(|(position, (tok, descriptor))| ParsedArgument {
                position,
                id: &descriptor.id,
                value: tok.text.to_string(),
                descriptor,
            })
            .collect();

        debug!(
            command = %command.id,
            options = self.options.len(),
            arguments = arguments.len(),
            "extracted options and arguments"
        );

        Ok(Command {
            id: &command.id,
            name: &command.name,
            description: &command.description,
            options: (!command.options.is_empty()).then_some(self.options),
            arguments: (!command.arguments.is_empty())
                .then(|| ArgumentList::new(self.text, arguments)),
            descriptor: command,
        })
    }
}

fn span_of(tok: &Token<'_>) -> Span {
    Span::new(tok.start, tok.end)
}
