//! Runtime command model produced by a successful parse.

use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use cmdroute_config::TextHandler;
use cmdroute_diagnostics::{Diagnostic, codes};
use cmdroute_registry::{ArgumentDescriptor, CommandDescriptor, CommandFlag, OptionDescriptor};
use serde::{Serialize, Serializer};

use crate::route::hierarchy::Hierarchy;

/// Parser input: a raw route plus a correlation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRoute {
    /// Correlation id, echoed in logs and in [`ParseError::EmptyRoute`](crate::ParseError::EmptyRoute).
    pub id: String,
    /// The raw command line.
    pub raw: String,
}

impl CommandRoute {
    /// Create a route.
    pub fn new(id: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw: raw.into(),
        }
    }
}

/// Parser output: the bound command and the path that selected it.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedCommand<'a> {
    /// The leaf command with its bound options and arguments.
    pub command: Command<'a>,
    /// The resolved path, root first.
    pub hierarchy: Hierarchy<'a>,
}

impl ParsedCommand<'_> {
    /// Warnings for registry flags the route ran into.
    ///
    /// One for the leaf command when it is obsolete or disabled, and one per
    /// option the route supplied whose descriptor is. Options added from
    /// their default are not reported. The parse itself has already
    /// succeeded; these never carry a span.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        let leaf = self.command.descriptor;
        for (flag, word) in [
            (CommandFlag::Obsolete, "obsolete"),
            (CommandFlag::Disabled, "disabled"),
        ] {
            if leaf.has_flag(flag) {
                out.push(
                    Diagnostic::warn(
                        codes::FLAGGED_COMMAND,
                        format!("the command is {word}. command={}", leaf.id),
                        None,
                    )
                    .with_context(BTreeMap::from([
                        ("command".to_string(), leaf.id.clone()),
                        ("flag".to_string(), word.to_string()),
                    ])),
                );
            }
        }

        for option in self.command.options.iter().flatten() {
            if option.defaulted {
                continue;
            }
            let descriptor = option.descriptor;
            for (set, word) in [
                (descriptor.obsolete, "obsolete"),
                (descriptor.disabled, "disabled"),
            ] {
                if set {
                    out.push(
                        Diagnostic::warn(
                            codes::FLAGGED_OPTION,
                            format!("the option is {word}. option={}", descriptor.id),
                            None,
                        )
                        .with_context(BTreeMap::from([
                            ("command".to_string(), leaf.id.clone()),
                            ("flag".to_string(), word.to_string()),
                            ("option".to_string(), descriptor.id.clone()),
                        ])),
                    );
                }
            }
        }
        out
    }
}

/// A command descriptor bound to parsed values.
#[derive(Debug, Clone, Serialize)]
pub struct Command<'a> {
    /// Descriptor id.
    pub id: &'a str,
    /// Descriptor display name.
    pub name: &'a str,
    /// Descriptor description.
    pub description: &'a str,
    /// Bound options. `None` when the command declares no options.
    pub options: Option<OptionSet<'a>>,
    /// Bound arguments. `None` when the command declares no arguments.
    pub arguments: Option<ArgumentList<'a>>,
    /// The descriptor this command was bound against.
    #[serde(skip)]
    pub descriptor: &'a CommandDescriptor,
}

impl<'a> Command<'a> {
    /// Bound option by id or alias.
    pub fn option(&self, key: &str) -> Option<&ParsedOption<'a>> {
        self.options.as_ref()?.get(key)
    }

    /// Bound argument by position.
    pub fn argument(&self, position: usize) -> Option<&ParsedArgument<'a>> {
        self.arguments.as_ref()?.get(position)
    }
}

/// An option bound to its value.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedOption<'a> {
    /// Descriptor id.
    pub id: &'a str,
    /// Descriptor alias, when declared and aliases are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<&'a str>,
    /// Raw value text; type coercion is left to downstream checkers.
    pub value: String,
    /// Added from the descriptor default because the route omitted it.
    pub defaulted: bool,
    /// The descriptor this option was bound against.
    #[serde(skip)]
    pub descriptor: &'a OptionDescriptor,
}

/// Bound options, addressable by id and by alias.
///
/// Each option is stored once; the id and alias indexes point at the same
/// entry, so `set.get(id)` and `set.get(alias)` return the same reference.
#[derive(Debug, Clone)]
pub struct OptionSet<'a> {
    text: TextHandler,
    entries: Vec<ParsedOption<'a>>,
    by_id: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl<'a> OptionSet<'a> {
    pub(crate) fn new(text: TextHandler) -> Self {
        Self {
            text,
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_alias: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, option: ParsedOption<'a>) {
        let index = self.entries.len();
        self.by_id
            .insert(self.text.canonical(option.id).into_owned(), index);
        if let Some(alias) = option.alias {
            self.by_alias
                .insert(self.text.canonical(alias).into_owned(), index);
        }
        self.entries.push(option);
    }

    /// Look up by id, then by alias.
    pub fn get(&self, key: &str) -> Option<&ParsedOption<'a>> {
        self.get_by_id(key).or_else(|| self.get_by_alias(key))
    }

    /// Look up by id only.
    pub fn get_by_id(&self, id: &str) -> Option<&ParsedOption<'a>> {
        self.by_id
            .get(self.text.canonical(id).as_ref())
            .map(|&i| &self.entries[i])
    }

    /// Look up by alias only.
    pub fn get_by_alias(&self, alias: &str) -> Option<&ParsedOption<'a>> {
        self.by_alias
            .get(self.text.canonical(alias).as_ref())
            .map(|&i| &self.entries[i])
    }

    /// Whether an option is bound under `key` (id or alias).
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of bound options (each counted once).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no options are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound options in binding order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParsedOption<'a>> {
        self.entries.iter()
    }
}

impl<'a> Index<&str> for OptionSet<'a> {
    type Output = ParsedOption<'a>;

    fn index(&self, key: &str) -> &Self::Output {
        match self.get(key) {
            Some(option) => option,
            None => panic!("no option bound under '{key}'"),
        }
    }
}

impl<'s, 'a> IntoIterator for &'s OptionSet<'a> {
    type Item = &'s ParsedOption<'a>;
    type IntoIter = std::slice::Iter<'s, ParsedOption<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for OptionSet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

/// A positional value bound to its argument descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedArgument<'a> {
    /// Declaration index, equal to the order of appearance.
    pub position: usize,
    /// Descriptor id.
    pub id: &'a str,
    /// Raw value text.
    pub value: String,
    /// The descriptor this argument was bound against.
    #[serde(skip)]
    pub descriptor: &'a ArgumentDescriptor,
}

/// Bound arguments in position order.
#[derive(Debug, Clone)]
pub struct ArgumentList<'a> {
    text: TextHandler,
    entries: Vec<ParsedArgument<'a>>,
}

impl<'a> ArgumentList<'a> {
    pub(crate) fn new(text: TextHandler, entries: Vec<ParsedArgument<'a>>) -> Self {
        Self { text, entries }
    }

    /// Argument at `position`.
    pub fn get(&self, position: usize) -> Option<&ParsedArgument<'a>> {
        self.entries.get(position)
    }

    /// Argument by descriptor id.
    pub fn get_by_id(&self, id: &str) -> Option<&ParsedArgument<'a>> {
        self.entries
            .iter()
            .find(|a| self.text.text_equals(a.id, id))
    }

    /// Number of bound arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no arguments are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound arguments in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParsedArgument<'a>> {
        self.entries.iter()
    }
}

impl<'a> Index<usize> for ArgumentList<'a> {
    type Output = ParsedArgument<'a>;

    fn index(&self, position: usize) -> &Self::Output {
        &self.entries[position]
    }
}

impl Serialize for ArgumentList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

impl<'s, 'a> IntoIterator for &'s ArgumentList<'a> {
    type Item = &'s ParsedArgument<'a>;
    type IntoIter = std::slice::Iter<'s, ParsedArgument<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
