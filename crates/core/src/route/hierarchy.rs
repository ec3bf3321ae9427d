use cmdroute_diagnostics::Span;
use cmdroute_registry::{CommandDescriptor, CommandStore, CommandType};
use serde::Serialize;
use tracing::debug;

use super::lexer::Token;
use crate::error::{ParseError, SequenceViolation};

/// One link of a resolved command path.
#[derive(Debug, Clone, Serialize)]
pub struct HierarchyLink<'a> {
    /// Descriptor id.
    pub id: &'a str,
    /// Descriptor type.
    pub kind: CommandType,
    /// Substituted default root, absent from the route text.
    pub is_default: bool,
    /// The linked descriptor.
    #[serde(skip)]
    pub command: &'a CommandDescriptor,
}

/// A resolved command path: a root, zero or more groups, and at most one
/// subcommand, in route order.
///
/// Never empty. The root link comes first even when it was substituted.
#[derive(Debug, Clone, Serialize)]
pub struct Hierarchy<'a> {
    links: Vec<HierarchyLink<'a>>,
}

impl<'a> Hierarchy<'a> {
    /// The root link.
    pub fn root(&self) -> &HierarchyLink<'a> {
        &self.links[0]
    }

    /// Whether the root was substituted because the route named none.
    pub fn is_default(&self) -> bool {
        self.root().is_default
    }

    /// The root's descriptor.
    pub fn linked_command(&self) -> &'a CommandDescriptor {
        self.root().command
    }

    /// Every link, root first.
    pub fn links(&self) -> &[HierarchyLink<'a>] {
        &self.links
    }

    /// Group links in path order.
    pub fn groups(&self) -> impl Iterator<Item = &HierarchyLink<'a>> {
        self.links.iter().filter(|l| l.kind == CommandType::Group)
    }

    /// The terminal subcommand, if the path ends in one.
    pub fn subcommand(&self) -> Option<&HierarchyLink<'a>> {
        self.links
            .last()
            .filter(|l| l.kind == CommandType::SubCommand)
    }

    /// The last link, whose descriptor governs options and arguments.
    pub fn leaf(&self) -> &HierarchyLink<'a> {
        // Non-empty by construction.
        &self.links[self.links.len() - 1]
    }

    /// The group directly below the link at `index`, if any.
    pub fn child_group(&self, index: usize) -> Option<&HierarchyLink<'a>> {
        self.links
            .get(index + 1)
            .filter(|l| l.kind == CommandType::Group)
    }

    /// The subcommand directly below the link at `index`, if any.
    pub fn child_subcommand(&self, index: usize) -> Option<&HierarchyLink<'a>> {
        self.links
            .get(index + 1)
            .filter(|l| l.kind == CommandType::SubCommand)
    }

    /// Descriptor ids, root first.
    pub fn ids(&self) -> Vec<&'a str> {
        self.links.iter().map(|l| l.id).collect()
    }

    /// Number of links (at least one).
    pub fn depth(&self) -> usize {
        self.links.len()
    }
}

/// Resolve the leading path tokens of a route against the store.
///
/// Returns the hierarchy and how many tokens it consumed. A token belongs to
/// the path when it is a plain value that names a registered command; the
/// first one that does not ends the path.
pub fn resolve<'a>(
    store: &'a CommandStore,
    input: &str,
    tokens: &[Token<'_>],
) -> Result<(Hierarchy<'a>, usize), ParseError> {
    let path: Vec<(&Token<'_>, &'a CommandDescriptor)> = tokens
        .iter()
        .map_while(|t| {
            if t.is_plain() {
                store.find(t.text).map(|c| (t, c))
            } else {
                None
            }
        })
        .collect();
    let consumed = path.len();

    let mut links = Vec::with_capacity(path.len() + 1);
    let mut segments = path.iter();
    match path.first() {
        Some(&(_, first)) if first.is_root() => {
            links.push(link(first, false));
            segments.next();
        }
        _ => {
            let Some(default_root) = store.default_root() else {
                let (command, span) = match tokens.first() {
                    Some(t) => (input[t.start..t.end].to_string(), Span::new(t.start, t.end)),
                    None => (String::new(), Span::empty(0)),
                };
                return Err(ParseError::InvalidCommandPrefix { command, span });
            };
            debug!(root = %default_root.id, "no explicit root, using default root");
            links.push(link(default_root, true));
        }
    }

    for &(token, command) in segments {
        let prev = links[links.len() - 1].command;
        if let Some(violation) = check_segment(store, &links, prev, command) {
            return Err(ParseError::InvalidCommandSequence {
                command: token.text.to_string(),
                violation,
                span: Span::new(token.start, token.end),
            });
        }
        links.push(link(command, false));
    }

    let hierarchy = Hierarchy { links };
    debug!(
        path = ?hierarchy.ids(),
        is_default = hierarchy.is_default(),
        consumed,
        "resolved command hierarchy"
    );
    Ok((hierarchy, consumed))
}

fn link(command: &CommandDescriptor, is_default: bool) -> HierarchyLink<'_> {
    HierarchyLink {
        id: &command.id,
        kind: command.kind,
        is_default,
        command,
    }
}

fn check_segment(
    store: &CommandStore,
    links: &[HierarchyLink<'_>],
    prev: &CommandDescriptor,
    command: &CommandDescriptor,
) -> Option<SequenceViolation> {
    if links.iter().any(|l| std::ptr::eq(l.command, command)) {
        return Some(SequenceViolation::Duplicate);
    }
    if prev.is_subcommand() {
        return Some(SequenceViolation::NestedSubcommand);
    }
    if command.is_root() {
        return Some(SequenceViolation::OutOfOrder);
    }
    if command.is_owned_by(&prev.id, store.text()) {
        return None;
    }
    // Unowned commands hang off the default root.
    let under_default = store
        .default_root()
        .is_some_and(|root| std::ptr::eq(root, prev));
    if under_default && command.owners.is_empty() {
        return None;
    }
    Some(SequenceViolation::OutOfOrder)
}
