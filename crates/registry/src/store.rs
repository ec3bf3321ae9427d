use std::collections::{HashMap, HashSet};

use cmdroute_config::{TextHandler, strip_jsonc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::descriptor::{CommandDescriptor, CommandType};

/// Errors raised while building a [`CommandStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// JSON deserialization of a registry document failed.
    #[error("invalid registry JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A command, option, alias, or argument has an empty identifier.
    #[error("empty identifier in command '{command}': {what}")]
    EmptyIdentifier {
        /// Command id (empty when the command id itself is missing).
        command: String,
        /// Which identifier was empty.
        what: String,
    },

    /// Two commands share an id.
    #[error("duplicate command id '{id}'")]
    DuplicateCommand {
        /// The repeated id.
        id: String,
    },

    /// Two options of one command share an id or alias.
    #[error("duplicate option identifier '{identifier}' in command '{command}'")]
    DuplicateOption {
        /// Owning command id.
        command: String,
        /// The repeated option id or alias.
        identifier: String,
    },

    /// Two arguments of one command share an id.
    #[error("duplicate argument id '{argument}' in command '{command}'")]
    DuplicateArgument {
        /// Owning command id.
        command: String,
        /// The repeated argument id.
        argument: String,
    },

    /// An owner id does not name a registered command.
    #[error("command '{command}' names unknown owner '{owner}'")]
    UnknownOwner {
        /// The owned command.
        command: String,
        /// The missing owner id.
        owner: String,
    },

    /// An owner id names a subcommand, which cannot own anything.
    #[error("command '{command}' names owner '{owner}', which is a subcommand")]
    InvalidOwner {
        /// The owned command.
        command: String,
        /// The subcommand named as owner.
        owner: String,
    },

    /// A root command lists owners.
    #[error("root command '{command}' must not have owners")]
    OwnedRoot {
        /// The root command id.
        command: String,
    },

    /// The designated default root is not registered.
    #[error("default root '{id}' is not a registered command")]
    UnknownDefaultRoot {
        /// The designated id.
        id: String,
    },

    /// The designated default root is not a root command.
    #[error("default root '{id}' is a {kind}, not a root")]
    DefaultRootNotRoot {
        /// The designated id.
        id: String,
        /// Its actual type.
        kind: CommandType,
    },
}

/// Read-only lookup table of registered commands.
///
/// Built once at startup, validated, and never mutated afterwards. All lookups
/// go through hash indexes keyed by [`TextHandler::canonical`], so the store
/// is cheap to share by reference across threads.
#[derive(Debug, Clone)]
pub struct CommandStore {
    text: TextHandler,
    commands: Vec<CommandDescriptor>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    default_root: Option<usize>,
}

/// On-disk registry document.
///
/// ```jsonc
/// {
///   "text": "ordinal_ignore_case",
///   "default_root": "default",
///   "commands": [
///     { "id": "default", "name": "default", "type": "root" },
///     { "id": "cmd1", "name": "cmd1", "type": "subcommand", "owners": ["default"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Identifier comparison mode.
    #[serde(default)]
    pub text: TextHandler,
    /// Id of the root substituted when a route names no root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_root: Option<String>,
    /// Registered commands.
    #[serde(default)]
    pub commands: Vec<CommandDescriptor>,
}

impl CommandStore {
    /// Validate and index a set of command descriptors.
    ///
    /// Checks, in order: non-empty identifiers, unique command ids, unique
    /// option ids and aliases (jointly) and argument ids per command, owner
    /// references, and the default root designation.
    pub fn new(
        commands: Vec<CommandDescriptor>,
        default_root: Option<&str>,
        text: TextHandler,
    ) -> Result<Self, StoreError> {
        let mut by_id = HashMap::with_capacity(commands.len());
        let mut by_name = HashMap::with_capacity(commands.len());

        for (index, command) in commands.iter().enumerate() {
            validate_members(command, text)?;
            let key = text.canonical(&command.id).into_owned();
            if by_id.insert(key, index).is_some() {
                return Err(StoreError::DuplicateCommand {
                    id: command.id.clone(),
                });
            }
            // First registration wins for display names.
            by_name
                .entry(text.canonical(&command.name).into_owned())
                .or_insert(index);
        }

        for command in &commands {
            if command.is_root() && !command.owners.is_empty() {
                return Err(StoreError::OwnedRoot {
                    command: command.id.clone(),
                });
            }
            for owner in &command.owners {
                let Some(&owner_index) = by_id.get(text.canonical(owner).as_ref()) else {
                    return Err(StoreError::UnknownOwner {
                        command: command.id.clone(),
                        owner: owner.clone(),
                    });
                };
                if commands[owner_index].is_subcommand() {
                    return Err(StoreError::InvalidOwner {
                        command: command.id.clone(),
                        owner: owner.clone(),
                    });
                }
            }
        }

        let default_root = match default_root {
            Some(id) => {
                let Some(&index) = by_id.get(text.canonical(id).as_ref()) else {
                    return Err(StoreError::UnknownDefaultRoot { id: id.to_string() });
                };
                if !commands[index].is_root() {
                    return Err(StoreError::DefaultRootNotRoot {
                        id: id.to_string(),
                        kind: commands[index].kind,
                    });
                }
                Some(index)
            }
            None => None,
        };

        Ok(Self {
            text,
            commands,
            by_id,
            by_name,
            default_root,
        })
    }

    /// Build a store from a parsed [`RegistryDocument`].
    pub fn from_document(doc: RegistryDocument) -> Result<Self, StoreError> {
        Self::new(doc.commands, doc.default_root.as_deref(), doc.text)
    }

    /// The identifier comparison mode used by every lookup.
    pub fn text(&self) -> TextHandler {
        self.text
    }

    /// Look up a command by id.
    pub fn find_by_id(&self, id: &str) -> Option<&CommandDescriptor> {
        self.by_id
            .get(self.text.canonical(id).as_ref())
            .map(|&i| &self.commands[i])
    }

    /// Look up a command by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&CommandDescriptor> {
        self.by_name
            .get(self.text.canonical(name).as_ref())
            .map(|&i| &self.commands[i])
    }

    /// Resolve a path segment: by id first, then by display name.
    pub fn find(&self, segment: &str) -> Option<&CommandDescriptor> {
        self.find_by_id(segment)
            .or_else(|| self.find_by_name(segment))
    }

    /// The root substituted when a route names no root, if designated.
    pub fn default_root(&self) -> Option<&CommandDescriptor> {
        self.default_root.map(|i| &self.commands[i])
    }

    /// Commands that list `owner_id` as an owner, in registration order.
    pub fn children_of<'s>(
        &'s self,
        owner_id: &'s str,
    ) -> impl Iterator<Item = &'s CommandDescriptor> + 's {
        self.commands
            .iter()
            .filter(move |c| c.is_owned_by(owner_id, self.text))
    }

    /// All commands in registration order.
    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn validate_members(command: &CommandDescriptor, text: TextHandler) -> Result<(), StoreError> {
    let empty = |what: String| StoreError::EmptyIdentifier {
        command: command.id.clone(),
        what,
    };
    if command.id.trim().is_empty() {
        return Err(empty("command id".into()));
    }

    let mut option_keys = HashSet::new();
    for option in &command.options {
        if option.id.trim().is_empty() {
            return Err(empty("option id".into()));
        }
        let identifiers = std::iter::once(option.id.as_str()).chain(option.alias.as_deref());
        for identifier in identifiers {
            if identifier.trim().is_empty() {
                return Err(empty(format!("alias of option '{}'", option.id)));
            }
            let key = text.canonical(identifier).into_owned();
            if !option_keys.insert(key) {
                return Err(StoreError::DuplicateOption {
                    command: command.id.clone(),
                    identifier: identifier.to_string(),
                });
            }
        }
    }

    let mut argument_keys = HashSet::new();
    for argument in &command.arguments {
        if argument.id.trim().is_empty() {
            return Err(empty("argument id".into()));
        }
        if !argument_keys.insert(text.canonical(&argument.id).into_owned()) {
            return Err(StoreError::DuplicateArgument {
                command: command.id.clone(),
                argument: argument.id.clone(),
            });
        }
    }
    Ok(())
}

/// Load and validate a [`CommandStore`] from a JSON or JSONC registry document.
pub fn load_store_from_str(s: &str) -> Result<CommandStore, StoreError> {
    let doc: RegistryDocument = serde_json::from_str(&strip_jsonc(s))?;
    CommandStore::from_document(doc)
}
