use cmdroute_config::TextHandler;
use serde::{Deserialize, Serialize};

/// Position of a command in the hierarchy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Entry point of a command path; never owned.
    Root,
    /// Organizes child groups and subcommands; reached through its owner.
    Group,
    /// Terminal, executable command.
    SubCommand,
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandType::Root => write!(f, "root"),
            CommandType::Group => write!(f, "group"),
            CommandType::SubCommand => write!(f, "subcommand"),
        }
    }
}

/// Registration flags on a command. An empty flag list means "none".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CommandFlag {
    /// Requires elevated access to run.
    Protected,
    /// Still accepted but scheduled for removal.
    Obsolete,
    /// Registered but not currently runnable.
    Disabled,
}

/// Declared value type of an option or argument.
///
/// The parser only consults [`DataType::Boolean`] (for the valueless
/// shorthand); every other type is passed through for downstream checkers.
/// Serialized as a plain string; unknown names become [`DataType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    /// Free text.
    #[default]
    Text,
    /// `true` / `false`.
    Boolean,
    /// Whole number.
    Integer,
    /// Decimal number.
    Decimal,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    DateTime,
    /// URI or URL.
    Uri,
    /// Application-defined type name.
    Custom(String),
}

impl DataType {
    /// Canonical string name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Text => "text",
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::Decimal => "decimal",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::DateTime => "datetime",
            DataType::Uri => "uri",
            DataType::Custom(name) => name,
        }
    }
}

impl From<String> for DataType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => DataType::Text,
            "boolean" => DataType::Boolean,
            "integer" => DataType::Integer,
            "decimal" => DataType::Decimal,
            "date" => DataType::Date,
            "time" => DataType::Time,
            "datetime" => DataType::DateTime,
            "uri" => DataType::Uri,
            _ => DataType::Custom(s),
        }
    }
}

impl From<DataType> for String {
    fn from(t: DataType) -> Self {
        match t {
            DataType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, non-positional parameter of a command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Identifier written after the option prefix. Unique per command.
    pub id: String,
    /// Identifier written after the alias prefix. Unique per command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Declared value type.
    #[serde(default)]
    pub data_type: DataType,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Must be supplied (checked downstream, not by the parser).
    #[serde(default)]
    pub required: bool,
    /// Registered but not currently accepted by checkers.
    #[serde(default)]
    pub disabled: bool,
    /// Still accepted but scheduled for removal.
    #[serde(default)]
    pub obsolete: bool,
    /// Value used when the option is written without one, or omitted entirely
    /// (see `ParserOptions`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl OptionDescriptor {
    /// An optional option with no alias and no default.
    pub fn new(id: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: id.into(),
            alias: None,
            data_type,
            description: String::new(),
            required: false,
            disabled: false,
            obsolete: false,
            default_value: None,
        }
    }

    /// Set the alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark as obsolete.
    pub fn obsolete(mut self) -> Self {
        self.obsolete = true;
        self
    }

    /// Mark as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether the option may be written without a value.
    pub fn is_boolean(&self) -> bool {
        self.data_type == DataType::Boolean
    }
}

/// A positional parameter of a command. Its position is its declaration index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    /// Identifier, unique per command.
    pub id: String,
    /// Declared value type.
    #[serde(default)]
    pub data_type: DataType,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Must be supplied (checked downstream, not by the parser).
    #[serde(default)]
    pub required: bool,
}

impl ArgumentDescriptor {
    /// An optional argument.
    pub fn new(id: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: id.into(),
            data_type,
            description: String::new(),
            required: false,
        }
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A registered command definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Globally unique identifier; also the path segment that selects it.
    pub id: String,
    /// Display name; also accepted as a path segment.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Root, group, or subcommand.
    #[serde(rename = "type")]
    pub kind: CommandType,
    /// Registration flags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<CommandFlag>,
    /// Ids of the roots or groups this command may follow in a path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owners: Vec<String>,
    /// Declared options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDescriptor>,
    /// Declared positional arguments, in position order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDescriptor>,
}

impl CommandDescriptor {
    /// A command with no owners, options, or arguments; `name` defaults to `id`.
    pub fn new(id: impl Into<String>, kind: CommandType) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            kind,
            flags: Vec::new(),
            owners: Vec::new(),
            options: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Shorthand for a [`CommandType::Root`].
    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, CommandType::Root)
    }

    /// Shorthand for a [`CommandType::Group`].
    pub fn group(id: impl Into<String>) -> Self {
        Self::new(id, CommandType::Group)
    }

    /// Shorthand for a [`CommandType::SubCommand`].
    pub fn subcommand(id: impl Into<String>) -> Self {
        Self::new(id, CommandType::SubCommand)
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an owner id.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owners.push(owner.into());
        self
    }

    /// Add a flag.
    pub fn with_flag(mut self, flag: CommandFlag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Declare an option.
    pub fn with_option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    /// Declare the next positional argument.
    pub fn with_argument(mut self, argument: ArgumentDescriptor) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Whether the given flag is set.
    pub fn has_flag(&self, flag: CommandFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Whether this is a root command.
    pub fn is_root(&self) -> bool {
        self.kind == CommandType::Root
    }

    /// Whether this is a group.
    pub fn is_group(&self) -> bool {
        self.kind == CommandType::Group
    }

    /// Whether this is a subcommand.
    pub fn is_subcommand(&self) -> bool {
        self.kind == CommandType::SubCommand
    }

    /// Whether `owner_id` is one of this command's owners.
    pub fn is_owned_by(&self, owner_id: &str, text: TextHandler) -> bool {
        self.owners.iter().any(|o| text.text_equals(o, owner_id))
    }

    /// The argument declared at `position`, if any.
    pub fn argument_at(&self, position: usize) -> Option<&ArgumentDescriptor> {
        self.arguments.get(position)
    }

    /// Find a declared option by id.
    pub fn option_by_id(&self, id: &str, text: TextHandler) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| text.text_equals(&o.id, id))
    }

    /// Find a declared option by alias.
    pub fn option_by_alias(&self, alias: &str, text: TextHandler) -> Option<&OptionDescriptor> {
        self.options
            .iter()
            .find(|o| o.alias.as_deref().is_some_and(|a| text.text_equals(a, alias)))
    }
}
