//! Command descriptors and the read-only store the route parser resolves against.
//!
//! A registry is a flat list of [`CommandDescriptor`]s linked by owner ids:
//! roots own groups, groups own groups and subcommands. [`CommandStore`]
//! validates those links once at construction and then serves lookups by id
//! or display name under the store's [`TextHandler`].

#![warn(missing_docs)]

mod descriptor;
mod store;

pub use cmdroute_config::TextHandler;
pub use descriptor::{
    ArgumentDescriptor, CommandDescriptor, CommandFlag, CommandType, DataType, OptionDescriptor,
};
pub use store::{CommandStore, RegistryDocument, StoreError, load_store_from_str};
