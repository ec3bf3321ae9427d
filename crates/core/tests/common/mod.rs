//! Shared test helpers for `cmdroute_core` integration tests.

#![allow(unreachable_pub)]

use std::sync::LazyLock;

use cmdroute_core::{
    ArgumentDescriptor, CommandDescriptor, CommandFlag, CommandRoute, CommandStore, DataType,
    OptionDescriptor, ParseError, ParsedCommand, ParserOptions, RouteParser, TextHandler,
};

/// Fixture tree:
///
/// ```text
/// root1 (named "first") ─ grp1 ─ cmd1 (options opt1..opt8, arguments arg1 arg2)
///       │      ├ cmd2 (nothing declared)
///       │      └ grp2 ─ cmd3 (argument path)
///       └ grp3
/// default (default root) ─ cmd_d1
/// cmd_nr1 (no owners)
/// यूनिकोड ─ परीक्षण ─ प्रिंट
/// 统一码 ─ 测试 ─ 打印
/// ```
pub fn commands() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::root("root1")
            .with_name("first")
            .with_description("first root"),
        CommandDescriptor::group("grp1").with_owner("root1"),
        CommandDescriptor::group("grp2").with_owner("grp1"),
        CommandDescriptor::group("grp3").with_owner("root1"),
        CommandDescriptor::subcommand("cmd1")
            .with_name("command one")
            .with_owner("grp1")
            .with_option(OptionDescriptor::new("opt1", DataType::Text))
            .with_option(OptionDescriptor::new("opt2", DataType::Integer).with_alias("opt2_a"))
            .with_option(
                OptionDescriptor::new("opt3", DataType::Text)
                    .with_alias("o3")
                    .with_default("def3"),
            )
            .with_option(OptionDescriptor::new("opt7", DataType::Boolean).with_alias("opt7_a"))
            .with_option(OptionDescriptor::new("opt8", DataType::Text).obsolete())
            .with_argument(ArgumentDescriptor::new("arg1", DataType::Integer).required())
            .with_argument(ArgumentDescriptor::new("arg2", DataType::Text)),
        CommandDescriptor::subcommand("cmd2").with_owner("grp1"),
        CommandDescriptor::subcommand("cmd3")
            .with_owner("grp2")
            .with_argument(ArgumentDescriptor::new("path", DataType::Uri)),
        CommandDescriptor::root("default"),
        CommandDescriptor::subcommand("cmd_d1")
            .with_owner("default")
            .with_flag(CommandFlag::Obsolete)
            .with_option(OptionDescriptor::new("verbose", DataType::Boolean).with_alias("v")),
        CommandDescriptor::subcommand("cmd_nr1")
            .with_option(OptionDescriptor::new("name", DataType::Text).with_alias("n")),
        CommandDescriptor::root("यूनिकोड"),
        CommandDescriptor::group("परीक्षण").with_owner("यूनिकोड"),
        CommandDescriptor::subcommand("प्रिंट")
            .with_owner("परीक्षण")
            .with_option(OptionDescriptor::new("एक", DataType::Text).with_alias("ए"))
            .with_argument(ArgumentDescriptor::new("तर्क", DataType::Text)),
        CommandDescriptor::root("统一码"),
        CommandDescriptor::group("测试").with_owner("统一码"),
        CommandDescriptor::subcommand("打印")
            .with_owner("测试")
            .with_option(OptionDescriptor::new("选项", DataType::Text).with_alias("选"))
            .with_argument(ArgumentDescriptor::new("参数", DataType::Text)),
    ]
}

/// Case-sensitive store with `default` as the default root, built once per test binary.
pub static STORE: LazyLock<CommandStore> = LazyLock::new(|| {
    CommandStore::new(commands(), Some("default"), TextHandler::Ordinal)
        .unwrap_or_else(|e| panic!("fixture store is invalid: {e}"))
});

/// Case-insensitive variant of [`STORE`].
#[allow(dead_code)]
pub static STORE_IGNORE_CASE: LazyLock<CommandStore> = LazyLock::new(|| {
    CommandStore::new(commands(), Some("default"), TextHandler::OrdinalIgnoreCase)
        .unwrap_or_else(|e| panic!("fixture store is invalid: {e}"))
});

/// Store without a default root.
#[allow(dead_code)]
pub fn store_without_default() -> CommandStore {
    CommandStore::new(commands(), None, TextHandler::Ordinal)
        .unwrap_or_else(|e| panic!("fixture store is invalid: {e}"))
}

/// Parse with the default grammar against [`STORE`].
#[allow(dead_code)]
pub fn parse(raw: &str) -> Result<ParsedCommand<'static>, ParseError> {
    parse_with(raw, ParserOptions::default())
}

/// Parse with a custom grammar against [`STORE`].
#[allow(dead_code)]
pub fn parse_with(raw: &str, options: ParserOptions) -> Result<ParsedCommand<'static>, ParseError> {
    RouteParser::new(&STORE, options).parse(&CommandRoute::new("test", raw))
}

/// Parse and panic with the error if it fails.
#[allow(dead_code)]
pub fn parse_ok(raw: &str) -> ParsedCommand<'static> {
    parse(raw).unwrap_or_else(|e| panic!("'{raw}' should parse: {e}"))
}

/// Parse and panic if it succeeds.
#[allow(dead_code)]
pub fn parse_err(raw: &str) -> ParseError {
    match parse(raw) {
        Ok(p) => panic!("'{raw}' should fail, got {:?}", p.hierarchy.ids()),
        Err(e) => e,
    }
}

/// Grammar with `--key=value` inline values.
#[allow(dead_code)]
pub fn inline_options() -> ParserOptions {
    ParserOptions {
        option_value_separator: '=',
        ..ParserOptions::default()
    }
}

/// Value of a bound option, panicking when absent.
#[allow(dead_code)]
pub fn option_value(parsed: &ParsedCommand<'_>, key: &str) -> String {
    parsed
        .command
        .option(key)
        .unwrap_or_else(|| panic!("option '{key}' not bound"))
        .value
        .clone()
}
