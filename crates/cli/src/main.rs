mod render;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmdroute_config::{ParserOptions, load_options_from_str};
use cmdroute_core::{
    CommandRoute, ParsedCommand, Quoting, RouteParser, TokKind, tokenize_with_options,
};
use cmdroute_diagnostics::{self as diag, Diagnostic, Severity};
use cmdroute_registry::{CommandDescriptor, CommandStore, CommandType, load_store_from_str};
use tracing::{Level, debug};

use crate::render::{Format, print_summary, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cmdroute",
    version,
    about = "cmdroute: tokenize and parse command routes against a command registry"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log parser internals to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a route against a registry and print the bound command.
    Parse {
        /// Registry document (JSON or JSONC).
        #[arg(long)]
        registry: String,
        /// Parser options document (JSON or JSONC). Defaults apply when omitted.
        #[arg(long)]
        options: Option<String>,
        /// Correlation id echoed in the output.
        #[arg(long, default_value = "cli")]
        id: String,
        /// The route. Several words are joined with a single space; pass one
        /// quoted argument to keep the route verbatim.
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        route: Vec<String>,
    },

    /// Split a route into tokens without resolving it.
    Tokenize {
        /// Parser options document (JSON or JSONC).
        #[arg(long)]
        options: Option<String>,
        /// The route (see `parse --help`).
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        route: Vec<String>,
    },

    /// Validate a registry document and summarise its commands.
    Registry {
        /// Registry document (JSON or JSONC).
        file: String,
    },

    /// Explain a diagnostic code (e.g. CR4001).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.cmd, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": false,
                    "error": "command_failed",
                    "message": format!("{err:#}"),
                });
                println!("{out:#}");
            }
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Parse {
            registry,
            options,
            id,
            route,
        } => cmd_parse(&registry, options.as_deref(), &id, &route.join(" "), format),
        Cmd::Tokenize { options, route } => {
            cmd_tokenize(options.as_deref(), &route.join(" "), format)
        }
        Cmd::Registry { file } => cmd_registry(&file, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(
    registry_path: &str,
    options_path: Option<&str>,
    route_id: &str,
    raw: &str,
    format: Format,
) -> Result<()> {
    let store = load_registry(registry_path)?;
    let options = load_options(options_path)?;
    let parser = RouteParser::new(&store, options);
    let route = CommandRoute::new(route_id, raw);

    let parsed = match parser.parse(&route) {
        Ok(parsed) => parsed,
        Err(err) => {
            let diagnostics = vec![err.to_diagnostic()];
            match format {
                Format::Json => {
                    let out = serde_json::json!({
                        "ok": false,
                        "route_id": route.id,
                        "diagnostics": diagnostics,
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Format::Pretty => {
                    render_diagnostics_pretty(route.raw.trim(), "<route>", &diagnostics);
                    print_summary(&diagnostics);
                }
            }
            exit_on_errors(&diagnostics);
            return Ok(());
        }
    };

    let warnings = parsed.warnings();
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": true,
                "route_id": route.id,
                "command": parsed.command,
                "hierarchy": parsed.hierarchy,
                "diagnostics": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            print_parsed(&parsed);
            if !warnings.is_empty() {
                render_diagnostics_pretty(route.raw.trim(), "<route>", &warnings);
                print_summary(&warnings);
            }
        }
    }
    Ok(())
}

fn cmd_tokenize(options_path: Option<&str>, raw: &str, format: Format) -> Result<()> {
    let options = load_options(options_path)?;
    let input = raw.trim();
    let tokens = tokenize_with_options(input, &options);

    match format {
        Format::Json => {
            let out = serde_json::json!({ "route": input, "tokens": tokens });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for t in &tokens {
                let kind = match t.kind {
                    TokKind::Value => "value",
                    TokKind::Option => "option",
                    TokKind::Alias => "alias",
                };
                let mut notes = Vec::new();
                if t.inline {
                    notes.push("inline");
                }
                match t.quoting {
                    Quoting::Closed => notes.push("quoted"),
                    Quoting::Unterminated => notes.push("unterminated"),
                    Quoting::None => {}
                }
                let notes = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", notes.join(", "))
                };
                println!("{:>4}..{:<4} {kind:<6} {:?}{notes}", t.start, t.end, t.text);
            }
        }
    }
    Ok(())
}

fn cmd_registry(path: &str, format: Format) -> Result<()> {
    let store = load_registry(path)?;
    let count = |kind: CommandType| store.commands().iter().filter(|c| c.kind == kind).count();
    let default_root = store.default_root().map(|c| c.id.as_str());

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": true,
                "text": store.text(),
                "default_root": default_root,
                "commands": store.len(),
                "roots": count(CommandType::Root),
                "groups": count(CommandType::Group),
                "subcommands": count(CommandType::SubCommand),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!(
                "{} commands: {} roots, {} groups, {} subcommands",
                store.len(),
                count(CommandType::Root),
                count(CommandType::Group),
                count(CommandType::SubCommand),
            );
            println!(
                "text: {}",
                if store.text().is_case_sensitive() {
                    "ordinal"
                } else {
                    "ordinal_ignore_case"
                }
            );
            println!("default root: {}", default_root.unwrap_or("(none)"));

            let mut path = Vec::new();
            for root in store.commands().iter().filter(|c| c.is_root()) {
                print_tree(&store, root, &mut path);
            }
            let unowned: Vec<&str> = store
                .commands()
                .iter()
                .filter(|c| !c.is_root() && c.owners.is_empty())
                .map(|c| c.id.as_str())
                .collect();
            if !unowned.is_empty() {
                println!("unowned: {}", unowned.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{}: (no explanation available)", id);
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn load_registry(path: &str) -> Result<CommandStore> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read registry file '{path}'"))?;
    let store = load_store_from_str(&text)
        .with_context(|| format!("invalid registry file '{path}'"))?;
    debug!(path, commands = store.len(), "registry loaded");
    Ok(store)
}

fn load_options(path: Option<&str>) -> Result<ParserOptions> {
    let Some(path) = path else {
        return Ok(ParserOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file '{path}'"))?;
    load_options_from_str(&text).with_context(|| format!("invalid options file '{path}'"))
}

fn print_parsed(parsed: &ParsedCommand<'_>) {
    let path: Vec<String> = parsed
        .hierarchy
        .links()
        .iter()
        .map(|l| {
            if l.is_default {
                format!("({})", l.id)
            } else {
                l.id.to_string()
            }
        })
        .collect();
    println!("path: {}", path.join(" > "));

    let command = &parsed.command;
    if command.name == command.id {
        println!("command: {}", command.id);
    } else {
        println!("command: {} ({})", command.id, command.name);
    }
    for option in command.options.iter().flatten() {
        let defaulted = if option.defaulted { " (default)" } else { "" };
        println!("  option {} = {:?}{defaulted}", option.id, option.value);
    }
    for argument in command.arguments.iter().flatten() {
        println!(
            "  argument {} [{}] = {:?}",
            argument.id, argument.position, argument.value
        );
    }
}

/// Print `command` and its descendants, indented by depth. `path` holds the
/// ids already on the current branch so ownership cycles print once.
fn print_tree<'s>(store: &'s CommandStore, command: &'s CommandDescriptor, path: &mut Vec<&'s str>) {
    let indent = "  ".repeat(path.len());
    if path.contains(&command.id.as_str()) {
        println!("{indent}{} (cycle)", command.id);
        return;
    }
    println!("{indent}{} [{}]", command.id, command.kind);

    path.push(&command.id);
    for child in store.children_of(&command.id) {
        print_tree(store, child, path);
    }
    path.pop();
}

/// Exit with code 1 if any diagnostic is an error.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics.iter().any(|d| d.severity == Severity::Error) {
        process::exit(1);
    }
}
