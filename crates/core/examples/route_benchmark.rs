//! Lightweight tokenize/parse benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p cmdroute_core --example route_benchmark --release`
//!
//! Set `CMDROUTE_BENCH_ITERS` to change the iteration count.

use std::time::Instant;

use cmdroute_core::{
    ArgumentDescriptor, CommandDescriptor, CommandRoute, CommandStore, DataType, OptionDescriptor,
    ParserOptions, RouteParser, TextHandler, tokenize_with_options,
};

/// One root, `width` groups under it, and `width` subcommands under each group.
fn synthetic_store(width: usize) -> Result<CommandStore, String> {
    let mut commands = vec![CommandDescriptor::root("bench")];
    for g in 0..width {
        let group = format!("grp{g}");
        commands.push(CommandDescriptor::group(&group).with_owner("bench"));
        for c in 0..width {
            commands.push(
                CommandDescriptor::subcommand(format!("cmd{g}_{c}"))
                    .with_owner(&group)
                    .with_option(OptionDescriptor::new("name", DataType::Text).with_alias("n"))
                    .with_option(OptionDescriptor::new("count", DataType::Integer))
                    .with_option(OptionDescriptor::new("force", DataType::Boolean).with_alias("f"))
                    .with_argument(ArgumentDescriptor::new("target", DataType::Text)),
            );
        }
    }
    CommandStore::new(commands, None, TextHandler::OrdinalIgnoreCase).map_err(|e| e.to_string())
}

fn run_benchmark(label: &str, raw: &str, parser: &RouteParser<'_>, iterations: usize) {
    let route = CommandRoute::new(label, raw);

    let tokenize_start = Instant::now();
    for _ in 0..iterations {
        let _ = tokenize_with_options(raw, parser.options());
    }
    let tokenize_elapsed = tokenize_start.elapsed();

    let parse_start = Instant::now();
    for _ in 0..iterations {
        let _ = parser.parse(&route);
    }
    let parse_elapsed = parse_start.elapsed();

    println!("Benchmark: {label}");
    println!("  route_bytes: {}", raw.len());
    println!(
        "  tokenize: total={:?}, per_iter={:.3} us",
        tokenize_elapsed,
        tokenize_elapsed.as_secs_f64() * 1e6 / iterations as f64
    );
    println!(
        "  parse:    total={:?}, per_iter={:.3} us",
        parse_elapsed,
        parse_elapsed.as_secs_f64() * 1e6 / iterations as f64
    );
}

fn main() -> Result<(), String> {
    let iterations = std::env::var("CMDROUTE_BENCH_ITERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(100_000);

    let store = synthetic_store(32)?;
    let parser = RouteParser::new(&store, ParserOptions::default());

    let long_value = format!("--name \"{}\"", "x ".repeat(256));
    let routes = [
        ("short", "bench grp3 cmd3_7".to_string()),
        ("options", "BENCH grp31 cmd31_0 target --name a b c --count 3 -f".to_string()),
        ("quoted", format!("bench grp0 cmd0_0 {long_value}")),
        ("rejected", "bench grp0 cmd0_0 --missing".to_string()),
    ];

    for (label, raw) in &routes {
        run_benchmark(label, raw, &parser, iterations);
    }

    Ok(())
}
