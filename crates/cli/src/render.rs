//! Diagnostic rendering for the terminal.
//!
//! Pretty mode draws an ariadne [`Report`] under the offending part of the
//! route. JSON mode writes the diagnostics as an array that callers embed in
//! their own envelope.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use cmdroute_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format selected by `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty on a TTY and JSON on a pipe.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ if io::stdout().is_terminal() => Format::Pretty,
            _ => Format::Json,
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        _ => Color::White,
    }
}

fn severity_word(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warn => "warning",
        _ => "diagnostic",
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics against `route` to stderr.
///
/// `route` must be the text the spans were computed over (the trimmed
/// route). Spanless diagnostics print as a single header line.
pub(crate) fn render_diagnostics_pretty(route: &str, name: &str, diagnostics: &[Diagnostic]) {
    let config = Config::default().with_compact(false);
    let mut cache = (name, Source::from(route));

    for diag in diagnostics {
        let context = context_line(diag);

        let Some(span) = diag.span else {
            eprintln!(
                "{}[{}]: {}",
                severity_word(diag.severity),
                diag.id,
                diag.message
            );
            if let Some(note) = &context {
                eprintln!("  = note: {note}");
            }
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        // ariadne indexes by char, spans are byte offsets.
        let start = char_offset(route, span.start);
        let end = char_offset(route, span.end).max(start);

        let mut builder = Report::build(report_kind(diag.severity), (name, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((name, start..end))
                    .with_message(context.clone().unwrap_or_else(|| diag.message.clone()))
                    .with_color(severity_color(diag.severity)),
            );
        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }
        builder.finish().eprint(&mut cache).ok();
    }
}

/// `key=value` pairs of the diagnostic context, if any.
fn context_line(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Char index of a byte offset, clamped to the text.
fn char_offset(text: &str, byte: usize) -> usize {
    let byte = byte.min(text.len());
    text.char_indices().take_while(|(i, _)| *i < byte).count()
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured count line such as `1 error`.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let others = diagnostics.len() - errors;

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if others > 0 {
        let s = if others == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{others} warning{s}").fg(Color::Yellow)
        ));
    }
    if !parts.is_empty() {
        eprintln!("{}", parts.join(", "));
    }
}
