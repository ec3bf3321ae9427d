use cmdroute_config::ParserOptions;
use serde::Serialize;

/// Classification of a route token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokKind {
    /// A plain or quoted value: a path segment, option value, or argument.
    Value,
    /// An identifier introduced by the option prefix (`--key`).
    Option,
    /// An identifier introduced by the alias prefix (`-k`).
    Alias,
}

/// Whether a value token was written inside the value delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Not quoted.
    None,
    /// Opened and closed by the delimiter.
    Closed,
    /// Opened by the delimiter, never closed. Runs to end of input.
    Unterminated,
}

/// A token that borrows its text from the route.
///
/// For option and alias tokens `text` is the identifier with the prefix
/// removed. For quoted values it excludes the delimiters. `start`/`end` are
/// byte offsets of the whole token as written, prefix and quotes included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The classification of this token.
    pub kind: TokKind,
    /// Identifier or value text.
    pub text: &'a str,
    /// Quoting state (always [`Quoting::None`] for option and alias tokens).
    pub quoting: Quoting,
    /// Value attached to the preceding option by the inline value separator.
    pub inline: bool,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token<'_> {
    /// An unquoted, non-inline value: the only kind of token that can be a path segment.
    pub fn is_plain(&self) -> bool {
        self.kind == TokKind::Value && self.quoting == Quoting::None && !self.inline
    }

    /// Whether this token was introduced by either option prefix.
    pub fn is_prefixed(&self) -> bool {
        self.kind != TokKind::Value
    }
}

/// Tokenize a route with the default grammar (space separator, `--`/`-`
/// prefixes, `"` delimiter, no inline values).
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    tokenize_with_options(input, &ParserOptions::default())
}

/// Tokenize a route under the given grammar.
///
/// Separator runs outside quotes are boundaries and never produce tokens.
/// A quoted value runs to the next delimiter, whatever lies between; a
/// delimiter met inside a plain value ends that value and opens a new quoted
/// one. Prefixes are matched longest first, and any further repetitions of
/// either prefix are swallowed (`---key` is the option `key`). A prefix with
/// no identifier after it is kept as a plain value.
pub fn tokenize_with_options<'a>(input: &'a str, opts: &ParserOptions) -> Vec<Token<'a>> {
    Lexer::new(input, opts).run()
}

struct Lexer<'a, 'o> {
    input: &'a str,
    pos: usize,
    separator: char,
    delimiter: Option<char>,
    value_separator: Option<char>,
    /// Non-empty prefixes, longest first.
    prefixes: Vec<(&'o str, TokKind)>,
    toks: Vec<Token<'a>>,
}

impl<'a, 'o> Lexer<'a, 'o> {
    fn new(input: &'a str, opts: &'o ParserOptions) -> Self {
        let mut prefixes: Vec<(&'o str, TokKind)> = [
            (opts.option_prefix.as_str(), TokKind::Option),
            (opts.option_alias_prefix.as_str(), TokKind::Alias),
        ]
        .into_iter()
        .filter(|(p, _)| !p.is_empty())
        .collect();
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            input,
            pos: 0,
            separator: opts.separator,
            delimiter: opts.value_delimiter,
            value_separator: opts
                .has_inline_values()
                .then_some(opts.option_value_separator),
            prefixes,
            toks: Vec::new(),
        }
    }

    // ── Cursor helpers ──────────────────────────────────────────────────

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.delimiter == Some(c)
    }

    fn match_prefix(&self) -> Option<(usize, TokKind)> {
        let rest = self.rest();
        self.prefixes
            .iter()
            .find(|(p, _)| rest.starts_with(p))
            .map(|&(p, kind)| (p.len(), kind))
    }

    fn push(&mut self, kind: TokKind, text: &'a str, quoting: Quoting, inline: bool, start: usize) {
        tracing::trace!(?kind, text, ?quoting, inline, start, end = self.pos, "token");
        self.toks.push(Token {
            kind,
            text,
            quoting,
            inline,
            start,
            end: self.pos,
        });
    }

    // ── Scanning ────────────────────────────────────────────────────────

    fn run(mut self) -> Vec<Token<'a>> {
        while let Some(c) = self.peek() {
            if c == self.separator {
                self.bump(c);
            } else if self.is_delimiter(c) {
                self.quoted(c, false);
            } else if let Some((len, kind)) = self.match_prefix() {
                self.prefixed(len, kind);
            } else {
                self.plain(false);
            }
        }
        self.toks
    }

    /// Quoted value starting at the opening delimiter under the cursor.
    fn quoted(&mut self, delim: char, inline: bool) {
        let start = self.pos;
        self.bump(delim);
        let body = self.rest();
        match body.find(delim) {
            Some(close) => {
                let text = &body[..close];
                self.pos += close + delim.len_utf8();
                self.push(TokKind::Value, text, Quoting::Closed, inline, start);
            }
            None => {
                self.pos = self.input.len();
                self.push(TokKind::Value, body, Quoting::Unterminated, inline, start);
            }
        }
    }

    /// Plain value up to the next separator or delimiter. May be empty when inline.
    fn plain(&mut self, inline: bool) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == self.separator || self.is_delimiter(c) {
                break;
            }
            self.bump(c);
        }
        let text = &self.input[start..self.pos];
        self.push(TokKind::Value, text, Quoting::None, inline, start);
    }

    fn prefixed(&mut self, prefix_len: usize, kind: TokKind) {
        let start = self.pos;
        self.pos += prefix_len;
        while let Some((len, _)) = self.match_prefix() {
            self.pos += len;
        }

        let ident_start = self.pos;
        while let Some(c) = self.peek() {
            if c == self.separator || self.is_delimiter(c) || self.value_separator == Some(c) {
                break;
            }
            self.bump(c);
        }
        if self.pos == ident_start {
            let text = &self.input[start..self.pos];
            self.push(TokKind::Value, text, Quoting::None, false, start);
            return;
        }
        let ident = &self.input[ident_start..self.pos];
        self.push(kind, ident, Quoting::None, false, start);

        if let Some(vs) = self.value_separator {
            if self.peek() == Some(vs) {
                self.bump(vs);
                match self.peek() {
                    Some(c) if self.is_delimiter(c) => self.quoted(c, true),
                    _ => self.plain(true),
                }
            }
        }
    }
}
