//! Lenient JSON preprocessing for hand-written configuration files.
//!
//! Registry and options files are edited by people, so they may carry `//`
//! line comments, `/* */` block comments, and a trailing comma before a
//! closing `]` or `}`. [`strip_jsonc`] rewrites such input into strict JSON
//! for `serde_json`.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

/// Remove comments and trailing commas from JSONC input.
///
/// String literals are copied verbatim, including escaped quotes and any
/// comment-like text inside them. Comments are replaced by nothing, except
/// that a line comment keeps its terminating newline so line numbers in
/// `serde_json` errors still match the source.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = State::Code;
    // Byte offset in `out` of a comma that may turn out to be trailing.
    let mut pending_comma: Option<usize> = None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Str => {
                out.push(c);
                match c {
                    '\\' => state = State::StrEscape,
                    '"' => state = State::Code,
                    _ => {}
                }
            }
            State::StrEscape => {
                out.push(c);
                state = State::Str;
            }
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '"' => {
                    pending_comma = None;
                    out.push(c);
                    state = State::Str;
                }
                ',' => {
                    pending_comma = Some(out.len());
                    out.push(c);
                }
                ']' | '}' => {
                    if let Some(at) = pending_comma.take() {
                        out.remove(at);
                    }
                    out.push(c);
                }
                c if c.is_whitespace() => out.push(c),
                _ => {
                    pending_comma = None;
                    out.push(c);
                }
            },
        }
    }
    out
}
