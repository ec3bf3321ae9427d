use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Identifier equality and ordering used for every lookup in the parser.
///
/// Both modes compare code point by code point and never apply locale
/// collation, so Latin, Devanagari, and CJK identifiers behave the same way.
/// Scripts without case (Devanagari, Han) compare identically under both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextHandler {
    /// Case-sensitive code point comparison.
    #[default]
    Ordinal,
    /// Code point comparison after simple per-character lowercasing.
    OrdinalIgnoreCase,
}

impl TextHandler {
    /// Whether two identifiers are equal under this handler.
    pub fn text_equals(self, a: &str, b: &str) -> bool {
        match self {
            TextHandler::Ordinal => a == b,
            TextHandler::OrdinalIgnoreCase => folded(a).eq(folded(b)),
        }
    }

    /// Total order over identifiers consistent with [`TextHandler::text_equals`].
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            // UTF-8 byte order is code point order.
            TextHandler::Ordinal => a.cmp(b),
            TextHandler::OrdinalIgnoreCase => folded(a).cmp(folded(b)),
        }
    }

    /// Canonical key for hash indexes.
    ///
    /// Two identifiers are [`text_equals`](TextHandler::text_equals) exactly
    /// when their canonical keys are byte-equal. Borrows when the text is
    /// already canonical.
    pub fn canonical(self, text: &str) -> Cow<'_, str> {
        match self {
            TextHandler::Ordinal => Cow::Borrowed(text),
            TextHandler::OrdinalIgnoreCase => {
                if text.chars().all(is_fold_fixed_point) {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(folded(text).collect())
                }
            }
        }
    }

    /// Character encoding of all identifiers and tokens.
    pub fn encoding(self) -> &'static str {
        "utf-8"
    }

    /// Whether letter case is significant.
    pub fn is_case_sensitive(self) -> bool {
        matches!(self, TextHandler::Ordinal)
    }
}

fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

fn is_fold_fixed_point(c: char) -> bool {
    let mut lower = c.to_lowercase();
    lower.next() == Some(c) && lower.next().is_none()
}
