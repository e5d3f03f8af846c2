//! Emphasis of the matched query inside a suggestion.

use std::fmt;

/// A candidate string split around the first case-insensitive match of the
/// query. Concatenating the parts always reproduces the candidate exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// No emphasis: the query was empty or did not occur.
    Plain(String),
    /// The first occurrence of the query, with its original casing.
    Emphasized {
        prefix: String,
        matched: String,
        suffix: String,
    },
}

impl Markup {
    /// The candidate text with all emphasis stripped.
    pub fn plain_text(&self) -> String {
        match self {
            Markup::Plain(text) => text.clone(),
            Markup::Emphasized {
                prefix,
                matched,
                suffix,
            } => format!("{prefix}{matched}{suffix}"),
        }
    }

    /// HTML rendition, wrapping the match in `<strong>`. Candidate text is
    /// escaped.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Markup::Plain(text) => write!(f, "{}", escape_html(text)),
            Markup::Emphasized {
                prefix,
                matched,
                suffix,
            } => write!(
                f,
                "{}<strong>{}</strong>{}",
                escape_html(prefix),
                escape_html(matched),
                escape_html(suffix)
            ),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Emphasize the first case-insensitive occurrence of `query` in `candidate`.
///
/// Matching is done character by character so the emphasized span always
/// falls on character boundaries of the original candidate, even when
/// lowercasing would change a character's byte length.
pub fn highlight(candidate: &str, query: &str) -> Markup {
    if query.is_empty() {
        return Markup::Plain(candidate.to_string());
    }

    let query_len = query.chars().count();
    for (start, _) in candidate.char_indices() {
        if let Some(end) = match_end(&candidate[start..], query) {
            let end = start + end;
            return Markup::Emphasized {
                prefix: candidate[..start].to_string(),
                matched: candidate[start..end].to_string(),
                suffix: candidate[end..].to_string(),
            };
        }
        // Not enough characters left for a match.
        if candidate[start..].chars().count() < query_len {
            break;
        }
    }

    Markup::Plain(candidate.to_string())
}

/// Byte length of the prefix of `haystack` that equals `needle` ignoring
/// case, if there is one.
fn match_end(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    let mut end = 0;
    for n in needle.chars() {
        let (idx, h) = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
        end = idx + h.len_utf8();
    }
    Some(end)
}
