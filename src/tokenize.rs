//! Word normalization
//!
//! A word is a whitespace-delimited token with the punctuation characters
//! `. , ! ? ; : " ' ( ) [ ] { }` removed and lowercased. A token made only of
//! punctuation normalizes to the empty word, which is still counted.
//!
//! Splitting follows regex `\s+` split semantics: a blank line is one empty
//! token, leading whitespace yields one leading empty token and trailing
//! empty tokens are dropped.

/// Characters removed from every token
pub const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}',
];

#[inline]
fn is_stripped(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Normalize a single token.
///
/// Punctuation is removed wherever it occurs, so `don't` becomes `dont`.
/// Hyphens and other characters outside [`PUNCTUATION`] are kept.
pub fn normalize_word(token: &str) -> String {
    let stripped: String = token.chars().filter(|&c| !is_stripped(c)).collect();
    stripped.to_lowercase()
}

/// Separator characters: space, `\t`, `\n`, vertical tab, form feed, `\r`
#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Split a line on runs of separators.
///
/// `""` gives `[""]`, `"  lead"` gives `["", "lead"]` and a separator-only
/// line gives nothing.
pub fn split_tokens(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return vec![""];
    }

    let mut tokens = Vec::new();
    if line.starts_with(is_separator) {
        tokens.push("");
    }
    tokens.extend(line.split(is_separator).filter(|t| !t.is_empty()));

    while tokens.last() == Some(&"") {
        tokens.pop();
    }
    tokens
}

/// Split a line into tokens and normalize each one into `out`
pub fn tokenize_line_into(line: &str, out: &mut Vec<String>) {
    out.extend(split_tokens(line).into_iter().map(normalize_word));
}

/// Tokenize a line into a new word list
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    tokenize_line_into(line, &mut words);
    words
}
