//! Run-based splitters: space, word, char, grammar, and byte.
//!
//! Every splitter here is a pure function from `&str` to `Vec<String>` with
//! one shared contract: concatenating the returned fragments in order yields
//! the input back byte-for-byte. Separator material (whitespace, punctuation)
//! is therefore always emitted as tokens of its own, never discarded.
//!
//! # Example
//!
//! ```
//! use prismtok::Strategy;
//!
//! let tokens = Strategy::Space.split("Hello World", 3);
//! assert_eq!(tokens, vec!["Hello", " ", "World"]);
//! assert_eq!(tokens.concat(), "Hello World");
//! ```

/// Splits text into alternating maximal runs of non-whitespace and
/// whitespace characters. Both kinds of run become tokens, so exact spacing
/// survives reconstruction.
///
/// ```
/// # use prismtok::Strategy;
/// let tokens = Strategy::Space.split("a \t b", 3);
/// assert_eq!(tokens, vec!["a", " \t ", "b"]);
/// ```
pub fn split_space(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_whitespace = false;
    for c in text.chars() {
        let ws = c.is_whitespace();
        if !current.is_empty() && ws != in_whitespace {
            tokens.push(std::mem::take(&mut current));
        }
        in_whitespace = ws;
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Splits text into word tokens and separator tokens.
///
/// A maximal run of alphanumeric characters (`char::is_alphanumeric`) is one
/// word token. Any other character starts a separator token that absorbs
/// immediately repeated copies of the same character, so `"!!!"` stays one
/// token while `"!?"` becomes two.
pub fn split_word(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in text.chars() {
        let boundary = match prev {
            None => false,
            Some(p) => {
                let was_word = p.is_alphanumeric();
                let is_word = c.is_alphanumeric();
                was_word != is_word || (!is_word && c != p)
            }
        };
        if boundary {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// One token per Unicode scalar value. Combining marks, ZWJ, and variation
/// selectors each count as their own token; no grapheme clustering.
pub fn split_char(text: &str) -> Vec<String> {
    text.chars().map(|c| c.to_string()).collect()
}

#[inline]
fn is_sentence_delimiter(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Splits at sentence-level punctuation boundaries.
///
/// Each `.`, `!`, or `?` becomes its own single-character token, whitespace
/// collapses into run tokens, and everything in between becomes plain run
/// tokens. `"Hi there! Bye."` turns into
/// `["Hi", " ", "there", "!", " ", "Bye", "."]`.
pub fn split_grammar(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_whitespace = false;
    for c in text.chars() {
        if is_sentence_delimiter(c) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            tokens.push(c.to_string());
            continue;
        }
        let ws = c.is_whitespace();
        if !current.is_empty() && ws != in_whitespace {
            tokens.push(std::mem::take(&mut current));
        }
        in_whitespace = ws;
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// One token per UTF-8 byte of the input.
///
/// Each byte `b` is carried as the one-character string `char::from(b)`
/// (U+0000..=U+00FF), which keeps token text valid UTF-8 even for
/// continuation bytes. The mapping is bijective, so reconstruction recovers
/// the exact byte sequence. Token count equals `text.len()`.
pub fn split_byte(text: &str) -> Vec<String> {
    text.bytes().map(|b| char::from(b).to_string()).collect()
}
