//! Reconstruction of source text from token streams, plus the round-trip
//! validator.
//!
//! Reconstruction is a stateless fold over token texts in index order. It
//! is total: a reconstruction that fails to match the source indicates a
//! splitter defect, which [`verify_round_trip`] surfaces as a report with
//! the first point of divergence rather than as a runtime error.

use serde::{Deserialize, Serialize};

use super::strategy::Strategy;

/// Rebuilds the original text from a strategy's token texts.
///
/// Eight strategies concatenate in index order. `byte` maps each token's
/// chars back to bytes (U+0000..=U+00FF, one-to-one) and decodes the
/// UTF-8; token lists produced by the splitters always decode exactly, and
/// foreign lists fall back to U+FFFD replacement instead of failing.
pub fn reconstruct(strategy: Strategy, tokens: &[String]) -> String {
    reconstruct_texts(strategy, tokens.iter().map(String::as_str))
}

pub(crate) fn reconstruct_texts<'a, I>(strategy: Strategy, texts: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    match strategy {
        Strategy::Byte => fold_byte_tokens(texts),
        _ => texts.collect(),
    }
}

fn fold_byte_tokens<'a, I>(texts: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut bytes = Vec::new();
    for text in texts {
        for c in text.chars() {
            match u8::try_from(u32::from(c)) {
                Ok(b) => bytes.push(b),
                // Foreign token lists may carry chars above U+00FF; keep
                // their UTF-8 bytes so nothing silently vanishes.
                Err(_) => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Outcome of a tokenize-then-reconstruct check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTrip {
    /// Strategy under test.
    pub strategy: Strategy,
    /// True when reconstruction equals the source exactly.
    pub ok: bool,
    /// The source text.
    pub expected: String,
    /// The reconstruction.
    pub actual: String,
    /// Codepoint index of the first difference; `None` when `ok`. When one
    /// string is a strict prefix of the other, this is the shorter length.
    pub divergence: Option<usize>,
}

/// Tokenizes `text`, reconstructs, and reports the comparison. `chunk` is
/// the subword chunk length, as in [`Strategy::split`].
pub fn verify_round_trip(strategy: Strategy, text: &str, chunk: usize) -> RoundTrip {
    let tokens = strategy.split(text, chunk);
    let actual = reconstruct_texts(strategy, tokens.iter().map(String::as_str));
    let ok = text == actual;
    let divergence = if ok {
        None
    } else {
        Some(first_divergence(text, &actual))
    };
    RoundTrip {
        strategy,
        ok,
        expected: text.to_string(),
        actual,
        divergence,
    }
}

/// Codepoint index of the first position where two strings differ.
fn first_divergence(a: &str, b: &str) -> usize {
    let mut b_chars = b.chars();
    for (i, ca) in a.chars().enumerate() {
        match b_chars.next() {
            Some(cb) if cb == ca => continue,
            _ => return i,
        }
    }
    a.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_concatenates_plain_strategies() {
        let tokens: Vec<String> = ["Hello", " ", "World"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(reconstruct(Strategy::Word, &tokens), "Hello World");
        assert_eq!(reconstruct(Strategy::Space, &tokens), "Hello World");
    }

    #[test]
    fn test_reconstruct_byte_decodes_multibyte() {
        let tokens = Strategy::Byte.split("héllo €", 3);
        assert_eq!(reconstruct(Strategy::Byte, &tokens), "héllo €");
    }

    #[test]
    fn test_reconstruct_byte_zwj_emoji() {
        let family = "👨\u{200d}👩\u{200d}👧\u{200d}👦";
        let tokens = Strategy::Byte.split(family, 3);
        assert_eq!(tokens.len(), family.len());
        assert_eq!(reconstruct(Strategy::Byte, &tokens), family);
    }

    #[test]
    fn test_reconstruct_byte_foreign_tokens_are_lossy_not_lost() {
        // A lone continuation byte cannot come from the splitter
        let bad = vec!["\u{fe}".to_string()];
        assert_eq!(reconstruct(Strategy::Byte, &bad), "\u{fffd}");
        // Chars above U+00FF keep their UTF-8 bytes
        let wide = vec!["日".to_string()];
        assert_eq!(reconstruct(Strategy::Byte, &wide), "日");
    }

    #[test]
    fn test_verify_round_trip_ok() {
        for strategy in Strategy::ALL {
            let report = verify_round_trip(strategy, "Hi there! Bye.", 3);
            assert!(report.ok, "{strategy} failed: {report:?}");
            assert_eq!(report.divergence, None);
            assert_eq!(report.actual, report.expected);
        }
    }

    #[test]
    fn test_verify_round_trip_empty() {
        let report = verify_round_trip(Strategy::Char, "", 3);
        assert!(report.ok);
        assert_eq!(report.actual, "");
    }

    #[test]
    fn test_first_divergence_positions() {
        assert_eq!(first_divergence("abc", "abd"), 2);
        assert_eq!(first_divergence("abc", "ab"), 2);
        assert_eq!(first_divergence("ab", "abc"), 2);
        assert_eq!(first_divergence("", "x"), 0);
        assert_eq!(first_divergence("日本", "日米"), 1);
    }
}
