//! Token stream data model.
//!
//! `TokenRecord` is plain serializable data; `TokenStream` wraps the records
//! of one strategy and is immutable once produced. Downstream consumers (a
//! service layer, notebooks, file exports) read these types over serde; this
//! crate itself never persists them.

use serde::{Deserialize, Serialize};

use super::strategy::Strategy;

/// A single token with its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Exact source fragment. Concatenating a stream's `text` fields in
    /// index order reproduces the input byte-for-byte.
    pub text: String,
    /// 0-based position in the stream.
    pub index: usize,
    /// Seeded identity, deterministic in `(seed, text, index)`.
    pub uid: u64,
    /// Seed- and position-independent content fingerprint: equal text means
    /// equal `content_id` in every stream of every strategy.
    pub content_id: u64,
    /// `uid` of the previous record; `None` for the first token.
    pub prev_uid: Option<u64>,
    /// `uid` of the next record; `None` for the last token.
    pub next_uid: Option<u64>,
}

/// The tokenization result for one strategy.
///
/// Produced by the engine and never mutated afterwards; all access goes
/// through read-only accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    strategy: Strategy,
    tokens: Vec<TokenRecord>,
    source_len: usize,
}

impl TokenStream {
    pub(crate) fn new(strategy: Strategy, tokens: Vec<TokenRecord>, source_len: usize) -> Self {
        Self {
            strategy,
            tokens,
            source_len,
        }
    }

    /// The strategy that produced this stream.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The records, in index order.
    pub fn tokens(&self) -> &[TokenRecord] {
        &self.tokens
    }

    /// Codepoint count of the source text.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Number of tokens in the stream.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True for the empty-source stream.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Rebuilds the source text from the token texts.
    pub fn reconstruct(&self) -> String {
        super::rebuild::reconstruct_texts(self.strategy, self.tokens.iter().map(|t| t.text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity;

    fn sample_stream() -> TokenStream {
        let tokens = identity::assign(
            vec!["Hi".to_string(), " ".to_string(), "all".to_string()],
            7,
        );
        TokenStream::new(Strategy::Space, tokens, 6)
    }

    #[test]
    fn test_accessors() {
        let stream = sample_stream();
        assert_eq!(stream.strategy(), Strategy::Space);
        assert_eq!(stream.len(), 3);
        assert!(!stream.is_empty());
        assert_eq!(stream.source_len(), 6);
        assert_eq!(stream.tokens()[0].text, "Hi");
    }

    #[test]
    fn test_reconstruct_concatenates() {
        assert_eq!(sample_stream().reconstruct(), "Hi all");
    }

    #[test]
    fn test_serde_shape() {
        let stream = sample_stream();
        let json = serde_json::to_value(&stream).unwrap();
        assert_eq!(json["strategy"], "space");
        assert_eq!(json["source_len"], 6);
        assert_eq!(json["tokens"][0]["text"], "Hi");
        assert_eq!(json["tokens"][0]["index"], 0);
        assert!(json["tokens"][0]["prev_uid"].is_null());

        let back: TokenStream = serde_json::from_value(json).unwrap();
        assert_eq!(back, stream);
    }
}
