//! The closed set of tokenization strategies.
//!
//! `Strategy` is a fieldless enum, so typed callers cannot name a strategy
//! that does not exist. Unknown strategies are only representable at the
//! string boundary, via [`Strategy::from_name`] and the engine's
//! `tokenize_named`, and are rejected there.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::segment;
use super::subword;

/// A tokenization strategy.
///
/// All strategies share one contract: concatenating a stream's token texts
/// in index order reproduces the source text byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Alternating runs of non-whitespace and whitespace.
    Space,
    /// Alphanumeric word runs plus separator tokens.
    Word,
    /// One token per Unicode scalar value.
    Char,
    /// Sentence punctuation (`.` `!` `?`) as standalone tokens.
    Grammar,
    /// Fixed-width codepoint chunks.
    SubwordFixed,
    /// Text-internal byte-pair agglomeration.
    SubwordBpe,
    /// Heuristic syllable boundaries.
    SubwordSyllable,
    /// Frequency-guided chunking.
    SubwordFrequency,
    /// One token per UTF-8 byte.
    Byte,
}

impl Strategy {
    /// Every strategy, in canonical order.
    pub const ALL: [Strategy; 9] = [
        Strategy::Space,
        Strategy::Word,
        Strategy::Char,
        Strategy::Grammar,
        Strategy::SubwordFixed,
        Strategy::SubwordBpe,
        Strategy::SubwordSyllable,
        Strategy::SubwordFrequency,
        Strategy::Byte,
    ];

    /// Parses a strategy name into a variant.
    ///
    /// Accepts the canonical names from [`Strategy::name`] plus the
    /// historical alias `"subword"` for `subword_fixed`.
    ///
    /// ```
    /// use prismtok::Strategy;
    ///
    /// assert_eq!(Strategy::from_name("word"), Some(Strategy::Word));
    /// assert_eq!(Strategy::from_name("subword"), Some(Strategy::SubwordFixed));
    /// assert_eq!(Strategy::from_name("sentence"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "space" => Some(Self::Space),
            "word" => Some(Self::Word),
            "char" => Some(Self::Char),
            "grammar" => Some(Self::Grammar),
            "subword" | "subword_fixed" => Some(Self::SubwordFixed),
            "subword_bpe" => Some(Self::SubwordBpe),
            "subword_syllable" => Some(Self::SubwordSyllable),
            "subword_frequency" => Some(Self::SubwordFrequency),
            "byte" => Some(Self::Byte),
            _ => None,
        }
    }

    /// Canonical wire name, as used in serialized streams and name lookup.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Space => "space",
            Strategy::Word => "word",
            Strategy::Char => "char",
            Strategy::Grammar => "grammar",
            Strategy::SubwordFixed => "subword_fixed",
            Strategy::SubwordBpe => "subword_bpe",
            Strategy::SubwordSyllable => "subword_syllable",
            Strategy::SubwordFrequency => "subword_frequency",
            Strategy::Byte => "byte",
        }
    }

    /// All canonical names, in the same order as [`Strategy::ALL`].
    pub fn supported_names() -> &'static [&'static str] {
        &[
            "space",
            "word",
            "char",
            "grammar",
            "subword_fixed",
            "subword_bpe",
            "subword_syllable",
            "subword_frequency",
            "byte",
        ]
    }

    /// Splits `text` under this strategy.
    ///
    /// `chunk` bounds subword token length in codepoints; the non-subword
    /// strategies and the syllable heuristic ignore it. Pure function: no
    /// state, no randomness, empty input gives an empty vector.
    pub fn split(&self, text: &str, chunk: usize) -> Vec<String> {
        match self {
            Strategy::Space => segment::split_space(text),
            Strategy::Word => segment::split_word(text),
            Strategy::Char => segment::split_char(text),
            Strategy::Grammar => segment::split_grammar(text),
            Strategy::SubwordFixed => subword::split_fixed(text, chunk),
            Strategy::SubwordBpe => subword::split_bpe(text, chunk),
            Strategy::SubwordSyllable => subword::split_syllable(text),
            Strategy::SubwordFrequency => subword::split_frequency(text, chunk),
            Strategy::Byte => segment::split_byte(text),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
