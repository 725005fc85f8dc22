//! The stream orchestrator: one engine call fans a text out into
//! per-strategy token streams.
//!
//! `TokenEngine` is cheap to construct and safe to share across threads.
//! Seed and embedding bit are fixed at construction so every stream an
//! engine produces is comparable, and the same `(seed, embedding_bit,
//! text, strategy)` always yields an identical stream regardless of thread
//! count, cache state, or call order. The engine caches raw splits only:
//! splits are seed-independent, so a cache hit can never leak one seed's
//! identities into another engine's streams.
//!
//! # Example
//!
//! ```
//! use prismtok::{Strategy, TokenEngine};
//!
//! let engine = TokenEngine::new(42);
//! let stream = engine.tokenize("Hello World", Strategy::Word);
//! assert!(stream.len() >= 2);
//! assert_eq!(stream.reconstruct(), "Hello World");
//!
//! let streams = engine.tokenize_all("Hello World");
//! assert_eq!(streams.len(), 9);
//! ```

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use lru::LruCache;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHasher};
use thiserror::Error;

use super::digest::{self, DigestPair};
use super::identity;
use super::rebuild::{self, RoundTrip};
use super::record::TokenStream;
use super::strategy::Strategy;

/// Errors surfaced at the orchestration boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Strategy name lookup failed. Only reachable through the string
    /// boundary ([`TokenEngine::tokenize_named`]); a typed [`Strategy`]
    /// cannot trigger it.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Empty input, from the paths whose calling contract disallows it.
    #[error("empty input rejected")]
    EmptyInput,
}

const DEFAULT_SUBWORD_CHUNK: usize = 3;
const DEFAULT_CACHE_SIZE: usize = 256;
/// How far `tokenize_chunked` looks back for a whitespace cut.
const CHUNK_LOOKBACK: usize = 64;

/// Split-cache key for a `(strategy, text)` pair.
fn cache_key(strategy: Strategy, text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    strategy.name().hash(&mut hasher);
    text.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic multi-strategy tokenization engine.
pub struct TokenEngine {
    seed: u64,
    embedding_bit: bool,
    subword_chunk: usize,
    cache_size: usize,
    split_cache: Mutex<LruCache<u64, Arc<Vec<String>>>>,
}

impl TokenEngine {
    /// Creates an engine with the given seed, embedding bit off, subword
    /// chunk length 3, and a 256-entry split cache.
    pub fn new(seed: u64) -> Self {
        Self::with_options(seed, false, DEFAULT_SUBWORD_CHUNK, DEFAULT_CACHE_SIZE)
    }

    /// Creates an engine with every option explicit. `subword_chunk` is
    /// clamped to at least 1 codepoint; a `cache_size` of 0 keeps a single
    /// cache slot.
    pub fn with_options(
        seed: u64,
        embedding_bit: bool,
        subword_chunk: usize,
        cache_size: usize,
    ) -> Self {
        Self {
            seed,
            embedding_bit,
            subword_chunk: subword_chunk.max(1),
            cache_size,
            split_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    /// The seed every uid in this engine's streams is derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether digests carry the embedding bit.
    pub fn embedding_bit(&self) -> bool {
        self.embedding_bit
    }

    /// Subword chunk length in codepoints.
    pub fn subword_chunk(&self) -> usize {
        self.subword_chunk
    }

    /// Raw strategy split for `text`, through the LRU cache. A poisoned
    /// cache lock degrades to a plain recompute.
    fn split_cached(&self, text: &str, strategy: Strategy) -> Arc<Vec<String>> {
        let key = cache_key(strategy, text);
        if let Ok(mut cache) = self.split_cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return Arc::clone(hit);
            }
        }
        let tokens = Arc::new(strategy.split(text, self.subword_chunk));
        if let Ok(mut cache) = self.split_cache.lock() {
            cache.put(key, Arc::clone(&tokens));
        }
        tokens
    }

    /// Tokenizes `text` under one strategy: split, then identity
    /// assignment with the engine's seed. Empty input is valid and yields
    /// an empty stream.
    pub fn tokenize(&self, text: &str, strategy: Strategy) -> TokenStream {
        let raw = self.split_cached(text, strategy);
        let records = identity::assign(raw.as_ref().clone(), self.seed);
        TokenStream::new(strategy, records, text.chars().count())
    }

    /// Tokenizes under every strategy in parallel. Always returns exactly
    /// nine streams, keyed by strategy.
    pub fn tokenize_all(&self, text: &str) -> FxHashMap<Strategy, TokenStream> {
        self.tokenize_set(text, &Strategy::ALL)
    }

    /// Tokenizes under a chosen set of strategies in parallel. Duplicate
    /// entries collapse into one stream per strategy.
    pub fn tokenize_set(
        &self,
        text: &str,
        strategies: &[Strategy],
    ) -> FxHashMap<Strategy, TokenStream> {
        let streams: Vec<(Strategy, TokenStream)> = strategies
            .par_iter()
            .map(|&strategy| (strategy, self.tokenize(text, strategy)))
            .collect();
        debug!(
            "tokenized {} chars under {} strategies",
            text.chars().count(),
            streams.len()
        );
        streams.into_iter().collect()
    }

    /// String-boundary lookup plus tokenize. This is the only path that
    /// can observe an unknown strategy; the error lists the supported
    /// names.
    pub fn tokenize_named(&self, text: &str, name: &str) -> Result<TokenStream, EngineError> {
        match Strategy::from_name(name) {
            Some(strategy) => Ok(self.tokenize(text, strategy)),
            None => Err(EngineError::UnknownStrategy(format!(
                "{}. Supported: {}",
                name,
                Strategy::supported_names().join(", ")
            ))),
        }
    }

    /// Like [`TokenEngine::tokenize`], for call sites whose contract
    /// disallows empty input.
    pub fn tokenize_non_empty(
        &self,
        text: &str,
        strategy: Strategy,
    ) -> Result<TokenStream, EngineError> {
        if text.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        Ok(self.tokenize(text, strategy))
    }

    /// Tokenizes many texts under one strategy in parallel, preserving
    /// input order.
    pub fn tokenize_batch(&self, texts: &[String], strategy: Strategy) -> Vec<TokenStream> {
        texts
            .par_iter()
            .map(|text| self.tokenize(text, strategy))
            .collect()
    }

    /// Large-input path: cuts the text into chunks of at most
    /// `chunk_chars` codepoints, splits the chunks in parallel, then
    /// assigns identity once over the concatenated token sequence, so
    /// `index`, `uid`, and the neighbor links are global.
    ///
    /// Cuts prefer the end of a whitespace run within the last 64
    /// codepoints of a chunk and fall back to a plain codepoint boundary.
    /// With a whitespace cut, the run-splitting strategies produce streams
    /// identical to [`TokenEngine::tokenize`]; the subword strategies may
    /// segment differently near chunk edges because their statistics are
    /// chunk-local. Round-trip exactness holds either way.
    pub fn tokenize_chunked(
        &self,
        text: &str,
        strategy: Strategy,
        chunk_chars: usize,
    ) -> TokenStream {
        let chunks = partition_text(text, chunk_chars.max(1));
        let split: Vec<Vec<String>> = chunks
            .par_iter()
            .map(|chunk| strategy.split(chunk, self.subword_chunk))
            .collect();
        let tokens: Vec<String> = split.into_iter().flatten().collect();
        let records = identity::assign(tokens, self.seed);
        TokenStream::new(strategy, records, text.chars().count())
    }

    /// Per-record digests for a stream, under the engine's embedding bit.
    pub fn digests(&self, stream: &TokenStream) -> Vec<DigestPair> {
        stream
            .tokens()
            .iter()
            .map(|record| digest::digest_pair(record, self.embedding_bit))
            .collect()
    }

    /// Round-trip check under one strategy. A mismatch logs a warning with
    /// the divergence position and comes back in the report.
    pub fn verify(&self, text: &str, strategy: Strategy) -> RoundTrip {
        let report = rebuild::verify_round_trip(strategy, text, self.subword_chunk);
        if !report.ok {
            warn!(
                "round-trip mismatch under {}: first divergence at codepoint {:?}",
                strategy, report.divergence
            );
        }
        report
    }

    /// Round-trip checks across every strategy, in canonical order.
    pub fn verify_all(&self, text: &str) -> Vec<RoundTrip> {
        Strategy::ALL
            .par_iter()
            .map(|&strategy| self.verify(text, strategy))
            .collect()
    }

    /// Number of cached splits.
    pub fn cache_len(&self) -> usize {
        self.split_cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Drops every cached split.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.split_cache.lock() {
            cache.clear();
        }
    }
}

// LruCache is not Clone; a cloned engine starts with an empty cache of the
// same capacity and produces identical streams.
impl Clone for TokenEngine {
    fn clone(&self) -> Self {
        Self::with_options(
            self.seed,
            self.embedding_bit,
            self.subword_chunk,
            self.cache_size,
        )
    }
}

/// Cuts `text` into chunks of at most `chunk_chars` codepoints. A cut
/// lands where a whitespace run ends (whitespace directly followed by
/// non-whitespace) when one exists in the lookback window, so whitespace
/// and word runs are never severed mid-run.
fn partition_text(text: &str, chunk_chars: usize) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let positions: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;
    while total - start > chunk_chars {
        let hard_end = start + chunk_chars;
        let window_floor = hard_end.saturating_sub(CHUNK_LOOKBACK).max(start + 1);
        let mut cut = hard_end;
        let mut probe = hard_end;
        while probe > window_floor {
            if chars[probe - 1].is_whitespace() && !chars[probe].is_whitespace() {
                cut = probe;
                break;
            }
            probe -= 1;
        }
        chunks.push(&text[positions[start]..positions[cut]]);
        start = cut;
    }
    chunks.push(&text[positions[start]..]);
    chunks
}
