//! prismtok - deterministic multi-strategy tokenization with byte-exact
//! reconstruction.
//!
//! One input text fans out into nine token streams:
//! - Run-based: `space`, `word`, `char`, `grammar`, `byte`
//! - Subword: `subword_fixed`, `subword_bpe`, `subword_syllable`,
//!   `subword_frequency`
//!
//! Every token carries a stable identity (index, seeded uid, content
//! fingerprint, neighbor uids) and can be digested into compact numeric
//! checksums. Every stream reconstructs its source byte-for-byte, and every
//! result is fully deterministic for a given `(seed, embedding_bit, text,
//! strategy)` - across runs, platforms, and thread counts.
//!
//! Features:
//! - Rayon parallelism for all-strategy, batch, and chunked paths
//! - LRU cache for repeated raw splits
//! - FxHashMap for internal lookups; documented FNV-1a for public ids
//! - Serde-ready data model for downstream services
//!
//! # Example
//!
//! ```
//! use prismtok::{Strategy, TokenEngine};
//!
//! let engine = TokenEngine::new(42);
//! let streams = engine.tokenize_all("I LOVE BEING ALONE");
//! assert_eq!(streams.len(), 9);
//!
//! let words = &streams[&Strategy::Word];
//! assert_eq!(words.reconstruct(), "I LOVE BEING ALONE");
//!
//! let digests = engine.digests(words);
//! assert_eq!(digests.len(), words.len());
//! ```

pub mod core;

pub use crate::core::{
    backend_number, backend_scaled, content_id, digest_pair, digital_root, frontend_digit,
    reconstruct, uid, verify_round_trip, DigestPair, EngineError, RoundTrip, Strategy,
    TokenEngine, TokenRecord, TokenStream, NEIGHBOR_SENTINEL, SCALE_MODULUS,
};
