//! Core tokenization engine.
//!
//! One text fans out into per-strategy token streams, every token carries a
//! stable identity, and every stream reconstructs its source byte-for-byte.
//!
//! # Architecture
//!
//! - [`Strategy`]: the closed set of nine strategies and their split
//!   dispatch, over the splitters in `segment` and `subword`
//! - [`TokenRecord`] / [`TokenStream`]: the serializable data model
//! - [`identity`]: content fingerprints, seeded uids, neighbor links
//! - [`DigestPair`] and friends: frontend digit, backend number, scaled
//!   backend
//! - [`reconstruct`] / [`verify_round_trip`]: rebuild and validate
//! - [`TokenEngine`]: the orchestrator owning seed, embedding bit, and the
//!   split cache
//!
//! # Determinism
//!
//! - Splitter tie-breaks never depend on hash iteration order
//! - Identities are explicit FNV-1a, independent of any hasher crate
//! - Rayon fan-out collects in input order, so parallel paths are
//!   bit-identical to sequential ones
//! - The LRU cache stores seed-independent raw splits only

mod digest;
mod engine;
pub mod identity;
mod rebuild;
mod record;
mod segment;
mod strategy;
mod subword;

pub use digest::{
    backend_number, backend_scaled, digest_pair, digital_root, frontend_digit, DigestPair,
    NEIGHBOR_SENTINEL, SCALE_MODULUS,
};
pub use engine::{EngineError, TokenEngine};
pub use identity::{content_id, uid};
pub use rebuild::{reconstruct, verify_round_trip, RoundTrip};
pub use record::{TokenRecord, TokenStream};
pub use strategy::Strategy;
