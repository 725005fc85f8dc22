//! Per-token numeric digests: frontend digit, backend number, scaled
//! backend.
//!
//! These are positional checksums, not cryptography. Nothing here resists
//! collisions or adversaries; the guarantee is determinism: the same record
//! under the same embedding bit digests identically on every platform,
//! thread count, and release. Collision-sensitive callers should compare
//! `content_id` (and ultimately token text), not digests.
//!
//! The frontend digit folds a character-value sum to a single digit with
//! the classic digital root. The backend number mixes the token's value
//! sum, index, uid, and neighbor uids into one wide integer; `% 100_000`
//! scales it to a compact bucket.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::record::TokenRecord;

/// Modulus for [`backend_scaled`].
pub const SCALE_MODULUS: u128 = 100_000;

/// Stand-in neighbor value used at the open edges of a stream, where
/// `prev_uid`/`next_uid` are `None`.
pub const NEIGHBOR_SENTINEL: u128 = 9;

/// Multiplier for the backend positional mix.
const MIX_MULTIPLIER: u128 = 1_000_003;

/// Character values for the 7-bit ASCII range.
///
/// Digits carry their numeric value. Letters fold onto 1..=9
/// case-insensitively (a=1 through i=9, then j=1 again). Whitespace and
/// control characters count 0. Everything else, like all non-ASCII
/// codepoints, takes `codepoint % 9 + 1`.
static ASCII_VALUES: LazyLock<[u8; 128]> = LazyLock::new(|| {
    let mut table = [0u8; 128];
    for (i, slot) in table.iter_mut().enumerate() {
        let c = i as u8 as char;
        *slot = if c.is_ascii_digit() {
            i as u8 - b'0'
        } else if c.is_ascii_alphabetic() {
            (c.to_ascii_lowercase() as u8 - b'a') % 9 + 1
        } else if c.is_ascii_whitespace() || c.is_ascii_control() {
            0
        } else {
            i as u8 % 9 + 1
        };
    }
    table
});

/// Fixed value of one codepoint under the digest table.
#[inline]
pub fn char_value(c: char) -> u64 {
    if c.is_ascii() {
        u64::from(ASCII_VALUES[c as usize])
    } else if c.is_whitespace() {
        0
    } else {
        u64::from(u32::from(c) % 9 + 1)
    }
}

/// Sum of [`char_value`] over all codepoints of `text`.
#[inline]
pub fn char_sum(text: &str) -> u64 {
    text.chars().map(char_value).sum()
}

/// Digital root: repeated decimal digit summing, in closed form. Returns
/// 0 only for 0; otherwise a digit in 1..=9.
#[inline]
pub fn digital_root(n: u64) -> u8 {
    if n == 0 {
        0
    } else {
        (1 + (n - 1) % 9) as u8
    }
}

/// Single-digit checksum of a token text.
///
/// The character-value sum is folded with [`digital_root`]; a set
/// embedding bit nudges the digit by one and folds again, so 9 wraps to 1.
pub fn frontend_digit(text: &str, embedding_bit: bool) -> u8 {
    let mut digit = digital_root(char_sum(text));
    if embedding_bit {
        digit = digital_root(u64::from(digit) + 1);
    }
    digit
}

/// Wide positional checksum of a record.
///
/// Starting from the character-value sum, each of `index`, `uid`, the
/// previous uid, and the next uid is mixed in by multiply-and-add with
/// wrapping u128 arithmetic. Missing neighbors at the stream edges
/// contribute [`NEIGHBOR_SENTINEL`]. A set embedding bit adds one at the
/// end.
pub fn backend_number(record: &TokenRecord, embedding_bit: bool) -> u128 {
    let prev = record.prev_uid.map_or(NEIGHBOR_SENTINEL, u128::from);
    let next = record.next_uid.map_or(NEIGHBOR_SENTINEL, u128::from);
    let mut mix = u128::from(char_sum(&record.text));
    mix = mix
        .wrapping_mul(MIX_MULTIPLIER)
        .wrapping_add(record.index as u128);
    mix = mix
        .wrapping_mul(MIX_MULTIPLIER)
        .wrapping_add(u128::from(record.uid));
    mix = mix.wrapping_mul(MIX_MULTIPLIER).wrapping_add(prev);
    mix = mix.wrapping_mul(MIX_MULTIPLIER).wrapping_add(next);
    if embedding_bit {
        mix = mix.wrapping_add(1);
    }
    mix
}

/// Compact bucket of a backend number: `backend % 100_000`.
#[inline]
pub fn backend_scaled(backend: u128) -> u32 {
    (backend % SCALE_MODULUS) as u32
}

/// The three digests of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestPair {
    /// Single-digit checksum of the token text, 0..=9.
    pub frontend_digit: u8,
    /// Wide positional checksum of the full record.
    pub backend_number: u128,
    /// `backend_number % 100_000`.
    pub backend_scaled: u32,
}

/// Computes all three digests for a record.
pub fn digest_pair(record: &TokenRecord, embedding_bit: bool) -> DigestPair {
    let backend = backend_number(record, embedding_bit);
    DigestPair {
        frontend_digit: frontend_digit(&record.text, embedding_bit),
        backend_number: backend,
        backend_scaled: backend_scaled(backend),
    }
}
