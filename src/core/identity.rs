//! Token identity: content fingerprints, seeded uids, neighbor links.
//!
//! Identities are spelled out as FNV-1a rather than going through a hasher
//! crate, so the documented values can never shift underneath a dependency
//! upgrade. `content_id` sees only the token text; `uid` additionally folds
//! in the caller's seed and the token's global index. Neighbor links are
//! rewritten in a second pass from the records' own uids.

use super::record::TokenRecord;

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[inline]
fn fnv1a_step(hash: u64, byte: u8) -> u64 {
    (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
}

/// Seed- and position-independent content fingerprint: FNV-1a over the
/// UTF-8 bytes of `text`.
///
/// Not cryptographic. Collisions are possible; the guaranteed property is
/// the other direction: equal text always fingerprints equally, in every
/// stream of every strategy.
#[inline]
pub fn content_id(text: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for &byte in text.as_bytes() {
        hash = fnv1a_step(hash, byte);
    }
    hash
}

/// Seeded token identity: FNV-1a over the little-endian seed bytes, then
/// the UTF-8 text bytes, then the little-endian index bytes.
///
/// Equal `(seed, text, index)` always produces the same uid; changing the
/// seed reshuffles every uid in a stream.
#[inline]
pub fn uid(seed: u64, text: &str, index: usize) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in seed.to_le_bytes() {
        hash = fnv1a_step(hash, byte);
    }
    for &byte in text.as_bytes() {
        hash = fnv1a_step(hash, byte);
    }
    for byte in (index as u64).to_le_bytes() {
        hash = fnv1a_step(hash, byte);
    }
    hash
}

/// Builds fully linked records from raw token texts, indices starting at 0.
pub fn assign(tokens: Vec<String>, seed: u64) -> Vec<TokenRecord> {
    assign_offset(tokens, seed, 0)
}

/// Variant of [`assign`] for the chunked path: indices start at
/// `base_index`, and uids are computed from those global indices. Neighbor
/// links are local to the returned slice; a caller joining several chunks
/// must re-link the concatenation with [`link_neighbors`].
pub fn assign_offset(tokens: Vec<String>, seed: u64, base_index: usize) -> Vec<TokenRecord> {
    let mut records: Vec<TokenRecord> = tokens
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let index = base_index + i;
            let token_uid = uid(seed, &text, index);
            let token_content = content_id(&text);
            TokenRecord {
                text,
                index,
                uid: token_uid,
                content_id: token_content,
                prev_uid: None,
                next_uid: None,
            }
        })
        .collect();
    link_neighbors(&mut records);
    records
}

/// Rewrites every `prev_uid`/`next_uid` from the records' own uids. The
/// first record keeps `prev_uid == None` and the last `next_uid == None`.
pub fn link_neighbors(records: &mut [TokenRecord]) {
    let uids: Vec<u64> = records.iter().map(|r| r.uid).collect();
    for (i, record) in records.iter_mut().enumerate() {
        record.prev_uid = if i > 0 { Some(uids[i - 1]) } else { None };
        record.next_uid = uids.get(i + 1).copied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Known-answer values pin the FNV-1a parameters; these must never
    /// change across releases.
    #[test]
    fn test_content_id_known_answers() {
        assert_eq!(content_id(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(content_id("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(content_id("Hello"), 0x63f0_bfac_f2c0_0f6b);
    }

    #[test]
    fn test_uid_known_answers() {
        assert_eq!(uid(42, "Hello", 0), 0xb5af_5157_99ef_7ad5);
        assert_eq!(uid(42, "Hello", 1), 0x96b4_8a4e_8f00_30b4);
        assert_eq!(uid(43, "Hello", 0), 0x0321_ec75_8578_bb6e);
    }

    #[test]
    fn test_uid_sensitive_to_each_input() {
        let base = uid(1, "tok", 5);
        assert_ne!(base, uid(2, "tok", 5));
        assert_ne!(base, uid(1, "tok", 6));
        assert_ne!(base, uid(1, "Tok", 5));
        assert_eq!(base, uid(1, "tok", 5));
    }

    #[test]
    fn test_content_id_ignores_position_and_seed() {
        let records = assign(
            vec!["x".to_string(), "y".to_string(), "x".to_string()],
            99,
        );
        assert_eq!(records[0].content_id, records[2].content_id);
        assert_ne!(records[0].uid, records[2].uid);
        assert_eq!(records[0].content_id, content_id("x"));
    }

    #[test]
    fn test_assign_links_neighbors() {
        let records = assign(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            7,
        );
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].index, 0);
        assert_eq!(records[2].index, 2);
        assert_eq!(records[0].prev_uid, None);
        assert_eq!(records[0].next_uid, Some(records[1].uid));
        assert_eq!(records[1].prev_uid, Some(records[0].uid));
        assert_eq!(records[1].next_uid, Some(records[2].uid));
        assert_eq!(records[2].next_uid, None);
    }

    #[test]
    fn test_assign_single_and_empty() {
        let single = assign(vec!["only".to_string()], 7);
        assert_eq!(single[0].prev_uid, None);
        assert_eq!(single[0].next_uid, None);
        assert!(assign(Vec::new(), 7).is_empty());
    }

    #[test]
    fn test_assign_offset_uses_global_indices() {
        let records = assign_offset(vec!["a".to_string(), "b".to_string()], 7, 5);
        assert_eq!(records[0].index, 5);
        assert_eq!(records[1].index, 6);
        assert_eq!(records[0].uid, uid(7, "a", 5));
        assert_eq!(records[1].uid, uid(7, "b", 6));
    }

    #[test]
    fn test_link_neighbors_rewrites_stale_links() {
        let mut left = assign(vec!["a".to_string(), "b".to_string()], 7);
        let mut right = assign_offset(vec!["c".to_string()], 7, 2);
        left.append(&mut right);
        link_neighbors(&mut left);
        assert_eq!(left[1].next_uid, Some(left[2].uid));
        assert_eq!(left[2].prev_uid, Some(left[1].uid));
        assert_eq!(left[2].next_uid, None);
    }
}
