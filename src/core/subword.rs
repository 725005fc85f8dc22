//! Subword splitters: fixed-width chunks, text-internal BPE, a syllable
//! heuristic, and frequency-guided chunking.
//!
//! Like the run-based splitters, every function here preserves the full
//! input: tokens concatenated in order reproduce the text exactly. The
//! chunked strategies take a `chunk` parameter bounding token length in
//! codepoints (clamped to at least 1).
//!
//! The BPE and frequency splitters build their statistics from the input
//! text alone. There is no external vocabulary and no trained state, and
//! their tie-breaks are defined without reference to hash iteration order,
//! so output is identical across runs, platforms, and thread counts.

use rustc_hash::FxHashMap;

/// Consecutive codepoint chunks of `chunk` characters; the final chunk may
/// be shorter.
///
/// ```
/// # use prismtok::Strategy;
/// assert_eq!(Strategy::SubwordFixed.split("aaaa", 3), vec!["aaa", "a"]);
/// ```
pub fn split_fixed(text: &str, chunk: usize) -> Vec<String> {
    let chunk = chunk.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk)
        .map(|piece| piece.iter().collect())
        .collect()
}

/// Byte-pair-style agglomeration restricted to the input text.
///
/// Starts from one unit per codepoint and repeatedly merges the most
/// frequent adjacent unit pair, left to right without overlap, until no
/// pair occurs at least twice or every candidate merge would exceed
/// `max_len` codepoints. Ties between equally frequent pairs go to the one
/// whose first occurrence is earliest in the current unit sequence, which
/// keeps the result independent of hash map iteration order.
pub fn split_bpe(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut units: Vec<String> = text.chars().map(|c| c.to_string()).collect();
    while let Some(pair) = best_pair(&units, max_len) {
        units = merge_pair(&units, &pair);
    }
    units
}

/// Picks the next pair to merge: highest count wins, then earliest first
/// occurrence. Returns `None` when no pair occurs twice within the length
/// cap. Two distinct pairs can never share a first-occurrence position, so
/// the winner is unique.
fn best_pair(units: &[String], max_len: usize) -> Option<(String, String)> {
    let mut stats: FxHashMap<(&str, &str), (usize, usize)> = FxHashMap::default();
    for (pos, pair) in units.windows(2).enumerate() {
        let key = (pair[0].as_str(), pair[1].as_str());
        stats.entry(key).or_insert((0, pos)).0 += 1;
    }
    let mut best: Option<((&str, &str), (usize, usize))> = None;
    for (&key, &(count, first)) in &stats {
        if count < 2 {
            continue;
        }
        if key.0.chars().count() + key.1.chars().count() > max_len {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, (best_count, best_first))) => {
                count > best_count || (count == best_count && first < best_first)
            }
        };
        if better {
            best = Some((key, (count, first)));
        }
    }
    best.map(|((a, b), _)| (a.to_string(), b.to_string()))
}

fn merge_pair(units: &[String], pair: &(String, String)) -> Vec<String> {
    let mut merged = Vec::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        if i + 1 < units.len() && units[i] == pair.0 && units[i + 1] == pair.1 {
            merged.push(format!("{}{}", units[i], units[i + 1]));
            i += 2;
        } else {
            merged.push(units[i].clone());
            i += 1;
        }
    }
    merged
}

#[inline]
fn is_ascii_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Heuristic syllable approximation.
///
/// Non-alphabetic runs become single tokens. Inside an alphabetic run, a
/// boundary falls before a consonant that directly follows a vowel and
/// still has a vowel somewhere after it, so trailing consonants stay
/// attached: `"alone"` gives `["a", "lo", "ne"]`, `"being"` stays whole.
/// Vowels are ASCII `aeiou` in either case; everything else, including
/// non-Latin letters, counts as a consonant.
pub fn split_syllable(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    let mut in_alpha = false;
    for c in text.chars() {
        let alpha = c.is_alphabetic();
        if !run.is_empty() && alpha != in_alpha {
            flush_run(&mut tokens, std::mem::take(&mut run), in_alpha);
        }
        in_alpha = alpha;
        run.push(c);
    }
    if !run.is_empty() {
        flush_run(&mut tokens, run, in_alpha);
    }
    tokens
}

fn flush_run(tokens: &mut Vec<String>, run: String, alphabetic: bool) {
    if alphabetic {
        syllabify(&run, tokens);
    } else {
        tokens.push(run);
    }
}

fn syllabify(word: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut vowel_after = vec![false; n];
    let mut seen = false;
    for i in (0..n).rev() {
        vowel_after[i] = seen;
        if is_ascii_vowel(chars[i]) {
            seen = true;
        }
    }
    let mut current = String::new();
    for i in 0..n {
        let boundary = i > 0
            && !is_ascii_vowel(chars[i])
            && is_ascii_vowel(chars[i - 1])
            && vowel_after[i];
        if boundary && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        current.push(chars[i]);
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Frequency-guided chunking.
///
/// First pass counts every codepoint n-gram of length 2..=`max_len` in the
/// text (overlapping occurrences included). Second pass scans left to right
/// and at each position takes the candidate n-gram with the highest count,
/// requiring a count of at least 2; ties prefer the longer n-gram. When no
/// candidate repeats, a single codepoint is emitted.
pub fn split_frequency(text: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let max_len = max_len.max(1);
    if max_len < 2 {
        return chars.iter().map(|c| c.to_string()).collect();
    }

    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for len in 2..=max_len.min(chars.len()) {
        for start in 0..=(chars.len() - len) {
            let gram: String = chars[start..start + len].iter().collect();
            *counts.entry(gram).or_insert(0) += 1;
        }
    }

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let mut best: Option<(usize, usize)> = None; // (count, len)
        for len in 2..=max_len.min(chars.len() - i) {
            let gram: String = chars[i..i + len].iter().collect();
            let Some(&count) = counts.get(&gram) else {
                continue;
            };
            if count < 2 {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_count, best_len)) => {
                    count > best_count || (count == best_count && len > best_len)
                }
            };
            if better {
                best = Some((count, len));
            }
        }
        let take = best.map(|(_, len)| len).unwrap_or(1);
        tokens.push(chars[i..i + take].iter().collect());
        i += take;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_chunks_with_remainder() {
        assert_eq!(split_fixed("aaaa", 3), vec!["aaa", "a"]);
        assert_eq!(split_fixed("abcdef", 2), vec!["ab", "cd", "ef"]);
        assert_eq!(split_fixed("ab", 5), vec!["ab"]);
    }

    #[test]
    fn test_fixed_counts_codepoints_not_bytes() {
        // Three 3-byte CJK chars make one chunk of three codepoints
        assert_eq!(split_fixed("日本語です", 3), vec!["日本語", "です"]);
    }

    #[test]
    fn test_fixed_chunk_zero_clamps_to_one() {
        assert_eq!(split_fixed("abc", 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fixed_long_input_last_chunk_short() {
        let text = "a".repeat(1000);
        let tokens = split_fixed(&text, 3);
        assert_eq!(tokens.len(), 334);
        assert_eq!(tokens.last().map(String::len), Some(1));
    }

    #[test]
    fn test_bpe_merges_repeated_pairs() {
        assert_eq!(split_bpe("aaaa", 3), vec!["aa", "aa"]);
    }

    #[test]
    fn test_bpe_no_repeats_stays_single_chars() {
        assert_eq!(split_bpe("abcd", 3), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_bpe_agglomerates_repeated_words() {
        assert_eq!(
            split_bpe("banana banana", 3),
            vec!["ban", "ana", " ", "ban", "ana"]
        );
    }

    #[test]
    fn test_bpe_respects_length_cap() {
        for token in split_bpe("abab abab abab", 2) {
            assert!(token.chars().count() <= 2, "token too long: {token:?}");
        }
    }

    #[test]
    fn test_syllable_splits_after_vowels() {
        assert_eq!(split_syllable("alone"), vec!["a", "lo", "ne"]);
        assert_eq!(split_syllable("ALONE"), vec!["A", "LO", "NE"]);
        assert_eq!(split_syllable("hello"), vec!["he", "llo"]);
    }

    #[test]
    fn test_syllable_keeps_trailing_consonants() {
        assert_eq!(split_syllable("being"), vec!["being"]);
        assert_eq!(split_syllable("rhythm"), vec!["rhythm"]);
    }

    #[test]
    fn test_syllable_passes_non_alphabetic_runs_through() {
        assert_eq!(split_syllable("a-b"), vec!["a", "-", "b"]);
        assert_eq!(
            split_syllable("go home!"),
            vec!["go", " ", "ho", "me", "!"]
        );
    }

    #[test]
    fn test_frequency_prefers_most_frequent_gram() {
        // "aa" occurs 5 times overlapping, "aaa" only 4, so pairs win
        assert_eq!(split_frequency("aaaaaa", 3), vec!["aa", "aa", "aa"]);
    }

    #[test]
    fn test_frequency_tie_prefers_longer_gram() {
        assert_eq!(split_frequency("abcabcabc", 3), vec!["abc", "abc", "abc"]);
    }

    #[test]
    fn test_frequency_unique_text_falls_back_to_chars() {
        assert_eq!(split_frequency("wxyz", 3), vec!["w", "x", "y", "z"]);
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert!(split_fixed("", 3).is_empty());
        assert!(split_bpe("", 3).is_empty());
        assert!(split_syllable("").is_empty());
        assert!(split_frequency("", 3).is_empty());
    }

    #[test]
    fn test_concatenation_restores_input() {
        let samples = [
            "banana banana",
            "I LOVE BEING ALONE",
            "mississippi",
            "año?  mañana",
            "日本語です",
        ];
        for text in samples {
            assert_eq!(split_fixed(text, 3).concat(), text, "fixed: {text:?}");
            assert_eq!(split_bpe(text, 3).concat(), text, "bpe: {text:?}");
            assert_eq!(split_syllable(text).concat(), text, "syllable: {text:?}");
            assert_eq!(
                split_frequency(text, 3).concat(),
                text,
                "frequency: {text:?}"
            );
        }
    }
}
