//! String similarity algorithms for medicine name matching.
//!
//! All functions return a raw ratio in `[0.0, 1.0]`. The substring fast path
//! and rounding live in [`SimilarityScorer::score`](super::SimilarityScorer::score).

use strsim::{jaro_winkler, normalized_levenshtein};

/// Gestalt (Ratcliff/Obershelp) sequence ratio: `2 * M / (len(a) + len(b))`.
///
/// `M` is the number of characters in matching blocks, found by taking the
/// longest common block and recursing on the pieces to its left and right.
/// The ratio is deterministic but not symmetric: ties between equally long
/// blocks are broken by earliest position in `a`, then in `b`.
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Count characters in the Ratcliff/Obershelp matching blocks of `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[col - 1] + 1;
                cur[col] = k;
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            } else {
                cur[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (best_i, best_j, best_k)
}

/// Levenshtein distance normalized by the longer string's length.
#[must_use]
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Jaro-Winkler similarity, which favors shared prefixes.
#[must_use]
pub fn jaro_winkler_ratio(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b)
}
