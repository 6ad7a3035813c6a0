// src/normalize.rs
//! Percentile-rank normalization.
//!
//! This is the shared contract with the serving-side ranking procedure: each
//! feature column is replaced by its fractional percentile rank within the
//! current training set, so a weight learned here multiplies the same kind of
//! quantity the live PERCENT_RANK-style query computes. Tied observations
//! receive the average 1-based rank of their tie group divided by n, so every
//! output lies in (0,1] and equal inputs map to equal outputs.

use crate::features::{TrainingRow, NUM_FEATURES};

/// Fractional percentile rank of each value among `values`.
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        // extend over the tie group [i, j)
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // average of 1-based ranks i+1 ..= j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        let pct = avg_rank / n as f64;
        for &idx in &order[i..j] {
            ranks[idx] = pct;
        }
        i = j;
    }
    ranks
}

/// Normalize each feature column independently; row order is preserved.
pub fn normalize_features(rows: &[TrainingRow]) -> Vec<[f64; NUM_FEATURES]> {
    let n = rows.len();
    let mut out = vec![[0.0f64; NUM_FEATURES]; n];
    for col in 0..NUM_FEATURES {
        let raw: Vec<f64> = rows.iter().map(|r| r.features[col]).collect();
        for (i, pct) in percentile_ranks(&raw).into_iter().enumerate() {
            out[i][col] = pct;
        }
    }
    out
}
