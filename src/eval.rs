//! Rank-quality metrics over relevance judgments.
//!
//! All functions are pure and total: degenerate inputs (empty lists,
//! all-zero relevance, `k = 0`) return the documented default instead of
//! failing. Relevance values are graded integers; an entry counts as
//! relevant when it is non-zero.

use crate::vsm::SearchHit;
use std::collections::HashMap;

/// Fraction of relevant entries among the first `min(k, len)` ranks.
/// 0.0 when `k == 0`.
pub fn precision_at_k(rels: &[u32], k: usize) -> f64 {
    let k = k.min(rels.len());
    if k == 0 {
        return 0.0;
    }
    let found = rels[..k].iter().filter(|&&r| r > 0).count();
    found as f64 / k as f64
}

/// Relevant entries found in the first `k` ranks divided by
/// `total_relevant`. 0.0 when `total_relevant == 0`.
pub fn recall_at_k(rels: &[u32], k: usize, total_relevant: usize) -> f64 {
    if total_relevant == 0 {
        return 0.0;
    }
    let k = k.min(rels.len());
    let found = rels[..k].iter().filter(|&&r| r > 0).count();
    found as f64 / total_relevant as f64
}

/// Mean of `precision_at_k(rels, i)` over every rank `i` holding a relevant
/// entry. 0.0 when nothing in `rels` is relevant.
pub fn average_precision(rels: &[u32]) -> f64 {
    let mut num_relevant = 0u32;
    let mut sum = 0.0;
    for (i, &r) in rels.iter().enumerate() {
        if r > 0 {
            num_relevant += 1;
            sum += precision_at_k(rels, i + 1);
        }
    }
    if num_relevant == 0 {
        0.0
    } else {
        sum / num_relevant as f64
    }
}

/// Arithmetic mean of `average_precision` across queries. 0.0 for no
/// queries.
pub fn mean_average_precision(per_query: &[Vec<u32>]) -> f64 {
    if per_query.is_empty() {
        return 0.0;
    }
    per_query.iter().map(|rels| average_precision(rels)).sum::<f64>() / per_query.len() as f64
}

/// Discounted cumulative gain at `k`: `sum gains[i] / log2(i + 1)` over
/// 1-based ranks, so rank 1 is undiscounted.
pub fn dcg_at_k(gains: &[f64], k: usize) -> f64 {
    gains
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, gain)| gain / ((i + 2) as f64).log2())
        .sum()
}

/// `dcg / ideal_dcg`, where the ideal ordering sorts gains descending.
/// 0.0 when the ideal DCG is 0 (no positive gains).
pub fn ndcg_at_k(gains: &[f64], k: usize) -> f64 {
    let mut ideal = gains.to_vec();
    ideal.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let denom = dcg_at_k(&ideal, k);
    if denom <= 0.0 {
        return 0.0;
    }
    dcg_at_k(gains, k) / denom
}

/// Mean reciprocal rank of the first relevant entry per query; a query with
/// no relevant entry contributes 0. 0.0 for no queries.
pub fn mrr(per_query: &[Vec<u32>]) -> f64 {
    if per_query.is_empty() {
        return 0.0;
    }
    let sum: f64 = per_query
        .iter()
        .map(|rels| {
            rels.iter()
                .position(|&r| r > 0)
                .map(|i| 1.0 / (i + 1) as f64)
                .unwrap_or(0.0)
        })
        .sum();
    sum / per_query.len() as f64
}

/// Align judgments keyed by document id with a ranked list. Documents
/// without a judgment count as not relevant.
pub fn align_judgments(ranked: &[SearchHit], judged: &HashMap<String, u32>) -> Vec<u32> {
    ranked
        .iter()
        .map(|hit| judged.get(&hit.doc_id).copied().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn precision_counts_relevant_in_prefix() {
        let rels = vec![1, 0, 1, 0, 0];
        assert!((precision_at_k(&rels, 3) - 2.0 / 3.0).abs() < EPS);
        assert!((precision_at_k(&rels, 1) - 1.0).abs() < EPS);
        // k beyond the list clamps to its length
        assert!((precision_at_k(&rels, 10) - 2.0 / 5.0).abs() < EPS);
        assert_eq!(precision_at_k(&rels, 0), 0.0);
        assert_eq!(precision_at_k(&[], 3), 0.0);
    }

    #[test]
    fn recall_divides_by_total_relevant() {
        let rels = vec![1, 0, 1, 0, 0];
        assert!((recall_at_k(&rels, 3, 2) - 1.0).abs() < EPS);
        assert!((recall_at_k(&rels, 1, 2) - 0.5).abs() < EPS);
        assert_eq!(recall_at_k(&rels, 3, 0), 0.0);
    }

    #[test]
    fn average_precision_matches_worked_example() {
        let rels = vec![1, 0, 1, 0, 0];
        let expected = (1.0 + 2.0 / 3.0) / 2.0;
        assert!((average_precision(&rels) - expected).abs() < EPS);
        assert_eq!(average_precision(&[0, 0, 0]), 0.0);
        assert_eq!(average_precision(&[]), 0.0);
    }

    #[test]
    fn map_averages_over_queries() {
        let q1 = vec![1, 0, 1, 0, 0];
        let q2 = vec![0, 0, 0, 0, 0];
        let expected = average_precision(&q1) / 2.0;
        assert!((mean_average_precision(&[q1, q2]) - expected).abs() < EPS);
        assert_eq!(mean_average_precision(&[]), 0.0);
    }

    #[test]
    fn dcg_leaves_rank_one_undiscounted() {
        let gains = vec![3.0, 2.0, 1.0];
        assert!((dcg_at_k(&gains, 1) - 3.0).abs() < EPS);
        let expected = 3.0 + 2.0 / 3f64.log2() + 1.0 / 2.0;
        assert!((dcg_at_k(&gains, 3) - expected).abs() < EPS);
    }

    #[test]
    fn ndcg_boundaries() {
        // already sorted descending: perfect ranking for any k >= 1
        let sorted = vec![3.0, 2.0, 1.0, 0.0];
        for k in 1..=4 {
            assert!((ndcg_at_k(&sorted, k) - 1.0).abs() < EPS);
        }
        assert_eq!(ndcg_at_k(&[0.0, 0.0, 0.0], 3), 0.0);
        assert_eq!(ndcg_at_k(&[], 3), 0.0);
    }

    #[test]
    fn ndcg_penalizes_misordered_gains() {
        let gains = vec![0.0, 3.0, 2.0];
        let v = ndcg_at_k(&gains, 3);
        assert!(v > 0.0 && v < 1.0);
    }

    #[test]
    fn mrr_matches_worked_example() {
        let q1 = vec![1, 0, 1, 0, 0];
        let q2 = vec![0, 0, 0, 0, 0];
        assert!((mrr(&[q1, q2]) - 0.5).abs() < EPS);
        assert_eq!(mrr(&[]), 0.0);
        let q3 = vec![0, 1];
        assert!((mrr(&[q3]) - 0.5).abs() < EPS);
    }

    #[test]
    fn align_judgments_defaults_unjudged_to_zero() {
        let ranked = vec![
            SearchHit { doc_id: "D2".into(), score: 0.9 },
            SearchHit { doc_id: "D1".into(), score: 0.5 },
            SearchHit { doc_id: "D3".into(), score: 0.0 },
        ];
        let judged: HashMap<String, u32> =
            [("D1".to_string(), 2), ("D2".to_string(), 1)].into_iter().collect();
        assert_eq!(align_judgments(&ranked, &judged), vec![1, 2, 0]);
    }
}
