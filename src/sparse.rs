//! Sparse term-weight vectors.
//!
//! Queries and Rocchio centroids are sparse maps from term to weight, with
//! zero weight implied for every absent term. The algebra here is
//! coordinate-wise, so feedback code reads at the vector level instead of as
//! loops over raw maps.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: HashMap<String, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw term counts of a token sequence as a sparse vector.
    pub fn from_counts<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut v = Self::new();
        for token in tokens {
            *v.weights.entry(token.into()).or_insert(0.0) += 1.0;
        }
        v
    }

    /// Weight of a term; 0.0 when absent.
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn insert(&mut self, term: impl Into<String>, weight: f64) {
        self.weights.insert(term.into(), weight);
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, &w)| (t.as_str(), w))
    }

    /// Terms carrying a non-zero coordinate, in arbitrary order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        let weights = self
            .weights
            .iter()
            .map(|(t, w)| (t.clone(), w * factor))
            .collect();
        Self { weights }
    }

    /// Coordinate-wise `self += factor * other`. Zero contributions are
    /// skipped so the "absent = zero" invariant stays canonical: a scaled-out
    /// vector never materializes coordinates.
    pub fn add_scaled(&mut self, factor: f64, other: &Self) {
        for (term, weight) in &other.weights {
            let delta = factor * weight;
            if delta != 0.0 {
                *self.weights.entry(term.clone()).or_insert(0.0) += delta;
            }
        }
    }

    pub fn add_assign(&mut self, other: &Self) {
        self.add_scaled(1.0, other);
    }

    pub fn sub_assign(&mut self, other: &Self) {
        self.add_scaled(-1.0, other);
    }

    /// The `n` heaviest non-zero coordinates, skipping `exclude`, ordered by
    /// descending weight with ascending term as the deterministic tie-break.
    /// Coordinates that cancelled to exactly zero are not candidates; they
    /// are indistinguishable from absent terms.
    pub fn top_terms(&self, n: usize, exclude: &HashSet<String>) -> Vec<(String, f64)> {
        let mut candidates: Vec<(String, f64)> = self
            .weights
            .iter()
            .filter(|&(term, &w)| w != 0.0 && !exclude.contains(term))
            .map(|(t, &w)| (t.clone(), w))
            .collect();
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        candidates.truncate(n);
        candidates
    }
}
