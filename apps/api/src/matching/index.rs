//! Relevance Index — TF-IDF vectors over a capped vocabulary.
//!
//! Built once per catalog. Row `i` of the index is job `i` of the catalog it was
//! built from; scoring only ever looks rows up, it never re-vectorizes jobs.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::info;

use crate::matching::tokenize::tokenize;

/// Sparse vector: (term index, weight) pairs sorted by term index.
type SparseVec = Vec<(usize, f64)>;

#[derive(Debug, Clone, Default)]
pub struct RelevanceIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVec>,
}

impl RelevanceIndex {
    /// Fits the vocabulary and idf weights on `documents`, keeping at most
    /// `max_features` terms ranked by total count (ties alphabetical).
    pub fn build<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let tokenized: Vec<Vec<&str>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            for &t in tokens {
                *totals.entry(t).or_default() += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        // Stable sort keeps the alphabetical order of the BTreeMap among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        kept.sort_unstable();
        let vocabulary: HashMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        let mut df = vec![0usize; kept.len()];
        for tokens in &tokenized {
            let seen: HashSet<usize> = tokens.iter().filter_map(|t| vocabulary.get(*t).copied()).collect();
            for i in seen {
                df[i] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(documents.len()),
        };
        let rows = tokenized.iter().map(|tokens| index.weigh(tokens)).collect();
        index.rows = rows;

        info!(
            "Relevance index built: {} documents, {} terms",
            index.rows.len(),
            index.vocabulary.len()
        );
        index
    }

    /// Ready only with at least one document and one vocabulary term.
    pub fn is_ready(&self) -> bool {
        !self.rows.is_empty() && !self.vocabulary.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Projects lowercased text into the fitted space. Unknown terms weigh zero.
    pub fn vectorize(&self, text: &str) -> Vec<(usize, f64)> {
        self.weigh(&tokenize(text))
    }

    /// Cosine similarity between `text` and each requested row, in the order given.
    /// Rows outside the index are skipped. Not ready → empty.
    pub fn similarities(&self, text: &str, rows: &[usize]) -> Vec<(usize, f64)> {
        if !self.is_ready() {
            return Vec::new();
        }
        let query = self.vectorize(text);
        rows.iter()
            .filter_map(|&row| {
                self.rows
                    .get(row)
                    .map(|doc| (row, dot(&query, doc).clamp(0.0, 1.0)))
            })
            .collect()
    }

    fn weigh(&self, tokens: &[&str]) -> SparseVec {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for t in tokens {
            if let Some(&i) = self.vocabulary.get(*t) {
                *counts.entry(i).or_default() += 1.0;
            }
        }
        let mut vector: SparseVec = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }
}

/// Dot product of two index-sorted sparse vectors. With unit vectors this is
/// the cosine; a zero vector yields 0.
fn dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
