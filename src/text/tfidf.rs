// TF-IDF vectorization over a corpus of tokenized feedback.
//
// Each feedback is one document. Term frequency is the raw count of a term in
// the document (not length-normalized). Inverse document frequency is
//
//   idf(t) = 1 + ln(N / (1 + df(t)))
//
// which stays finite and positive even when a term occurs in every document,
// and strictly decreases as df grows. The matrix is dense: one row per
// document in input order, one column per vocabulary term.

use std::collections::{HashMap, HashSet};

use tracing::debug;

/// Stable term -> column assignment, in first-seen order across the corpus.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Assign a column to `term` if it doesn't have one yet.
    fn insert(&mut self, term: &str) -> usize {
        if let Some(&col) = self.index.get(term) {
            return col;
        }
        let col = self.terms.len();
        self.terms.push(term.to_string());
        self.index.insert(term.to_string(), col);
        col
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, col: usize) -> Option<&str> {
        self.terms.get(col).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Smoothed inverse document frequency.
pub fn inverse_document_frequency(documents: usize, document_frequency: usize) -> f64 {
    1.0 + (documents as f64 / (1 + document_frequency) as f64).ln()
}

/// Dense document-term TF-IDF weights.
#[derive(Debug, Clone, Default)]
pub struct TfIdfMatrix {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    /// Build the matrix for `documents` (one token sequence per document).
    pub fn fit<S: AsRef<str>>(documents: &[Vec<S>]) -> Self {
        let mut vocabulary = Vocabulary::default();
        let mut document_frequency: Vec<usize> = Vec::new();

        // Pass 1: vocabulary, per-document raw counts, and document frequency.
        let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(documents.len());
        for doc in documents {
            let mut doc_counts: HashMap<usize, usize> = HashMap::new();
            let mut seen: HashSet<usize> = HashSet::new();
            for token in doc {
                let col = vocabulary.insert(token.as_ref());
                if col == document_frequency.len() {
                    document_frequency.push(0);
                }
                *doc_counts.entry(col).or_insert(0) += 1;
                if seen.insert(col) {
                    document_frequency[col] += 1;
                }
            }
            counts.push(doc_counts);
        }

        let n_docs = documents.len();
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| inverse_document_frequency(n_docs, df))
            .collect();

        // Pass 2: the vocabulary is frozen from here on.
        let width = vocabulary.len();
        let rows = counts
            .into_iter()
            .map(|doc_counts| {
                let mut row = vec![0.0; width];
                for (col, tf) in doc_counts {
                    row[col] = tf as f64 * idf[col];
                }
                row
            })
            .collect();

        debug!(documents = n_docs, vocabulary = width, "Built TF-IDF matrix");

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// IDF for `term`, or `None` if it isn't in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.index_of(term).map(|col| self.idf[col])
    }

    /// Weight of `term` in document `doc`; 0.0 for absent terms.
    pub fn weight(&self, doc: usize, term: &str) -> f64 {
        match (self.rows.get(doc), self.vocabulary.index_of(term)) {
            (Some(row), Some(col)) => row[col],
            _ => 0.0,
        }
    }

    /// Number of documents (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
