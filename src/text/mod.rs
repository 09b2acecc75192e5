// Text processing: tokenization, stop words, word counts, and TF-IDF vectors.

pub mod frequency;
pub mod stop_list;
pub mod tfidf;
pub mod tokenizer;

pub use frequency::{FrequencyTable, KeywordCount};
pub use stop_list::StopWords;
pub use tfidf::{TfIdfMatrix, Vocabulary};
pub use tokenizer::{tokenize, TextAnalyzer};
