use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyphrase {
    pub phrase: String,
    pub score: f32,
}

/// Parameters controlling keyphrase extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractParams {
    /// Upper bound on the number of phrases returned.
    pub top_n: usize,
    /// Inclusive (min, max) phrase length in words.
    pub ngram_range: (usize, usize),
    /// Redundancy penalty in [0, 1]; higher favors mutually dissimilar phrases.
    pub diversity: f32,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            top_n: 10,
            ngram_range: (1, 2),
            diversity: 0.6,
        }
    }
}
