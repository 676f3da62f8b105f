use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Standard English stop word list.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am",
    "an", "and", "any", "are", "aren't", "as", "at", "be", "because", "been",
    "before", "being", "below", "between", "both", "but", "by", "can",
    "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for",
    "from", "further", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "her", "here", "here's", "hers",
    "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its",
    "itself", "let's", "me", "more", "most", "mustn't", "my", "myself", "no",
    "nor", "not", "of", "off", "on", "once", "only", "or", "other", "ought",
    "our", "ours", "ourselves", "out", "over", "own", "same", "shan't",
    "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them",
    "themselves", "then", "there", "there's", "these", "they", "they'd",
    "they'll", "they're", "they've", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll",
    "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why",
    "why's", "with", "won't", "would", "wouldn't", "you", "you'd", "you'll",
    "you're", "you've", "your", "yours", "yourself", "yourselves",
];

static STOP_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Lowercase word tokens with stop words and non-alphabetic tokens removed.
fn content_tokens(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|word| word.to_lowercase())
        .filter(|word| word.chars().any(|c| c.is_alphabetic()))
        .filter(|word| !STOP_SET.contains(word.as_str()))
        .collect()
}

/// Generate candidate phrases as n-grams over the stop-word-filtered token
/// stream. Duplicates are dropped, first occurrence wins.
pub fn generate_candidates(text: &str, ngram_range: (usize, usize)) -> Vec<String> {
    let tokens = content_tokens(text);
    let (min_n, max_n) = ngram_range;

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for n in min_n..=max_n {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            let phrase = window.join(" ");
            if seen.insert(phrase.clone()) {
                candidates.push(phrase);
            }
        }
    }

    candidates
}
