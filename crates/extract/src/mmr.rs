use std::cmp::Ordering;

use crate::schema::Keyphrase;

/// Cosine similarity between two vectors. None when the lengths differ or
/// either norm is zero.
pub fn cosine_similarity(lhs: &[f32], rhs: &[f32]) -> Option<f32> {
    if lhs.is_empty() || lhs.len() != rhs.len() {
        return None;
    }

    let mut dot = 0.0_f32;
    let mut lhs_norm = 0.0_f32;
    let mut rhs_norm = 0.0_f32;

    for (l, r) in lhs.iter().zip(rhs.iter()) {
        dot += l * r;
        lhs_norm += l * l;
        rhs_norm += r * r;
    }

    if lhs_norm <= f32::EPSILON || rhs_norm <= f32::EPSILON {
        return None;
    }

    Some((dot / (lhs_norm.sqrt() * rhs_norm.sqrt())).clamp(-1.0, 1.0))
}

/// Maximal-marginal-relevance selection over candidate phrases.
///
/// The first pick is the candidate most similar to the document; each
/// subsequent pick maximizes `(1 - diversity) * relevance - diversity *
/// redundancy`, where redundancy is the highest similarity to an already
/// selected phrase. Scores on the returned phrases are raw document
/// similarities, sorted descending.
pub fn select_diverse(
    doc_embedding: &[f32],
    candidates: &[String],
    candidate_embeddings: &[Vec<f32>],
    top_n: usize,
    diversity: f32,
) -> Vec<Keyphrase> {
    if candidates.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let relevance: Vec<f32> = candidate_embeddings
        .iter()
        .map(|embedding| cosine_similarity(doc_embedding, embedding).unwrap_or(0.0))
        .collect();

    let mut remaining: Vec<usize> = (0..candidates.len()).collect();
    let mut selected: Vec<usize> = Vec::new();

    let mut first_pos = 0;
    for pos in 1..remaining.len() {
        if cmp_f32(relevance[remaining[pos]], relevance[remaining[first_pos]]) == Ordering::Greater {
            first_pos = pos;
        }
    }
    selected.push(remaining.remove(first_pos));

    while selected.len() < top_n && !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_score = f32::NEG_INFINITY;

        for (pos, &idx) in remaining.iter().enumerate() {
            let redundancy = selected
                .iter()
                .filter_map(|&s| {
                    cosine_similarity(&candidate_embeddings[idx], &candidate_embeddings[s])
                })
                .fold(0.0_f32, f32::max);

            let score = (1.0 - diversity) * relevance[idx] - diversity * redundancy;
            if score > best_score {
                best_score = score;
                best_pos = pos;
            }
        }

        selected.push(remaining.remove(best_pos));
    }

    let mut phrases: Vec<Keyphrase> = selected
        .into_iter()
        .map(|idx| Keyphrase {
            phrase: candidates[idx].clone(),
            score: relevance[idx],
        })
        .collect();
    phrases.sort_by(|a, b| cmp_f32(b.score, a.score));
    phrases
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
