//! Vector scoring for the semantic search demo.

/// `(a · b) / (‖a‖ ‖b‖)`. Zero when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Score of every document against the query, in document order.
pub fn scores(query: &[f64], documents: &[Vec<f64>]) -> Vec<f64> {
    documents
        .iter()
        .map(|document| cosine_similarity(query, document))
        .collect()
}

/// Index and score of the closest document. The first one wins ties.
pub fn best_match(query: &[f64], documents: &[Vec<f64>]) -> Option<(usize, f64)> {
    scores(query, documents)
        .into_iter()
        .enumerate()
        .fold(None, |best, (index, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((index, score)),
        })
}
