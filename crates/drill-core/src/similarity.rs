//! Edit-distance similarity between short phrases.

/// Levenshtein distance in characters, with unit costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Similarity ratio in `[0, 1]` between two strings.
///
/// Both sides are trimmed and compared case-insensitively. Two empty strings
/// are identical; one empty string against a non-empty one scores 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.trim().to_lowercase(), &b.trim().to_lowercase())
}
