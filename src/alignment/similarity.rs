/*!
 * Normalized edit-distance similarity.
 *
 * Scores are on a 0-100 scale and compare Unicode scalar values
 * case-sensitively.
 */

/// Similarity between two strings on a 0-100 scale
///
/// Two empty strings score 100. One empty and one non-empty string score 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    similarity_chars(&a_chars, &b_chars)
}

/// Similarity over pre-split character slices
pub fn similarity_chars(a: &[char], b: &[char]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 100.0;
    }
    let distance = distance_chars(a, b);
    (1.0 - distance as f64 / max_len as f64) * 100.0
}

/// Highest similarity two strings of these lengths can reach
///
/// The distance is at least the length difference, so this never
/// underestimates the real score.
pub fn similarity_bound(a_len: usize, b_len: usize) -> f64 {
    let max_len = a_len.max(b_len);
    if max_len == 0 {
        return 100.0;
    }
    (1.0 - a_len.abs_diff(b_len) as f64 / max_len as f64) * 100.0
}

/// Levenshtein distance between two strings
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    distance_chars(&a_chars, &b_chars)
}

fn distance_chars(a: &[char], b: &[char]) -> usize {
    // Keep the shorter side in the rows
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}
