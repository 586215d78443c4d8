//! Token and n-gram helpers over a normalized merchant pattern.

/// Split a normalized pattern into tokens.
pub fn tokenize(pattern: &str) -> Vec<String> {
    pattern.split_whitespace().map(str::to_string).collect()
}

/// Distinct tokens, first occurrence order.
pub fn distinct(tokens: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for t in tokens {
        if !out.contains(t) {
            out.push(t.clone());
        }
    }
    out
}

/// All n-grams for `min_n..=max_n`, space-joined, shortest first.
pub fn ngrams(tokens: &[String], min_n: usize, max_n: usize) -> Vec<String> {
    let mut out = Vec::new();
    for n in min_n.max(1)..=max_n {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            let gram = window.join(" ");
            if !out.contains(&gram) {
                out.push(gram);
            }
        }
    }
    out
}
