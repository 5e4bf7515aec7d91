// crates/divisions-core/src/fuzzy/similarity.rs
//! String similarity primitives. All functions work on `char`s, not bytes,
//! and expect already normalized input.

/// Winkler prefix scale.
const PREFIX_SCALE: f64 = 0.1;
/// Longest common prefix Winkler rewards.
const MAX_PREFIX: usize = 4;

/// Edit distance with unit cost for insert, delete and substitute.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / max_len`, in `[0, 1]`. Two empty strings are identical.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Classic Jaro similarity: match window `max(len) / 2 - 1`, transpositions
/// counted by walking both match lists in order.
pub fn jaro(a: &str, b: &str) -> f64 {
    strsim::jaro(a, b)
}

/// Jaro similarity plus a bonus of `0.1 × common_prefix(≤4) × (1 - jaro)`.
///
/// Unlike some implementations the bonus is applied at every Jaro score,
/// not only above a boost threshold.
///
/// ```rust
/// use divisions_core::fuzzy::similarity::jaro_winkler;
///
/// assert!((jaro_winkler("martha", "marhta") - 0.9611).abs() < 1e-4);
/// assert_eq!(jaro_winkler("", ""), 1.0);
/// ```
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let j = jaro(a, b);
    let prefix = a
        .chars()
        .zip(b.chars())
        .take(MAX_PREFIX)
        .take_while(|(x, y)| x == y)
        .count();
    j + PREFIX_SCALE * prefix as f64 * (1.0 - j)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn levenshtein_textbook_cases() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("ha noi", "ha noi"), 0);
    }

    #[test]
    fn levenshtein_similarity_bounds() {
        assert!(close(levenshtein_similarity("", ""), 1.0));
        assert!(close(levenshtein_similarity("abc", ""), 0.0));
        assert!(close(levenshtein_similarity("abcd", "abce"), 0.75));
    }

    #[test]
    fn jaro_textbook_cases() {
        assert!((jaro("martha", "marhta") - 0.9444).abs() < 1e-4);
        assert!((jaro("dixon", "dicksonx") - 0.7667).abs() < 1e-4);
        assert!(close(jaro("abc", "xyz"), 0.0));
    }

    #[test]
    fn winkler_bonus_needs_a_shared_prefix() {
        let a = "hai phong";
        let b = "phong hai";
        assert!(close(jaro_winkler(a, b), jaro(a, b)));
        assert!(jaro_winkler("dixon", "dicksonx") > jaro("dixon", "dicksonx"));
    }

    #[test]
    fn winkler_bonus_applies_below_boost_threshold() {
        // jaro("abxyz", "abpqr") is well under 0.7; the prefix bonus still counts
        let j = jaro("abxyz", "abpqr");
        assert!(j < 0.7);
        assert!(close(jaro_winkler("abxyz", "abpqr"), j + 0.2 * (1.0 - j)));
    }
}
