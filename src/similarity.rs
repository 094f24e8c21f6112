//! Case-insensitive text similarity used by the translation memory.
//!
//! The ratio is `2 * L / (|a| + |b|)` where `L` is the length of the longest
//! common subsequence of the lowercased character sequences. It is symmetric,
//! equals 1.0 for identical inputs (including two empty strings), and never
//! grows when characters absent from the other string are appended.

/// Similarity of `a` and `b` in `[0, 1]`
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let common = lcs_len(&a, &b);
    (2 * common) as f64 / total as f64
}

/// Number of characters `ratio` compares for `text`
pub fn normalized_len(text: &str) -> usize {
    text.chars().flat_map(char::to_lowercase).count()
}

/// Highest ratio two texts of these normalized lengths can reach.
///
/// The common subsequence is never longer than the shorter text.
pub fn ratio_upper_bound(a_len: usize, b_len: usize) -> f64 {
    let total = a_len + b_len;
    if total == 0 {
        return 1.0;
    }
    (2 * a_len.min(b_len)) as f64 / total as f64
}

/// Longest common subsequence length, two-row dynamic programming
fn lcs_len(a: &[char], b: &[char]) -> usize {
    // Iterate over the longer slice so the rows stay short
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if inner.is_empty() {
        return 0;
    }

    let mut previous = vec![0usize; inner.len() + 1];
    let mut current = vec![0usize; inner.len() + 1];

    for &x in outer {
        for (j, &y) in inner.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[inner.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_is_one() {
        for text in ["a", "Hello there", "नमस्ते", "   ", "日本語のテキスト"] {
            assert_eq!(ratio(text, text), 1.0, "ratio({:?}, itself)", text);
        }
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("", "hello"), 0.0);
        assert_eq!(ratio("hello", ""), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(ratio("HELLO THERE", "hello there"), 1.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("kitten", "sitting"),
            ("Hello there!", "hello there"),
            ("abcd", "dcba"),
            ("translation memory", "translation cache"),
        ];
        for (a, b) in pairs {
            assert_eq!(ratio(a, b), ratio(b, a), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_trailing_punctuation_stays_above_memory_threshold() {
        let score = ratio("Hello there!", "Hello there");
        assert!(score > 0.9, "got {}", score);
        assert!(score < 1.0);
    }

    #[test]
    fn test_unrelated_suffix_never_increases_ratio() {
        let base = ratio("good morning", "good evening");
        let extended = ratio("good morning", "good evening###");
        assert!(extended <= base);

        let base = ratio("cat", "cat");
        let extended = ratio("cat", "cat123");
        assert!(extended < base);
    }

    #[test]
    fn test_disjoint_text_is_zero() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_known_value() {
        // LCS("kitten", "sitting") = "ittn"
        let expected = 8.0 / 13.0;
        assert!((ratio("kitten", "sitting") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_upper_bound_never_below_ratio() {
        let pairs = [
            ("kitten", "sitting"),
            ("Hello there!", "hello there"),
            ("", ""),
            ("", "abc"),
            ("ǅemal", "DŽEMAL"),
            ("short", "a much longer sentence with short in it"),
        ];
        for (a, b) in pairs {
            let bound = ratio_upper_bound(normalized_len(a), normalized_len(b));
            assert!(ratio(a, b) <= bound, "{:?} vs {:?}", a, b);
        }
        assert_eq!(ratio_upper_bound(0, 0), 1.0);
        assert_eq!(ratio_upper_bound(10, 30), 0.5);
    }
}
