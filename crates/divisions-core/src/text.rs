// crates/divisions-core/src/text.rs
//! Text folding used as the comparison key by every index and matcher.

use std::cmp::Ordering;

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Trim and collapse inner whitespace runs to a single space
/// 2\) Transliterate Unicode → ASCII (e.g. `Hà Nội` -> `Ha Noi`, `Đà Nẵng` -> `Da Nang`)
/// 3\) Normalize to lowercase
///
/// Two names are considered the same iff their folded forms are equal.
/// The function is total and idempotent: `normalize(normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```rust
/// use divisions_core::text::normalize;
///
/// assert_eq!(normalize("  Thành phố  Hà Nội "), "thanh pho ha noi");
/// assert_eq!(normalize("Đà Nẵng"), "da nang");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(s: &str) -> String {
    let folded = deunicode::deunicode(s).to_lowercase();
    let mut out = String::with_capacity(folded.len());
    for word in folded.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Compares two strings for equality after folding.
///
/// ```rust
/// use divisions_core::text::equals_folded;
///
/// assert!(equals_folded("Cà Mau", "ca mau"));
/// assert!(!equals_folded("Cà Mau", "Cao Bằng"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Splits an already normalized string into its words.
#[inline]
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|w| !w.is_empty())
}

/// Ordering used wherever results are presented "by name".
///
/// Compares folded forms first so `Đà Nẵng` sorts next to `Da ...` rather than
/// after `Z`, then falls back to the raw strings to keep the order total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    normalize(a).cmp(&normalize(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vietnamese_tone_marks() {
        assert_eq!(normalize("Thành phố Hồ Chí Minh"), "thanh pho ho chi minh");
        assert_eq!(normalize("Tỉnh Thừa Thiên Huế"), "tinh thua thien hue");
        assert_eq!(normalize("ĐỒNG NAI"), "dong nai");
    }

    #[test]
    fn is_idempotent() {
        for s in ["Quận Ba Đình", "  Phường   Bến Nghé ", "", "Quận 12", "Łódź"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn blank_input_folds_to_empty() {
        assert_eq!(normalize("   \t\n"), "");
    }

    #[test]
    fn words_skip_empty_segments() {
        let n = normalize("Phường  Đa Kao");
        assert_eq!(words(&n).collect::<Vec<_>>(), vec!["phuong", "da", "kao"]);
        assert_eq!(words("").count(), 0);
    }

    #[test]
    fn name_ordering_ignores_accents() {
        assert_eq!(compare_names("Đà Nẵng", "Da Lat"), Ordering::Greater);
        assert_eq!(compare_names("Đà Nẵng", "Hà Nội"), Ordering::Less);
        assert_eq!(compare_names("Cà Mau", "Cà Mau"), Ordering::Equal);
    }
}
