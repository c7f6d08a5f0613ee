//! ISBN normalization service
//!
//! Normalizes ISBNs to a canonical join key so listings, metadata and
//! market prices line up regardless of how each CSV formats them.

/// Normalize an ISBN to canonical form.
///
/// Keeps only ASCII digits and the check character `X` (either case),
/// then uppercases:
/// - Dashes and spaces removed: "978-0-13-468599-1" → "9780134685991"
/// - Lowercase check digit: "0-306-40615-x" → "030640615X"
///
/// # Examples
/// ```
/// use shelfswap::services::normalizer::normalize_isbn;
///
/// assert_eq!(normalize_isbn("978-0-13-468599-1"), "9780134685991");
/// assert_eq!(normalize_isbn(" 0-306-40615-x "), "030640615X");
/// ```
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'x' | 'X'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
