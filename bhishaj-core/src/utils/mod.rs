//! Utility functions and helpers

use std::path::Path;

/// Keep the first `max_chars` characters of `s` and append `...`
///
/// Counts characters rather than bytes, so multi-byte input never splits.
/// The suffix is appended even when nothing was cut; history titles always
/// read as a preview.
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    let head: String = s.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// Lowercased file extension of a path-like string, if any
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsize_short_input_still_gets_suffix() {
        assert_eq!(ellipsize("How to treat headache?", 30), "How to treat headache?...");
    }

    #[test]
    fn test_ellipsize_cuts_at_char_count() {
        let long = "Why does my back hurt after running every morning";
        let title = ellipsize(long, 30);
        assert_eq!(title, "Why does my back hurt after ru...");
        assert_eq!(title.chars().count(), 33);
    }

    #[test]
    fn test_ellipsize_multibyte() {
        assert_eq!(ellipsize("héllo wörld", 4), "héll...");
        assert_eq!(ellipsize("头痛怎么办", 2), "头痛...");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("scan.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("/tmp/report.pdf").as_deref(), Some("pdf"));
        assert_eq!(extension_of("README"), None);
    }
}
