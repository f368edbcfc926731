// crates/vidcore-core/src/helpers/format.rs
//
// Display strings shared by the grid cards, list rows and detail page.

/// Bytes as mebibytes with two decimals: `1048576` → `1.00 MB`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// `(3, "item", "items")` → `3 items`.
pub fn pluralize(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

/// Returns the longest prefix of `s` that is at most `max` bytes and ends on a
/// valid UTF-8 character boundary.
///
/// Used by the grid cards to keep names from overflowing their fixed-width
/// tiles. `max` is a *byte* count; for multibyte names the result may hold
/// fewer than `max` characters but never splits a codepoint.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    s.char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .map(|i| &s[..i])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_in_mb_two_decimals() {
        assert_eq!(format_size(0), "0.00 MB");
        assert_eq!(format_size(1000), "0.00 MB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(15_728_640), "15.00 MB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
    }

    #[test]
    fn pluralize_items() {
        assert_eq!(pluralize(0, "item", "items"), "0 items");
        assert_eq!(pluralize(1, "item", "items"), "1 item");
        assert_eq!(pluralize(2, "item", "items"), "2 items");
    }

    #[test]
    fn truncate_clips_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn truncate_never_splits_codepoint() {
        let t = truncate("élan", 1);
        assert!(t.is_empty());
    }
}
