//! Shared rendering utilities.

/// Positions the cursor at a specific row and column.
///
/// Uses the ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are
/// 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates text to a maximum character count, appending an ellipsis when
/// anything was cut.
///
/// Operates on characters, not bytes, so multi-byte text never splits mid
/// code point.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_with_ellipsis("Dune", 10), "Dune");
        assert_eq!(truncate_with_ellipsis("exactly ten", 11), "exactly ten");
    }

    #[test]
    fn long_text_gets_an_ellipsis() {
        assert_eq!(truncate_with_ellipsis("a very long title", 10), "a very ...");
    }

    #[test]
    fn truncation_respects_character_boundaries() {
        let text = "ñññññ";
        assert_eq!(truncate_with_ellipsis(text, 4), "ñ...");
    }
}
