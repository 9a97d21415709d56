use std::borrow::Cow;

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counting is per `char`, so multi-byte text is never split mid code point.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed_unchanged() {
        let out = preview("A stock represents partial ownership", 200);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "A stock represents partial ownership");
    }

    #[test]
    fn text_at_exact_limit_is_not_cut() {
        assert_eq!(preview("abcde", 5), "abcde");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(preview("abcdefgh", 3), "abc...");
    }

    #[test]
    fn cut_respects_char_boundaries() {
        assert_eq!(preview("₹₹₹₹", 2), "₹₹...");
    }
}
