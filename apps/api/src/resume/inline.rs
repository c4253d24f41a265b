//! Inline markdown cleanup applied to text runs just before measurement and drawing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*([^*]+)\*").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap();
}

/// Strips bold (`**t**`), italic (`*t*`) and link (`[t](url)`) markup, keeping the text.
///
/// Unbalanced markers are left as-is.
pub fn clean_markdown(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    LINK.replace_all(&text, "$1").into_owned()
}

/// Removes every `**` marker and nothing else. Used for sub-headings.
pub fn strip_bold_markers(text: &str) -> String {
    text.replace("**", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_bold_and_italic() {
        assert_eq!(
            clean_markdown("**Rust** and *Go* daily"),
            "Rust and Go daily"
        );
    }

    #[test]
    fn test_clean_link_drops_target() {
        assert_eq!(
            clean_markdown("See [my site](https://example.com) now"),
            "See my site now"
        );
    }

    #[test]
    fn test_clean_leaves_unterminated_markers() {
        assert_eq!(clean_markdown("**open bold"), "**open bold");
        assert_eq!(clean_markdown("a * b"), "a * b");
    }

    #[test]
    fn test_clean_plain_text_untouched() {
        assert_eq!(clean_markdown("Reduced p99 by 40%"), "Reduced p99 by 40%");
    }

    #[test]
    fn test_strip_bold_markers_keeps_italics() {
        assert_eq!(
            strip_bold_markers("**Acme Corp** | *Engineer* | 2020"),
            "Acme Corp | *Engineer* | 2020"
        );
    }
}
