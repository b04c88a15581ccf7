//! Character-level syntax of the Bracken format.
//!
//! Everything in this module operates on plain strings, before and below the
//! lexer: the special characters, comment stripping, and the whitespace
//! normalization applied to text leaves at render time.

/// Start of a comment. Comments are stripped textually before lexing.
pub const COMMENT_BEGIN: &str = "/*";

/// End of a comment.
pub const COMMENT_END: &str = "*/";

/// Introduces a tag name or an escaped symbol.
pub const TAG_MARKER: char = '\\';

/// Opens a tag parameter.
pub const PARAMETER_BEGIN: char = '{';

/// Closes a tag parameter.
pub const PARAMETER_END: char = '}';

/// Two consecutive newlines separate paragraphs inside inline runs.
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Characters treated as spaces by [`collapse_spaces`].
pub const SPACES: [char; 4] = [' ', '\n', '\t', '\r'];

/// True for the characters that may start a tag name after the tag marker.
///
/// A marker followed by anything else is an escape producing that character
/// literally.
pub fn is_tag_name_start(character: char) -> bool {
    character.is_ascii_alphanumeric()
}

/// Replace every maximal run of space characters with one space character.
pub fn collapse_spaces(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_run = false;
    for character in text.chars() {
        if SPACES.contains(&character) {
            if !in_run {
                result.push(' ');
            }
            in_run = true;
        } else {
            result.push(character);
            in_run = false;
        }
    }
    result
}

/// Remove `/* ... */` comments from source text.
///
/// Comments are not nestable: a comment-begin marker inside a comment has no
/// effect, and the first comment-end marker closes it. An unterminated
/// comment swallows the rest of the input.
pub fn strip_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut keeping = true;
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix(COMMENT_BEGIN) {
            keeping = false;
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix(COMMENT_END) {
            keeping = true;
            rest = tail;
        } else {
            let mut characters = rest.chars();
            if let Some(character) = characters.next() {
                if keeping {
                    result.push(character);
                }
                rest = characters.as_str();
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_single_spaces_kept() {
        assert_eq!(collapse_spaces("plain text"), "plain text");
    }

    #[test]
    fn test_collapse_runs() {
        assert_eq!(collapse_spaces("plain  text"), "plain text");
        assert_eq!(collapse_spaces("a \n\t b"), "a b");
    }

    #[test]
    fn test_collapse_edges_become_single_spaces() {
        assert_eq!(collapse_spaces("  plain  text  "), " plain text ");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let once = collapse_spaces("a \r\n b\t\tc");
        assert_eq!(collapse_spaces(&once), once);
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("a /* comment */b"), "a b");
    }

    #[test]
    fn test_strip_comments_not_nested() {
        // The inner begin marker is inert; the first end marker closes.
        assert_eq!(strip_comments("a/* x /* y */b*/c"), "ab*/c");
    }

    #[test]
    fn test_strip_unterminated_comment() {
        assert_eq!(strip_comments("a/*rest"), "a");
    }

    #[test]
    fn test_strip_comments_keeps_unicode() {
        assert_eq!(strip_comments("ворона/* hooded */"), "ворона");
    }
}
