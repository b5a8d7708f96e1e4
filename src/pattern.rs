//! Compilation of `pattern` keywords.
//!
//! Schema patterns use ECMA-262 syntax. Lookaround and backreferences are
//! handled by `fancy_regex`; the shorthand classes `\d`, `\w` and `\s` are
//! rewritten to their ECMA-262 meanings, which are ASCII-only for `\d` and
//! `\w`, before compiling.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub use fancy_regex::Error;

static CONTROL_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\c[A-Za-z]").expect("Is a valid regex"));

const DIGITS: &str = "0-9";
const WORD: &str = "A-Za-z0-9_";
const ECMA_WHITESPACE: &str = " \t\n\r\u{000b}\u{000c}\u{00a0}\u{1680}\u{2000}-\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}\u{feff}";

/// Compiles an ECMA-262 pattern.
///
/// # Example
///
/// ```rust
/// let pattern = strictspec::pattern::compile(r"^(?!admin$)\d+$").unwrap();
/// assert!(pattern.is_match("42").unwrap());
/// assert!(!pattern.is_match("١٢٣").unwrap());
/// ```
pub fn compile(pattern: &str) -> Result<fancy_regex::Regex, Error> {
    fancy_regex::Regex::new(&translate(pattern))
}

/// Rewrites ECMA-262 escapes that differ from Rust regex syntax.
///
/// Inside a bracket expression the positive classes are spliced in as bare
/// ranges, so `[\d-]` becomes `[0-9-]`.
fn translate(pattern: &str) -> String {
    let pattern = CONTROL_ESCAPE_RE.replace_all(pattern, control_char);
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(current) = chars.next() {
        match current {
            '\\' => {}
            '[' if !in_class => {
                in_class = true;
                out.push(current);
                continue;
            }
            ']' if in_class => {
                in_class = false;
                out.push(current);
                continue;
            }
            _ => {
                out.push(current);
                continue;
            }
        }

        let positive = |set: &str, out: &mut String| {
            if in_class {
                out.push_str(set);
            } else {
                out.push('[');
                out.push_str(set);
                out.push(']');
            }
        };
        let negative = |set: &str, out: &mut String| {
            out.push_str("[^");
            out.push_str(set);
            out.push(']');
        };

        match chars.next() {
            Some('d') => positive(DIGITS, &mut out),
            Some('D') => negative(DIGITS, &mut out),
            Some('w') => positive(WORD, &mut out),
            Some('W') => negative(WORD, &mut out),
            Some('s') => positive(ECMA_WHITESPACE, &mut out),
            Some('S') => negative(ECMA_WHITESPACE, &mut out),
            Some(next) => {
                out.push(current);
                out.push(next);
            }
            // A trailing backslash is left for the compiler to reject.
            None => out.push(current),
        }
    }
    out
}

/// `\cJ` is the control character `J - 64`, written as a hex escape.
fn control_char(captures: &Captures<'_>) -> String {
    let letter = captures[0]
        .chars()
        .last()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('@');
    format!(r"\x{:02X}", (letter as u8).saturating_sub(64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn matches(pattern: &str, value: &str) -> bool {
        compile(pattern).unwrap().is_match(value).unwrap()
    }

    #[test_case(r"^\d+$", "123", true ; "ascii digits")]
    #[test_case(r"^\d+$", "١٢٣", false ; "arabic indic digits are not digits")]
    #[test_case(r"^\w+$", "abc_1", true ; "ascii word characters")]
    #[test_case(r"^\w+$", "café", false ; "accented letter is not a word character")]
    #[test_case(r"^\S+\s\S+$", "a\u{00a0}b", true ; "no break space is whitespace")]
    #[test_case(r"^[\d-]+$", "12-34", true ; "digit class inside a set")]
    fn test_ecma_classes(pattern: &str, value: &str, ok: bool) {
        assert_eq!(matches(pattern, value), ok);
    }

    #[test]
    fn test_lookaround() {
        assert!(matches("^(?!admin$).+$", "alice"));
        assert!(!matches("^(?!admin$).+$", "admin"));
        assert!(matches("^(?=.*[A-Z]).{8,}$", "passWord"));
        assert!(!matches("(?<=\\$)[0-9]+", "10"));
    }

    #[test]
    fn test_backreference() {
        assert!(matches(r"^(ab)\1$", "abab"));
        assert!(!matches(r"^(ab)\1$", "abba"));
    }

    #[test]
    fn test_escaped_backslash_is_not_a_class() {
        assert!(matches(r"^\\d$", "\\d"));
        assert!(!matches(r"^\\d$", "1"));
    }

    #[test]
    fn test_classes_inside_brackets_are_spliced() {
        assert_eq!(translate(r"[\d-]"), "[0-9-]");
        assert_eq!(translate(r"\d[a\w]"), "[0-9][aA-Za-z0-9_]");
        assert_eq!(translate(r"[\]\d]"), r"[\]0-9]");
    }

    #[test]
    fn test_control_escape() {
        assert_eq!(translate(r"\cJ"), r"\x0A");
        assert!(matches(r"^a\cJb$", "a\nb"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(compile("(").is_err());
        assert!(compile("a\\").is_err());
    }
}
