//! Filesystem-safe identifiers.

use std::sync::LazyLock;

use regex::Regex;

/// Default cap on sanitized identifiers
pub const DEFAULT_MAX_LEN: usize = 70;

static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z]+").expect("valid non-alphanumeric pattern"));

/// Replace each run of non-alphanumeric characters with `_`, then cap at `max` chars.
pub fn clean(name: &str, max: usize) -> String {
    let mut result = RE_NON_ALNUM.replace_all(name, "_").into_owned();
    // ASCII only after replacement, byte length == char count
    result.truncate(max);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_safe(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    #[test]
    fn test_runs_collapse_to_single_underscore() {
        assert_eq!(clean("Welcome!", DEFAULT_MAX_LEN), "Welcome_");
        assert_eq!(clean("a  --  b", DEFAULT_MAX_LEN), "a_b");
        assert_eq!(clean("Module 3", DEFAULT_MAX_LEN), "Module_3");
    }

    #[test]
    fn test_empty_and_all_symbols() {
        assert_eq!(clean("", DEFAULT_MAX_LEN), "");
        assert_eq!(clean("!", DEFAULT_MAX_LEN), "_");
        assert_eq!(clean("?? --- !!", DEFAULT_MAX_LEN), "_");
        assert_eq!(clean("éàü", DEFAULT_MAX_LEN), "_");
        assert_eq!(clean("!!", 0), "");
    }

    #[test]
    fn test_output_is_safe_and_bounded() {
        let inputs = [
            "Module 1: Getting Started",
            "Überblick & Ziele (Teil 2)",
            "日本語のページ",
            "tabs\tand\nnewlines",
            &"x".repeat(200),
            &"ab-".repeat(100),
        ];

        for input in inputs {
            for max in [0, 1, 5, DEFAULT_MAX_LEN] {
                let out = clean(input, max);
                assert!(is_safe(&out), "unsafe output {:?} for {:?}", out, input);
                assert!(out.chars().count() <= max, "too long: {:?}", out);
            }
        }
    }

    #[test]
    fn test_truncates_after_replacement() {
        assert_eq!(clean("a b c d", 3), "a_b");
        assert_eq!(clean(&"y".repeat(100), DEFAULT_MAX_LEN).len(), DEFAULT_MAX_LEN);
    }
}
