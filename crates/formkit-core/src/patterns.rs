//! # Shared Patterns
//!
//! Regular expressions shared by the field factories. Each is compiled once
//! per process on first use.
//!
//! The `regex` crate has no look-around, so patterns that need "must not
//! match" semantics are expressed as a positive pattern plus an exclusion
//! rule at the call site (see [`LESS_THAN_ONE`]).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FormkitError;

/// `(NNN) NNN-NNNN`, anchored at the end only.
pub static CELL_PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([0-9]{3}\) [0-9]{3}-[0-9]{4}$").unwrap());

/// `NNN-NNN-NNNN`.
pub static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").unwrap());

/// `NNN-NNN-NNNN` or the empty string.
pub static PHONE_NUMBER_OR_EMPTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$|^$").unwrap());

/// Amounts below one: `0`, `000`, `0.`, `0.5`, `00.99`. Used as an exclusion.
pub static LESS_THAN_ONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+(\.[0-9]*)?$").unwrap());

/// Email shape: a dot-atom local part, `@`, and a host of at least two
/// dot-separated labels of up to 63 characters.
pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$",
    )
    .unwrap()
});

/// A registrable domain name such as `example.co.uk`.
pub static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_-]{0,61}[A-Za-z0-9_](?:\.[a-zA-Z]{2,})+$").unwrap()
});

/// Latin letters, digits and whitespace only.
pub static EXCEPT_SPECIAL_SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s]*$").unwrap());

/// Anything except `( ) $ | > < = ; +`.
pub static EXCEPT_QUERY_DANGEROUS_SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^()$|><=;+]*$").unwrap());

/// The allow-list every text field enforces: latin letters, digits,
/// whitespace, ASCII punctuation and `№`.
pub static LATIN_LETTERS_NUMBERS_SPECIAL_CHARACTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^[A-Za-z0-9\s!"#$%&'()*+,\-./:;<=>?№@\\\[\]\^_`{|}~]*$"##).unwrap()
});

/// Matches every string.
pub static MATCH_ALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".*").unwrap());

/// Compile a caller-supplied pattern.
///
/// # Errors
///
/// Returns [`FormkitError::InvalidPattern`] if the pattern does not compile.
pub fn compile(pattern: &str) -> Result<Regex, FormkitError> {
    Regex::new(pattern).map_err(|source| FormkitError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_phone_is_only_end_anchored() {
        assert!(CELL_PHONE_NUMBER.is_match("(555) 123-4567"));
        assert!(CELL_PHONE_NUMBER.is_match("+1 (555) 123-4567"));
        assert!(!CELL_PHONE_NUMBER.is_match("555-123-4567"));
        assert!(!CELL_PHONE_NUMBER.is_match("(555) 123-4567 ext"));
    }

    #[test]
    fn phone_number_or_empty() {
        assert!(PHONE_NUMBER.is_match("123-456-7890"));
        assert!(!PHONE_NUMBER.is_match(""));
        assert!(PHONE_NUMBER_OR_EMPTY.is_match(""));
        assert!(PHONE_NUMBER_OR_EMPTY.is_match("123-456-7890"));
        assert!(!PHONE_NUMBER_OR_EMPTY.is_match("1234567890"));
    }

    #[test]
    fn amounts_below_one() {
        for small in ["0", "000", "0.", "0.00", "0.01", "00.5"] {
            assert!(LESS_THAN_ONE.is_match(small), "{small}");
        }
        for amount in ["1", "10", "1.00", "10.5", "100"] {
            assert!(!LESS_THAN_ONE.is_match(amount), "{amount}");
        }
    }

    #[test]
    fn email_shape() {
        assert!(EMAIL.is_match("a@b.com"));
        assert!(EMAIL.is_match("first.last+tag@sub.example.org"));
        assert!(!EMAIL.is_match("a@@b.com"));
        assert!(!EMAIL.is_match("@b.com"));
        assert!(!EMAIL.is_match("a@-b.com"));
        assert!(!EMAIL.is_match("a b@c.com"));
        assert!(!EMAIL.is_match("a@b"));
        assert!(!EMAIL.is_match("a..b@c.com"));
        assert!(!EMAIL.is_match(".a@b.com"));
        assert!(!EMAIL.is_match("a.@b.com"));
    }

    #[test]
    fn domain_names() {
        assert!(DOMAIN.is_match("example.com"));
        assert!(DOMAIN.is_match("my-site.co.uk"));
        assert!(!DOMAIN.is_match("example"));
        assert!(!DOMAIN.is_match("-example.com"));
        assert!(!DOMAIN.is_match("example.c"));
    }

    #[test]
    fn special_symbol_filters() {
        assert!(EXCEPT_SPECIAL_SYMBOLS.is_match("Hello World 42"));
        assert!(!EXCEPT_SPECIAL_SYMBOLS.is_match("Hello!"));
        assert!(EXCEPT_QUERY_DANGEROUS_SYMBOLS.is_match("O'Brien & Sons, Inc."));
        for dangerous in ["a$b", "a>b", "a<b", "a=b", "a;b", "a+b", "a|b", "(a)"] {
            assert!(!EXCEPT_QUERY_DANGEROUS_SYMBOLS.is_match(dangerous), "{dangerous}");
        }
    }

    #[test]
    fn latin_allow_list() {
        let re = &*LATIN_LETTERS_NUMBERS_SPECIAL_CHARACTERS;
        assert!(re.is_match(""));
        assert!(re.is_match("Apt. #5, 12-B (rear) № 7"));
        assert!(re.is_match(r##"!"#$%&'()*+,-./:;<=>?@\[]^_`{|}~"##));
        assert!(!re.is_match("Zoë"));
        assert!(!re.is_match("日本"));
        assert!(!re.is_match("€100"));
    }

    #[test]
    fn match_all_matches_everything() {
        assert!(MATCH_ALL.is_match(""));
        assert!(MATCH_ALL.is_match("anything\nat all"));
    }

    #[test]
    fn compile_reports_invalid_patterns() {
        assert!(compile(r"^\d+$").is_ok());
        let err = compile("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
