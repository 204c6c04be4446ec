//! Escaping of Lucene/Solr reserved syntax in raw value tokens.
//!
//! Reserved characters are `- + ! ( ) { } [ ] ^ " ~ * ? : ; \` plus the
//! two-character boolean tokens `&&` and `||` (a lone `&` or `|` carries no
//! syntax meaning and is left alone).

use std::sync::OnceLock;

use regex::Regex;

fn reserved_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[-+!(){}\[\]^"~*?:;\\]|&&|\|\|"#).expect("valid regex")
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn trailing_operator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(AND|OR|NOT)$").expect("valid regex"))
}

/// Escapes every reserved occurrence with a backslash, collapses whitespace
/// runs to a single space, lowercases a trailing standalone `AND`/`OR`/`NOT`
/// (so a concatenated value cannot read as a dangling boolean operator) and
/// trims.
pub(crate) fn escape(value: &str) -> String {
    let escaped = reserved_re().replace_all(value, |caps: &regex::Captures<'_>| {
        format!("\\{}", &caps[0])
    });
    let collapsed = whitespace_re().replace_all(&escaped, " ");
    let lowered = trailing_operator_re().replace(&collapsed, |caps: &regex::Captures<'_>| {
        caps[1].to_lowercase()
    });
    lowered.trim().to_string()
}

/// Strips every reserved occurrence outright, collapses whitespace and trims.
/// Used where a value must be guaranteed free of nested query syntax.
pub(crate) fn clean(value: &str) -> String {
    let stripped = reserved_re().replace_all(value, "");
    whitespace_re().replace_all(&stripped, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{clean, escape};

    #[test]
    fn escapes_lucene_special_characters() {
        let escaped = escape(r#"BRAF:V600E (class-1) "quoted"\path"#);
        assert_eq!(escaped, r#"BRAF\:V600E \(class\-1\) \"quoted\"\\path"#);
    }

    #[test]
    fn escapes_boolean_token_pairs_not_single_chars() {
        assert_eq!(escape("a && b || c"), r"a \&& b \|| c");
        assert_eq!(escape("fish & chips"), "fish & chips");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(escape("  feather \t duster\n"), "feather duster");
        assert_eq!(clean("  feather \t duster\n"), "feather duster");
    }

    #[test]
    fn lowercases_trailing_standalone_operator() {
        assert_eq!(escape("jacobs AND"), "jacobs and");
        assert_eq!(escape("either OR"), "either or");
        assert_eq!(escape("why NOT"), "why not");
        // not standalone, not trailing
        assert_eq!(escape("BRAND"), "BRAND");
        assert_eq!(escape("AND more"), "AND more");
    }

    #[test]
    fn clean_strips_reserved_syntax() {
        assert_eq!(clean(r#"red:(pink) && [blue]"#), "redpink blue");
    }

    #[test]
    fn clean_strips_in_a_single_pass() {
        // removing a reserved character sitting between two `&`s (or `|`s)
        // rejoins them into a boolean token; the pair is left in place
        assert_eq!(clean("&!&0"), "&&0");
        assert_eq!(clean("|:|"), "||");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(escape(""), "");
        assert_eq!(clean(""), "");
    }

    mod props {
        use proptest::prelude::*;

        const RESERVED_SINGLE: &[char] = &[
            '-', '+', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', ';',
        ];

        /// Scans the way a Lucene unescaper would: a backslash protects the
        /// reserved token that follows it (`&&`/`||` are protected as a pair).
        fn first_unescaped_reserved(s: &str) -> Option<char> {
            let chars: Vec<char> = s.chars().collect();
            let mut i = 0;
            while i < chars.len() {
                let c = chars[i];
                if c == '\\' {
                    let pair = matches!(
                        (chars.get(i + 1), chars.get(i + 2)),
                        (Some('&'), Some('&')) | (Some('|'), Some('|'))
                    );
                    i += if pair { 3 } else { 2 };
                    continue;
                }
                if RESERVED_SINGLE.contains(&c) {
                    return Some(c);
                }
                if (c == '&' || c == '|') && chars.get(i + 1) == Some(&c) {
                    return Some(c);
                }
                i += 1;
            }
            None
        }

        proptest! {
            #[test]
            fn escaped_output_has_no_unescaped_reserved(s in "[ -~]{0,64}") {
                let escaped = super::escape(&s);
                prop_assert_eq!(first_unescaped_reserved(&escaped), None, "input: {:?}", s);
            }

            // stripping is a single pass, so `&&`/`||` pairs can rejoin out
            // of adjacent survivors (see clean_strips_in_a_single_pass);
            // single reserved characters and backslashes cannot re-form
            #[test]
            fn cleaned_output_has_no_reserved_single_characters(s in "[ -~]{0,64}") {
                let cleaned = super::clean(&s);
                prop_assert!(!cleaned.contains(RESERVED_SINGLE));
                prop_assert!(!cleaned.contains('\\'));
            }
        }
    }
}
