//! Recursive serialization of condition values into query fragments.

use std::sync::OnceLock;

use regex::Regex;

use crate::escape;
use crate::value::{ConditionValue, RangeSpec};

/// Rendered for an empty sequence: a token that cannot match any document,
/// as opposed to `Nil` which drops the constraint altogether.
pub(crate) const MATCH_NOTHING: &str = "NIL";

fn embedded_operator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s(OR|AND)\s").expect("valid regex"))
}

fn escaped_paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\+([()])").expect("valid regex"))
}

/// Turns a condition value into a syntax-safe query fragment.
///
/// `downcase` lowercases the rendered token; `clean` strips reserved syntax
/// instead of escaping it. This is a total function: every variant renders,
/// and garbage input renders as escaped garbage rather than an error.
pub(crate) fn serialize(value: &ConditionValue, downcase: bool, clean: bool) -> String {
    let (raw, downcase) = match value {
        ConditionValue::Nil => (String::new(), downcase),
        ConditionValue::Sequence(items) if items.is_empty() => {
            (MATCH_NOTHING.to_string(), downcase)
        }
        ConditionValue::Sequence(items) => {
            let joined = items
                .iter()
                .map(|element| serialize(element, downcase, clean))
                .filter(|fragment| !fragment.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" OR ");
            // elements were already downcased individually; don't corrupt the ORs
            (joined, false)
        }
        // bypasses the escape tail so the literal `[`, `]` and `TO` survive
        ConditionValue::Range(spec) => return serialize_range(spec),
        ConditionValue::Reference(id) => (id.clone(), downcase),
        ConditionValue::Text(text) => {
            if downcase && embedded_operator_re().is_match(text) {
                return protect_boolean_operators(text, clean);
            }
            (text.clone(), downcase)
        }
        ConditionValue::Integer(number) => (number.to_string(), downcase),
        ConditionValue::Number(number) => (number.to_string(), downcase),
    };

    let raw = if downcase { raw.to_lowercase() } else { raw };
    if clean {
        escape::clean(&raw)
    } else {
        escape::escape(&raw)
    }
}

/// Handles a downcased string that embeds literal ` OR `/` AND ` tokens
/// (typically the output of a previous build). The operators are swapped for
/// case-preserving placeholders, the remainder is serialized recursively so
/// everything else still gets downcased and escaped, the operators are
/// restored and the result is wrapped in a parenthesis group.
///
/// Known limitation: the balanced-parenthesis check below un-escapes
/// parentheses only when the literal `(` and `)` counts match. It is a
/// best-effort cleanup of the double-escaping the recursive wrap introduces,
/// not a parser; unbalanced input may come out over- or under-escaped.
fn protect_boolean_operators(text: &str, clean: bool) -> String {
    let protected = embedded_operator_re()
        .replace_all(text, |caps: &regex::Captures<'_>| format!("__{}__", &caps[1]));
    let mut rendered = serialize(&ConditionValue::Text(protected.into_owned()), true, clean);
    rendered = rendered.replace("__or__", " OR ");
    rendered = rendered.replace("__and__", " AND ");

    if !clean && rendered.contains('(') && rendered.contains(')') {
        let opens = rendered.matches('(').count();
        let closes = rendered.matches(')').count();
        if opens == closes {
            rendered = escaped_paren_re().replace_all(&rendered, "${1}").into_owned();
        }
    }

    format!("({rendered})")
}

/// Renders `[<min> TO <max>]`, substituting `*` for an absent bound. Bounds
/// go through [`serialize`] in non-downcasing escape mode. A fully unbounded
/// spec renders `[* TO *]` (matches everything) by design.
pub(crate) fn serialize_range(spec: &RangeSpec) -> String {
    let min = spec
        .min
        .as_deref()
        .map_or_else(|| "*".to_string(), |bound| serialize(bound, false, false));
    let max = spec
        .max
        .as_deref()
        .map_or_else(|| "*".to_string(), |bound| serialize(bound, false, false));
    format!("[{min} TO {max}]")
}
