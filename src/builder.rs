//! Assembly of the final query string from a condition set.

use crate::serializer;
use crate::value::{ConditionSet, ConditionValue};

/// Build options. Unset fields fall back to the documented defaults via
/// [`Default`].
#[derive(Debug, Clone)]
pub struct Options {
    /// The condition field treated as the magical free-text keyword.
    pub keyword_key: String,
    /// Optional field to additionally search so exact matches in it raise
    /// relevance, without relying on index-time boosting.
    pub keyword_boost: Option<String>,
    /// Term-distance window for keyword proximity phrase search.
    pub keyword_proximity: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            keyword_key: "keyword".to_string(),
            keyword_boost: None,
            keyword_proximity: 1000,
        }
    }
}

/// Builds a Solr/Lucene query string from a set of field conditions.
///
/// The keyword condition (see [`Options::keyword_key`]) is emitted first,
/// as a proximity-boosted free-text fragment; every other field renders as
/// `field:(value)` in insertion order, and fragments are joined with `AND`.
/// Fields mapped to [`ConditionValue::Nil`] are dropped. An empty condition
/// set builds the empty string; interpreting "no constraints at all" is the
/// caller's responsibility.
///
/// ```
/// use solr_query::{ConditionSet, Options, build};
///
/// let conditions = ConditionSet::new()
///     .with("keyword", "Feather duster")
///     .with("colour", vec!["red", "pink"]);
/// assert_eq!(
///     build(&conditions, &Options::default()),
///     r#"text:"feather duster"~1000 AND colour:(red OR pink)"#
/// );
/// ```
pub fn build(conditions: &ConditionSet, options: &Options) -> String {
    let mut fragments: Vec<String> = Vec::new();

    let keyword = conditions
        .get(&options.keyword_key)
        .map(|value| serializer::serialize(value, true, false))
        .unwrap_or_default();

    if !keyword.is_empty() {
        if keyword.contains(" OR ") || keyword.contains(" AND ") {
            // already a boolean expression (typically a serialized sequence);
            // emit verbatim rather than wrapping it in a proximity phrase
            fragments.push(keyword);
        } else {
            if keyword.contains(' ') {
                // Multiple words must appear near each other. A literal " in "
                // splits the keyword into general phrases and location
                // phrases; locations may appear anywhere in the text, and the
                // proximity window is shared between the phrase groups.
                let phrases: Vec<&str> = keyword.split(" in ").collect();
                let proximity = options.keyword_proximity / phrases.len() as u32;
                fragments.push(format!("text:\"{}\"~{proximity}", phrases[0]));
                let location = phrases[1..].join(" ");
                if !location.is_empty() {
                    fragments.push(format!("text:\"{location}\"~{proximity}"));
                }
            } else {
                fragments.push(keyword.clone());
            }

            if let Some(boost_field) = options.keyword_boost.as_deref() {
                let boosted = keyword
                    .split_whitespace()
                    .map(|word| format!("{boost_field}:{word}"))
                    .collect::<Vec<_>>()
                    .join(" AND ");
                fragments[0] = format!("({} OR ({boosted}))", fragments[0]);
            }
        }
    }

    for (field, value) in conditions.iter() {
        if field == options.keyword_key {
            continue;
        }
        if matches!(value, ConditionValue::Nil) {
            continue;
        }
        fragments.push(format!(
            "{field}:({})",
            serializer::serialize(value, false, false)
        ));
    }

    if fragments.is_empty() {
        return String::new();
    }

    let query = fragments.join(" AND ");
    tracing::debug!(fragments = fragments.len(), length = query.len(), "built query");
    query
}
