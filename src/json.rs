//! Conversion of JSON condition documents into a [`ConditionSet`].
//!
//! Object values are disambiguated rather than guessed: an object whose keys
//! are only `min`/`max` is a range, an object carrying an `id` key is a
//! reference, anything else is rejected.

use serde_json::Value;

use crate::error::SolrQueryError;
use crate::value::{ConditionSet, ConditionValue, RangeSpec};

/// Converts a JSON object into an ordered condition set. Field order in the
/// document is preserved (serde_json's `preserve_order` feature).
pub fn conditions_from_json(document: &Value) -> Result<ConditionSet, SolrQueryError> {
    let Value::Object(map) = document else {
        return Err(SolrQueryError::InvalidArgument(
            "conditions document must be a JSON object".to_string(),
        ));
    };

    let mut conditions = ConditionSet::new();
    for (field, value) in map {
        conditions.insert(field.clone(), condition_value(value)?);
    }
    Ok(conditions)
}

fn condition_value(value: &Value) -> Result<ConditionValue, SolrQueryError> {
    match value {
        Value::Null => Ok(ConditionValue::Nil),
        Value::Bool(b) => Ok(ConditionValue::Text(b.to_string())),
        Value::String(s) => Ok(ConditionValue::Text(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(ConditionValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(ConditionValue::Number(f))
            } else {
                Ok(ConditionValue::Text(n.to_string()))
            }
        }
        Value::Array(items) => items
            .iter()
            .map(condition_value)
            .collect::<Result<Vec<_>, _>>()
            .map(ConditionValue::Sequence),
        Value::Object(map) => {
            if !map.is_empty() && map.keys().all(|key| key == "min" || key == "max") {
                let bound = |key: &str| {
                    map.get(key)
                        .filter(|v| !v.is_null())
                        .map(condition_value)
                        .transpose()
                };
                return Ok(ConditionValue::Range(RangeSpec::new(
                    bound("min")?,
                    bound("max")?,
                )));
            }
            if let Some(id) = map.get("id") {
                return Ok(ConditionValue::Reference(scalar_string(id)?));
            }
            Err(SolrQueryError::InvalidArgument(format!(
                "cannot interpret object value (expected min/max range or id reference, got keys: {})",
                map.keys().cloned().collect::<Vec<_>>().join(", ")
            )))
        }
    }
}

fn scalar_string(value: &Value) -> Result<String, SolrQueryError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SolrQueryError::InvalidArgument(format!(
            "reference id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::conditions_from_json;
    use crate::value::{ConditionSet, ConditionValue};

    #[test]
    fn scalars_arrays_and_null_map_onto_the_condition_model() {
        let set = conditions_from_json(&json!({
            "keyword": "clean",
            "colour": ["red", "pink"],
            "count": 3,
            "score": 0.5,
            "ignored": null,
        }))
        .unwrap();

        let expected: ConditionSet = [
            ("keyword", ConditionValue::from("clean")),
            ("colour", ConditionValue::from(vec!["red", "pink"])),
            ("count", ConditionValue::Integer(3)),
            ("score", ConditionValue::Number(0.5)),
            ("ignored", ConditionValue::Nil),
        ]
        .into_iter()
        .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn min_max_objects_become_ranges() {
        let set = conditions_from_json(&json!({
            "salary": { "min": "010000", "max": "050000" },
            "surname": { "min": "jacobs" },
        }))
        .unwrap();

        assert_eq!(
            set.get("salary"),
            Some(&ConditionValue::range("010000", "050000"))
        );
        assert_eq!(
            set.get("surname"),
            Some(&ConditionValue::range_from("jacobs"))
        );
    }

    #[test]
    fn id_objects_become_references() {
        let set = conditions_from_json(&json!({
            "organisation": [{ "id": 275 }, { "id": "6534" }],
        }))
        .unwrap();

        assert_eq!(
            set.get("organisation"),
            Some(&ConditionValue::Sequence(vec![
                ConditionValue::Reference("275".to_string()),
                ConditionValue::Reference("6534".to_string()),
            ]))
        );
    }

    #[test]
    fn field_order_is_preserved() {
        let set = conditions_from_json(&json!({
            "zeta": "1", "alpha": "2", "mid": "3",
        }))
        .unwrap();

        let fields: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(fields, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn unrecognized_objects_are_rejected() {
        let err = conditions_from_json(&json!({ "weird": { "foo": 1 } })).unwrap_err();
        assert!(err.to_string().contains("cannot interpret object value"));

        let err = conditions_from_json(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }
}
