use std::ops::RangeInclusive;

/// A single condition value: scalar, sequence, range or foreign-object
/// reference.
///
/// `Nil` means "no constraint" and drops the field from the output entirely.
/// An empty [`Sequence`](ConditionValue::Sequence) is the opposite: a
/// deliberate "match nothing" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Text(String),
    Integer(i64),
    Number(f64),
    /// A foreign object's stable identifier, in string form.
    Reference(String),
    Sequence(Vec<ConditionValue>),
    Range(RangeSpec),
    Nil,
}

/// A half- or fully-bounded range. An absent bound renders as the wildcard
/// `*`, so a `RangeSpec` with no bounds at all renders `[* TO *]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeSpec {
    pub min: Option<Box<ConditionValue>>,
    pub max: Option<Box<ConditionValue>>,
}

impl RangeSpec {
    pub fn new(min: Option<ConditionValue>, max: Option<ConditionValue>) -> Self {
        Self {
            min: min.map(Box::new),
            max: max.map(Box::new),
        }
    }
}

/// Identity-resolution convention for domain objects: any object with a
/// stable unique identifier contributes that identifier's string form to the
/// query. Resolving the identifier is the caller's concern; this crate only
/// consumes the result.
pub trait DocumentId {
    fn document_id(&self) -> String;
}

impl ConditionValue {
    /// A fully-bounded range condition.
    pub fn range(min: impl Into<ConditionValue>, max: impl Into<ConditionValue>) -> Self {
        ConditionValue::Range(RangeSpec::new(Some(min.into()), Some(max.into())))
    }

    /// A range bounded from below only (`[min TO *]`).
    pub fn range_from(min: impl Into<ConditionValue>) -> Self {
        ConditionValue::Range(RangeSpec::new(Some(min.into()), None))
    }

    /// A range bounded from above only (`[* TO max]`).
    pub fn range_to(max: impl Into<ConditionValue>) -> Self {
        ConditionValue::Range(RangeSpec::new(None, Some(max.into())))
    }

    /// A reference to a domain object, via the [`DocumentId`] convention.
    pub fn reference(object: &impl DocumentId) -> Self {
        ConditionValue::Reference(object.document_id())
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Text(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::Text(value)
    }
}

impl From<i64> for ConditionValue {
    fn from(value: i64) -> Self {
        ConditionValue::Integer(value)
    }
}

impl From<f64> for ConditionValue {
    fn from(value: f64) -> Self {
        ConditionValue::Number(value)
    }
}

impl<T: Into<ConditionValue>> From<Vec<T>> for ConditionValue {
    fn from(values: Vec<T>) -> Self {
        ConditionValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConditionValue>> From<Option<T>> for ConditionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConditionValue::Nil, Into::into)
    }
}

impl From<RangeInclusive<i64>> for ConditionValue {
    fn from(range: RangeInclusive<i64>) -> Self {
        let (min, max) = range.into_inner();
        ConditionValue::range(min, max)
    }
}

impl From<RangeInclusive<&str>> for ConditionValue {
    fn from(range: RangeInclusive<&str>) -> Self {
        let (min, max) = range.into_inner();
        ConditionValue::range(min, max)
    }
}

/// An insertion-ordered mapping from field name to condition value.
///
/// Output fragment order mirrors insertion order (the keyword field, when
/// present, is always emitted first regardless of where it was inserted).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    entries: Vec<(String, ConditionValue)>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a condition. Re-inserting an existing field replaces its value
    /// in place, keeping the field's original position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<ConditionValue>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Chainable form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&ConditionValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ConditionValue>> FromIterator<(K, V)> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ConditionSet::new();
        for (field, value) in iter {
            set.insert(field, value);
        }
        set
    }
}
