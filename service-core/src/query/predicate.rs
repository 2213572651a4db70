//! Storage-neutral filter predicates.
//!
//! A [`Predicate`] is a conjunction of [`Condition`]s. It is produced by a
//! [`PredicateBuilder`] from a sparse set of optional filter values: fields
//! that were not supplied contribute nothing.

use serde::Serialize;
use std::cmp::Ordering;

/// Column holding the soft-delete flag.
pub const SOFT_DELETE_FIELD: &str = "is_deleted";

/// Column holding the publication flag.
pub const PUBLISHED_FIELD: &str = "is_published";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl Value {
    fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Ordering between values of the same variant; mixed variants compare equal.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Equals(Value),
    /// Case-insensitive substring match on a text column.
    ContainsInsensitive(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: &'static str,
    pub op: Op,
}

/// Read access to named fields, used to evaluate predicates in process.
/// `None` stands for SQL `NULL`.
pub trait Filterable {
    fn field(&self, name: &str) -> Option<Value>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        self.conditions.iter().all(|condition| {
            let Some(actual) = record.field(condition.field) else {
                return false;
            };
            match &condition.op {
                Op::Equals(expected) => &actual == expected,
                Op::ContainsInsensitive(needle) => actual
                    .as_text()
                    .is_some_and(|hay| hay.to_lowercase().contains(&needle.to_lowercase())),
            }
        })
    }
}

/// Accumulates conditions and joins them into a [`Predicate`] on `build`.
#[derive(Debug, Default)]
#[must_use]
pub struct PredicateBuilder {
    conditions: Vec<Condition>,
}

impl PredicateBuilder {
    /// Base predicate for regular reads: soft-deleted rows are excluded.
    pub fn active() -> Self {
        Self::including_deleted().push(SOFT_DELETE_FIELD, Op::Equals(Value::Bool(false)))
    }

    /// Empty base, for internal recovery paths that must see deleted rows.
    pub fn including_deleted() -> Self {
        Self::default()
    }

    /// Restrict to published rows.
    pub fn published(self) -> Self {
        self.push(PUBLISHED_FIELD, Op::Equals(Value::Bool(true)))
    }

    /// Exact match when `value` is present.
    pub fn eq<V: Into<Value>>(self, field: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(field, Op::Equals(v.into())),
            None => self,
        }
    }

    /// Case-insensitive containment when `value` is present and not blank.
    pub fn contains(self, field: &'static str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.push(field, Op::ContainsInsensitive(v.to_string())),
            None => self,
        }
    }

    pub fn build(self) -> Predicate {
        Predicate {
            conditions: self.conditions,
        }
    }

    fn push(mut self, field: &'static str, op: Op) -> Self {
        self.conditions.push(Condition { field, op });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Office {
        title: &'static str,
        is_deleted: bool,
    }

    impl Filterable for Office {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "title" => Some(self.title.into()),
                "is_deleted" => Some(self.is_deleted.into()),
                _ => None,
            }
        }
    }

    #[test]
    fn empty_filter_yields_base_predicate() {
        let title: Option<&str> = None;
        let category: Option<i64> = None;
        let predicate = PredicateBuilder::active()
            .contains("title", title)
            .eq("category_id", category)
            .build();
        assert_eq!(predicate, PredicateBuilder::active().build());
        assert_eq!(predicate.conditions().len(), 1);
    }

    #[test]
    fn published_base_has_both_flags() {
        let predicate = PredicateBuilder::active().published().build();
        assert_eq!(
            predicate.conditions(),
            &[
                Condition {
                    field: SOFT_DELETE_FIELD,
                    op: Op::Equals(Value::Bool(false)),
                },
                Condition {
                    field: PUBLISHED_FIELD,
                    op: Op::Equals(Value::Bool(true)),
                },
            ]
        );
    }

    #[test]
    fn text_filter_adds_one_containment_condition() {
        let predicate = PredicateBuilder::active().contains("title", Some("Dub")).build();
        assert_eq!(predicate.conditions().len(), 2);
        assert_eq!(
            predicate.conditions()[1],
            Condition {
                field: "title",
                op: Op::ContainsInsensitive("Dub".to_string()),
            }
        );

        let dubai = Office {
            title: "Dubai Office",
            is_deleted: false,
        };
        let cairo = Office {
            title: "Cairo Branch",
            is_deleted: false,
        };
        assert!(predicate.matches(&dubai));
        assert!(!predicate.matches(&cairo));
    }

    #[test]
    fn containment_ignores_case() {
        let predicate = PredicateBuilder::active().contains("title", Some("dUB")).build();
        let dubai = Office {
            title: "Dubai Office",
            is_deleted: false,
        };
        assert!(predicate.matches(&dubai));
    }

    #[test]
    fn blank_text_is_treated_as_unset() {
        let predicate = PredicateBuilder::active().contains("title", Some("   ")).build();
        assert_eq!(predicate, PredicateBuilder::active().build());
    }

    #[test]
    fn soft_deleted_rows_do_not_match_active_base() {
        let deleted = Office {
            title: "Dubai Office",
            is_deleted: true,
        };
        assert!(!PredicateBuilder::active().build().matches(&deleted));
        assert!(PredicateBuilder::including_deleted().build().matches(&deleted));
    }

    #[test]
    fn null_field_never_matches() {
        let predicate = PredicateBuilder::including_deleted()
            .eq("organization_id", Some(7_i64))
            .build();
        let office = Office {
            title: "Dubai Office",
            is_deleted: false,
        };
        assert!(!predicate.matches(&office));
    }
}
