//! Caller-supplied filter expressions for repository queries.
//!
//! A [`Criteria`] is a conjunction of column conditions. Storage crates
//! translate it into a parameterised `WHERE` clause and compose it with the
//! soft-delete predicate; column names are checked against the entity's
//! mapping before any SQL is built.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaValue {
    Uuid(Uuid),
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl From<Uuid> for CriteriaValue {
    fn from(value: Uuid) -> Self {
        CriteriaValue::Uuid(value)
    }
}

impl From<&str> for CriteriaValue {
    fn from(value: &str) -> Self {
        CriteriaValue::Text(value.to_string())
    }
}

impl From<String> for CriteriaValue {
    fn from(value: String) -> Self {
        CriteriaValue::Text(value)
    }
}

impl From<i64> for CriteriaValue {
    fn from(value: i64) -> Self {
        CriteriaValue::Integer(value)
    }
}

impl From<i32> for CriteriaValue {
    fn from(value: i32) -> Self {
        CriteriaValue::Integer(i64::from(value))
    }
}

impl From<DateTime<Utc>> for CriteriaValue {
    fn from(value: DateTime<Utc>) -> Self {
        CriteriaValue::Timestamp(value)
    }
}

impl From<NaiveDate> for CriteriaValue {
    fn from(value: NaiveDate) -> Self {
        CriteriaValue::Date(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
}

impl Comparison {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Like => "LIKE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        column: &'static str,
        comparison: Comparison,
        value: CriteriaValue,
    },
    IsNull(&'static str),
    IsNotNull(&'static str),
}

impl Condition {
    pub fn column(&self) -> &'static str {
        match self {
            Condition::Compare { column, .. } => column,
            Condition::IsNull(column) | Condition::IsNotNull(column) => column,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    conditions: Vec<Condition>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare(
        mut self,
        column: &'static str,
        comparison: Comparison,
        value: impl Into<CriteriaValue>,
    ) -> Self {
        self.conditions.push(Condition::Compare {
            column,
            comparison,
            value: value.into(),
        });
        self
    }

    pub fn eq(self, column: &'static str, value: impl Into<CriteriaValue>) -> Self {
        self.compare(column, Comparison::Eq, value)
    }

    pub fn ne(self, column: &'static str, value: impl Into<CriteriaValue>) -> Self {
        self.compare(column, Comparison::Ne, value)
    }

    pub fn lt(self, column: &'static str, value: impl Into<CriteriaValue>) -> Self {
        self.compare(column, Comparison::Lt, value)
    }

    pub fn lte(self, column: &'static str, value: impl Into<CriteriaValue>) -> Self {
        self.compare(column, Comparison::Lte, value)
    }

    pub fn gt(self, column: &'static str, value: impl Into<CriteriaValue>) -> Self {
        self.compare(column, Comparison::Gt, value)
    }

    pub fn gte(self, column: &'static str, value: impl Into<CriteriaValue>) -> Self {
        self.compare(column, Comparison::Gte, value)
    }

    /// SQL `LIKE` with `%`/`_` wildcards
    pub fn like(self, column: &'static str, pattern: impl Into<String>) -> Self {
        self.compare(column, Comparison::Like, CriteriaValue::Text(pattern.into()))
    }

    pub fn is_null(mut self, column: &'static str) -> Self {
        self.conditions.push(Condition::IsNull(column));
        self
    }

    pub fn is_not_null(mut self, column: &'static str) -> Self {
        self.conditions.push(Condition::IsNotNull(column));
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// First column not present in `allowed`, if any
    pub fn unknown_column(&self, allowed: &[&str]) -> Option<&'static str> {
        self.conditions
            .iter()
            .map(Condition::column)
            .find(|column| !allowed.contains(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let customer_id = Uuid::new_v4();
        let criteria = Criteria::new()
            .eq("customer_id", customer_id)
            .gte("mileage", 10_000_i64)
            .is_null("purchase_date");

        assert_eq!(criteria.conditions().len(), 3);
        assert_eq!(
            criteria.conditions()[0],
            Condition::Compare {
                column: "customer_id",
                comparison: Comparison::Eq,
                value: CriteriaValue::Uuid(customer_id),
            }
        );
        assert_eq!(criteria.conditions()[2].column(), "purchase_date");
    }

    #[test]
    fn test_unknown_column() {
        let criteria = Criteria::new().eq("brand", "Toyota").like("nmae", "Cam%");
        assert_eq!(criteria.unknown_column(&["brand", "model_name"]), Some("nmae"));
        assert_eq!(Criteria::new().unknown_column(&[]), None);
    }
}
