use crate::error::{LookupError, Result};
use crate::query::schema::FieldPath;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    Like,
    NotLike,
    In,
    NotIn,
    Is,
}

impl FromStr for Operator {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let op = match normalized.as_str() {
            "=" => Operator::Eq,
            "!=" | "<>" => Operator::NotEq,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            "like" => Operator::Like,
            "not like" => Operator::NotLike,
            "in" => Operator::In,
            "not in" => Operator::NotIn,
            "is" => Operator::Is,
            _ => {
                return Err(LookupError::InvalidFilter(format!(
                    "Unsupported operator: {}",
                    s
                )))
            }
        };
        Ok(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Is => "is",
        };
        f.write_str(s)
    }
}

/// `[field_path, operator, operand]` after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub path: FieldPath,
    pub operator: Operator,
    pub operand: Value,
}

impl FilterClause {
    pub fn new(path: FieldPath, operator: Operator, operand: impl Into<Value>) -> Self {
        Self {
            path,
            operator,
            operand: operand.into(),
        }
    }

    /// Clause on a field of the queried doctype.
    pub fn field(field: &str, operator: Operator, operand: impl Into<Value>) -> Self {
        Self::new(FieldPath::new(None, field), operator, operand)
    }

    /// Clause on a field of a named (usually child) doctype.
    pub fn on(doctype: &str, field: &str, operator: Operator, operand: impl Into<Value>) -> Self {
        Self::new(FieldPath::new(Some(doctype), field), operator, operand)
    }

    fn from_array(items: &[Value]) -> Result<Self> {
        match items {
            [path, op, operand] => Ok(Self::new(
                FieldPath::parse(expect_str(path, "field")?)?,
                expect_str(op, "operator")?.parse()?,
                operand.clone(),
            )),
            [doctype, field, op, operand] => Ok(Self::on(
                expect_str(doctype, "doctype")?,
                expect_str(field, "field")?,
                expect_str(op, "operator")?.parse()?,
                operand.clone(),
            )),
            _ => Err(LookupError::InvalidFilter(format!(
                "Filter clause must have 3 or 4 elements, got {}",
                items.len()
            ))),
        }
    }
}

fn expect_str<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| LookupError::InvalidFilter(format!("Expected {} to be a string, got {}", what, value)))
}

/// Decode a serialized filter list. Invalid JSON is a `MalformedInput`
/// error; valid JSON of the wrong shape is an `InvalidFilter` error.
pub fn parse_filters(raw: &str) -> Result<Vec<FilterClause>> {
    let value: Value = serde_json::from_str(raw)?;
    filters_from_value(&value)
}

/// Accepted shapes:
/// - a list of clauses, each `[field, op, operand]` or `[doctype, field, op, operand]`
/// - a single bare clause
/// - an object of `field: operand` (equality) or `field: [op, operand]`
pub fn filters_from_value(value: &Value) -> Result<Vec<FilterClause>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) if items.iter().all(Value::is_array) => items
            .iter()
            .filter_map(Value::as_array)
            .map(|clause| FilterClause::from_array(clause))
            .collect(),
        Value::Array(items) => Ok(vec![FilterClause::from_array(items)?]),
        Value::Object(map) => map
            .iter()
            .map(|(field, operand)| {
                let path = FieldPath::parse(field)?;
                match operand {
                    Value::Array(pair) if pair.len() == 2 && pair[0].is_string() => Ok(
                        FilterClause::new(path, expect_str(&pair[0], "operator")?.parse()?, pair[1].clone()),
                    ),
                    _ => Ok(FilterClause::new(path, Operator::Eq, operand.clone())),
                }
            })
            .collect(),
        _ => Err(LookupError::InvalidFilter(format!(
            "Filters must be a list or an object, got {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_four_element_clause() {
        let filters = parse_filters(r#"[["Contact","full_name","=","Jane Doe"]]"#).unwrap();
        assert_eq!(
            filters,
            vec![FilterClause::on("Contact", "full_name", Operator::Eq, "Jane Doe")]
        );
    }

    #[test]
    fn test_parse_three_element_clause() {
        let filters = parse_filters(r#"[["`tabDynamic Link`.link_doctype", "=", "Supplier"]]"#).unwrap();
        assert_eq!(
            filters,
            vec![FilterClause::on("Dynamic Link", "link_doctype", Operator::Eq, "Supplier")]
        );
    }

    #[test]
    fn test_parse_single_bare_clause() {
        let filters = parse_filters(r#"["company_name", "like", "%acme%"]"#).unwrap();
        assert_eq!(
            filters,
            vec![FilterClause::field("company_name", Operator::Like, "%acme%")]
        );
    }

    #[test]
    fn test_parse_object_filters() {
        let filters = parse_filters(r#"{"last_name": "Doe", "first_name": ["!=", "John"]}"#).unwrap();
        assert_eq!(filters.len(), 2);
        assert!(filters.contains(&FilterClause::field("last_name", Operator::Eq, "Doe")));
        assert!(filters.contains(&FilterClause::field("first_name", Operator::NotEq, "John")));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_filters("not json").unwrap_err();
        assert!(matches!(err, LookupError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_wrong_shapes() {
        assert!(matches!(
            parse_filters("42").unwrap_err(),
            LookupError::InvalidFilter(_)
        ));
        assert!(matches!(
            parse_filters(r#"[["full_name", "="]]"#).unwrap_err(),
            LookupError::InvalidFilter(_)
        ));
        assert!(matches!(
            parse_filters(r#"[["full_name", "matches", "x"]]"#).unwrap_err(),
            LookupError::InvalidFilter(_)
        ));
    }

    #[test]
    fn test_null_means_no_filters() {
        assert!(filters_from_value(&json!(null)).unwrap().is_empty());
        assert!(parse_filters("[]").unwrap().is_empty());
    }

    #[test]
    fn test_operator_round_trip_is_case_insensitive() {
        assert_eq!("NOT LIKE".parse::<Operator>().unwrap(), Operator::NotLike);
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::NotEq);
        assert_eq!(Operator::Is.to_string(), "is");
    }
}
