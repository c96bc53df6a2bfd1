//! Record-query layer: lists records of a doctype with selected fields,
//! AND filters, OR filters and a page length.

pub mod filters;
pub mod schema;
pub mod sqlite;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub use filters::{parse_filters, FilterClause, Operator};
pub use schema::FieldPath;
pub use sqlite::SqliteRecordQuery;

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub doctype: String,
    pub fields: Vec<FieldPath>,
    pub filters: Vec<FilterClause>,
    pub or_filters: Vec<FilterClause>,
    /// Zero or negative means no limit.
    pub page_length: i64,
}

/// One result row keyed by each field's output name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// String value of `key`; null and missing both read as `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

#[async_trait]
pub trait RecordQuery: Send + Sync {
    async fn get_list(&self, query: ListQuery) -> Result<Vec<Record>>;
}
