use crate::database::AsyncDbConnection;
use crate::error::{LookupError, Result};
use crate::query::filters::{FilterClause, Operator};
use crate::query::schema::{self, DocType, FieldPath};
use crate::query::{ListQuery, Record, RecordQuery};
use async_trait::async_trait;
use rusqlite::types::{Value as SqlValue, ValueRef};
use serde_json::Value;

/// Runs `ListQuery`s against the SQLite contact store.
#[derive(Clone)]
pub struct SqliteRecordQuery {
    conn: AsyncDbConnection,
}

impl SqliteRecordQuery {
    pub fn new(conn: AsyncDbConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RecordQuery for SqliteRecordQuery {
    async fn get_list(&self, query: ListQuery) -> Result<Vec<Record>> {
        let statement = build_select(&query)?;
        tracing::trace!("get_list {}: {}", query.doctype, statement.sql);

        let conn = self.conn.lock().await?;
        let mut stmt = conn.prepare(&statement.sql)?;

        let records = stmt
            .query_map(rusqlite::params_from_iter(statement.params.iter()), |row| {
                let mut record = Record::new();
                for (i, name) in statement.columns.iter().enumerate() {
                    record.insert(name, json_from_sql(row.get_ref(i)?));
                }
                Ok(record)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

#[derive(Debug)]
pub struct SelectStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
    /// Output names, in select order.
    pub columns: Vec<String>,
}

struct SelectBuilder {
    main: &'static DocType,
    joins: Vec<&'static DocType>,
    params: Vec<SqlValue>,
}

impl SelectBuilder {
    fn field(&mut self, path: &FieldPath) -> Result<String> {
        let resolved = schema::resolve(self.main, path)?;
        if resolved.doctype != self.main && !self.joins.contains(&resolved.doctype) {
            self.joins.push(resolved.doctype);
        }
        Ok(resolved.sql())
    }

    fn bind(&mut self, value: SqlValue) -> &'static str {
        self.params.push(value);
        "?"
    }

    fn condition(&mut self, clause: &FilterClause) -> Result<String> {
        let column = self.field(&clause.path)?;

        let sql = match clause.operator {
            Operator::Eq | Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge => {
                let p = self.bind(scalar(&clause.operand)?);
                format!("{} {} {}", column, clause.operator, p)
            }
            Operator::NotEq => {
                let p = self.bind(scalar(&clause.operand)?);
                format!("IFNULL({}, '') != {}", column, p)
            }
            Operator::Like => {
                let p = self.bind(SqlValue::Text(text(&clause.operand)?));
                format!("{} LIKE {}", column, p)
            }
            Operator::NotLike => {
                let p = self.bind(SqlValue::Text(text(&clause.operand)?));
                format!("IFNULL({}, '') NOT LIKE {}", column, p)
            }
            Operator::In | Operator::NotIn => {
                let values = list(&clause.operand)?;
                let negate = clause.operator == Operator::NotIn;
                if values.is_empty() {
                    let always = if negate { "1 = 1" } else { "0 = 1" };
                    return Ok(always.to_string());
                }
                let placeholders: Vec<&str> = values.into_iter().map(|v| self.bind(v)).collect();
                if negate {
                    format!("IFNULL({}, '') NOT IN ({})", column, placeholders.join(", "))
                } else {
                    format!("{} IN ({})", column, placeholders.join(", "))
                }
            }
            Operator::Is => match clause.operand.as_str().map(|s| s.trim().to_ascii_lowercase()) {
                Some(s) if s == "set" => format!("IFNULL({}, '') != ''", column),
                Some(s) if s == "not set" => format!("IFNULL({}, '') = ''", column),
                _ => {
                    return Err(LookupError::InvalidFilter(format!(
                        "Operand of 'is' must be 'set' or 'not set', got {}",
                        clause.operand
                    )))
                }
            },
        };

        Ok(sql)
    }
}

/// Translate a `ListQuery` into SQL. Every doctype and column is checked
/// against the schema before it reaches the SQL text; operands are bound.
pub fn build_select(query: &ListQuery) -> Result<SelectStatement> {
    let main = schema::doctype(&query.doctype)?;
    let mut builder = SelectBuilder {
        main,
        joins: Vec::new(),
        params: Vec::new(),
    };

    let default_fields = [FieldPath::new(None, "id")];
    let fields = if query.fields.is_empty() {
        &default_fields[..]
    } else {
        &query.fields[..]
    };

    let mut select = Vec::with_capacity(fields.len());
    let mut columns = Vec::with_capacity(fields.len());
    for path in fields {
        select.push(format!("{} AS \"{}\"", builder.field(path)?, path.output_name()));
        columns.push(path.output_name().to_string());
    }

    let mut conditions = query
        .filters
        .iter()
        .map(|clause| builder.condition(clause).map(|c| format!("({})", c)))
        .collect::<Result<Vec<_>>>()?;

    if !query.or_filters.is_empty() {
        let any = query
            .or_filters
            .iter()
            .map(|clause| builder.condition(clause).map(|c| format!("({})", c)))
            .collect::<Result<Vec<_>>>()?;
        conditions.push(format!("({})", any.join(" OR ")));
    }

    let mut sql = format!("SELECT {} FROM {}", select.join(", "), main.table);
    for child in &builder.joins {
        let parent_key = child.parent.map(|(_, key)| key).unwrap_or("id");
        sql.push_str(&format!(
            " LEFT JOIN {child} ON {child}.{key} = {main}.id",
            child = child.table,
            key = parent_key,
            main = main.table
        ));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    let order: Vec<String> = std::iter::once(main)
        .chain(builder.joins.iter().copied())
        .map(|d| format!("{}.id", d.table))
        .collect();
    sql.push_str(" ORDER BY ");
    sql.push_str(&order.join(", "));

    if query.page_length > 0 {
        builder.bind(SqlValue::Integer(query.page_length));
        sql.push_str(" LIMIT ?");
    }

    Ok(SelectStatement {
        sql,
        params: builder.params,
        columns,
    })
}

fn scalar(value: &Value) -> Result<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => Ok(n
            .as_i64()
            .map(SqlValue::Integer)
            .unwrap_or_else(|| SqlValue::Real(n.as_f64().unwrap_or_default()))),
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        _ => Err(LookupError::InvalidFilter(format!(
            "Expected a scalar operand, got {}",
            value
        ))),
    }
}

fn text(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(LookupError::InvalidFilter(format!(
            "Expected a text operand, got {}",
            value
        ))),
    }
}

/// `in` operands are a JSON list or a comma separated string.
fn list(value: &Value) -> Result<Vec<SqlValue>> {
    match value {
        Value::Array(items) => items.iter().map(scalar).collect(),
        Value::String(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| SqlValue::Text(s.to_string()))
            .collect()),
        other => Ok(vec![scalar(other)?]),
    }
}

fn json_from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
