/// SQL Assembly Module
///
/// Structured CRUD intents are rendered into parameterized SQL text plus a
/// positional parameter list. Values always travel through the parameter
/// list, never through string interpolation. Identifiers (table and column
/// names, filter predicates, order fields) are interpolated verbatim and
/// are therefore a trust boundary: they must not be populated from
/// untrusted input.
use crate::core::{Error, Result};
use mysql::Value;

/// A parameterized WHERE condition: predicate text with `?` placeholders
/// and the values bound to them, aligned positionally.
///
/// The predicate is caller-trusted SQL; the values are always bound.
#[derive(Debug, Clone)]
pub struct Filter {
    pub predicate: String,
    pub values: Vec<Value>,
}

impl Filter {
    pub fn new<P, V>(predicate: P, values: Vec<V>) -> Self
    where
        P: Into<String>,
        V: Into<Value>,
    {
        Filter {
            predicate: predicate.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sort direction for an ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// An ORDER BY directive: one field and an explicit direction.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// A row-window limit with explicit count and optional offset.
///
/// Renders as `LIMIT count` or `LIMIT offset, count`. The two fields are
/// deliberately separate constructors; there is no positional list whose
/// meaning shifts with its length.
#[derive(Debug, Clone, Copy)]
pub struct Limit {
    count: u64,
    offset: Option<u64>,
}

impl Limit {
    /// Caps the result at `count` rows.
    pub fn count(count: u64) -> Self {
        Limit {
            count,
            offset: None,
        }
    }

    /// Skips `offset` rows, then returns at most `count` rows.
    pub fn offset(offset: u64, count: u64) -> Self {
        Limit {
            count,
            offset: Some(offset),
        }
    }

    fn clause(&self) -> String {
        match self.offset {
            Some(offset) => format!(" LIMIT {}, {}", offset, self.count),
            None => format!(" LIMIT {}", self.count),
        }
    }
}

/// An ordered column-to-value mapping for INSERT and UPDATE.
///
/// Insertion order is preserved, so the rendered column list and the bound
/// parameter list always agree. Setting a column twice keeps its original
/// position and overwrites the value.
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Sets a column value, chainable:
    /// `Record::new().set("name", "Ann").set("age", 30)`.
    pub fn set<C, V>(mut self, column: C, value: V) -> Self
    where
        C: Into<String>,
        V: Into<Value>,
    {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    pub fn columns(&self) -> Vec<&str> {
        self.entries.iter().map(|(c, _)| c.as_str()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assembled SQL text plus its positional parameter list, ready for the
/// connection manager's execute entry point.
#[derive(Debug, Clone)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    /// Builds `SELECT <fields> FROM <table>` with optional WHERE, ORDER BY
    /// and LIMIT clauses. Each clause is appended only when its argument is
    /// present, and parameters are collected in clause order. An empty
    /// field list projects all columns.
    pub fn select(
        table: &str,
        fields: &[&str],
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
        limit: Option<&Limit>,
    ) -> Statement {
        let projection = if fields.is_empty() {
            "*".to_string()
        } else {
            fields.join(",")
        };
        let mut sql = format!("SELECT {projection} FROM {table}");
        let mut params = Vec::new();

        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.predicate);
            params.extend(filter.values.iter().cloned());
        }
        if let Some(order) = order {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                order.field,
                order.direction.as_sql()
            ));
        }
        if let Some(limit) = limit {
            sql.push_str(&limit.clause());
        }

        Statement { sql, params }
    }

    /// Builds `INSERT INTO <table> (<columns>) VALUES (?, ...)` with every
    /// value bound as a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Statement`] when the record is empty.
    pub fn insert(table: &str, record: &Record) -> Result<Statement> {
        if record.is_empty() {
            return Err(Error::Statement(
                "insert requires at least one column".to_string(),
            ));
        }
        let columns = record.columns().join(", ");
        let placeholders = vec!["?"; record.len()].join(", ");
        Ok(Statement {
            sql: format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})"),
            params: record.values(),
        })
    }

    /// Builds `UPDATE <table> SET c1=?, c2=?, ... [WHERE <predicate>]`.
    ///
    /// Record values are bound first, then filter values, matching clause
    /// order since the driver binds positionally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Statement`] when the record is empty.
    pub fn update(table: &str, record: &Record, filter: Option<&Filter>) -> Result<Statement> {
        if record.is_empty() {
            return Err(Error::Statement(
                "update requires at least one column".to_string(),
            ));
        }
        let assignments = record
            .columns()
            .iter()
            .map(|c| format!("{c}=?"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("UPDATE {table} SET {assignments}");
        let mut params = record.values();

        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.predicate);
            params.extend(filter.values.iter().cloned());
        }

        Ok(Statement { sql, params })
    }

    /// Builds `DELETE FROM <table> [WHERE <predicate>]`.
    pub fn delete(table: &str, filter: Option<&Filter>) -> Statement {
        let mut sql = format!("DELETE FROM {table}");
        let mut params = Vec::new();

        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.predicate);
            params.extend(filter.values.iter().cloned());
        }

        Statement { sql, params }
    }
}
