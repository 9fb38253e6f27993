/// Query Execution Module
///
/// This module provides the query-builder facade over the connection
/// manager, plus the materialized result types. Result sets are drained
/// eagerly, so no handle ever outlives the connection it came from.
use crate::core::db::builder::{Filter, Limit, OrderBy, Record, Statement};
use crate::core::db::connection::{ConnectionManager, Driver, MySqlDriver};
use crate::core::db::schema;
use crate::core::{Error, Result};
use crate::grid::GridStyle;
use mysql::prelude::Protocol;
use mysql::Value;
use std::collections::BTreeMap;

/// The drained outcome of one statement execution: result rows for
/// queries, affected-row count and last insert id for mutations.
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// Column names reported by the result set (empty for mutations)
    pub columns: Vec<String>,
    /// Rows of data as display-formatted string values
    pub rows: Vec<Vec<String>>,
    /// Number of rows changed by a mutation
    pub affected_rows: u64,
    /// Auto-increment id assigned by an INSERT, when the server reports one
    pub last_insert_id: Option<u64>,
}

impl QueryOutcome {
    /// Drains a driver result set into an owned outcome.
    pub(crate) fn from_driver<P: Protocol>(
        mut result: mysql::QueryResult<'_, '_, '_, P>,
    ) -> Result<Self> {
        let columns: Vec<String> = result
            .columns()
            .as_ref()
            .iter()
            .map(|c| c.name_str().to_string())
            .collect();

        let mut rows = Vec::new();
        for row in result.by_ref() {
            let row = row.map_err(Error::Query)?;
            let values = row.unwrap();
            rows.push(values.iter().map(format_value).collect());
        }

        Ok(QueryOutcome {
            columns,
            rows,
            affected_rows: result.affected_rows(),
            last_insert_id: result.last_insert_id(),
        })
    }
}

/// Represents the result of a SELECT-style execution.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of data as string values
    pub rows: Vec<Vec<String>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }

    pub(crate) fn from_outcome(outcome: QueryOutcome) -> Self {
        QueryResult::new(outcome.columns, outcome.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materializes the rows as column-name-to-value mappings.
    ///
    /// Zero matching rows yield an empty vector, never a vector of empty
    /// mappings.
    pub fn into_maps(self) -> Vec<BTreeMap<String, String>> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .cloned()
                    .zip(row.into_iter())
                    .collect::<BTreeMap<String, String>>()
            })
            .collect()
    }
}

impl IntoIterator for QueryResult {
    type Item = Vec<String>;
    type IntoIter = std::vec::IntoIter<Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Translates structured CRUD intents into parameterized SQL and submits
/// them through the connection manager it borrows.
pub struct QueryBuilder<'a, D: Driver = MySqlDriver> {
    manager: &'a mut ConnectionManager<D>,
}

impl<'a, D: Driver> QueryBuilder<'a, D> {
    pub fn new(manager: &'a mut ConnectionManager<D>) -> Self {
        QueryBuilder { manager }
    }

    /// Runs a SELECT and returns the drained result set.
    ///
    /// An empty `fields` slice projects all columns. The optional filter,
    /// ordering and limit are appended only when present.
    pub fn select(
        &mut self,
        table: &str,
        fields: &[&str],
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
        limit: Option<&Limit>,
    ) -> Result<QueryResult> {
        let stmt = Statement::select(table, fields, filter, order, limit);
        let outcome = self.manager.execute(&stmt.sql, stmt.params)?;
        Ok(QueryResult::from_outcome(outcome))
    }

    /// Runs a SELECT and materializes every row as a column-name-to-value
    /// mapping. Returns an empty vector when nothing matches.
    pub fn get_all(
        &mut self,
        table: &str,
        fields: &[&str],
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
        limit: Option<&Limit>,
    ) -> Result<Vec<BTreeMap<String, String>>> {
        Ok(self.select(table, fields, filter, order, limit)?.into_maps())
    }

    /// Inserts one row; every value is bound as a parameter. Returns the
    /// affected-row count.
    pub fn insert(&mut self, table: &str, record: &Record) -> Result<u64> {
        let stmt = Statement::insert(table, record)?;
        Ok(self.manager.execute(&stmt.sql, stmt.params)?.affected_rows)
    }

    /// Inserts one row and returns the auto-increment id the server
    /// assigned, when it reports one.
    pub fn insert_returning_id(&mut self, table: &str, record: &Record) -> Result<Option<u64>> {
        let stmt = Statement::insert(table, record)?;
        Ok(self.manager.execute(&stmt.sql, stmt.params)?.last_insert_id)
    }

    /// Updates matching rows. Record values bind before filter values, in
    /// clause order. Returns the affected-row count.
    pub fn update(&mut self, table: &str, record: &Record, filter: Option<&Filter>) -> Result<u64> {
        let stmt = Statement::update(table, record, filter)?;
        Ok(self.manager.execute(&stmt.sql, stmt.params)?.affected_rows)
    }

    /// Deletes matching rows; with no filter, all of them. Returns the
    /// affected-row count.
    pub fn delete(&mut self, table: &str, filter: Option<&Filter>) -> Result<u64> {
        let stmt = Statement::delete(table, filter);
        Ok(self.manager.execute(&stmt.sql, stmt.params)?.affected_rows)
    }

    /// Raw escape hatch: runs already-assembled SQL with positionally
    /// bound parameters.
    pub fn query(&mut self, sql: &str, params: Vec<Value>) -> Result<QueryOutcome> {
        self.manager.execute(sql, params)
    }

    /// Lists the base table names of the connected database.
    pub fn show_tables(&mut self) -> Result<Vec<String>> {
        schema::show_tables(self.manager)
    }

    /// Returns the column metadata rows (name, type, nullability, key
    /// role, default, extra) for `table`.
    pub fn describe_table(&mut self, table: &str) -> Result<QueryResult> {
        schema::describe_table(self.manager, table)
    }

    /// Renders the column metadata of `table` as human-readable tabular
    /// text, with a header row prepended.
    pub fn describe_table_grid(&mut self, table: &str, style: GridStyle) -> Result<String> {
        schema::describe_table_grid(self.manager, table, style)
    }
}

/// Formats a driver value for display.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::NULL => "NULL".to_string(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).to_string(),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Double(d) => d.to_string(),
        Value::Date(y, mo, d, h, mi, s, _) => {
            format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}")
        }
        Value::Time(neg, days, h, m, s, _) => {
            let sign = if *neg { "-" } else { "" };
            let hours = u32::from(*h) + days * 24;
            format!("{sign}{hours:02}:{m:02}:{s:02}")
        }
    }
}
