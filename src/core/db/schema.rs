/// Schema Introspection Module
///
/// This module provides the metadata layer: listing the base tables of the
/// connected database and describing the columns of one table. The table
/// name is a caller-trusted identifier, interpolated verbatim.
use crate::core::db::connection::{ConnectionManager, Driver};
use crate::core::db::query::QueryResult;
use crate::core::Result;
use crate::grid::{Grid, GridStyle};

const SHOW_TABLES_SQL: &str = "SHOW FULL TABLES WHERE Table_type = 'BASE TABLE'";

fn describe_sql(table: &str) -> String {
    format!("DESCRIBE {table}")
}

/// Returns the base table names of the connected database, excluding
/// views.
pub fn show_tables<D: Driver>(manager: &mut ConnectionManager<D>) -> Result<Vec<String>> {
    let outcome = manager.execute(SHOW_TABLES_SQL, Vec::new())?;
    Ok(first_column(outcome.rows))
}

/// Returns one row per column of `table`: Field, Type, Null, Key, Default,
/// Extra. Structurally identical on repeated calls as long as the schema
/// does not change.
pub fn describe_table<D: Driver>(
    manager: &mut ConnectionManager<D>,
    table: &str,
) -> Result<QueryResult> {
    let outcome = manager.execute(&describe_sql(table), Vec::new())?;
    Ok(QueryResult::new(outcome.columns, outcome.rows))
}

/// Renders the column metadata of `table` as tabular text with the header
/// row prepended, in the requested style.
pub fn describe_table_grid<D: Driver>(
    manager: &mut ConnectionManager<D>,
    table: &str,
    style: GridStyle,
) -> Result<String> {
    let result = describe_table(manager, table)?;
    let mut grid = Grid::new();
    grid.set_headers(result.columns);
    for row in result.rows {
        grid.add_row(row);
    }
    Ok(grid.render(style))
}

fn first_column(rows: Vec<Vec<String>>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|mut row| {
            if row.is_empty() {
                None
            } else {
                Some(row.swap_remove(0))
            }
        })
        .collect()
}
