//! Property-based tests for SQL assembly
//!
//! These tests verify the invariants of statement building:
//! - Filter values pass through to the parameter list unchanged and in order
//! - Exactly one WHERE clause is emitted, with the predicate verbatim
//! - Update statements bind record values before filter values
//! - Optional clauses never appear when their argument is absent

use proptest::prelude::*;
use std::collections::BTreeMap;

use simplemysql::{Filter, Limit, OrderBy, Record, Statement, Value};

fn arb_identifier() -> impl Strategy<Value = String> {
    // Lowercase on purpose: clause keywords (WHERE, LIMIT, ...) can then
    // never collide with a generated identifier in the assertions below.
    "[a-z][a-z0-9_]{0,15}".prop_map(|s: String| s)
}

/// A parameterized predicate with one `?` per conjunct, paired with a
/// matching number of values.
fn arb_filter_parts() -> impl Strategy<Value = (String, Vec<i64>)> {
    prop::collection::vec(arb_identifier(), 1..4).prop_flat_map(|columns| {
        let predicate = columns
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(" AND ");
        prop::collection::vec(any::<i64>(), columns.len())
            .prop_map(move |values| (predicate.clone(), values))
    })
}

fn arb_record_columns() -> impl Strategy<Value = BTreeMap<String, i64>> {
    prop::collection::btree_map(arb_identifier(), any::<i64>(), 1..6)
}

fn build_record(columns: &BTreeMap<String, i64>) -> Record {
    let mut record = Record::new();
    for (column, value) in columns {
        record = record.set(column.clone(), *value);
    }
    record
}

proptest! {
    #[test]
    fn select_filter_values_pass_through_in_order(
        table in arb_identifier(),
        (predicate, values) in arb_filter_parts(),
    ) {
        let filter = Filter::new(predicate.clone(), values.clone());
        let stmt = Statement::select(&table, &[], Some(&filter), None, None);

        let expected: Vec<Value> = values.iter().map(|v| Value::from(*v)).collect();
        prop_assert_eq!(&stmt.params, &expected);
        prop_assert_eq!(stmt.sql.matches("WHERE").count(), 1);
        let expected_tail = format!("WHERE {predicate}");
        prop_assert!(stmt.sql.ends_with(&expected_tail));
    }

    #[test]
    fn select_without_optionals_emits_no_clause_tokens(
        table in arb_identifier(),
        fields in prop::collection::vec(arb_identifier(), 0..5),
    ) {
        let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        let stmt = Statement::select(&table, &field_refs, None, None, None);

        prop_assert!(stmt.params.is_empty());
        prop_assert!(!stmt.sql.contains("WHERE"));
        prop_assert!(!stmt.sql.contains("ORDER BY"));
        prop_assert!(!stmt.sql.contains("LIMIT"));
        prop_assert!(stmt.sql.starts_with("SELECT "));
        let expected_tail = format!("FROM {table}");
        prop_assert!(stmt.sql.ends_with(&expected_tail));
    }

    #[test]
    fn select_order_and_limit_render_at_the_tail(
        table in arb_identifier(),
        field in arb_identifier(),
        count in 1u64..10_000,
        offset in prop::option::of(0u64..10_000),
    ) {
        let limit = match offset {
            Some(offset) => Limit::offset(offset, count),
            None => Limit::count(count),
        };
        let stmt = Statement::select(
            &table,
            &["*"],
            None,
            Some(&OrderBy::desc(field.clone())),
            Some(&limit),
        );

        let tail = match offset {
            Some(offset) => format!("ORDER BY {field} DESC LIMIT {offset}, {count}"),
            None => format!("ORDER BY {field} DESC LIMIT {count}"),
        };
        prop_assert!(stmt.sql.ends_with(&tail));
    }

    #[test]
    fn update_binds_record_values_then_filter_values(
        table in arb_identifier(),
        columns in arb_record_columns(),
        (predicate, filter_values) in arb_filter_parts(),
    ) {
        let record = build_record(&columns);
        let filter = Filter::new(predicate, filter_values.clone());
        let stmt = Statement::update(&table, &record, Some(&filter)).unwrap();

        let mut expected: Vec<Value> = columns.values().map(|v| Value::from(*v)).collect();
        expected.extend(filter_values.iter().map(|v| Value::from(*v)));
        prop_assert_eq!(&stmt.params, &expected);
        prop_assert_eq!(stmt.sql.matches("WHERE").count(), 1);
    }

    #[test]
    fn insert_placeholder_count_matches_record(
        table in arb_identifier(),
        columns in arb_record_columns(),
    ) {
        let record = build_record(&columns);
        let stmt = Statement::insert(&table, &record).unwrap();

        prop_assert_eq!(stmt.sql.matches('?').count(), columns.len());
        let expected: Vec<Value> = columns.values().map(|v| Value::from(*v)).collect();
        prop_assert_eq!(stmt.params, expected);
    }
}
