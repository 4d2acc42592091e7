use super::*;
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value).unwrap()
}

fn role_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID").sort(SortKind::Numeric),
        ColumnDescriptor::new("name", "Nom").sort(SortKind::Text),
        ColumnDescriptor::new("createdAt", "Créé le")
            .sort(SortKind::Chronological)
            .render(Render::Date),
        ColumnDescriptor::new("action", "Action")
            .field("id")
            .render(Render::Link { template: "/role/{id}/" }),
    ]
}

fn sample() -> Vec<Record> {
    vec![
        record(json!({"id": 3, "name": "caissier", "createdAt": "2024-03-01T08:00:00.000Z"})),
        record(json!({"id": 1, "name": "Admin", "createdAt": "2024-01-15T10:30:00Z"})),
        record(json!({"id": 2, "name": "comptable", "createdAt": "2023-12-31"})),
    ]
}

fn ids(rows: &[&Record]) -> Vec<String> {
    rows.iter().map(|r| r.id().to_string()).collect()
}

// =============================================================
// Cells
// =============================================================

#[test]
fn date_render_formats_day() {
    let columns = role_columns();
    let r = record(json!({"id": 1, "createdAt": "2024-01-15T23:59:59+00:00"}));
    assert_eq!(columns[2].cell(&r), "2024-01-15");
}

#[test]
fn date_render_passes_through_garbage() {
    let columns = role_columns();
    let r = record(json!({"id": 1, "createdAt": "yesterday"}));
    assert_eq!(columns[2].cell(&r), "yesterday");
}

#[test]
fn link_render_substitutes_id() {
    let columns = role_columns();
    let r = record(json!({"id": 42, "name": "x"}));
    assert_eq!(columns[3].cell(&r), "/role/42/");
}

#[test]
fn plain_render_of_missing_field_is_empty() {
    let columns = role_columns();
    let r = record(json!({"id": 1}));
    assert_eq!(columns[1].cell(&r), "");
}

#[test]
fn parse_timestamp_accepts_backend_shapes() {
    assert!(parse_timestamp("2024-01-01T00:00:00.000Z").is_some());
    assert!(parse_timestamp("2024-01-01 12:00:00").is_some());
    assert!(parse_timestamp("2024-01-01T12:00:00").is_some());
    assert!(parse_timestamp("2024-01-01").is_some());
    assert!(parse_timestamp("01/02/2024").is_none());
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn numeric_sort_orders_by_value() {
    let records = sample();
    let columns = role_columns();
    assert_eq!(ids(&sorted_rows(&records, &columns[0], SortOrder::Ascending)), ["1", "2", "3"]);
    assert_eq!(ids(&sorted_rows(&records, &columns[0], SortOrder::Descending)), ["3", "2", "1"]);
}

#[test]
fn numeric_sort_reads_numeric_strings() {
    let records = vec![record(json!({"id": "10"})), record(json!({"id": "9"}))];
    let column = ColumnDescriptor::new("id", "ID").sort(SortKind::Numeric);
    assert_eq!(ids(&sorted_rows(&records, &column, SortOrder::Ascending)), ["9", "10"]);
}

#[test]
fn text_sort_ignores_case() {
    let records = sample();
    let columns = role_columns();
    let rows = sorted_rows(&records, &columns[1], SortOrder::Ascending);
    let names: Vec<String> = rows.iter().map(|r| columns[1].cell(r)).collect();
    assert_eq!(names, ["Admin", "caissier", "comptable"]);
}

#[test]
fn chronological_sort_mixes_timestamp_shapes() {
    let records = sample();
    let columns = role_columns();
    assert_eq!(ids(&sorted_rows(&records, &columns[2], SortOrder::Ascending)), ["2", "1", "3"]);
}

#[test]
fn missing_values_sort_last_ascending() {
    let records = vec![
        record(json!({"id": 1})),
        record(json!({"id": 2, "name": "b"})),
        record(json!({"id": 3, "name": "a"})),
    ];
    let column = ColumnDescriptor::new("name", "Nom").sort(SortKind::Text);
    assert_eq!(ids(&sorted_rows(&records, &column, SortOrder::Ascending)), ["3", "2", "1"]);
}

#[test]
fn non_finite_numbers_sort_with_missing_values() {
    let records = vec![
        record(json!({"id": 3})),
        record(json!({"id": "NaN"})),
        record(json!({"id": 1})),
        record(json!({"id": "inf"})),
        record(json!({"id": 2})),
    ];
    let column = ColumnDescriptor::new("id", "ID").sort(SortKind::Numeric);
    assert_eq!(ids(&sorted_rows(&records, &column, SortOrder::Ascending)), ["1", "2", "3", "NaN", "inf"]);
}

#[test]
fn large_integers_compare_exactly() {
    let records = vec![
        record(json!({"id": 9_007_199_254_740_993_u64})),
        record(json!({"id": 9_007_199_254_740_992_u64})),
        record(json!({"id": "9007199254740994"})),
    ];
    let column = ColumnDescriptor::new("id", "ID").sort(SortKind::Numeric);
    assert_eq!(
        ids(&sorted_rows(&records, &column, SortOrder::Ascending)),
        ["9007199254740992", "9007199254740993", "9007199254740994"]
    );
}

#[test]
fn integers_and_floats_interleave() {
    let records = vec![
        record(json!({"id": 1, "price": 2})),
        record(json!({"id": 2, "price": "1.5"})),
        record(json!({"id": 3, "price": 1})),
    ];
    let column = ColumnDescriptor::new("price", "Prix").sort(SortKind::Numeric);
    assert_eq!(ids(&sorted_rows(&records, &column, SortOrder::Ascending)), ["3", "2", "1"]);
}

#[test]
fn unsortable_column_keeps_collection_order() {
    let records = sample();
    let columns = role_columns();
    assert_eq!(ids(&sorted_rows(&records, &columns[3], SortOrder::Descending)), ["3", "1", "2"]);
}

#[test]
fn sorting_never_touches_collection() {
    let records = sample();
    let before = records.clone();
    for column in role_columns() {
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let first = ids(&sorted_rows(&records, &column, order));
            let second = ids(&sorted_rows(&records, &column, order));
            assert_eq!(first, second);
        }
    }
    assert_eq!(records, before);
}

#[test]
fn sort_order_toggles() {
    assert_eq!(SortOrder::default(), SortOrder::Ascending);
    assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
    assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
}

// =============================================================
// Visibility
// =============================================================

#[test]
fn all_columns_start_visible() {
    let cols = VisibleColumns::new(role_columns());
    assert_eq!(cols.visible_keys(), ["id", "name", "createdAt", "action"]);
}

#[test]
fn toggle_hides_then_restores_position() {
    let mut cols = VisibleColumns::new(role_columns());
    assert!(!cols.toggle("name").unwrap());
    assert_eq!(cols.visible_keys(), ["id", "createdAt", "action"]);
    assert!(cols.toggle("name").unwrap());
    assert_eq!(cols.visible_keys(), ["id", "name", "createdAt", "action"]);
}

#[test]
fn restore_position_is_independent_of_toggle_order() {
    let mut cols = VisibleColumns::new(role_columns());
    cols.toggle("id").unwrap();
    cols.toggle("name").unwrap();
    cols.toggle("createdAt").unwrap();
    // Re-show out of declaration order.
    cols.toggle("createdAt").unwrap();
    assert_eq!(cols.visible_keys(), ["createdAt", "action"]);
    cols.toggle("id").unwrap();
    assert_eq!(cols.visible_keys(), ["id", "createdAt", "action"]);
    cols.toggle("name").unwrap();
    assert_eq!(cols.visible_keys(), ["id", "name", "createdAt", "action"]);
}

#[test]
fn double_toggle_is_identity_for_every_column() {
    let original = VisibleColumns::new(role_columns());
    for key in ["id", "name", "createdAt", "action"] {
        let mut cols = original.clone();
        cols.toggle("name").unwrap();
        let before = cols.clone();
        cols.toggle(key).unwrap();
        cols.toggle(key).unwrap();
        assert_eq!(cols, before, "toggling `{key}` twice changed the set");
    }
}

#[test]
fn toggle_unknown_column_errors() {
    let mut cols = VisibleColumns::new(role_columns());
    assert_eq!(cols.toggle("salary"), Err(UnknownColumn("salary".to_owned())));
    assert_eq!(cols.visible_keys().len(), 4);
}

#[test]
fn set_visible_is_idempotent() {
    let mut cols = VisibleColumns::new(role_columns());
    cols.set_visible("action", false).unwrap();
    cols.set_visible("action", false).unwrap();
    assert!(!cols.is_visible("action").unwrap());
    cols.set_visible("action", true).unwrap();
    assert!(cols.is_visible("action").unwrap());
}

#[test]
fn reset_shows_everything() {
    let mut cols = VisibleColumns::new(role_columns());
    cols.toggle("id").unwrap();
    cols.toggle("action").unwrap();
    cols.reset();
    assert_eq!(cols.visible_keys(), ["id", "name", "createdAt", "action"]);
    assert_eq!(cols.all().len(), 4);
    assert_eq!(cols.get("name").map(|c| c.title), Some("Nom"));
}
