use datagrid_core::{
    number_condition, to_csv, CellValue, ColumnDescriptor, Condition, ConditionFilter, ConfigError,
    DataTable, FilterBar, FilterConfig, FilterValue, Operand, PageNav, Record, Row, RowId,
    SortDirection, TableOptions,
};
use datagrid_test_utils::assertions::{assert_config_error, assert_rows, assert_unknown_column};
use datagrid_test_utils::fixtures::{cost_table, region_table, usage_table, REGIONS};
use datagrid_test_utils::generators::{
    arb_amount, arb_cell_value, arb_condition_filter, arb_cost_rows, arb_page_size,
    arb_region_rows, arb_region_set,
};
use proptest::prelude::*;

fn costs(rows: &[f64]) -> Vec<Record> {
    rows.iter()
        .enumerate()
        .map(|(i, c)| Record::new().with("owner", format!("o{i}")).with("costs", *c))
        .collect()
}

fn paged(page_size: usize) -> TableOptions {
    TableOptions {
        page_size,
        ..TableOptions::default()
    }
}

// ============================================================================
// Examples
// ============================================================================

#[test]
fn greater_than_filter_on_costs() {
    let mut table = cost_table(costs(&[50.0, 150.0, 100.0]), TableOptions::default());
    let filter: ConditionFilter =
        serde_json::from_str(r#"{"condition":"is-greater-than","value":[100,""]}"#).unwrap();
    table
        .set_filter("costs", FilterValue::Condition(filter))
        .unwrap();
    assert_rows(&table, &[1]);
    assert_eq!(table.cell(RowId(1), "costs"), CellValue::Number(150.0));
}

#[test]
fn csv_of_two_visible_columns() {
    let rows = vec![Record::new().with("owner", "Ana").with("costs", 12.5)];
    let table = cost_table(rows, TableOptions::default());
    let csv = to_csv(&table);
    let mut lines = csv.split("\r\n");
    assert_eq!(lines.next(), Some("owner,costs"));
    assert_eq!(lines.next(), Some("Ana,12.5"));
}

#[test]
fn duplicate_column_ids_fail_construction() {
    let descriptors = vec![
        ColumnDescriptor::text("owner", "Owner"),
        ColumnDescriptor::number("owner", "Costs"),
    ];
    let result = DataTable::<Record>::new(&descriptors, Vec::new(), TableOptions::default());
    assert_config_error(
        &result.map(|_| ()),
        &ConfigError::DuplicateColumnId {
            column_id: "owner".to_string(),
            first: 0,
            second: 1,
        },
    );
}

#[test]
fn unknown_language_is_rejected() {
    let parsed = "de".parse::<datagrid_core::Language>();
    assert_eq!(
        parsed,
        Err(ConfigError::UnknownLanguage {
            code: "de".to_string()
        })
    );
}

#[test]
fn unknown_column_calls_are_errors() {
    let mut table = usage_table(TableOptions::default());
    assert_unknown_column(&table.toggle_sort("nope"), "nope");
    assert_unknown_column(&table.move_column("nope", 0), "nope");
    assert_unknown_column(
        &table.set_filter("nope", FilterValue::Text("x".into())),
        "nope",
    );
}

#[test]
fn usage_table_sorts_costs_descending_first() {
    let mut table = usage_table(TableOptions::default());
    let sort = table.toggle_sort("costs").unwrap().unwrap();
    assert_eq!(sort.direction, SortDirection::Desc);
    let first = table.filtered_rows()[0];
    assert_eq!(table.cell(first, "owner"), CellValue::from("Isabela Martins"));
}

#[test]
fn pt_filter_bar_labels() {
    let options = TableOptions {
        language: datagrid_core::Language::Pt,
        ..TableOptions::default()
    };
    let table = usage_table(options);
    let mut bar = FilterBar::new(&table);
    bar.set_condition("costs", Some(Condition::IsBetween)).unwrap();
    bar.set_operand("costs", 0, "100").unwrap();
    bar.set_operand("costs", 1, "2500").unwrap();
    assert_eq!(
        bar.chip_label(&table, "costs").as_deref(),
        Some("está entre $100.00 e $2,500.00")
    );
    assert_eq!(
        bar.control("owner").unwrap().placeholder(table.locale()),
        "Buscar por owner..."
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn between_is_inclusive_and_never_reordered(
        row in arb_amount(),
        a in arb_amount(),
        b in arb_amount(),
    ) {
        let filter = ConditionFilter::between(a, b);
        prop_assert_eq!(number_condition(row, &filter), a <= row && row <= b);
        if a > b {
            prop_assert!(!number_condition(row, &filter));
        }
    }

    #[test]
    fn unset_condition_admits_every_row(rows in arb_cost_rows(40), first in arb_amount()) {
        let total = rows.len();
        let mut table = cost_table(rows, TableOptions::default());
        let filter = ConditionFilter::new(None, first, "");
        table.set_filter("costs", FilterValue::Condition(filter)).unwrap();
        prop_assert_eq!(table.filtered_len(), total);
        prop_assert!(!table.is_filtered());
    }

    #[test]
    fn condition_filter_matches_predicate(rows in arb_cost_rows(40), filter in arb_condition_filter()) {
        let expected: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| match r.value("costs") {
                CellValue::Number(n) => number_condition(n, &filter),
                _ => false,
            })
            .map(|(i, _)| i)
            .collect();
        let mut table = cost_table(rows, TableOptions::default());
        table.set_filter("costs", FilterValue::Condition(filter)).unwrap();
        let actual: Vec<usize> = table.filtered_rows().iter().map(|id| id.0).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn checkbox_membership(rows in arb_region_rows(40), set in arb_region_set()) {
        let total = rows.len();
        let expected: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| set.is_empty() || set.contains(&r.value("region").display()))
            .map(|(i, _)| i)
            .collect();

        let mut table = region_table(rows);
        let mut bar = FilterBar::new(&table);
        for region in &set {
            bar.toggle_option("region", region).unwrap();
        }
        bar.apply(&mut table, "region").unwrap();

        let actual: Vec<usize> = table.filtered_rows().iter().map(|id| id.0).collect();
        prop_assert_eq!(&actual, &expected);
        if set.is_empty() || set.len() == REGIONS.len() {
            prop_assert_eq!(actual.len(), total);
        }
    }

    #[test]
    fn clear_filters_restores_full_data(
        rows in arb_cost_rows(40),
        filter in arb_condition_filter(),
        query in "[a-z0-9]{1,3}",
    ) {
        let total = rows.len();
        let mut table = cost_table(rows, TableOptions::default());
        let mut bar = FilterBar::new(&table);
        table.set_filter("costs", FilterValue::Condition(filter)).unwrap();
        table.set_filter("owner", FilterValue::Text(query)).unwrap();

        bar.clear_filters(&mut table);
        prop_assert!(table.filters().is_empty());
        prop_assert_eq!(table.filtered_len(), total);
        for control in bar.controls() {
            prop_assert!(!control.draft().is_active());
        }
    }

    #[test]
    fn navigation_always_clears_selection(
        len in 2usize..80,
        page_size in arb_page_size(),
        nav in prop::sample::select(PageNav::all().to_vec()),
    ) {
        let mut table = cost_table(costs(&vec![1.0; len]), paged(page_size));
        if table.can_navigate(PageNav::Next) {
            table.navigate(PageNav::Next);
        }
        table.toggle_page_selection();
        prop_assert!(!table.selection().is_empty());

        let moved = table.navigate(nav);
        if moved {
            prop_assert!(table.selection().is_empty());
        } else {
            prop_assert!(!table.selection().is_empty());
        }
    }

    #[test]
    fn page_window_stays_in_bounds(len in 0usize..120, page_size in arb_page_size(), steps in 0usize..10) {
        let mut table = cost_table(costs(&vec![1.0; len]), paged(page_size));
        for _ in 0..steps {
            table.navigate(PageNav::Next);
        }
        let window = table.page_window();
        prop_assert_eq!(window.total, len);
        prop_assert!(window.first <= window.last);
        prop_assert!(window.last <= len);
        prop_assert_eq!(table.page_rows().len(), if len == 0 { 0 } else { window.last - window.first + 1 });
        prop_assert_eq!(table.page_count(), len.div_ceil(page_size));
    }

    #[test]
    fn sort_keeps_nulls_last(values in prop::collection::vec(arb_cell_value(), 0..40), asc in any::<bool>()) {
        let rows: Vec<Record> = values
            .iter()
            .map(|v| Record::new().with("owner", "x").with("costs", v.clone()))
            .collect();
        let mut table = cost_table(rows, TableOptions::default());
        table.toggle_sort("costs").unwrap();
        if asc {
            table.toggle_sort("costs").unwrap();
        }
        let sorted: Vec<CellValue> = table
            .filtered_rows()
            .iter()
            .map(|id| table.cell(*id, "costs"))
            .collect();
        let first_null = sorted.iter().position(CellValue::is_null).unwrap_or(sorted.len());
        prop_assert!(sorted[first_null..].iter().all(CellValue::is_null));
    }

    #[test]
    fn operands_coerce_like_numbers(v in arb_amount()) {
        prop_assert_eq!(Operand::Text(v.to_string()).coerce(), v);
        prop_assert_eq!(Operand::Text(format!("  {v} ")).coerce(), v);
        prop_assert!(Operand::Text("abc".into()).coerce().is_nan());
    }
}

#[test]
fn number_filter_needs_number_column() {
    let descriptors = vec![ColumnDescriptor::text("owner", "Owner").filters(FilterConfig::number())];
    let result = DataTable::<Record>::new(&descriptors, Vec::new(), TableOptions::default());
    assert_config_error(
        &result.map(|_| ()),
        &ConfigError::NumberFilterOnTextColumn {
            column_id: "owner".to_string(),
        },
    );
}
