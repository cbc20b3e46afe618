//! DATAGRID Test Utilities
//!
//! Shared test infrastructure for the DATAGRID workspace:
//! - Proptest generators for cell values, rows and filter values
//! - The "usage overview" fixture table
//! - Custom assertions for table errors

pub use datagrid_core::{
    CellValue, ColumnDescriptor, Condition, ConditionFilter, ConfigError, DataTable,
    FilterConfig, FilterValue, Operand, OptionItem, Record, RowId, TableError, TableOptions,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for table inputs.

    use super::*;
    use proptest::prelude::*;

    /// Finite amounts in the range the fixtures use.
    pub fn arb_amount() -> impl Strategy<Value = f64> {
        (-10_000i64..10_000i64).prop_map(|cents| cents as f64 / 4.0)
    }

    /// Null, number or short text.
    pub fn arb_cell_value() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            1 => Just(CellValue::Null),
            3 => arb_amount().prop_map(CellValue::Number),
            2 => "[a-zA-Z ]{0,8}".prop_map(CellValue::Text),
        ]
    }

    pub fn arb_condition() -> impl Strategy<Value = Condition> {
        prop_oneof![
            Just(Condition::IsEqualTo),
            Just(Condition::IsBetween),
            Just(Condition::IsGreaterThan),
            Just(Condition::IsLessThan),
        ]
    }

    /// Operand as typed (text) or as set programmatically (number).
    pub fn arb_operand() -> impl Strategy<Value = Operand> {
        prop_oneof![
            arb_amount().prop_map(Operand::Number),
            arb_amount().prop_map(|v| Operand::Text(v.to_string())),
        ]
    }

    /// Condition filter, sometimes without a condition.
    pub fn arb_condition_filter() -> impl Strategy<Value = ConditionFilter> {
        (
            proptest::option::weighted(0.85, arb_condition()),
            arb_operand(),
            arb_operand(),
        )
            .prop_map(|(condition, first, second)| ConditionFilter::new(condition, first, second))
    }

    /// Rows with a numeric `costs` cell.
    pub fn arb_cost_rows(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(arb_amount(), 0..max_len).prop_map(|costs| {
            costs
                .into_iter()
                .enumerate()
                .map(|(i, c)| Record::new().with("owner", format!("owner-{i}")).with("costs", c))
                .collect()
        })
    }

    /// Rows whose `region` is drawn from [`fixtures::REGIONS`](crate::fixtures::REGIONS).
    pub fn arb_region_rows(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(prop::sample::select(crate::fixtures::REGIONS.to_vec()), 0..max_len)
            .prop_map(|regions| {
                regions
                    .into_iter()
                    .map(|r| Record::new().with("region", r))
                    .collect()
            })
    }

    /// Subset of the fixture regions, in a random order.
    pub fn arb_region_set() -> impl Strategy<Value = Vec<String>> {
        prop::sample::subsequence(crate::fixtures::REGIONS.to_vec(), 0..=crate::fixtures::REGIONS.len())
            .prop_shuffle()
            .prop_map(|set| set.into_iter().map(str::to_string).collect())
    }

    /// Valid page size.
    pub fn arb_page_size() -> impl Strategy<Value = usize> {
        1usize..=25
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built tables for common scenarios.

    use super::*;
    use datagrid_core::{format_currency_usd, Alignment};

    pub const REGIONS: [&str; 4] = ["us-west-1", "us-east-2", "eu-west-1", "eu-central-1"];

    pub fn region_options() -> Vec<OptionItem> {
        vec![
            OptionItem::new("us-west-1", "US West (N. California)"),
            OptionItem::new("us-east-2", "US East (Ohio)"),
            OptionItem::new("eu-west-1", "EU West (Ireland)"),
            OptionItem::new("eu-central-1", "EU Central (Frankfurt)"),
        ]
    }

    /// Columns of the usage overview table.
    pub fn usage_descriptors() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::text("owner", "Owner")
                .sortable(true)
                .hideable(false)
                .aligned(Alignment::Left)
                .filters(FilterConfig::text()),
            ColumnDescriptor::text("region", "Region")
                .subtitle("Computing region")
                .sortable(true)
                .options(region_options())
                .filters(FilterConfig::checkbox()),
            ColumnDescriptor::number("costs", "Costs")
                .subtitle("Monthly costs in USD")
                .sortable(true)
                .aligned(Alignment::Left)
                .filters(FilterConfig::number())
                .formatter(|v| v.as_number().map(format_currency_usd).unwrap_or_default())
                .filter_value_formatter(format_currency_usd),
            ColumnDescriptor::text("lastEdited", "Last edited")
                .sortable(true)
                .aligned(Alignment::Left),
        ]
    }

    /// Twelve usage rows spread over the four regions.
    pub fn usage_rows() -> Vec<Record> {
        const ROWS: [(&str, &str, f64, &str); 12] = [
            ("Ana Souza", "us-west-1", 4_523.11, "23/09/2024 13:00"),
            ("Bruno Lima", "us-east-2", 2_180.0, "22/09/2024 10:45"),
            ("Carla Mendes", "eu-west-1", 512.5, "22/09/2024 08:20"),
            ("Diego Alves", "eu-central-1", 0.0, "21/09/2024 17:02"),
            ("Elisa Rocha", "us-west-1", 7_844.9, "21/09/2024 11:30"),
            ("Felipe Costa", "us-east-2", 145.75, "20/09/2024 16:15"),
            ("Gabriela Nunes", "eu-west-1", 3_210.4, "20/09/2024 09:05"),
            ("Henrique Dias", "eu-central-1", 98.0, "19/09/2024 14:48"),
            ("Isabela Martins", "us-west-1", 12_760.0, "19/09/2024 07:55"),
            ("João Pereira", "us-east-2", 1_005.25, "18/09/2024 18:40"),
            ("Karina Lopes", "eu-west-1", 660.0, "18/09/2024 12:10"),
            ("Lucas Ferreira", "eu-central-1", 2_999.99, "17/09/2024 15:33"),
        ];
        ROWS.iter()
            .map(|(owner, region, costs, edited)| {
                Record::new()
                    .with("owner", *owner)
                    .with("region", *region)
                    .with("costs", *costs)
                    .with("lastEdited", *edited)
            })
            .collect()
    }

    pub fn usage_table(options: TableOptions) -> DataTable<Record> {
        DataTable::new(&usage_descriptors(), usage_rows(), options)
            .unwrap_or_else(|e| panic!("usage fixture must build: {e}"))
    }

    /// Two plain columns `owner` and `costs` (number filter), titled by id.
    pub fn owner_costs_descriptors() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::text("owner", "owner").filters(FilterConfig::text()),
            ColumnDescriptor::number("costs", "costs")
                .sortable(true)
                .filters(FilterConfig::number())
                .formatter(|v| v.as_number().map(format_currency_usd).unwrap_or_default()),
        ]
    }

    pub fn cost_table(rows: Vec<Record>, options: TableOptions) -> DataTable<Record> {
        DataTable::new(&owner_costs_descriptors(), rows, options)
            .unwrap_or_else(|e| panic!("cost fixture must build: {e}"))
    }

    /// Single checkbox-filtered `region` column.
    pub fn region_table(rows: Vec<Record>) -> DataTable<Record> {
        let descriptors = vec![ColumnDescriptor::text("region", "Region")
            .options(region_options())
            .filters(FilterConfig::checkbox())];
        DataTable::new(&descriptors, rows, TableOptions::default())
            .unwrap_or_else(|e| panic!("region fixture must build: {e}"))
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for table results.

    use super::*;

    /// Assert that a build failed with a specific configuration error.
    #[track_caller]
    pub fn assert_config_error<T: std::fmt::Debug>(
        result: &Result<T, ConfigError>,
        expected: &ConfigError,
    ) {
        match result {
            Err(err) => assert_eq!(err, expected, "Wrong configuration error"),
            Ok(value) => panic!("Expected {:?}, got Ok: {:?}", expected, value),
        }
    }

    /// Assert that a runtime table call was rejected for an unknown column.
    #[track_caller]
    pub fn assert_unknown_column<T: std::fmt::Debug>(result: &Result<T, TableError>, column: &str) {
        match result {
            Err(TableError::UnknownColumn { column_id }) => {
                assert_eq!(column_id, column, "Wrong column in UnknownColumn error");
            }
            other => panic!("Expected UnknownColumn for {}, got: {:?}", column, other),
        }
    }

    /// Assert the ids of the filtered rows, in order.
    #[track_caller]
    pub fn assert_rows<R: datagrid_core::Row>(table: &DataTable<R>, expected: &[usize]) {
        let actual: Vec<usize> = table.filtered_rows().iter().map(|id| id.0).collect();
        assert_eq!(actual, expected, "Filtered rows differ");
    }
}

// ============================================================================
// TESTS
// ============================================================================
