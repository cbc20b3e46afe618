//! Filter bar model.
//!
//! One control per filterable column. Each control keeps a draft that the
//! user edits; the draft reaches the table's filter slot on `apply` (select,
//! checkbox, number) or when the text debouncer fires (text).

use crate::condition::{Condition, ConditionFilter, Operand};
use crate::debounce::Debouncer;
use crate::descriptor::OptionItem;
use crate::error::{TableError, TableResult};
use crate::filter::{FilterKind, FilterValue};
use crate::locale::Locale;
use crate::table::DataTable;
use crate::value::Row;
use std::time::Instant;

/// Labels beyond this count collapse into "<first> and N more".
const MAX_LISTED_LABELS: usize = 2;

/// Unapplied state of one filter control.
#[derive(Debug, Clone)]
pub enum Draft {
    Text {
        input: String,
        debounce: Debouncer<String>,
    },
    Select(Option<String>),
    Checkbox(Vec<String>),
    Number(ConditionFilter),
}

impl Draft {
    fn empty(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Text => Draft::Text {
                input: String::new(),
                debounce: Debouncer::default(),
            },
            FilterKind::Select => Draft::Select(None),
            FilterKind::Checkbox => Draft::Checkbox(Vec::new()),
            FilterKind::Number => Draft::Number(ConditionFilter::default()),
        }
    }

    fn from_applied(kind: FilterKind, applied: Option<&FilterValue>) -> Self {
        match (kind, applied) {
            (FilterKind::Text, Some(FilterValue::Text(s))) => Draft::Text {
                input: s.clone(),
                debounce: Debouncer::default(),
            },
            (FilterKind::Select, Some(FilterValue::Text(s))) if !s.is_empty() => {
                Draft::Select(Some(s.clone()))
            }
            (FilterKind::Checkbox, Some(FilterValue::Set(values))) => {
                Draft::Checkbox(values.clone())
            }
            (FilterKind::Number, Some(FilterValue::Condition(filter))) => {
                Draft::Number(filter.clone())
            }
            _ => Draft::empty(kind),
        }
    }

    fn to_value(&self) -> FilterValue {
        match self {
            Draft::Text { input, .. } => FilterValue::Text(input.clone()),
            Draft::Select(value) => FilterValue::Text(value.clone().unwrap_or_default()),
            Draft::Checkbox(values) => FilterValue::Set(values.clone()),
            Draft::Number(filter) => FilterValue::Condition(filter.clone()),
        }
    }

    /// Whether the draft would set a non-empty filter.
    pub fn is_active(&self) -> bool {
        !self.to_value().is_empty()
    }

    fn cancel_pending(&mut self) {
        if let Draft::Text { debounce, .. } = self {
            debounce.cancel();
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterControl {
    column_id: String,
    title: String,
    kind: FilterKind,
    options: Vec<OptionItem>,
    draft: Draft,
}

impl FilterControl {
    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn options(&self) -> &[OptionItem] {
        &self.options
    }

    /// Label of an option value, falling back to the raw value.
    pub fn option_label(&self, value: &str) -> String {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| value.to_string())
    }

    fn require_option(&self, value: &str) -> TableResult<()> {
        if self.options.iter().any(|o| o.value == value) {
            Ok(())
        } else {
            Err(TableError::OptionNotFound {
                column_id: self.column_id.clone(),
                value: value.to_string(),
            })
        }
    }

    /// Prompt shown in the empty control.
    pub fn placeholder(&self, locale: &Locale) -> String {
        match self.kind {
            FilterKind::Text => locale.search_by(&self.title),
            FilterKind::Select => locale.select_placeholder.to_string(),
            FilterKind::Checkbox => locale.filter_by(&self.title),
            FilterKind::Number => locale.select_condition_placeholder.to_string(),
        }
    }

    fn mismatch(&self, got: FilterKind) -> TableError {
        TableError::FilterKindMismatch {
            column_id: self.column_id.clone(),
            expected: self.kind,
            got,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterBar {
    controls: Vec<FilterControl>,
}

impl FilterBar {
    /// One control per filterable column, drafts synced with the table.
    pub fn new<R: Row>(table: &DataTable<R>) -> Self {
        let controls = table
            .ordered_columns()
            .into_iter()
            .filter_map(|column| {
                let kind = column.filter_kind?;
                Some(FilterControl {
                    column_id: column.id.clone(),
                    title: column.display_name.clone(),
                    kind,
                    options: column.options.clone(),
                    draft: Draft::from_applied(kind, table.filter_value(&column.id)),
                })
            })
            .collect();
        Self { controls }
    }

    pub fn controls(&self) -> &[FilterControl] {
        &self.controls
    }

    pub fn control(&self, column_id: &str) -> Option<&FilterControl> {
        self.controls.iter().find(|c| c.column_id == column_id)
    }

    /// Controls of the columns currently shown.
    pub fn visible_controls<R: Row>(&self, table: &DataTable<R>) -> Vec<&FilterControl> {
        self.controls
            .iter()
            .filter(|c| table.is_column_visible(&c.column_id))
            .collect()
    }

    fn control_mut(&mut self, column_id: &str) -> TableResult<&mut FilterControl> {
        self.controls
            .iter_mut()
            .find(|c| c.column_id == column_id)
            .ok_or_else(|| TableError::NotFilterable {
                column_id: column_id.to_string(),
            })
    }

    // ------------------------------------------------------------------------
    // Editing drafts
    // ------------------------------------------------------------------------

    /// Text input changed: update the draft and restart the debounce window.
    pub fn type_text(&mut self, column_id: &str, input: &str, now: Instant) -> TableResult<()> {
        let control = self.control_mut(column_id)?;
        let Draft::Text {
            input: draft,
            debounce,
        } = &mut control.draft
        else {
            return Err(control.mismatch(FilterKind::Text));
        };
        *draft = input.to_string();
        debounce.push(input.to_string(), now);
        Ok(())
    }

    /// Push every text value whose debounce window has elapsed into the
    /// table. Returns how many filters were written.
    pub fn tick<R: Row>(&mut self, table: &mut DataTable<R>, now: Instant) -> TableResult<usize> {
        let mut applied = 0;
        for control in &mut self.controls {
            if let Draft::Text { debounce, .. } = &mut control.draft {
                if let Some(value) = debounce.poll(now) {
                    table.set_filter(&control.column_id, FilterValue::Text(value))?;
                    applied += 1;
                }
            }
        }
        Ok(applied)
    }

    /// Any text value waiting for its debounce window.
    pub fn has_pending(&self) -> bool {
        self.controls.iter().any(|c| match &c.draft {
            Draft::Text { debounce, .. } => debounce.is_pending(),
            _ => false,
        })
    }

    /// Pick the single value of a select control.
    pub fn choose(&mut self, column_id: &str, value: Option<&str>) -> TableResult<()> {
        let control = self.control_mut(column_id)?;
        if control.kind != FilterKind::Select {
            return Err(control.mismatch(FilterKind::Select));
        }
        if let Some(value) = value {
            control.require_option(value)?;
        }
        control.draft = Draft::Select(value.map(str::to_string));
        Ok(())
    }

    /// Check or uncheck one option; returns whether it is now checked.
    pub fn toggle_option(&mut self, column_id: &str, value: &str) -> TableResult<bool> {
        let control = self.control_mut(column_id)?;
        if control.kind != FilterKind::Checkbox {
            return Err(control.mismatch(FilterKind::Checkbox));
        }
        control.require_option(value)?;
        let Draft::Checkbox(values) = &mut control.draft else {
            return Err(control.mismatch(FilterKind::Checkbox));
        };
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
            Ok(false)
        } else {
            values.push(value.to_string());
            Ok(true)
        }
    }

    /// Change the condition of a number control. The first operand survives
    /// while a condition is set; the second is always cleared.
    pub fn set_condition(&mut self, column_id: &str, condition: Option<Condition>) -> TableResult<()> {
        let control = self.control_mut(column_id)?;
        let Draft::Number(filter) = &mut control.draft else {
            return Err(control.mismatch(FilterKind::Number));
        };
        let first = match condition {
            Some(_) => std::mem::take(&mut filter.value[0]),
            None => Operand::default(),
        };
        *filter = ConditionFilter::new(condition, first, Operand::default());
        Ok(())
    }

    /// Type into one of the number operands. The first operand needs a
    /// condition; the second is only open for `is-between`.
    pub fn set_operand(&mut self, column_id: &str, index: usize, input: &str) -> TableResult<()> {
        let control = self.control_mut(column_id)?;
        let Draft::Number(filter) = &mut control.draft else {
            return Err(control.mismatch(FilterKind::Number));
        };
        let Some(condition) = filter.condition else {
            return Err(TableError::ConditionRequired {
                column_id: column_id.to_string(),
            });
        };
        match index {
            0 => {
                filter.value[0] = Operand::from(input);
                if !condition.uses_second_operand() {
                    filter.value[1] = Operand::default();
                }
            }
            1 if condition.uses_second_operand() => filter.value[1] = Operand::from(input),
            _ => {
                return Err(TableError::OperandDisabled {
                    column_id: column_id.to_string(),
                    index,
                })
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Applying
    // ------------------------------------------------------------------------

    /// Write a control's draft into the table. Text drafts skip their
    /// pending debounce window.
    pub fn apply<R: Row>(&mut self, table: &mut DataTable<R>, column_id: &str) -> TableResult<()> {
        let control = self.control_mut(column_id)?;
        control.draft.cancel_pending();
        let value = control.draft.to_value();

        if let FilterValue::Condition(filter) = &value {
            if filter.is_inverted_range() {
                tracing::warn!(
                    column_id,
                    min = %filter.value[0].display(),
                    max = %filter.value[1].display(),
                    "Between filter has its bounds inverted; no row will match"
                );
            }
        }
        table.set_filter(column_id, value)
    }

    /// Clear one column's filter and its draft.
    pub fn reset<R: Row>(&mut self, table: &mut DataTable<R>, column_id: &str) -> TableResult<()> {
        let control = self.control_mut(column_id)?;
        control.draft = Draft::empty(control.kind);
        table.clear_filter(column_id)
    }

    /// Close a control without applying: the draft reverts to the applied value.
    pub fn dismiss<R: Row>(&mut self, table: &DataTable<R>, column_id: &str) -> TableResult<()> {
        let control = self.control_mut(column_id)?;
        control.draft = Draft::from_applied(control.kind, table.filter_value(column_id));
        Ok(())
    }

    /// Clear every filter slot, draft and pending text value.
    pub fn clear_filters<R: Row>(&mut self, table: &mut DataTable<R>) {
        for control in &mut self.controls {
            control.draft = Draft::empty(control.kind);
        }
        table.reset_filters();
    }

    /// Re-read every draft from the table.
    pub fn sync<R: Row>(&mut self, table: &DataTable<R>) {
        for control in &mut self.controls {
            control.draft = Draft::from_applied(control.kind, table.filter_value(&control.column_id));
        }
    }

    pub fn is_filtered<R: Row>(&self, table: &DataTable<R>) -> bool {
        table.is_filtered()
    }

    // ------------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------------

    /// Formatted values of a control's draft. `None` when there is nothing
    /// to show.
    pub fn value_labels<R: Row>(&self, table: &DataTable<R>, column_id: &str) -> Option<Vec<String>> {
        let control = self.control(column_id)?;
        let column = table.column(column_id)?;

        match &control.draft {
            Draft::Text { input, .. } if !input.is_empty() => Some(vec![input.clone()]),
            Draft::Select(Some(value)) => Some(vec![control.option_label(value)]),
            Draft::Checkbox(values) => Some(values.iter().map(|v| control.option_label(v)).collect()),
            Draft::Number(filter) => {
                let condition = filter.condition?.label(table.locale());
                let format = |operand: &Operand| {
                    column
                        .format_filter_value(operand.coerce())
                        .unwrap_or_else(|| operand.display())
                };
                let [first, second] = &filter.value;
                let label = match (first.is_blank(), second.is_blank()) {
                    (true, true) => condition.to_string(),
                    (_, true) => format!("{} {}", condition, format(first)),
                    _ => format!(
                        "{} {} {} {}",
                        condition,
                        format(first),
                        table.locale().range_and,
                        format(second)
                    ),
                };
                Some(vec![label])
            }
            _ => None,
        }
    }

    /// Chip text: up to two values comma-joined, otherwise the first value
    /// followed by the count of the rest.
    pub fn chip_label<R: Row>(&self, table: &DataTable<R>, column_id: &str) -> Option<String> {
        let labels = self.value_labels(table, column_id)?;
        match labels.len() {
            0 => None,
            n if n <= MAX_LISTED_LABELS => Some(labels.join(", ")),
            n => Some(format!(
                "{} {} {} more",
                labels[0],
                table.locale().filter_label_and,
                n - 1
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ColumnDescriptor, FilterConfig, OptionItem};
    use crate::table::TableOptions;
    use crate::value::{Record, RowId};
    use std::time::Duration;

    fn table() -> DataTable<Record> {
        let descriptors = vec![
            ColumnDescriptor::text("owner", "Owner").filters(FilterConfig::text()),
            ColumnDescriptor::text("status", "Status")
                .options([
                    OptionItem::new("live", "Live"),
                    OptionItem::new("inactive", "Inactive"),
                ])
                .filters(FilterConfig::select()),
            ColumnDescriptor::text("region", "Region")
                .options([
                    OptionItem::new("us-west-1", "US West"),
                    OptionItem::new("us-east-2", "US East"),
                    OptionItem::new("eu-west-1", "EU West"),
                ])
                .filters(FilterConfig::checkbox()),
            ColumnDescriptor::number("costs", "Costs")
                .filters(FilterConfig::number())
                .filter_value_formatter(|v| format!("${v:.2}")),
        ];
        let data = vec![
            Record::new()
                .with("owner", "Ana")
                .with("status", "live")
                .with("region", "us-west-1")
                .with("costs", 50),
            Record::new()
                .with("owner", "Bruno")
                .with("status", "inactive")
                .with("region", "eu-west-1")
                .with("costs", 150),
            Record::new()
                .with("owner", "Joana")
                .with("status", "live")
                .with("region", "us-east-2")
                .with("costs", 100),
        ];
        DataTable::new(&descriptors, data, TableOptions::default()).unwrap()
    }

    #[test]
    fn test_text_applies_after_quiescence() {
        let mut t = table();
        let mut bar = FilterBar::new(&t);
        let t0 = Instant::now();

        bar.type_text("owner", "b", t0).unwrap();
        bar.type_text("owner", "an", t0 + Duration::from_millis(100)).unwrap();
        assert_eq!(bar.tick(&mut t, t0 + Duration::from_millis(350)).unwrap(), 0);
        assert!(bar.has_pending());

        assert_eq!(bar.tick(&mut t, t0 + Duration::from_millis(400)).unwrap(), 1);
        assert_eq!(t.filtered_rows(), &[RowId(0), RowId(2)]);
        assert!(!bar.has_pending());
    }

    #[test]
    fn test_select_waits_for_apply() {
        let mut t = table();
        let mut bar = FilterBar::new(&t);
        bar.choose("status", Some("inactive")).unwrap();
        assert_eq!(t.filtered_len(), 3);
        bar.apply(&mut t, "status").unwrap();
        assert_eq!(t.filtered_rows(), &[RowId(1)]);
        assert_eq!(bar.chip_label(&t, "status").as_deref(), Some("Inactive"));
    }

    #[test]
    fn test_checkbox_labels_collapse() {
        let mut t = table();
        let mut bar = FilterBar::new(&t);
        assert!(bar.toggle_option("region", "us-west-1").unwrap());
        assert!(bar.toggle_option("region", "us-east-2").unwrap());
        assert_eq!(
            bar.chip_label(&t, "region").as_deref(),
            Some("US West, US East")
        );
        assert!(bar.toggle_option("region", "eu-west-1").unwrap());
        assert_eq!(
            bar.chip_label(&t, "region").as_deref(),
            Some("US West and 2 more")
        );

        assert!(!bar.toggle_option("region", "eu-west-1").unwrap());
        bar.apply(&mut t, "region").unwrap();
        assert_eq!(t.filtered_rows(), &[RowId(0), RowId(2)]);
    }

    #[test]
    fn test_number_condition_flow() {
        let mut t = table();
        let mut bar = FilterBar::new(&t);

        assert!(matches!(
            bar.set_operand("costs", 0, "10"),
            Err(TableError::ConditionRequired { .. })
        ));

        bar.set_condition("costs", Some(Condition::IsGreaterThan)).unwrap();
        bar.set_operand("costs", 0, "100").unwrap();
        assert!(matches!(
            bar.set_operand("costs", 1, "200"),
            Err(TableError::OperandDisabled { index: 1, .. })
        ));
        assert_eq!(
            bar.chip_label(&t, "costs").as_deref(),
            Some("is greater than $100.00")
        );

        bar.apply(&mut t, "costs").unwrap();
        assert_eq!(t.filtered_rows(), &[RowId(1)]);
    }

    #[test]
    fn test_condition_change_keeps_first_operand_only() {
        let t = table();
        let mut bar = FilterBar::new(&t);
        bar.set_condition("costs", Some(Condition::IsBetween)).unwrap();
        bar.set_operand("costs", 0, "60").unwrap();
        bar.set_operand("costs", 1, "120").unwrap();
        assert_eq!(
            bar.chip_label(&t, "costs").as_deref(),
            Some("is between $60.00 and $120.00")
        );

        bar.set_condition("costs", Some(Condition::IsLessThan)).unwrap();
        let Draft::Number(filter) = bar.control("costs").unwrap().draft() else {
            panic!("number draft expected");
        };
        assert_eq!(filter.value[0], Operand::from("60"));
        assert_eq!(filter.value[1], Operand::default());
    }

    #[test]
    fn test_inverted_between_matches_nothing() {
        let mut t = table();
        let mut bar = FilterBar::new(&t);
        bar.set_condition("costs", Some(Condition::IsBetween)).unwrap();
        bar.set_operand("costs", 0, "200").unwrap();
        bar.set_operand("costs", 1, "10").unwrap();
        bar.apply(&mut t, "costs").unwrap();
        assert_eq!(t.filtered_len(), 0);
    }

    #[test]
    fn test_dismiss_reverts_draft() {
        let mut t = table();
        let mut bar = FilterBar::new(&t);
        bar.toggle_option("region", "us-west-1").unwrap();
        bar.apply(&mut t, "region").unwrap();
        bar.toggle_option("region", "eu-west-1").unwrap();
        bar.dismiss(&t, "region").unwrap();
        assert_eq!(bar.chip_label(&t, "region").as_deref(), Some("US West"));
    }

    #[test]
    fn test_reset_and_clear_filters() {
        let mut t = table();
        let mut bar = FilterBar::new(&t);
        bar.choose("status", Some("live")).unwrap();
        bar.apply(&mut t, "status").unwrap();
        bar.reset(&mut t, "status").unwrap();
        assert!(!bar.is_filtered(&t));
        assert_eq!(bar.chip_label(&t, "status"), None);

        let t0 = Instant::now();
        bar.toggle_option("region", "us-east-2").unwrap();
        bar.apply(&mut t, "region").unwrap();
        bar.type_text("owner", "zz", t0).unwrap();
        bar.clear_filters(&mut t);

        assert!(!bar.is_filtered(&t));
        assert!(!bar.has_pending());
        assert_eq!(t.filtered_len(), t.total_rows());
        assert_eq!(bar.tick(&mut t, t0 + Duration::from_secs(1)).unwrap(), 0);
    }

    #[test]
    fn test_placeholders_and_visibility() {
        let mut t = table();
        let bar = FilterBar::new(&t);
        let owner = bar.control("owner").unwrap();
        assert_eq!(owner.placeholder(t.locale()), "Search by owner...");

        t.set_column_visibility("costs", false).unwrap();
        let visible: Vec<&str> = bar
            .visible_controls(&t)
            .iter()
            .map(|c| c.column_id())
            .collect();
        assert_eq!(visible, ["owner", "status", "region"]);
    }

    #[test]
    fn test_wrong_control_kind_rejected() {
        let t = table();
        let mut bar = FilterBar::new(&t);
        assert!(matches!(
            bar.toggle_option("costs", "x"),
            Err(TableError::FilterKindMismatch { .. })
        ));
        assert!(matches!(
            bar.toggle_option("region", "mars-1"),
            Err(TableError::OptionNotFound { .. })
        ));
        assert!(matches!(
            bar.choose("lastEdited", None),
            Err(TableError::NotFilterable { .. })
        ));
    }
}
