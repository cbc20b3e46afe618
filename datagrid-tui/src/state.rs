//! Application state and key handling for the table screen.

use crate::config::TuiConfig;
use crate::error::TuiError;
use crate::keys::{map_menu_key, MenuAction};
use crate::nav::{step, Focus};
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence::{self, FileColumnOrderStore};
use crate::theme::SynthBruteTheme;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use datagrid_core::{
    BulkAction, BulkCommand, ColumnDef, Condition, ConditionFilter, DataTable, Draft,
    FilterControl, FilterKind, Locale, PageNav, Record, RowAction, RowId, TableShell,
};
use ratatui::style::Style;
use std::path::PathBuf;
use std::time::Instant;
use tui_textarea::{CursorMove, TextArea};

/// Notifications kept for the footer.
const NOTIFICATION_HISTORY: usize = 20;

/// Editor for one filter control, open as a popover.
pub struct FilterEditor {
    pub column_id: String,
    pub kind: FilterKind,
    /// Option row (select, checkbox) or field row (number: condition,
    /// first operand, second operand).
    pub cursor: usize,
    /// One input for text filters, two operands for number filters.
    pub inputs: Vec<TextArea<'static>>,
}

impl FilterEditor {
    fn open(control: &FilterControl, locale: &Locale) -> Self {
        let (cursor, inputs) = match control.draft() {
            Draft::Text { input, .. } => (0, vec![text_input(input, &control.placeholder(locale))]),
            Draft::Select(chosen) => {
                let cursor = chosen
                    .as_deref()
                    .and_then(|v| control.options().iter().position(|o| o.value == v))
                    .unwrap_or(0);
                (cursor, Vec::new())
            }
            Draft::Checkbox(_) => (0, Vec::new()),
            Draft::Number(filter) => (0, operand_inputs(filter, locale)),
        };
        Self {
            column_id: control.column_id().to_string(),
            kind: control.kind(),
            cursor,
            inputs,
        }
    }

    /// Whether keys go to a text input.
    pub fn is_typing(&self) -> bool {
        match self.kind {
            FilterKind::Text => true,
            FilterKind::Number => self.cursor > 0,
            FilterKind::Select | FilterKind::Checkbox => false,
        }
    }

    /// The input under the cursor, with its operand index.
    fn focused_input(&mut self) -> Option<(usize, &mut TextArea<'static>)> {
        let index = match self.kind {
            FilterKind::Text => 0,
            FilterKind::Number if self.cursor > 0 => self.cursor - 1,
            _ => return None,
        };
        self.inputs.get_mut(index).map(|input| (index, input))
    }
}

fn text_input(value: &str, placeholder: &str) -> TextArea<'static> {
    let mut input = TextArea::new(vec![value.to_string()]);
    input.set_placeholder_text(placeholder.to_string());
    input.set_cursor_line_style(Style::default());
    input.move_cursor(CursorMove::End);
    input
}

fn operand_inputs(filter: &ConditionFilter, locale: &Locale) -> Vec<TextArea<'static>> {
    filter
        .value
        .iter()
        .map(|op| text_input(&op.display(), locale.number_input_placeholder))
        .collect()
}

fn input_text(input: &TextArea<'_>) -> String {
    input.lines().concat()
}

pub enum Popover {
    Filter(FilterEditor),
    /// Column visibility and order menu.
    ViewOptions { cursor: usize },
    RowActions { row: RowId, cursor: usize },
    Help,
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub shell: TableShell<Record>,
    pub focus: Focus,
    /// Index into the current page.
    pub row_cursor: usize,
    /// Index into the visible data columns.
    pub column_cursor: usize,
    /// Index into the visible filter controls.
    pub filter_cursor: usize,
    pub popover: Option<Popover>,
    pub notifications: Vec<Notification>,
    /// Bulk and row-action work handed out so far.
    pub issued: Vec<BulkCommand>,
}

impl App {
    pub fn new(config: TuiConfig, shell: TableShell<Record>) -> Self {
        let theme = SynthBruteTheme::from_name(&config.theme.name).unwrap_or_default();
        Self {
            config,
            theme,
            shell,
            focus: Focus::Table,
            row_cursor: 0,
            column_cursor: 0,
            filter_cursor: 0,
            popover: None,
            notifications: Vec::new(),
            issued: Vec::new(),
        }
    }

    /// Load the rows and build the table the config describes.
    pub fn from_config(config: TuiConfig) -> Result<Self, TuiError> {
        let rows = persistence::load_rows(&config.data_path)?;
        let descriptors = config.descriptors();
        let options = config.table_options()?;
        let table = if options.persisted_name().is_some() {
            let store = FileColumnOrderStore::new(&config.state_dir);
            DataTable::with_store(&descriptors, rows, options, Box::new(store))?
        } else {
            DataTable::new(&descriptors, rows, options)?
        };
        Ok(Self::new(config, TableShell::new(table)))
    }

    pub fn table(&self) -> &DataTable<Record> {
        self.shell.table()
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let note = Notification::new(level, message);
        match level {
            NotificationLevel::Error => tracing::error!(message = %note.message, "Notification"),
            NotificationLevel::Warning => tracing::warn!(message = %note.message, "Notification"),
            _ => tracing::debug!(message = %note.message, "Notification"),
        }
        self.notifications.push(note);
        if self.notifications.len() > NOTIFICATION_HISTORY {
            self.notifications.remove(0);
        }
    }

    fn report<T>(&mut self, result: Result<T, impl std::fmt::Display>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.notify(NotificationLevel::Error, err.to_string());
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Cursors
    // ------------------------------------------------------------------------

    pub fn focused_row(&self) -> Option<RowId> {
        self.table().page_rows().get(self.row_cursor).copied()
    }

    pub fn focused_column(&self) -> Option<&ColumnDef> {
        self.table()
            .visible_accessor_columns()
            .get(self.column_cursor)
            .copied()
    }

    pub fn focused_control(&self) -> Option<&FilterControl> {
        self.shell
            .filter_bar()
            .visible_controls(self.table())
            .get(self.filter_cursor)
            .copied()
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = if forward {
            self.focus.next()
        } else {
            self.focus.previous()
        };
    }

    pub fn move_vertical(&mut self, delta: isize) {
        if self.focus == Focus::Table {
            let len = self.table().page_rows().len();
            self.row_cursor = step(self.row_cursor, delta, len);
        }
    }

    pub fn move_horizontal(&mut self, delta: isize) {
        match self.focus {
            Focus::Table => {
                let len = self.table().visible_accessor_columns().len();
                self.column_cursor = step(self.column_cursor, delta, len);
            }
            Focus::FilterBar => {
                let len = self.shell.filter_bar().visible_controls(self.table()).len();
                self.filter_cursor = step(self.filter_cursor, delta, len);
            }
        }
    }

    /// Keep cursors inside the current page, columns and controls.
    pub fn clamp_cursors(&mut self) {
        self.row_cursor = step(self.row_cursor, 0, self.table().page_rows().len());
        self.column_cursor = step(
            self.column_cursor,
            0,
            self.table().visible_accessor_columns().len(),
        );
        self.filter_cursor = step(
            self.filter_cursor,
            0,
            self.shell.filter_bar().visible_controls(self.table()).len(),
        );
    }

    // ------------------------------------------------------------------------
    // Table commands
    // ------------------------------------------------------------------------

    /// Release debounced text filters.
    pub fn tick(&mut self, now: Instant) {
        let released = self.shell.tick(now);
        if let Some(count) = self.report(released) {
            if count > 0 {
                self.clamp_cursors();
            }
        }
    }

    pub fn toggle_sort(&mut self) {
        let Some(column_id) = self.focused_column().map(|c| c.id.clone()) else {
            return;
        };
        let result = self.shell.table_mut().toggle_sort(&column_id);
        if self.report(result).is_some() {
            self.row_cursor = 0;
        }
    }

    pub fn toggle_row(&mut self) {
        if !self.table().options().enable_row_selection {
            return;
        }
        if let Some(row) = self.focused_row() {
            self.shell.click_row(row);
        }
    }

    pub fn toggle_page(&mut self) {
        if self.table().options().enable_row_selection {
            self.shell.table_mut().toggle_page_selection();
        }
    }

    pub fn navigate(&mut self, nav: PageNav) {
        if self.shell.navigate(nav) {
            self.row_cursor = 0;
        }
    }

    pub fn bulk(&mut self, action: BulkAction) {
        let Some(command) = self.shell.bulk_command(action) else {
            return;
        };
        let verb = match command {
            BulkCommand::Edit(_) => "Edit",
            BulkCommand::Delete(_) => "Delete",
        };
        self.notify(
            NotificationLevel::Info,
            format!("{verb} requested for {} row(s)", command.rows().len()),
        );
        self.issued.push(command);
    }

    pub fn clear_filters(&mut self) {
        if !self.shell.is_filtered() && !self.shell.filter_bar().has_pending() {
            return;
        }
        self.shell.clear_filters();
        self.clamp_cursors();
        let label = self.table().locale().clear_filters;
        self.notify(NotificationLevel::Info, label);
    }

    /// Write the CSV of the filtered rows into the export directory.
    pub fn export(&mut self, date: NaiveDate) -> Option<PathBuf> {
        let export = self.shell.export(&self.config.export_base_name, date);
        let export = self.report(export)?;
        let written = export.write_to(&self.config.export_dir);
        let path = self.report(written)?;
        self.notify(
            NotificationLevel::Success,
            format!("Exported {} row(s) to {}", export.rows, path.display()),
        );
        Some(path)
    }

    /// Move the focused column one step in the column order.
    pub fn move_focused_column(&mut self, delta: isize) {
        let Some(column_id) = self.focused_column().map(|c| c.id.clone()) else {
            return;
        };
        let order = self.table().column_order();
        let Some(index) = order.iter().position(|id| *id == column_id) else {
            return;
        };
        let target = step(index, delta, order.len());
        if target == index {
            return;
        }
        let moved = self.shell.table_mut().move_column(&column_id, target);
        if let Some(announcement) = self.report(moved) {
            self.notify(NotificationLevel::Info, announcement);
            if let Some(pos) = self
                .table()
                .visible_accessor_columns()
                .iter()
                .position(|c| c.id == column_id)
            {
                self.column_cursor = pos;
            }
        }
    }

    // ------------------------------------------------------------------------
    // Popovers
    // ------------------------------------------------------------------------

    /// Open the filter of the focused control or, from the table, of the
    /// focused column.
    pub fn open_filter(&mut self) {
        let column_id = match self.focus {
            Focus::FilterBar => self.focused_control().map(|c| c.column_id().to_string()),
            Focus::Table => self.focused_column().map(|c| c.id.clone()),
        };
        if let Some(column_id) = column_id {
            self.open_filter_for(&column_id);
        }
    }

    pub fn open_filter_for(&mut self, column_id: &str) {
        match self.shell.filter_bar().control(column_id) {
            Some(control) => {
                let editor = FilterEditor::open(control, self.shell.table().locale());
                self.popover = Some(Popover::Filter(editor));
            }
            None => self.notify(
                NotificationLevel::Warning,
                format!("Column '{column_id}' has no filter"),
            ),
        }
    }

    /// Open the first visible text filter.
    pub fn open_search(&mut self) {
        let column_id = self
            .shell
            .filter_bar()
            .visible_controls(self.table())
            .iter()
            .find(|c| c.kind() == FilterKind::Text)
            .map(|c| c.column_id().to_string());
        if let Some(column_id) = column_id {
            self.open_filter_for(&column_id);
        }
    }

    pub fn open_view_options(&mut self) {
        self.popover = Some(Popover::ViewOptions { cursor: 0 });
    }

    pub fn open_row_actions(&mut self) {
        if !self.table().options().enable_row_actions {
            return;
        }
        if let Some(row) = self.focused_row() {
            self.popover = Some(Popover::RowActions { row, cursor: 0 });
        }
    }

    pub fn open_help(&mut self) {
        self.popover = Some(Popover::Help);
    }

    pub fn is_typing(&self) -> bool {
        matches!(&self.popover, Some(Popover::Filter(editor)) if editor.is_typing())
    }

    /// Route a key to the open popover.
    pub fn handle_popover_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(popover) = self.popover.take() else {
            return;
        };
        self.popover = match popover {
            Popover::Filter(editor) => self.filter_key(editor, key, now).map(Popover::Filter),
            Popover::ViewOptions { cursor } => self.view_options_key(cursor, key),
            Popover::RowActions { row, cursor } => self.row_actions_key(row, cursor, key),
            Popover::Help => match map_menu_key(key, false) {
                Some(_) => None,
                None => Some(Popover::Help),
            },
        };
        self.clamp_cursors();
    }

    fn filter_key(
        &mut self,
        mut editor: FilterEditor,
        key: KeyEvent,
        now: Instant,
    ) -> Option<FilterEditor> {
        let column_id = editor.column_id.clone();
        let Some(action) = map_menu_key(key, editor.is_typing()) else {
            if let Some((index, input)) = editor.focused_input() {
                input.input(key);
                let text = input_text(input);
                let (_, bar) = self.shell.parts_mut();
                let result = match editor.kind {
                    FilterKind::Text => bar.type_text(&column_id, &text, now),
                    _ => bar.set_operand(&column_id, index, &text),
                };
                self.report(result);
            }
            return Some(editor);
        };

        let option_count = self
            .shell
            .filter_bar()
            .control(&column_id)
            .map_or(0, |c| c.options().len());
        match action {
            MenuAction::Up => editor.cursor = editor.cursor.saturating_sub(1),
            MenuAction::Down => {
                let rows = match editor.kind {
                    FilterKind::Text => 1,
                    FilterKind::Number => self.number_rows(&column_id),
                    FilterKind::Select | FilterKind::Checkbox => option_count,
                };
                editor.cursor = step(editor.cursor, 1, rows);
            }
            MenuAction::Left | MenuAction::Right if editor.kind == FilterKind::Number => {
                let forward = action == MenuAction::Right;
                self.cycle_condition(&mut editor, forward);
            }
            MenuAction::Left | MenuAction::Right => {}
            MenuAction::Toggle => self.toggle_option(&editor),
            MenuAction::Apply => {
                if editor.kind == FilterKind::Text {
                    return None;
                }
                if editor.kind == FilterKind::Select {
                    self.choose_under_cursor(&editor);
                }
                let applied = self.shell.apply_filter(&column_id);
                self.report(applied);
                return None;
            }
            MenuAction::Dismiss => {
                if editor.kind != FilterKind::Text {
                    let dismissed = self.shell.dismiss_filter(&column_id);
                    self.report(dismissed);
                }
                return None;
            }
            MenuAction::Reset => {
                let reset = self.shell.reset_filter(&column_id);
                self.report(reset);
                return None;
            }
        }
        Some(editor)
    }

    /// Condition row plus one or two operand rows.
    fn number_rows(&self, column_id: &str) -> usize {
        match self.shell.filter_bar().control(column_id).map(|c| c.draft()) {
            Some(Draft::Number(filter)) => match filter.condition {
                None => 1,
                Some(condition) if condition.uses_second_operand() => 3,
                Some(_) => 2,
            },
            _ => 1,
        }
    }

    fn cycle_condition(&mut self, editor: &mut FilterEditor, forward: bool) {
        if editor.cursor != 0 {
            return;
        }
        let current = match self.shell.filter_bar().control(&editor.column_id).map(|c| c.draft()) {
            Some(Draft::Number(filter)) => filter.condition,
            _ => return,
        };
        let choices: Vec<Option<Condition>> = std::iter::once(None)
            .chain(Condition::all().iter().copied().map(Some))
            .collect();
        let index = choices.iter().position(|c| *c == current).unwrap_or(0);
        let next = if forward {
            (index + 1) % choices.len()
        } else {
            (index + choices.len() - 1) % choices.len()
        };
        let (_, bar) = self.shell.parts_mut();
        let result = bar.set_condition(&editor.column_id, choices[next]);
        if self.report(result).is_some() {
            if let Some(Draft::Number(filter)) =
                self.shell.filter_bar().control(&editor.column_id).map(|c| c.draft())
            {
                editor.inputs = operand_inputs(filter, self.shell.table().locale());
            }
        }
    }

    fn toggle_option(&mut self, editor: &FilterEditor) {
        match editor.kind {
            FilterKind::Checkbox => {
                let Some(value) = self.option_at(&editor.column_id, editor.cursor) else {
                    return;
                };
                let (_, bar) = self.shell.parts_mut();
                let result = bar.toggle_option(&editor.column_id, &value);
                self.report(result);
            }
            FilterKind::Select => {
                let chosen = match self.shell.filter_bar().control(&editor.column_id).map(|c| c.draft()) {
                    Some(Draft::Select(chosen)) => chosen.clone(),
                    _ => None,
                };
                let value = self.option_at(&editor.column_id, editor.cursor);
                let next = if chosen == value { None } else { value };
                let (_, bar) = self.shell.parts_mut();
                let result = bar.choose(&editor.column_id, next.as_deref());
                self.report(result);
            }
            FilterKind::Text | FilterKind::Number => {}
        }
    }

    fn choose_under_cursor(&mut self, editor: &FilterEditor) {
        let Some(value) = self.option_at(&editor.column_id, editor.cursor) else {
            return;
        };
        let (_, bar) = self.shell.parts_mut();
        let result = bar.choose(&editor.column_id, Some(&value));
        self.report(result);
    }

    fn option_at(&self, column_id: &str, index: usize) -> Option<String> {
        self.shell
            .filter_bar()
            .control(column_id)
            .and_then(|c| c.options().get(index))
            .map(|o| o.value.clone())
    }

    /// Data columns in display order, hidden ones included.
    pub fn view_option_columns(&self) -> Vec<&ColumnDef> {
        self.table()
            .ordered_columns()
            .into_iter()
            .filter(|c| c.is_accessor())
            .collect()
    }

    fn view_options_key(&mut self, cursor: usize, key: KeyEvent) -> Option<Popover> {
        let columns: Vec<String> = self
            .view_option_columns()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let mut cursor = step(cursor, 0, columns.len());
        match map_menu_key(key, false) {
            None => {}
            Some(MenuAction::Up) => cursor = step(cursor, -1, columns.len()),
            Some(MenuAction::Down) => cursor = step(cursor, 1, columns.len()),
            Some(MenuAction::Toggle) | Some(MenuAction::Apply) => {
                if let Some(column_id) = columns.get(cursor) {
                    let result = self.shell.table_mut().toggle_column_visibility(column_id);
                    self.report(result);
                }
            }
            Some(action @ (MenuAction::Left | MenuAction::Right)) => {
                let delta = if action == MenuAction::Left { -1 } else { 1 };
                let target = step(cursor, delta, columns.len());
                if let Some(column_id) = columns.get(cursor).filter(|_| target != cursor) {
                    let moved = self.shell.table_mut().move_column(column_id, target);
                    if let Some(announcement) = self.report(moved) {
                        self.notify(NotificationLevel::Info, announcement);
                        cursor = target;
                    }
                }
            }
            Some(MenuAction::Reset) => self.shell.table_mut().reset_column_order(),
            Some(MenuAction::Dismiss) => return None,
        }
        Some(Popover::ViewOptions { cursor })
    }

    fn row_actions_key(&mut self, row: RowId, cursor: usize, key: KeyEvent) -> Option<Popover> {
        let actions = RowAction::all();
        match map_menu_key(key, false) {
            Some(MenuAction::Up) => Some(Popover::RowActions {
                row,
                cursor: step(cursor, -1, actions.len()),
            }),
            Some(MenuAction::Down) => Some(Popover::RowActions {
                row,
                cursor: step(cursor, 1, actions.len()),
            }),
            Some(MenuAction::Toggle) | Some(MenuAction::Apply) => {
                let action = actions[step(cursor, 0, actions.len())];
                let event = self.shell.row_action(row, action);
                if let Some(event) = self.report(event) {
                    let label = event.action.label(self.table().locale()).to_string();
                    self.notify(
                        NotificationLevel::Info,
                        format!("{label} requested for row {}", event.row),
                    );
                }
                None
            }
            Some(MenuAction::Dismiss) => None,
            _ => Some(Popover::RowActions { row, cursor }),
        }
    }
}
