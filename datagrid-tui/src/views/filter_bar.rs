//! Filter bar view: one chip per visible filter control plus the toolbar.

use crate::nav::Focus;
use crate::state::App;
use crate::theme::filter_chip_color;
use crate::widgets::{Chip, FilterChips};
use ratatui::{layout::Rect, style::Style, Frame};

pub fn chips(app: &App) -> Vec<Chip> {
    let table = app.table();
    let bar = app.shell.filter_bar();
    let focused = app.focus == Focus::FilterBar;
    bar.visible_controls(table)
        .iter()
        .enumerate()
        .map(|(i, control)| Chip {
            title: control.title().to_string(),
            label: bar.chip_label(table, control.column_id()),
            focused: focused && i == app.filter_cursor,
        })
        .collect()
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let table = app.table();
    let locale = table.locale();
    let chips = chips(app);

    let mut actions = Vec::with_capacity(3);
    if app.shell.is_filtered() {
        actions.push(format!("c {}", locale.clear_filters));
    }
    actions.push(format!("v {}", locale.view));
    actions.push(format!("x {}", locale.export));

    let title = match table.options().table_name.as_deref() {
        Some(name) => format!("DATAGRID | {name}"),
        None => "DATAGRID".to_string(),
    };
    let widget = FilterChips {
        title: &title,
        chips: &chips,
        actions,
        active_style: Style::default().fg(filter_chip_color(true, &app.theme)),
        inactive_style: Style::default().fg(filter_chip_color(false, &app.theme)),
        border_style: Style::default()
            .fg(app.theme.border_color(app.focus == Focus::FilterBar)),
    };
    widget.render(f, area);
}
