//! Pagination footer view.

use crate::state::App;
use crate::theme::selection_color;
use datagrid_core::{DataTable, PageNav, Record};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// "Showing 1-20 of 57".
pub fn window_label(table: &DataTable<Record>) -> String {
    let locale = table.locale();
    let window = table.page_window();
    format!(
        "{} {}-{} {} {}",
        locale.showing, window.first, window.last, locale.of, window.total
    )
}

/// "2 of 57 row(s) selected.", counted against the filtered rows.
pub fn selection_label(table: &DataTable<Record>) -> String {
    let locale = table.locale();
    let selected = table.selection().count_in(table.filtered_rows());
    format!(
        "{} {} {} {}",
        selected,
        locale.of,
        table.filtered_len(),
        locale.rows_selected
    )
}

fn nav_button(nav: PageNav) -> &'static str {
    match nav {
        PageNav::First => "« g",
        PageNav::Previous => "‹ [",
        PageNav::Next => "] ›",
        PageNav::Last => "G »",
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let table = app.table();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(24),
            Constraint::Length(22),
        ])
        .split(inner);

    if table.options().enable_row_selection {
        let label = Span::styled(
            selection_label(table),
            Style::default().fg(selection_color(app.shell.phase(), &app.theme)),
        );
        f.render_widget(Paragraph::new(Line::from(label)), chunks[0]);
    }

    f.render_widget(
        Paragraph::new(window_label(table))
            .style(Style::default().fg(app.theme.text))
            .alignment(Alignment::Right),
        chunks[1],
    );

    let spans: Vec<Span> = PageNav::all()
        .iter()
        .map(|nav| {
            let color = if table.can_navigate(*nav) {
                app.theme.primary
            } else {
                app.theme.text_muted
            };
            Span::styled(format!(" {} ", nav_button(*nav)), Style::default().fg(color))
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagrid_core::TableOptions;
    use datagrid_test_utils::fixtures::usage_table;

    #[test]
    fn test_labels() {
        let mut table = usage_table(TableOptions {
            page_size: 5,
            ..TableOptions::default()
        });
        assert_eq!(window_label(&table), "Showing 1-5 of 12");
        table.navigate(PageNav::Last);
        assert_eq!(window_label(&table), "Showing 11-12 of 12");

        table.toggle_page_selection();
        assert_eq!(selection_label(&table), "2 of 12 row(s) selected.");
    }
}
