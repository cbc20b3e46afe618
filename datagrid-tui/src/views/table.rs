//! Table body view.

use crate::nav::Focus;
use crate::state::App;
use crate::theme::{sort_glyph, text_alignment};
use datagrid_core::{ColumnDef, ColumnKind, DisplayColumn, HeaderCheckState, RowId};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Minimum width of a data column.
const MIN_COLUMN_WIDTH: u16 = 8;

pub fn header_check_glyph(state: HeaderCheckState) -> &'static str {
    match state {
        HeaderCheckState::Checked => "[x]",
        HeaderCheckState::Indeterminate => "[-]",
        HeaderCheckState::Unchecked => "[ ]",
    }
}

fn header_cell<'a>(app: &App, column: &ColumnDef, focused: bool) -> Cell<'a> {
    let table = app.table();
    let text = match column.kind {
        ColumnKind::Display(DisplayColumn::Select) => {
            header_check_glyph(table.header_check_state()).to_string()
        }
        ColumnKind::Display(DisplayColumn::Actions) => String::new(),
        ColumnKind::Accessor => {
            let direction = table
                .sort()
                .filter(|s| s.column_id == column.id)
                .map(|s| s.direction);
            let glyph = sort_glyph(direction);
            if glyph.is_empty() {
                column.header.title.clone()
            } else {
                format!("{} {}", column.header.title, glyph)
            }
        }
    };
    let mut style = Style::default()
        .fg(app.theme.primary)
        .add_modifier(Modifier::BOLD);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Cell::from(Line::from(text).alignment(text_alignment(column.align))).style(style)
}

fn body_cell<'a>(app: &App, row: RowId, column: &ColumnDef) -> Cell<'a> {
    let table = app.table();
    let text = match column.kind {
        ColumnKind::Display(DisplayColumn::Select) => {
            if table.is_row_selected(row) { "[x]" } else { "[ ]" }.to_string()
        }
        ColumnKind::Display(DisplayColumn::Actions) => "…".to_string(),
        ColumnKind::Accessor => table.render_cell(row, column),
    };
    Cell::from(Line::from(text).alignment(text_alignment(column.align)))
}

fn width(column: &ColumnDef) -> Constraint {
    match column.kind {
        ColumnKind::Display(_) => Constraint::Length(3),
        ColumnKind::Accessor => Constraint::Min(MIN_COLUMN_WIDTH),
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let table = app.table();
    let focused = app.focus == Focus::Table;
    let focused_column = app.focused_column().map(|c| c.id.as_str());
    let columns = table.visible_columns();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_color(focused)));

    if table.page_rows().is_empty() {
        let empty = Paragraph::new(table.locale().no_results)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        columns
            .iter()
            .map(|c| header_cell(app, c, focused && Some(c.id.as_str()) == focused_column)),
    );

    let rows: Vec<Row> = table
        .page_rows()
        .iter()
        .map(|id| {
            let row = Row::new(columns.iter().map(|c| body_cell(app, *id, c)));
            if table.is_row_selected(*id) {
                row.style(Style::default().fg(app.theme.tertiary))
            } else {
                row.style(Style::default().fg(app.theme.text))
            }
        })
        .collect();

    let widths: Vec<Constraint> = columns.iter().copied().map(width).collect();
    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(app.theme.bg_highlight))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if focused {
        state.select(Some(app.row_cursor));
    }
    f.render_stateful_widget(widget, area, &mut state);
}
