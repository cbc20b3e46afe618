//! Popovers: filter editors, view options, row actions and help.

use crate::state::{App, FilterEditor, Popover};
use crate::theme::row_action_color;
use crate::views::helpers::centered_rect;
use crate::widgets::{Menu, MenuItem};
use datagrid_core::{Draft, FilterKind, RowAction, RowId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const POPOVER_WIDTH: u16 = 48;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    match &app.popover {
        Some(Popover::Filter(editor)) => render_filter(f, app, editor, area),
        Some(Popover::ViewOptions { cursor }) => render_view_options(f, app, *cursor, area),
        Some(Popover::RowActions { row, cursor }) => render_row_actions(f, app, *row, *cursor, area),
        Some(Popover::Help) => render_help(f, app, area),
        None => {}
    }
}

fn menu_styles(app: &App) -> (Style, Style) {
    (
        Style::default().fg(app.theme.border_focus),
        Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
    )
}

fn hint(app: &App) -> String {
    let locale = app.table().locale();
    format!("enter {} · r {} · esc", locale.apply, locale.reset)
}

fn render_filter(f: &mut Frame<'_>, app: &App, editor: &FilterEditor, area: Rect) {
    let Some(control) = app.shell.filter_bar().control(&editor.column_id) else {
        return;
    };
    let locale = app.table().locale();
    let title = locale.filter_by(control.title());
    let (border, highlight) = menu_styles(app);

    match (editor.kind, control.draft()) {
        (FilterKind::Text, _) => {
            let rect = centered_rect(POPOVER_WIDTH, 3, area);
            let block = Block::default()
                .title(control.title())
                .borders(Borders::ALL)
                .border_style(border);
            let inner = block.inner(rect);
            f.render_widget(Clear, rect);
            f.render_widget(block, rect);
            if let Some(input) = editor.inputs.first() {
                f.render_widget(input, inner);
            }
        }
        (FilterKind::Select, Draft::Select(chosen)) => {
            let items = control
                .options()
                .iter()
                .map(|o| {
                    let marker = if chosen.as_deref() == Some(o.value.as_str()) { "(•)" } else { "( )" };
                    MenuItem::new(&o.label).with_marker(marker)
                })
                .collect();
            let rect = centered_rect(POPOVER_WIDTH, control.options().len() as u16 + 2, area);
            Menu::new(&title, items)
                .with_selected(Some(editor.cursor))
                .with_styles(border, highlight)
                .with_footer(hint(app))
                .render(f, rect);
        }
        (FilterKind::Checkbox, Draft::Checkbox(values)) => {
            let items = control
                .options()
                .iter()
                .map(|o| {
                    let marker = if values.contains(&o.value) { "[x]" } else { "[ ]" };
                    MenuItem::new(&o.label).with_marker(marker)
                })
                .collect();
            let rect = centered_rect(POPOVER_WIDTH, control.options().len() as u16 + 2, area);
            Menu::new(&title, items)
                .with_selected(Some(editor.cursor))
                .with_styles(border, highlight)
                .with_footer(format!("space toggle · {}", hint(app)))
                .render(f, rect);
        }
        (FilterKind::Number, Draft::Number(filter)) => {
            let operand_rows = match filter.condition {
                None => 0,
                Some(c) if c.uses_second_operand() => 2,
                Some(_) => 1,
            };
            let rect = centered_rect(POPOVER_WIDTH, 3 + operand_rows * 3 + 1, area);
            let block = Block::default()
                .title(title.as_str())
                .borders(Borders::ALL)
                .border_style(border);
            let inner = block.inner(rect);
            f.render_widget(Clear, rect);
            f.render_widget(block, rect);

            let mut constraints = vec![Constraint::Length(1)];
            constraints.extend((0..operand_rows).map(|_| Constraint::Length(3)));
            constraints.push(Constraint::Min(0));
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(inner);

            let condition = filter
                .condition
                .map_or(locale.select_condition_placeholder, |c| c.label(locale));
            let style = if editor.cursor == 0 { highlight } else { Style::default() };
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(format!("‹ {condition} ›"), style))),
                rows[0],
            );

            for (index, input) in editor.inputs.iter().take(operand_rows as usize).enumerate() {
                let title = if index == 0 { "" } else { locale.range_and };
                let focused = editor.cursor == index + 1;
                let field = Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(if focused { border } else { Style::default().fg(app.theme.border) });
                let field_inner = field.inner(rows[index + 1]);
                f.render_widget(field, rows[index + 1]);
                f.render_widget(input, field_inner);
            }

            f.render_widget(
                Paragraph::new(hint(app)).style(Style::default().fg(app.theme.text_dim)),
                rows[rows.len() - 1],
            );
        }
        _ => {}
    }
}

fn render_view_options(f: &mut Frame<'_>, app: &App, cursor: usize, area: Rect) {
    let table = app.table();
    let locale = table.locale();
    let items: Vec<MenuItem> = app
        .view_option_columns()
        .iter()
        .map(|c| {
            let marker = if table.is_column_visible(&c.id) { "[x]" } else { "[ ]" };
            let item = MenuItem::new(&c.display_name).with_marker(marker);
            if c.enable_hiding {
                item
            } else {
                item.with_style(Style::default().fg(app.theme.text_dim))
            }
        })
        .collect();
    let (border, highlight) = menu_styles(app);
    let rect = centered_rect(POPOVER_WIDTH, items.len() as u16 + 2, area);
    let reorder = app
        .view_option_columns()
        .get(cursor)
        .map(|c| locale.reorder_column(&c.display_name))
        .unwrap_or_default();
    Menu::new(locale.display_properties, items)
        .with_selected(Some(cursor))
        .with_styles(border, highlight)
        .with_footer(format!("space toggle · ←/→ {reorder} · r {}", locale.reset))
        .render(f, rect);
}

fn render_row_actions(f: &mut Frame<'_>, app: &App, row: RowId, cursor: usize, area: Rect) {
    let locale = app.table().locale();
    let items: Vec<MenuItem> = RowAction::all()
        .iter()
        .map(|action| {
            MenuItem::new(action.label(locale))
                .with_style(Style::default().fg(row_action_color(*action, &app.theme)))
        })
        .collect();
    let (border, highlight) = menu_styles(app);
    let rect = centered_rect(24, items.len() as u16 + 2, area);
    let title = format!("#{row}");
    Menu::new(&title, items)
        .with_selected(Some(cursor))
        .with_styles(border, highlight)
        .render(f, rect);
}

const HELP: &[(&str, &str)] = &[
    ("↑/↓ j/k", "move row"),
    ("←/→ h/l", "move column or filter"),
    ("tab", "switch table / filters"),
    ("enter f", "open filter"),
    ("/", "search"),
    ("s", "sort column"),
    ("space / a", "select row / page"),
    ("g [ ] G", "first / previous / next / last page"),
    ("< > ctrl+←/→", "move column"),
    ("v", "view options"),
    ("r", "row actions"),
    ("e d esc", "bulk edit / delete / reset"),
    ("c", "clear filters"),
    ("x", "export CSV"),
    ("q", "quit"),
];

fn render_help(f: &mut Frame<'_>, app: &App, area: Rect) {
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:>14}  "), Style::default().fg(app.theme.primary)),
                Span::raw(*what),
            ])
        })
        .collect();
    let rect = centered_rect(60, HELP.len() as u16 + 2, area);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title("Keybindings")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border_focus)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(widget, rect);
}
