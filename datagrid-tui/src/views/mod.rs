//! View rendering dispatch.

pub mod filter_bar;
pub mod helpers;
pub mod pagination;
pub mod popover;
pub mod table;

pub use helpers::centered_rect;

use crate::state::App;
use crate::theme::{notification_color, selection_color};
use crate::widgets::CommandBar;
use chrono::{Duration, Utc};
use datagrid_core::{bulk, BulkAction};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// How long a notification stays in the footer.
const NOTIFICATION_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Area {
    FilterBar,
    Pagination,
    Table,
    BulkBar,
    Footer,
}

/// Top-to-bottom areas of the screen for the current table state.
fn areas(app: &App) -> Vec<(Area, Constraint)> {
    let options = app.table().options();
    let mut areas = vec![(Area::FilterBar, Constraint::Length(3))];
    if options.enable_pagination && options.pagination_display_top {
        areas.push((Area::Pagination, Constraint::Length(3)));
    }
    areas.push((Area::Table, Constraint::Min(3)));
    if bulk::is_open(app.table()) {
        areas.push((Area::BulkBar, Constraint::Length(3)));
    }
    if options.enable_pagination && !options.pagination_display_top {
        areas.push((Area::Pagination, Constraint::Length(3)));
    }
    areas.push((Area::Footer, Constraint::Length(3)));
    areas
}

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let full = f.size();
    let areas = areas(app);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(areas.iter().map(|(_, c)| *c))
        .split(full);

    for ((area, _), rect) in areas.iter().zip(layout.iter()) {
        match area {
            Area::FilterBar => filter_bar::render(f, app, *rect),
            Area::Pagination => pagination::render(f, app, *rect),
            Area::Table => table::render(f, app, *rect),
            Area::BulkBar => render_bulk_bar(f, app, *rect),
            Area::Footer => render_footer(f, app, *rect),
        }
    }

    popover::render(f, app, full);
}

fn render_bulk_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let table = app.table();
    let bar = CommandBar {
        summary: bulk::summary(table),
        commands: BulkAction::all()
            .iter()
            .map(|action| (action.shortcut(), action.label(table.locale()).to_string()))
            .collect(),
        style: Style::default().fg(selection_color(app.shell.phase(), &app.theme)),
        key_style: Style::default().fg(app.theme.primary),
    };
    bar.render(f, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = "? help • tab focus • f filter • s sort • space select • v view • x export • q quit";
    let ttl = Duration::seconds(NOTIFICATION_TTL_SECS);
    let (text, style) = match app.notifications.last() {
        Some(note) if !note.is_expired(Utc::now(), ttl) => (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        _ => (help.to_string(), Style::default().fg(app.theme.text_dim)),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(app.focus.title()))
        .style(style);
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TuiConfig;
    use datagrid_core::{TableOptions, TableShell};
    use datagrid_test_utils::fixtures::usage_table;
    use ratatui::{backend::TestBackend, Terminal};

    fn app(options: TableOptions) -> App {
        let config = TuiConfig::from_toml(
            r#"
language = "en"
tick_rate_ms = 50
data_path = "rows.json"
export_dir = "exports"
export_base_name = "usage"
state_dir = "state"
log_path = "tui.log"
theme = { name = "synthbrute" }
table = { page_size = 5, enable_row_selection = true, enable_row_actions = false, enable_pagination = true, pagination_display_top = false, persist_column_order = false }
columns = [{ id = "owner", title = "Owner" }]
"#,
        )
        .unwrap();
        App::new(config, TableShell::new(usage_table(options)))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_view(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_bulk_bar_only_with_selection() {
        let mut app = app(TableOptions {
            page_size: 5,
            ..TableOptions::default()
        });
        assert!(!areas(&app).iter().any(|(a, _)| *a == Area::BulkBar));
        assert!(!screen(&app).contains("selected │"));

        app.toggle_row();
        assert!(areas(&app).iter().any(|(a, _)| *a == Area::BulkBar));
        assert!(screen(&app).contains("1 selected"));
    }

    #[test]
    fn test_pagination_position() {
        let app = app(TableOptions {
            pagination_display_top: true,
            ..TableOptions::default()
        });
        let kinds: Vec<Area> = areas(&app).into_iter().map(|(a, _)| a).collect();
        assert_eq!(
            kinds,
            [Area::FilterBar, Area::Pagination, Area::Table, Area::Footer]
        );
    }

    #[test]
    fn test_renders_rows_and_window() {
        let app = app(TableOptions {
            page_size: 5,
            ..TableOptions::default()
        });
        let screen = screen(&app);
        assert!(screen.contains("Ana Souza"));
        assert!(screen.contains("$4,523.11"));
        assert!(screen.contains("Showing 1-5 of 12"));
        assert!(!screen.contains("Isabela Martins"));
    }
}
