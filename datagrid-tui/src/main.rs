//! DATAGRID TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datagrid_core::export_date;
use datagrid_tui::config::TuiConfig;
use datagrid_tui::error::TuiError;
use datagrid_tui::events::TuiEvent;
use datagrid_tui::keys::{map_key, Action};
use datagrid_tui::state::App;
use datagrid_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    datagrid_tui::logging::init(&config.log_path)?;
    let mut app = App::from_config(config)?;
    tracing::info!(
        rows = app.table().total_rows(),
        columns = app.table().column_order().len(),
        "Table loaded"
    );

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                let _ = event_tx.send(TuiEvent::Tick).await;
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event) {
                    break;
                }
            }
        }
    }

    tracing::info!(commands = app.issued.len(), "Exiting");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

/// Returns `true` when the app should exit.
fn handle_event(app: &mut App, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Input(key) => {
            if app.popover.is_some() {
                app.handle_popover_key(key, Instant::now());
            } else if let Some(action) = map_key(key) {
                return handle_action(app, action);
            }
        }
        TuiEvent::Tick => app.tick(Instant::now()),
        TuiEvent::Resize { .. } => {}
    }
    false
}

fn handle_action(app: &mut App, action: Action) -> bool {
    match action {
        Action::Quit => return true,
        Action::NextFocus => app.cycle_focus(true),
        Action::PrevFocus => app.cycle_focus(false),
        Action::MoveUp => app.move_vertical(-1),
        Action::MoveDown => app.move_vertical(1),
        Action::MoveLeft => app.move_horizontal(-1),
        Action::MoveRight => app.move_horizontal(1),
        Action::ToggleRow => app.toggle_row(),
        Action::TogglePage => app.toggle_page(),
        Action::Page(nav) => app.navigate(nav),
        Action::Sort => app.toggle_sort(),
        Action::OpenFilter => app.open_filter(),
        Action::Search => app.open_search(),
        Action::ClearFilters => app.clear_filters(),
        Action::Export => {
            app.export(export_date());
        }
        Action::ViewOptions => app.open_view_options(),
        Action::MoveColumnLeft => app.move_focused_column(-1),
        Action::MoveColumnRight => app.move_focused_column(1),
        Action::RowActions => app.open_row_actions(),
        Action::Bulk(bulk) => app.bulk(bulk),
        Action::OpenHelp => app.open_help(),
    }
    false
}
