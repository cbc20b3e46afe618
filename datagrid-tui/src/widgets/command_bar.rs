//! Bulk-edit command bar.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct CommandBar {
    /// "<n> selected".
    pub summary: String,
    /// `(shortcut, label)` pairs.
    pub commands: Vec<(&'static str, String)>,
    pub style: Style,
    pub key_style: Style,
}

impl CommandBar {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::styled(format!(" {} ", self.summary), self.style), Span::raw("│")];
        for (shortcut, label) in &self.commands {
            spans.push(Span::raw(format!(" {label} ")));
            spans.push(Span::styled(format!("[{shortcut}]"), self.key_style));
            spans.push(Span::raw(" "));
        }
        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).border_style(self.style));
        f.render_widget(paragraph, area);
    }
}
