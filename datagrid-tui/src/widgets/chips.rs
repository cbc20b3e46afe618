//! Filter chip row.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One filter control as shown on the bar.
#[derive(Debug, Clone)]
pub struct Chip {
    pub title: String,
    /// Applied or drafted value; `None` shows the title alone.
    pub label: Option<String>,
    pub focused: bool,
}

impl Chip {
    pub fn text(&self) -> String {
        match &self.label {
            Some(label) => format!(" {}: {} ", self.title, label),
            None => format!(" + {} ", self.title),
        }
    }
}

pub struct FilterChips<'a> {
    pub title: &'a str,
    pub chips: &'a [Chip],
    /// Trailing toolbar entries such as "c Clear filters".
    pub actions: Vec<String>,
    pub active_style: Style,
    pub inactive_style: Style,
    pub border_style: Style,
}

impl<'a> FilterChips<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::with_capacity(self.chips.len() * 2 + self.actions.len());
        for chip in self.chips {
            let mut style = if chip.label.is_some() {
                self.active_style
            } else {
                self.inactive_style
            };
            if chip.focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(chip.text(), style));
            spans.push(Span::raw(" "));
        }
        for action in &self.actions {
            spans.push(Span::styled(format!(" [{action}]"), self.inactive_style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
