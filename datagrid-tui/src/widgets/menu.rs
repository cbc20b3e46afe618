//! Popover menu widget.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::block::{Position, Title},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    /// Leading marker such as `[x]` or `( )`.
    pub marker: Option<&'static str>,
    pub style: Style,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            marker: None,
            style: Style::default(),
        }
    }

    pub fn with_marker(mut self, marker: &'static str) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

pub struct Menu<'a> {
    pub title: &'a str,
    pub items: Vec<MenuItem>,
    pub selected: Option<usize>,
    pub border_style: Style,
    pub highlight_style: Style,
    /// Hint line under the items.
    pub footer: Option<String>,
}

impl<'a> Menu<'a> {
    pub fn new(title: &'a str, items: Vec<MenuItem>) -> Self {
        Self {
            title,
            items,
            selected: None,
            border_style: Style::default(),
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            footer: None,
        }
    }

    pub fn with_selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_styles(mut self, border: Style, highlight: Style) -> Self {
        self.border_style = border;
        self.highlight_style = highlight;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn render(self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.border_style);
        let block = match &self.footer {
            Some(footer) => block.title(Title::from(footer.as_str()).position(Position::Bottom)),
            None => block,
        };

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let mut spans = Vec::with_capacity(2);
                if let Some(marker) = item.marker {
                    spans.push(Span::raw(format!("{marker} ")));
                }
                spans.push(Span::styled(item.label.clone(), item.style));
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut state = ListState::default();
        state.select(self.selected);
        let list = List::new(items)
            .block(block)
            .highlight_style(self.highlight_style);

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }
}
