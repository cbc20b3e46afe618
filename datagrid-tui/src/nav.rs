//! Focus areas of the table screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    FilterBar,
    #[default]
    Table,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::FilterBar => "Filters",
            Focus::Table => "Table",
        }
    }

    pub fn all() -> &'static [Focus] {
        &[Focus::FilterBar, Focus::Table]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Focus {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Focus {
        let all = Self::all();
        let idx = self.index();
        all[if idx == 0 { all.len() - 1 } else { idx - 1 }]
    }
}

/// Move a cursor by `delta` within `0..len`, clamping at both ends.
pub fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}
