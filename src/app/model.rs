use crate::visualizer::ThemeMode;

/// The main application model.
///
/// The engine owns the playlist; the UI only keeps a selection cursor
/// against the snapshot's row count, so every movement takes the current
/// length as a parameter.
pub struct App {
    pub selected: usize,
    pub show_help: bool,
    pub theme: ThemeMode,
}

impl App {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            selected: 0,
            show_help: false,
            theme,
        }
    }

    /// Move the selection down one row, wrapping at the end.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move the selection up one row, wrapping at the start.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + len - 1) % len;
    }

    /// Pull the selection back into range after the playlist shrank.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }
}
