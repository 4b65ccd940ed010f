//! Bottom navigation bar showing the keys that work on the current screen.

use super::keybindings::NavBarItem;
use crate::theme::{Styles, ThemePair};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    /// Spans for the bar: ` KEY  label ` pairs separated by gaps.
    pub fn spans(&self, pair: ThemePair) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(self.items.len() * 3);
        for item in &self.items {
            spans.push(Span::styled(
                format!(" {} ", item.key_display),
                Styles::nav_key(pair),
            ));
            spans.push(Span::styled(
                format!(" {}", item.action_label),
                Styles::nav_label(pair),
            ));
            spans.push(Span::styled("  ", Styles::nav_label(pair)));
        }
        spans
    }

    pub fn render(&self, f: &mut Frame, area: Rect, pair: ThemePair) {
        if area.height == 0 {
            return;
        }
        let bar = Paragraph::new(Line::from(self.spans(pair))).style(Styles::base(pair));
        f.render_widget(bar, area);
    }
}
