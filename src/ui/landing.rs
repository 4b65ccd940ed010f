//! Landing page: name, tagline and the start button.

use crate::theme::{Styles, ThemePair, UiText};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn render_landing(f: &mut Frame, area: Rect, pair: ThemePair) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2), // Name
            Constraint::Length(3), // Tagline
            Constraint::Length(1), // Start button
            Constraint::Fill(1),
        ])
        .split(area);

    let name = Paragraph::new(UiText::APP_NAME.to_uppercase())
        .style(Styles::title(pair))
        .alignment(Alignment::Center);
    f.render_widget(name, chunks[1]);

    let tagline = Paragraph::new(UiText::TAGLINE)
        .style(Styles::base(pair))
        .alignment(Alignment::Center);
    f.render_widget(tagline, chunks[2]);

    let start = Paragraph::new(Line::from(Span::styled(UiText::START, Styles::button(pair))))
        .alignment(Alignment::Center);
    f.render_widget(start, chunks[3]);
}
