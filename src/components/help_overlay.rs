//! Help overlay component
//!
//! Displays context-sensitive help in a centered floating window.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::KeyContext;
use crate::theme::Colors;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given context
    pub fn new(context: KeyContext, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(context);
        Self {
            content: Self::build_content(&sections, context),
        }
    }

    fn build_content(sections: &[HelpSection], context: KeyContext) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        let screen = match context {
            KeyContext::Landing => "Welcome",
            KeyContext::Question => "Questionnaire",
            KeyContext::Summary => "Your profile",
        };
        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::OVERLAY_MUTED)),
            Span::styled(screen.to_string(), Style::default().fg(Colors::OVERLAY_FG)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::OVERLAY_KEY)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::OVERLAY_KEY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Style::default().fg(Colors::OVERLAY_FG)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(Colors::OVERLAY_MUTED),
        )]));

        lines
    }

    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Render the help overlay centered in `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(parent, 60, self.content.len() as u16 + 2);
        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .style(
                Style::default()
                    .bg(Colors::OVERLAY_BG)
                    .fg(Colors::OVERLAY_FG),
            );
        let body = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, area);
        f.render_widget(body, area);
    }
}

/// A rect `width_percent` wide and `height` tall, centered in `parent`.
fn centered_rect(parent: Rect, width_percent: u16, height: u16) -> Rect {
    let scaled = (u32::from(parent.width) * u32::from(width_percent) / 100) as u16;
    let width = scaled.clamp(40.min(parent.width), parent.width);
    let height = height.min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_has_content_for_every_context() {
        let ctx = KeybindingContext::new();
        for context in [KeyContext::Landing, KeyContext::Question, KeyContext::Summary] {
            assert!(HelpOverlay::new(context, &ctx).line_count() > 3);
        }
    }

    #[test]
    fn test_centered_rect_fits_parent() {
        let parent = Rect::new(0, 0, 30, 10);
        let area = centered_rect(parent, 60, 40);
        assert!(area.width <= parent.width);
        assert!(area.height <= parent.height);
    }
}
