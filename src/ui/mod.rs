//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Progress gauge, nav bar and help overlay
//! - `landing` - Entry page shown before the questionnaire
//! - `screens` - Question and summary screens

mod header;
mod landing;
pub mod screens;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Paragraph},
};

/// UI renderer for the application
///
/// Paints the active theme over the whole frame, then delegates to the
/// screen for the current mode.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI for `state`
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let pair = state.theme();
        f.render_widget(Block::default().style(Styles::base(pair)), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Progress gauge
                Constraint::Min(1),    // Main content area
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        match state.mode {
            AppMode::Landing => landing::render_landing(f, chunks[1], pair),
            AppMode::Wizard => {
                header::render_progress(f, chunks[0], &state.wizard);
                if state.wizard.step().is_terminal() {
                    screens::render_summary_screen(f, chunks[1], &state.wizard);
                } else {
                    screens::render_question_screen(f, chunks[1], state);
                }
            }
        }

        if !state.status_message.is_empty() {
            let status = Paragraph::new(format!(" {}", state.status_message))
                .style(Styles::pending(pair));
            f.render_widget(status, chunks[2]);
        }

        header::render_nav_bar(f, state, keybinding_ctx, chunks[3]);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
