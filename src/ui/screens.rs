//! Questionnaire screens.
//!
//! - Question screen (steps 1-4): title, option list, Back/Next buttons
//! - Summary screen (step 5): the answers and the pairing outcome
//!
//! The Next button is drawn disabled whenever the wizard would reject an
//! advance, so what looks clickable matches what the key does.

use crate::app::{AppState, Entry};
use crate::theme::{Styles, ThemePair, UiText};
use crate::wizard::{SubmissionState, Wizard, WizardStep};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

// ============================================================================
// Buttons
// ============================================================================

/// Spans for the Back/Next row under a question.
pub fn button_row(wizard: &Wizard, pair: ThemePair) -> Line<'static> {
    // Back on step 1 leaves for the landing page, so it is never disabled
    let back = Styles::button(pair);
    let next = if wizard.can_advance() {
        Styles::button(pair)
    } else {
        Styles::button_disabled()
    };
    Line::from(vec![
        Span::styled(UiText::BTN_BACK, back),
        Span::styled("    ", Styles::base(pair)),
        Span::styled(UiText::BTN_NEXT, next),
    ])
}

// ============================================================================
// Question Screen
// ============================================================================

fn entry_style(entry: &Entry, is_chosen: bool, is_focused: bool, pair: ThemePair) -> Style {
    let base = match entry {
        Entry::Auxiliary => Styles::option_auxiliary(pair),
        Entry::Choice(_) if is_chosen => Styles::option_selected(pair),
        Entry::Choice(_) => Styles::option(pair),
    };
    if is_focused && !is_chosen {
        base.patch(Styles::option_focused(pair))
    } else {
        base
    }
}

/// Render steps 1-4.
pub fn render_question_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let wizard = &state.wizard;
    let pair = wizard.theme();
    let step = wizard.step();
    let entries = state.entries();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                        // Title
            Constraint::Length(entries.len() as u16 + 2), // Options
            Constraint::Length(2),                        // Buttons
            Constraint::Min(0),
        ])
        .split(area);

    let title = Paragraph::new(step.title())
        .style(Styles::title(pair))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM).style(Styles::base(pair)));
    f.render_widget(title, chunks[0]);

    let chosen = wizard.answers().label(step);
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_chosen = matches!(entry, Entry::Choice(l) if Some(l) == chosen.as_ref());
            let is_focused = i == state.cursor;
            let marker = if is_focused { "› " } else { "  " };
            ListItem::new(format!("{}{}", marker, entry.label()))
                .style(entry_style(entry, is_chosen, is_focused, pair))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Styles::base(pair)),
    );
    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor));
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    let buttons = Paragraph::new(button_row(wizard, pair)).alignment(Alignment::Center);
    f.render_widget(buttons, chunks[2]);
}

// ============================================================================
// Summary Screen
// ============================================================================

/// Lines describing where the pairing request stands.
pub fn pairing_lines(wizard: &Wizard, pair: ThemePair) -> Vec<Line<'static>> {
    match wizard.submission() {
        SubmissionState::Idle => Vec::new(),
        SubmissionState::Queued | SubmissionState::InFlight { .. } => {
            vec![Line::from(Span::styled(UiText::WAITING, Styles::pending(pair)))]
        }
        SubmissionState::Delivered(outfit) => outfit
            .display_lines()
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Styles::base(pair))))
            .collect(),
        SubmissionState::Failed { reason } => vec![
            Line::from(Span::styled(
                format!("Could not get a recommendation: {}", reason),
                Styles::error(pair),
            )),
            Line::from(""),
            Line::from(Span::styled(UiText::RETRY_HINT, Styles::base(pair))),
        ],
    }
}

/// Render step 5.
pub fn render_summary_screen(f: &mut Frame, area: Rect, wizard: &Wizard) {
    let pair = wizard.theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(6), // Answers
            Constraint::Min(3),    // Pairing outcome
            Constraint::Length(1), // Finish button
        ])
        .split(area);

    let title = Paragraph::new(WizardStep::Summary.title())
        .style(Styles::title(pair))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM).style(Styles::base(pair)));
    f.render_widget(title, chunks[0]);

    let answers: Vec<Line> = wizard
        .summary_lines()
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Styles::base(pair))))
        .collect();
    let answers = Paragraph::new(answers).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your answers ")
            .style(Styles::base(pair)),
    );
    f.render_widget(answers, chunks[1]);

    let outcome = Paragraph::new(pairing_lines(wizard, pair))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Best outfit ")
                .style(Styles::base(pair)),
        );
    f.render_widget(outcome, chunks[2]);

    let finish = Paragraph::new(Line::from(Span::styled(UiText::BTN_FINISH, Styles::button(pair))))
        .alignment(Alignment::Center);
    f.render_widget(finish, chunks[3]);
}
