//! Application module
//!
//! Contains the event loop and the key handling that drives the wizard.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, Entry, etc.)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{AppMode, AppState, Entry, KeyContext, entries_for};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::Result;
use crate::pairing::{PairingDispatcher, PairingMessage, PairingService};
use crate::reference::ReferenceOpener;
use crate::ui::UiRenderer;
use crate::wizard::{Submission, Wizard, WizardStep};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application struct
pub struct App {
    state: AppState,
    dispatcher: PairingDispatcher,
    opener: Box<dyn ReferenceOpener>,
    ui_renderer: UiRenderer,
    /// Keybinding context for key resolution and navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance
    pub fn new(
        wizard: Wizard,
        service: Arc<dyn PairingService>,
        opener: Box<dyn ReferenceOpener>,
    ) -> Self {
        info!("Creating new App instance");
        Self {
            state: AppState::new(wizard),
            dispatcher: PairingDispatcher::new(service),
            opener,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Apply every finished pairing request without blocking.
    pub fn poll_pairing_messages(&mut self) {
        while let Some(msg) = self.dispatcher.try_recv() {
            self.apply_pairing_message(msg);
        }
    }

    /// Block up to `timeout` for one finished request and apply it.
    /// Returns whether a message arrived.
    pub fn await_pairing(&mut self, timeout: Duration) -> bool {
        match self.dispatcher.recv_timeout(timeout) {
            Some(msg) => {
                self.apply_pairing_message(msg);
                true
            }
            None => false,
        }
    }

    fn apply_pairing_message(&mut self, msg: PairingMessage) {
        let PairingMessage { ticket, result } = msg;
        if !self.state.wizard.complete_submission(ticket, result) {
            debug!(ticket, "Pairing result arrived after it stopped mattering");
        }
        if let Some(submission) = self.state.wizard.take_queued_submission() {
            self.dispatch(submission);
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_pairing_messages();

            if crossterm::event::poll(Duration::from_millis(50))? {
                match crossterm::event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!("Terminal resized to {}x{}", width, height);
                    }
                    _ => {}
                }
            }

            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context);
            })?;
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Handle a key press. Returns `true` when the app should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        // While help is up only its own close keys do anything
        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.state.help_visible = false;
            }
            return false;
        }

        let context = self.state.key_context();
        let Some(action) = self.keybinding_context.action_for(context, &key_event) else {
            return false;
        };
        debug!(?context, ?action, "Key action");

        match action {
            KeyAction::Quit => {
                info!("Quit requested");
                return true;
            }
            KeyAction::Help => self.toggle_help(),
            KeyAction::NavigateUp => self.state.cursor_up(),
            KeyAction::NavigateDown => self.state.cursor_down(),
            KeyAction::Start => self.start_questionnaire(),
            KeyAction::Select => self.select_highlighted(),
            KeyAction::Next => self.next_step(),
            KeyAction::Back => self.previous_step(),
            KeyAction::Retry => {
                if let Some(submission) = self.state.wizard.retry_submission() {
                    self.dispatch(submission);
                }
            }
            KeyAction::Exit | KeyAction::Finish => self.return_to_landing(),
        }
        false
    }

    fn start_questionnaire(&mut self) {
        info!("Starting questionnaire");
        self.state.wizard.reset();
        self.state.mode = AppMode::Wizard;
        self.state.status_message.clear();
        self.state.sync_cursor();
    }

    fn return_to_landing(&mut self) {
        self.state.wizard.reset();
        self.state.mode = AppMode::Landing;
        self.state.status_message.clear();
        self.state.cursor = 0;
    }

    fn select_highlighted(&mut self) {
        let step = self.state.wizard.step();
        let Some(entry) = self.state.entries().into_iter().nth(self.state.cursor) else {
            return;
        };

        match entry {
            Entry::Choice(label) => {
                self.state.wizard.select_option(step, &label);
                self.state.status_message.clear();
            }
            Entry::Auxiliary => self.open_reference(),
        }
    }

    fn open_reference(&mut self) {
        let Some(url) = self.state.wizard.auxiliary_action().map(str::to_owned) else {
            return;
        };
        self.state.status_message = match self.opener.open(&url) {
            Ok(()) => format!("Opened {}", url),
            Err(e) => {
                warn!("Reference resource unavailable: {}", e);
                format!("Could not open the video: {}", url)
            }
        };
    }

    fn next_step(&mut self) {
        let transition = self.state.wizard.advance();
        if !transition.moved() {
            return;
        }
        self.state.status_message.clear();
        self.state.sync_cursor();

        if transition.entered_summary() {
            if let Some(submission) = self.state.wizard.begin_submission() {
                self.dispatch(submission);
            }
        }
    }

    fn previous_step(&mut self) {
        if self.state.wizard.step() == WizardStep::Age {
            self.return_to_landing();
            return;
        }
        if self.state.wizard.retreat().moved() {
            self.state.status_message.clear();
            self.state.sync_cursor();
        }
    }

    fn dispatch(&self, submission: Submission) {
        let Submission { ticket, request } = submission;
        self.dispatcher.dispatch(ticket, request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::OfflinePairingService;
    use crossterm::event::KeyModifiers;

    struct NoopOpener;

    impl ReferenceOpener for NoopOpener {
        fn open(&self, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    fn app() -> App {
        App::new(
            Wizard::default(),
            Arc::new(OfflinePairingService),
            Box::new(NoopOpener),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_start_enters_wizard() {
        let mut app = app();
        assert_eq!(app.state().mode, AppMode::Landing);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().mode, AppMode::Wizard);
        assert_eq!(app.state().wizard.step(), WizardStep::Age);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.state().help_visible);
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Esc);
        assert!(!app.state().help_visible);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_back_on_first_step_returns_to_landing() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.state().mode, AppMode::Landing);
    }
}
