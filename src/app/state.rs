//! Application state definitions
//!
//! Contains the screen mode, the wizard, and the cursor over the current
//! step's entries.

use crate::theme::{ThemePair, UiText};
use crate::wizard::{Wizard, WizardStep};

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Landing page - entry point into the questionnaire
    Landing,
    /// The questionnaire itself
    Wizard,
}

/// Which set of keybindings applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Landing,
    /// Steps 1-4: pick an option, move between steps
    Question,
    /// Step 5: answers and pairing outcome
    Summary,
}

/// One selectable row on a question screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A member of the step's option set
    Choice(String),
    /// The palette step's "I don't know" link
    Auxiliary,
}

impl Entry {
    pub fn label(&self) -> &str {
        match self {
            Self::Choice(label) => label,
            Self::Auxiliary => UiText::AUXILIARY,
        }
    }
}

/// Entries listed on `step`, in display order.
pub fn entries_for(step: WizardStep) -> Vec<Entry> {
    let mut entries: Vec<Entry> = step.options().into_iter().map(Entry::Choice).collect();
    if step == WizardStep::Palette {
        entries.push(Entry::Auxiliary);
    }
    entries
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    pub wizard: Wizard,
    /// Highlighted entry on the current question
    pub cursor: usize,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

impl AppState {
    pub fn new(wizard: Wizard) -> Self {
        Self {
            mode: AppMode::Landing,
            wizard,
            cursor: 0,
            status_message: String::new(),
            help_visible: false,
        }
    }

    pub fn key_context(&self) -> KeyContext {
        match self.mode {
            AppMode::Landing => KeyContext::Landing,
            AppMode::Wizard if self.wizard.step().is_terminal() => KeyContext::Summary,
            AppMode::Wizard => KeyContext::Question,
        }
    }

    pub fn entries(&self) -> Vec<Entry> {
        entries_for(self.wizard.step())
    }

    /// Theme of the screen currently shown
    pub fn theme(&self) -> ThemePair {
        match self.mode {
            AppMode::Landing => ThemePair::NEUTRAL,
            AppMode::Wizard => self.wizard.theme(),
        }
    }

    /// Put the cursor on the current answer, or the first entry.
    pub fn sync_cursor(&mut self) {
        let step = self.wizard.step();
        let current = self.wizard.answers().label(step);
        self.cursor = self
            .entries()
            .iter()
            .position(|e| matches!((e, &current), (Entry::Choice(l), Some(c)) if l == c))
            .unwrap_or(0);
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = self.entries().len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Wizard::default())
    }
}
