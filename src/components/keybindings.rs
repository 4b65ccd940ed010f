//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current
//! screen. The same registry resolves key presses to actions and feeds the
//! nav bar and help overlay, so what is shown is what works.

use crate::app::KeyContext;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    /// Choose the highlighted entry
    Select,
    /// Advance to the next step
    Next,
    /// Retreat to the previous step
    Back,
    /// Leave the questionnaire for the landing page
    Exit,
    /// Enter the questionnaire from the landing page
    Start,
    /// Re-send a failed pairing request
    Retry,
    /// Leave the summary for the landing page
    Finish,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }
        // Shift is implied by the character itself ('?' vs '/')
        let relevant = event.modifiers.difference(KeyModifiers::SHIFT);
        relevant == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Context-specific keybindings
    context_bindings: HashMap<KeyContext, Vec<Keybinding>>,
    /// Global keybindings (available everywhere)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            context_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.context_bindings.insert(
            KeyContext::Landing,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Start, "Enter", "Start questionnaire"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Start, "Space", "Start questionnaire"),
                Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            ],
        );

        self.context_bindings.insert(
            KeyContext::Question,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous option"),
                Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Previous option"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next option"),
                Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Next option"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", "Choose"),
                Keybinding::new(KeyCode::Right, KeyAction::Next, "Right", "Next step"),
                Keybinding::new(KeyCode::Tab, KeyAction::Next, "Tab", "Next step"),
                Keybinding::new(KeyCode::Char('n'), KeyAction::Next, "N", "Next step"),
                Keybinding::new(KeyCode::Left, KeyAction::Back, "Left", "Previous step"),
                Keybinding::new(KeyCode::Backspace, KeyAction::Back, "Bksp", "Previous step"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Previous step"),
                Keybinding::new(KeyCode::Esc, KeyAction::Exit, "Esc", "Back to start"),
            ],
        );

        self.context_bindings.insert(
            KeyContext::Summary,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Finish, "Enter", "Finish"),
                Keybinding::new(KeyCode::Char('f'), KeyAction::Finish, "F", "Finish"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Retry, "R", "Retry pairing"),
                Keybinding::new(KeyCode::Left, KeyAction::Back, "Left", "Previous step"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Previous step"),
                Keybinding::new(KeyCode::Esc, KeyAction::Exit, "Esc", "Back to start"),
            ],
        );
    }

    /// Get keybindings for a context (includes global bindings)
    pub fn get_bindings(&self, context: KeyContext) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(context_bindings) = self.context_bindings.get(&context) {
            bindings.extend(context_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Resolve a key press to an action in `context`
    pub fn action_for(&self, context: KeyContext, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(context)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, context: KeyContext) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(context);

        let priority_actions = match context {
            KeyContext::Landing => vec![KeyAction::Start, KeyAction::Help, KeyAction::Quit],
            KeyContext::Question => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Select,
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            KeyContext::Summary => vec![
                KeyAction::Finish,
                KeyAction::Retry,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        // Combine Up/Down into single item for cleaner display
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;

        for action in priority_actions {
            let is_nav = matches!(action, KeyAction::NavigateUp | KeyAction::NavigateDown);
            if is_nav && has_nav {
                continue;
            }

            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                if is_nav {
                    items.push(NavBarItem {
                        key_display: "Up/Dn".to_string(),
                        action_label: "Navigate".to_string(),
                    });
                    has_nav = true;
                } else {
                    items.push(NavBarItem {
                        key_display: binding.display.clone(),
                        action_label: binding.description.clone(),
                    });
                }
            }
        }

        items
    }

    /// Get full help content for a context (for help overlay)
    pub fn get_help_content(&self, context: KeyContext) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", is_navigation),
            ("Actions", is_action),
            ("General", is_general),
        ];

        groups
            .iter()
            .filter_map(|(title, wanted)| {
                let items: Vec<(String, String)> = self
                    .get_bindings(context)
                    .into_iter()
                    .filter(|b| wanted(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

fn is_navigation(action: KeyAction) -> bool {
    matches!(
        action,
        KeyAction::NavigateUp | KeyAction::NavigateDown | KeyAction::Next | KeyAction::Back
    )
}

fn is_action(action: KeyAction) -> bool {
    matches!(
        action,
        KeyAction::Select | KeyAction::Start | KeyAction::Retry | KeyAction::Finish
    )
}

fn is_general(action: KeyAction) -> bool {
    matches!(action, KeyAction::Exit | KeyAction::Help | KeyAction::Quit)
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
