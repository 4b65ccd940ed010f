//! Centralized theme and styling for the TUI
//!
//! Two layers live here:
//!
//! - [`resolve`] maps the wizard step and the chosen gender to the
//!   background/foreground pair that paints the whole screen.
//! - [`Styles`] derives the concrete ratatui styles (options, buttons, gauge)
//!   from whichever pair is active, plus a handful of fixed chrome colors.
//!
//! # Usage
//! ```rust
//! use colorwise::theme::{Styles, resolve};
//! use colorwise::types::Gender;
//!
//! let pair = resolve(3, Some(Gender::Female));
//! let title = Styles::title(pair);
//! assert_eq!(pair.background_hex(), "#cec3cf");
//! # let _ = title;
//! ```

use crate::types::Gender;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// THEME PAIRS
// =============================================================================

/// Background/foreground color pair driving a whole screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePair {
    pub background: Color,
    pub foreground: Color,
}

impl ThemePair {
    const fn rgb(bg: (u8, u8, u8), fg: (u8, u8, u8)) -> Self {
        Self {
            background: Color::Rgb(bg.0, bg.1, bg.2),
            foreground: Color::Rgb(fg.0, fg.1, fg.2),
        }
    }

    /// Sand background, near-black text. Used before answers are personalized.
    pub const NEUTRAL: Self = Self::rgb((0xc1, 0xbe, 0xa8), (0x1a, 0x1a, 0x1a));

    /// Rose tones
    pub const ROSE: Self = Self::rgb((0xce, 0xc3, 0xcf), (0x97, 0x4b, 0x66));

    /// Slate tones
    pub const SLATE: Self = Self::rgb((0x87, 0x9f, 0xae), (0x33, 0x3c, 0x4d));

    /// Earth tones
    pub const EARTH: Self = Self::rgb((0xa8, 0xa4, 0x9b), (0x3d, 0x2d, 0x19));

    pub fn background_hex(&self) -> String {
        to_hex(self.background)
    }

    pub fn foreground_hex(&self) -> String {
        to_hex(self.foreground)
    }
}

fn to_hex(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        other => format!("{:?}", other),
    }
}

/// Steps up to and including this one always use the neutral pair.
pub const LAST_NEUTRAL_STEP: u8 = 2;

/// Resolve the screen theme for a wizard step (1-indexed) and gender.
///
/// Steps 1 and 2 are neutral regardless of gender. From step 3 on the pair
/// follows the gender answer, falling back to neutral when it is unset.
/// Total and side-effect free.
pub fn resolve(step: u8, gender: Option<Gender>) -> ThemePair {
    if step <= LAST_NEUTRAL_STEP {
        return ThemePair::NEUTRAL;
    }
    gendered(gender)
}

fn gendered(gender: Option<Gender>) -> ThemePair {
    match gender {
        Some(Gender::Female) => ThemePair::ROSE,
        Some(Gender::Male) => ThemePair::SLATE,
        Some(Gender::Other) => ThemePair::EARTH,
        None => ThemePair::NEUTRAL,
    }
}

// =============================================================================
// FIXED CHROME COLORS
// =============================================================================

/// Colors that do not follow the active theme
pub struct Colors;

impl Colors {
    /// Failure panel accent
    pub const ERROR: Color = Color::Rgb(0x8b, 0x1e, 0x1e);

    /// Waiting indicator accent
    pub const PENDING: Color = Color::Rgb(0x5a, 0x4a, 0x1a);

    /// Disabled button background
    pub const DISABLED_BG: Color = Color::Rgb(0x80, 0x80, 0x80);

    /// Disabled button text
    pub const DISABLED_FG: Color = Color::Rgb(0xe6, 0xe6, 0xe6);

    /// Gauge track behind the progress fill
    pub const GAUGE_TRACK: Color = Color::Rgb(0x9a, 0x97, 0x86);

    /// Help overlay background
    pub const OVERLAY_BG: Color = Color::Rgb(20, 20, 30);

    /// Help overlay text
    pub const OVERLAY_FG: Color = Color::White;

    /// Help overlay key column
    pub const OVERLAY_KEY: Color = Color::Cyan;

    /// Help overlay muted text
    pub const OVERLAY_MUTED: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Styles derived from the active [`ThemePair`]
pub struct Styles;

impl Styles {
    /// Full-screen base: theme background and foreground
    pub fn base(pair: ThemePair) -> Style {
        Style::default().bg(pair.background).fg(pair.foreground)
    }

    /// Question title
    pub fn title(pair: ThemePair) -> Style {
        Self::base(pair).add_modifier(Modifier::BOLD)
    }

    /// Option that is neither highlighted nor chosen
    pub fn option(pair: ThemePair) -> Style {
        Self::base(pair)
    }

    /// Option under the cursor
    pub fn option_focused(pair: ThemePair) -> Style {
        Self::base(pair).add_modifier(Modifier::UNDERLINED)
    }

    /// The currently chosen answer (inverted)
    pub fn option_selected(pair: ThemePair) -> Style {
        Style::default()
            .bg(pair.foreground)
            .fg(pair.background)
            .add_modifier(Modifier::BOLD)
    }

    /// The "I don't know" entry on the palette step
    pub fn option_auxiliary(pair: ThemePair) -> Style {
        Self::base(pair).add_modifier(Modifier::ITALIC)
    }

    /// Enabled navigation button
    pub fn button(pair: ThemePair) -> Style {
        Style::default()
            .bg(pair.foreground)
            .fg(pair.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled navigation button
    pub fn button_disabled() -> Style {
        Style::default().bg(Colors::DISABLED_BG).fg(Colors::DISABLED_FG)
    }

    /// Progress gauge fill
    pub fn gauge(pair: ThemePair) -> Style {
        Style::default().fg(pair.foreground).bg(Colors::GAUGE_TRACK)
    }

    /// Failure panel text
    pub fn error(pair: ThemePair) -> Style {
        Style::default()
            .bg(pair.background)
            .fg(Colors::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Waiting indicator
    pub fn pending(pair: ThemePair) -> Style {
        Style::default()
            .bg(pair.background)
            .fg(Colors::PENDING)
            .add_modifier(Modifier::ITALIC)
    }

    /// Nav bar key hint
    pub fn nav_key(pair: ThemePair) -> Style {
        Self::button(pair)
    }

    /// Nav bar label
    pub fn nav_label(pair: ThemePair) -> Style {
        Self::base(pair)
    }
}

// =============================================================================
// TEXT CONSTANTS
// =============================================================================

/// Common UI text strings
pub struct UiText;

impl UiText {
    pub const APP_NAME: &'static str = "colorwise";
    pub const TAGLINE: &'static str =
        "Discover your true style potential with our intelligent wardrobe assistant.";
    pub const START: &'static str = "[ Start Questionnaire ]";
    pub const BTN_BACK: &'static str = "[ ← Back ]";
    pub const BTN_NEXT: &'static str = "[ Next → ]";
    pub const BTN_FINISH: &'static str = "[ Finish ]";
    pub const AUXILIARY: &'static str = "I don't know — watch color analysis video";
    pub const WAITING: &'static str = "Finding your outfit...";
    pub const RETRY_HINT: &'static str = "Press R to retry";
}
