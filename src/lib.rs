//! colorwise Library
//!
//! A four-question style questionnaire that themes itself as it goes and
//! asks a pairing service for an outfit recommendation.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod pairing;
pub mod reference;
pub mod theme;
pub mod types;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use config::{Settings, SettingsOverrides};
pub use error::{ColorwiseError, PairingError};
pub use pairing::{
    HttpPairingService, OfflinePairingService, Outfit, PairingDispatcher, PairingRequest,
    PairingService,
};
pub use theme::{ThemePair, resolve as resolve_theme};
pub use types::{AgeRange, Gender, Palette, Style};
pub use wizard::{Answers, SubmissionState, Transition, Wizard, WizardStep};
