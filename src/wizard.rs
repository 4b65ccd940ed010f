//! Questionnaire wizard state machine
//!
//! The wizard is the single source of truth for where the user is and what
//! they have answered. Every mutation goes through the methods on [`Wizard`];
//! invalid requests are silently ignored rather than reported, because the UI
//! already presents the matching control as disabled.
//!
//! # Step Flow
//!
//! ```text
//! Age -> Gender -> Style -> Palette -> Summary
//!  1       2        3        4          5
//! ```
//!
//! - Advancing past steps 1-4 requires that step's answer.
//! - Retreating is always allowed above step 1 and never clears answers.
//! - Entering `Summary` is where the pairing request is issued.
//!
//! # Submissions
//!
//! A submission is identified by a ticket. Only the ticket currently in
//! flight may complete; anything else (after a reset, after leaving the
//! summary) is a stale result and is dropped on arrival.
//!
//! At most one request is outstanding. Leaving the summary abandons the
//! result, not the request: its ticket is remembered, and re-entering the
//! summary before it drains queues the new submission until it does.

use crate::config::DEFAULT_REFERENCE_URL;
use crate::error::PairingError;
use crate::pairing::{Outfit, PairingRequest};
use crate::theme::{self, ThemePair};
use crate::types::{self, AgeRange, Gender, Palette, Style};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, trace};

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WizardStep {
    Age = 1,
    Gender = 2,
    Style = 3,
    Palette = 4,
    /// Terminal step: shows the answers and the pairing outcome
    Summary = 5,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: u8 = 5;

    /// The step number (1-indexed).
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Age),
            2 => Some(Self::Gender),
            3 => Some(Self::Style),
            4 => Some(Self::Palette),
            5 => Some(Self::Summary),
            _ => None,
        }
    }

    /// Returns the next step, or None at `Summary`
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Age => Some(Self::Gender),
            Self::Gender => Some(Self::Style),
            Self::Style => Some(Self::Palette),
            Self::Palette => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    /// Returns the previous step, or None at `Age`
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Age => None,
            Self::Gender => Some(Self::Age),
            Self::Style => Some(Self::Gender),
            Self::Palette => Some(Self::Style),
            Self::Summary => Some(Self::Palette),
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Summary)
    }

    /// Question shown at the top of the screen.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Age => "What's your age range?",
            Self::Gender => "Select your gender",
            Self::Style => "Choose your style",
            Self::Palette => "Choose your color palette",
            Self::Summary => "Your profile",
        }
    }

    /// Closed option set for this step. Empty for `Summary`.
    pub fn options(self) -> Vec<String> {
        match self {
            Self::Age => types::labels::<AgeRange>(),
            Self::Gender => types::labels::<Gender>(),
            Self::Style => types::labels::<Style>(),
            Self::Palette => types::labels::<Palette>(),
            Self::Summary => Vec::new(),
        }
    }

    pub const fn all() -> &'static [Self] {
        &[
            Self::Age,
            Self::Gender,
            Self::Style,
            Self::Palette,
            Self::Summary,
        ]
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Style => "Style",
            Self::Palette => "Palette",
            Self::Summary => "Summary",
        };
        f.write_str(name)
    }
}

/// The four answer slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Answers {
    pub age: Option<AgeRange>,
    pub gender: Option<Gender>,
    pub style: Option<Style>,
    pub palette: Option<Palette>,
}

impl Answers {
    /// Whether the answer gating `step` is set. `Summary` has no gate.
    pub fn is_set(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Age => self.age.is_some(),
            WizardStep::Gender => self.gender.is_some(),
            WizardStep::Style => self.style.is_some(),
            WizardStep::Palette => self.palette.is_some(),
            WizardStep::Summary => true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.age.is_some() && self.gender.is_some() && self.style.is_some() && self.palette.is_some()
    }

    /// Display label of the answer for `step`, if any.
    pub fn label(&self, step: WizardStep) -> Option<String> {
        match step {
            WizardStep::Age => self.age.map(|v| v.to_string()),
            WizardStep::Gender => self.gender.map(|v| v.to_string()),
            WizardStep::Style => self.style.map(|v| v.to_string()),
            WizardStep::Palette => self.palette.map(|v| v.to_string()),
            WizardStep::Summary => None,
        }
    }

    /// `None` until every slot is filled.
    pub fn to_request(&self) -> Option<PairingRequest> {
        Some(PairingRequest {
            age_group: self.age?.to_string(),
            gender: self.gender?.to_string(),
            style: self.style?.to_string(),
            palette: self.palette?.to_string(),
        })
    }

    /// `Age: …`, `Gender: …`, `Style: …`, `Palette: …`, verbatim.
    pub fn summary_lines(&self) -> Vec<String> {
        [
            WizardStep::Age,
            WizardStep::Gender,
            WizardStep::Style,
            WizardStep::Palette,
        ]
        .iter()
        .map(|&step| format!("{}: {}", step, self.label(step).unwrap_or_default()))
        .collect()
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Gate closed or no step in that direction; nothing changed
    Rejected,
    Moved { from: WizardStep, to: WizardStep },
}

impl Transition {
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    /// True when this transition just entered the summary step.
    pub fn entered_summary(self) -> bool {
        matches!(
            self,
            Self::Moved {
                to: WizardStep::Summary,
                ..
            }
        )
    }
}

/// Where the pairing request stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Waiting for an abandoned request to drain before submitting
    Queued,
    InFlight {
        ticket: u64,
    },
    Delivered(Outfit),
    Failed {
        reason: String,
    },
}

/// A request the caller must hand to the pairing dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub request: PairingRequest,
}

/// The questionnaire controller
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    answers: Answers,
    submission: SubmissionState,
    /// Ticket of a request still running whose result nobody wants
    abandoned: Option<u64>,
    next_ticket: u64,
    reference_url: String,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_URL)
    }
}

impl Wizard {
    pub fn new(reference_url: impl Into<String>) -> Self {
        Self {
            step: WizardStep::Age,
            answers: Answers::default(),
            submission: SubmissionState::Idle,
            abandoned: None,
            next_ticket: 1,
            reference_url: reference_url.into(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn step_number(&self) -> u8 {
        self.step.number()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_waiting(&self) -> bool {
        matches!(
            self.submission,
            SubmissionState::Queued | SubmissionState::InFlight { .. }
        )
    }

    /// Whether a request is still running, wanted or not.
    pub fn has_outstanding_request(&self) -> bool {
        self.abandoned.is_some() || matches!(self.submission, SubmissionState::InFlight { .. })
    }

    /// Set the answer for `kind` if it is the current step and `value` is a
    /// member of its option set. Returns whether anything changed.
    pub fn select_option(&mut self, kind: WizardStep, value: &str) -> bool {
        if kind != self.step {
            trace!("Ignoring {} selection while on {}", kind, self.step);
            return false;
        }

        let applied = match kind {
            WizardStep::Age => parse_into(&mut self.answers.age, value),
            WizardStep::Gender => parse_into(&mut self.answers.gender, value),
            WizardStep::Style => parse_into(&mut self.answers.style, value),
            WizardStep::Palette => parse_into(&mut self.answers.palette, value),
            WizardStep::Summary => false,
        };

        if applied {
            debug!("{} answer set to {:?}", kind, value);
        } else {
            trace!("Rejected {} option {:?}", kind, value);
        }
        applied
    }

    pub fn can_advance(&self) -> bool {
        !self.step.is_terminal() && self.answers.is_set(self.step)
    }

    pub fn can_retreat(&self) -> bool {
        self.step.previous().is_some()
    }

    /// Move forward one step if the current step's answer is set.
    pub fn advance(&mut self) -> Transition {
        if !self.can_advance() {
            trace!("Advance rejected on {}", self.step);
            return Transition::Rejected;
        }
        let Some(to) = self.step.next() else {
            return Transition::Rejected;
        };
        let from = self.step;
        self.step = to;
        debug!("Wizard advanced {} -> {}", from, to);
        Transition::Moved { from, to }
    }

    /// Move back one step. Answers are kept.
    ///
    /// Leaving the summary discards any finished result and abandons the
    /// result of a request still in flight. The request itself keeps running;
    /// no new one is sent until it reports back.
    pub fn retreat(&mut self) -> Transition {
        let Some(to) = self.step.previous() else {
            trace!("Retreat rejected on {}", self.step);
            return Transition::Rejected;
        };
        let from = self.step;
        if from.is_terminal() {
            self.abandon_submission();
        }
        self.step = to;
        debug!("Wizard retreated {} -> {}", from, to);
        Transition::Moved { from, to }
    }

    /// `step / 5`, in `(0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        f64::from(self.step.number()) / f64::from(WizardStep::TOTAL_STEPS)
    }

    /// Progress as a whole percentage for gauges.
    pub fn progress_percent(&self) -> u16 {
        u16::from(self.step.number()) * 100 / u16::from(WizardStep::TOTAL_STEPS)
    }

    pub fn theme(&self) -> ThemePair {
        theme::resolve(self.step.number(), self.answers.gender)
    }

    /// The reference resource behind "I don't know" on the palette step.
    ///
    /// Takes `&self`: opening it can never touch the step or the answers.
    pub fn auxiliary_action(&self) -> Option<&str> {
        (self.step == WizardStep::Palette).then_some(self.reference_url.as_str())
    }

    /// Start a pairing request for the collected answers.
    ///
    /// Only valid on the summary step with all answers set, and only when no
    /// request is already in flight or delivered. A second call while one is
    /// outstanding returns `None`. While an abandoned request is still
    /// running the submission is `Queued` instead; collect it with
    /// [`Wizard::take_queued_submission`] once that request reports back.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if self.step != WizardStep::Summary {
            return None;
        }
        match self.submission {
            SubmissionState::Idle | SubmissionState::Failed { .. } | SubmissionState::Queued => {}
            SubmissionState::InFlight { ticket } => {
                debug!(ticket, "Submission already in flight, coalescing");
                return None;
            }
            SubmissionState::Delivered(_) => return None,
        }
        let request = self.answers.to_request()?;

        if let Some(ticket) = self.abandoned {
            debug!(ticket, "Previous request still running, queueing submission");
            self.submission = SubmissionState::Queued;
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.submission = SubmissionState::InFlight { ticket };
        info!(ticket, "Submitting answers for pairing");
        Some(Submission { ticket, request })
    }

    /// Issue a queued submission once no abandoned request is outstanding.
    pub fn take_queued_submission(&mut self) -> Option<Submission> {
        if self.submission != SubmissionState::Queued || self.abandoned.is_some() {
            return None;
        }
        self.begin_submission()
    }

    /// Re-issue a failed submission with the same answers.
    pub fn retry_submission(&mut self) -> Option<Submission> {
        if !matches!(self.submission, SubmissionState::Failed { .. }) {
            return None;
        }
        self.begin_submission()
    }

    /// Apply a finished request. Returns `false` and drops the result when
    /// `ticket` is not the one in flight.
    pub fn complete_submission(
        &mut self,
        ticket: u64,
        result: Result<Outfit, PairingError>,
    ) -> bool {
        if self.abandoned == Some(ticket) {
            debug!(ticket, "Abandoned request drained");
            self.abandoned = None;
            return false;
        }
        match self.submission {
            SubmissionState::InFlight { ticket: current } if current == ticket => {}
            _ => {
                debug!(ticket, "Discarding stale pairing result");
                return false;
            }
        }

        self.submission = match result {
            Ok(outfit) => {
                info!(ticket, score = %outfit.score, "Pairing delivered");
                SubmissionState::Delivered(outfit)
            }
            Err(e) => {
                info!(ticket, "Pairing failed: {}", e);
                SubmissionState::Failed {
                    reason: e.to_string(),
                }
            }
        };
        true
    }

    pub fn summary_lines(&self) -> Vec<String> {
        self.answers.summary_lines()
    }

    /// Back to step 1 with nothing answered. Pending results become stale.
    pub fn reset(&mut self) {
        debug!("Wizard reset");
        self.step = WizardStep::Age;
        self.answers = Answers::default();
        self.abandon_submission();
    }

    fn abandon_submission(&mut self) {
        if let SubmissionState::InFlight { ticket } = self.submission {
            debug!(ticket, "Abandoning in-flight submission");
            self.abandoned = Some(ticket);
        }
        self.submission = SubmissionState::Idle;
    }
}

fn parse_into<T: FromStr>(slot: &mut Option<T>, value: &str) -> bool {
    match value.parse::<T>() {
        Ok(parsed) => {
            *slot = Some(parsed);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Wizard {
        let mut w = Wizard::default();
        for (step, value) in [
            (WizardStep::Age, "18–24"),
            (WizardStep::Gender, "Female"),
            (WizardStep::Style, "Chic"),
            (WizardStep::Palette, "Cool"),
        ] {
            assert!(w.select_option(step, value));
            assert!(w.advance().moved());
        }
        w
    }

    #[test]
    fn test_initial_state() {
        let w = Wizard::default();
        assert_eq!(w.step(), WizardStep::Age);
        assert_eq!(*w.answers(), Answers::default());
        assert_eq!(*w.submission(), SubmissionState::Idle);
        assert!(!w.can_advance());
        assert!(!w.can_retreat());
    }

    #[test]
    fn test_step_numbers_round_trip() {
        for step in WizardStep::all() {
            assert_eq!(WizardStep::from_number(step.number()), Some(*step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(6), None);
    }

    #[test]
    fn test_advance_requires_answer() {
        let mut w = Wizard::default();
        assert_eq!(w.advance(), Transition::Rejected);
        assert_eq!(w.step(), WizardStep::Age);

        w.select_option(WizardStep::Age, "45+");
        assert_eq!(
            w.advance(),
            Transition::Moved {
                from: WizardStep::Age,
                to: WizardStep::Gender
            }
        );
    }

    #[test]
    fn test_selection_for_other_step_is_ignored() {
        let mut w = Wizard::default();
        assert!(!w.select_option(WizardStep::Gender, "Male"));
        assert_eq!(w.answers().gender, None);
    }

    #[test]
    fn test_invalid_value_is_ignored() {
        let mut w = Wizard::default();
        w.select_option(WizardStep::Age, "25–34");
        assert!(!w.select_option(WizardStep::Age, "ninety"));
        assert_eq!(w.answers().age, Some(AgeRange::Adult));
    }

    #[test]
    fn test_reselect_overwrites() {
        let mut w = Wizard::default();
        w.select_option(WizardStep::Age, "13–17");
        w.select_option(WizardStep::Age, "35–44");
        assert_eq!(w.answers().age, Some(AgeRange::MidAdult));
    }

    #[test]
    fn test_full_flow_reaches_summary() {
        let w = filled();
        assert_eq!(w.step(), WizardStep::Summary);
        assert_eq!(
            w.summary_lines(),
            vec!["Age: 18–24", "Gender: Female", "Style: Chic", "Palette: Cool"]
        );
    }

    #[test]
    fn test_cannot_advance_past_summary() {
        let mut w = filled();
        assert_eq!(w.advance(), Transition::Rejected);
        assert_eq!(w.step(), WizardStep::Summary);
    }

    #[test]
    fn test_retreat_keeps_answers() {
        let mut w = filled();
        w.retreat();
        w.retreat();
        assert_eq!(w.step(), WizardStep::Style);
        assert_eq!(w.answers().palette, Some(Palette::Cool));
        assert!(w.can_advance());
    }

    #[test]
    fn test_progress() {
        let mut w = Wizard::default();
        assert_eq!(w.progress_fraction(), 0.2);
        assert_eq!(w.progress_percent(), 20);
        w.select_option(WizardStep::Age, "45+");
        w.advance();
        assert_eq!(w.progress_percent(), 40);
        let w = filled();
        assert_eq!(w.progress_fraction(), 1.0);
        assert_eq!(w.progress_percent(), 100);
    }

    #[test]
    fn test_auxiliary_only_on_palette() {
        let mut w = Wizard::new("https://example.com/video");
        assert_eq!(w.auxiliary_action(), None);
        for (step, value) in [
            (WizardStep::Age, "18–24"),
            (WizardStep::Gender, "Other"),
            (WizardStep::Style, "Casual"),
        ] {
            w.select_option(step, value);
            w.advance();
        }
        assert_eq!(w.auxiliary_action(), Some("https://example.com/video"));
        assert_eq!(w.step(), WizardStep::Palette);
        assert_eq!(w.answers().palette, None);
    }

    #[test]
    fn test_submission_coalesces() {
        let mut w = filled();
        let first = w.begin_submission().expect("first submission");
        assert_eq!(first.request.age_group, "18–24");
        assert!(w.begin_submission().is_none());
        assert_eq!(
            *w.submission(),
            SubmissionState::InFlight {
                ticket: first.ticket
            }
        );
    }

    #[test]
    fn test_submission_requires_summary() {
        let mut w = Wizard::default();
        assert!(w.begin_submission().is_none());
    }

    #[test]
    fn test_failed_submission_can_retry() {
        let mut w = filled();
        let sub = w.begin_submission().unwrap();
        assert!(w.complete_submission(sub.ticket, Err(PairingError::Timeout)));
        assert!(matches!(w.submission(), SubmissionState::Failed { .. }));

        let retry = w.retry_submission().expect("retry allowed after failure");
        assert!(retry.ticket > sub.ticket);
        assert_eq!(retry.request, sub.request);
    }

    #[test]
    fn test_stale_result_after_reset_is_discarded() {
        let mut w = filled();
        let sub = w.begin_submission().unwrap();
        w.reset();
        assert!(!w.complete_submission(sub.ticket, Err(PairingError::Timeout)));
        assert_eq!(*w.submission(), SubmissionState::Idle);
        assert_eq!(w.step(), WizardStep::Age);
    }

    #[test]
    fn test_leaving_summary_abandons_request() {
        let mut w = filled();
        let sub = w.begin_submission().unwrap();
        w.retreat();
        assert_eq!(*w.submission(), SubmissionState::Idle);
        assert!(w.has_outstanding_request());
        assert!(!w.complete_submission(sub.ticket, Err(PairingError::Timeout)));
        assert!(!w.has_outstanding_request());
    }

    #[test]
    fn test_reentering_summary_waits_for_abandoned_request() {
        let mut w = filled();
        let first = w.begin_submission().unwrap();
        w.retreat();
        w.advance();

        assert!(w.begin_submission().is_none());
        assert_eq!(*w.submission(), SubmissionState::Queued);
        assert!(w.is_waiting());
        assert!(w.take_queued_submission().is_none());

        assert!(!w.complete_submission(first.ticket, Err(PairingError::Timeout)));
        let second = w.take_queued_submission().expect("queued submission released");
        assert!(second.ticket > first.ticket);
        assert_eq!(
            *w.submission(),
            SubmissionState::InFlight {
                ticket: second.ticket
            }
        );
        assert!(w.take_queued_submission().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut w = filled();
        w.reset();
        assert_eq!(w.step(), WizardStep::Age);
        assert!(!w.answers().is_complete());
        assert_eq!(w.theme(), ThemePair::NEUTRAL);
    }

    #[test]
    fn test_theme_follows_gender_from_step_three() {
        let mut w = Wizard::default();
        w.select_option(WizardStep::Age, "18–24");
        w.advance();
        w.select_option(WizardStep::Gender, "Male");
        assert_eq!(w.theme(), ThemePair::NEUTRAL);
        w.advance();
        assert_eq!(w.theme(), ThemePair::SLATE);
    }
}
