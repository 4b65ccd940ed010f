//! Property-Based Tests for colorwise
//!
//! These tests verify:
//! - Advance gating: a step is only left forward once it is answered
//! - Retreat never loses answers
//! - Progress is exactly step/5 and moves with the step
//! - Theme resolution is neutral early and distinct per gender later
//! - The auxiliary action never mutates the wizard

use colorwise::theme::{self, ThemePair};
use colorwise::types::{AgeRange, Gender, Palette, Style, labels};
use colorwise::wizard::{Transition, Wizard, WizardStep};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Female), Just(Gender::Male), Just(Gender::Other)]
}

/// Display labels plus the ASCII-hyphen spellings the parser also takes
fn accepted_age_spellings() -> Vec<String> {
    let mut spellings = labels::<AgeRange>();
    spellings.extend(labels::<AgeRange>().iter().map(|l| l.replace('–', "-")));
    spellings
}

/// Strings built from the age labels' own alphabet, and near misses of them
fn age_like_value() -> impl Strategy<Value = String> {
    let near_miss = (0usize..5, 0u8..5).prop_map(|(index, edit)| {
        let label = labels::<AgeRange>()[index].clone();
        match edit {
            0 => format!("{} ", label),
            1 => format!(" {}", label),
            2 => label.replace('–', "—"),
            3 => label.chars().take(2).collect(),
            _ => label,
        }
    });
    prop_oneof![
        2 => "[0-9+ \\-–—]{0,7}",
        2 => near_miss,
    ]
}

/// A random user action against the wizard
#[derive(Debug, Clone)]
enum Action {
    /// Pick the n-th option of the current step (wrapped), or a bogus value
    Select(usize),
    SelectBogus,
    Advance,
    Retreat,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0usize..8).prop_map(Action::Select),
        1 => Just(Action::SelectBogus),
        3 => Just(Action::Advance),
        2 => Just(Action::Retreat),
    ]
}

fn apply(wizard: &mut Wizard, action: &Action) -> Option<Transition> {
    let step = wizard.step();
    match action {
        Action::Select(n) => {
            let options = step.options();
            if !options.is_empty() {
                wizard.select_option(step, &options[n % options.len()]);
            }
            None
        }
        Action::SelectBogus => {
            wizard.select_option(step, "definitely not an option");
            None
        }
        Action::Advance => Some(wizard.advance()),
        Action::Retreat => Some(wizard.retreat()),
    }
}

// =============================================================================
// Wizard Transition Properties
// =============================================================================

proptest! {
    /// Advance succeeds exactly when the current step is answered and not terminal
    #[test]
    fn advance_is_gated_by_answer(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut wizard = Wizard::default();
        for action in &actions {
            let before = wizard.step();
            let allowed = wizard.can_advance();
            let answered = wizard.answers().is_set(before);
            if let Some(transition) = apply(&mut wizard, action) {
                if matches!(action, Action::Advance) {
                    prop_assert_eq!(transition.moved(), allowed);
                    prop_assert_eq!(allowed, answered && !before.is_terminal());
                    if transition.moved() {
                        prop_assert_eq!(Some(wizard.step()), before.next());
                    } else {
                        prop_assert_eq!(wizard.step(), before);
                    }
                }
            }
        }
    }

    /// Retreat keeps every answer and moves back exactly one step
    #[test]
    fn retreat_preserves_answers(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut wizard = Wizard::default();
        for action in &actions {
            if matches!(action, Action::Retreat) {
                let before_step = wizard.step();
                let before_answers = *wizard.answers();
                let transition = wizard.retreat();
                prop_assert_eq!(*wizard.answers(), before_answers);
                match before_step.previous() {
                    Some(prev) => {
                        prop_assert!(transition.moved());
                        prop_assert_eq!(wizard.step(), prev);
                    }
                    None => prop_assert_eq!(transition, Transition::Rejected),
                }
            } else {
                apply(&mut wizard, action);
            }
        }
    }

    /// Values outside the option set never replace an existing answer
    #[test]
    fn invalid_age_keeps_prior_answer(seed in 0usize..5, value in age_like_value()) {
        let ages = labels::<AgeRange>();
        let mut wizard = Wizard::default();
        prop_assert!(wizard.select_option(WizardStep::Age, &ages[seed]));
        let before = *wizard.answers();

        let accepted = accepted_age_spellings().contains(&value);
        prop_assert_eq!(wizard.select_option(WizardStep::Age, &value), accepted);
        if accepted {
            prop_assert_eq!(wizard.answers().age, value.parse::<AgeRange>().ok());
        } else {
            prop_assert_eq!(*wizard.answers(), before);
        }
    }

    /// Progress is step/5 after any sequence of actions
    #[test]
    fn progress_tracks_step(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut wizard = Wizard::default();
        let mut last_step = wizard.step();
        let mut last_progress = wizard.progress_fraction();
        for action in &actions {
            apply(&mut wizard, action);
            let progress = wizard.progress_fraction();
            prop_assert_eq!(progress, f64::from(wizard.step_number()) / 5.0);
            prop_assert!(progress > 0.0 && progress <= 1.0);
            // Monotonic in the step
            if wizard.step() > last_step {
                prop_assert!(progress > last_progress);
            } else if wizard.step() < last_step {
                prop_assert!(progress < last_progress);
            }
            last_step = wizard.step();
            last_progress = progress;
        }
    }

    /// The auxiliary action is read-only
    #[test]
    fn auxiliary_action_does_not_mutate(actions in prop::collection::vec(action_strategy(), 0..30)) {
        let mut wizard = Wizard::default();
        for action in &actions {
            apply(&mut wizard, action);
        }
        let step = wizard.step();
        let answers = *wizard.answers();
        let link = wizard.auxiliary_action().map(str::to_owned);
        prop_assert_eq!(link.is_some(), step == WizardStep::Palette);
        prop_assert_eq!(wizard.step(), step);
        prop_assert_eq!(*wizard.answers(), answers);
    }
}

// =============================================================================
// Theme Properties
// =============================================================================

proptest! {
    /// Steps 1-2 are neutral whatever the gender
    #[test]
    fn early_steps_are_neutral(step in 0u8..=2, gender in prop::option::of(gender_strategy())) {
        prop_assert_eq!(theme::resolve(step, gender), ThemePair::NEUTRAL);
    }

    /// From step 3 on the theme depends only on the gender
    #[test]
    fn later_steps_follow_gender(step in 3u8..=5, other in 3u8..=5, gender in gender_strategy()) {
        let pair = theme::resolve(step, Some(gender));
        prop_assert_eq!(pair, theme::resolve(other, Some(gender)));
        prop_assert_ne!(pair, ThemePair::NEUTRAL);
    }

    /// Different genders never share a theme
    #[test]
    fn genders_have_distinct_themes(step in 3u8..=5, a in gender_strategy(), b in gender_strategy()) {
        let same = theme::resolve(step, Some(a)) == theme::resolve(step, Some(b));
        prop_assert_eq!(same, a == b);
    }
}

// =============================================================================
// Option Label Properties
// =============================================================================

proptest! {
    /// Every displayed label parses back to an option
    #[test]
    fn option_labels_parse(index in 0usize..5) {
        let ages = labels::<AgeRange>();
        let label = &ages[index % ages.len()];
        prop_assert!(label.parse::<AgeRange>().is_ok());
        let styles = labels::<Style>();
        prop_assert!(styles[index % styles.len()].parse::<Style>().is_ok());
        let palettes = labels::<Palette>();
        prop_assert!(palettes[index % palettes.len()].parse::<Palette>().is_ok());
    }
}
