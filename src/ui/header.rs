//! Progress gauge and the chrome shared by every screen.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::theme::Styles;
use crate::wizard::{Wizard, WizardStep};
use ratatui::{Frame, layout::Rect, widgets::Gauge};

/// Label drawn inside the gauge.
pub fn progress_label(wizard: &Wizard) -> String {
    format!(
        "Step {} of {}",
        wizard.step_number(),
        WizardStep::TOTAL_STEPS
    )
}

/// Render the progress bar filled to `step / 5`
pub fn render_progress(f: &mut Frame, area: Rect, wizard: &Wizard) {
    if area.height == 0 {
        return;
    }
    let gauge = Gauge::default()
        .gauge_style(Styles::gauge(wizard.theme()))
        .ratio(wizard.progress_fraction().clamp(0.0, 1.0))
        .label(progress_label(wizard));
    f.render_widget(gauge, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let nav_items = keybinding_ctx.get_nav_items(state.key_context());
    NavBar::new(nav_items).render(f, area, state.theme());
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(state.key_context(), keybinding_ctx);
    help_overlay.render(f, f.area());
}
