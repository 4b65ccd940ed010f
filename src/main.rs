//! colorwise - Main entry point
//!
//! Parses the command line, resolves settings and either starts the terminal
//! UI or runs one of the headless subcommands.

use anyhow::{Context, Result};
use clap::Parser;
use colorwise::app::App;
use colorwise::cli::{Cli, Commands};
use colorwise::config::Settings;
use colorwise::error::ColorwiseError;
use colorwise::pairing::{HttpPairingService, OfflinePairingService, PairingService};
use colorwise::reference::SystemOpener;
use colorwise::types::{AgeRange, Gender, Palette, Style};
use colorwise::wizard::{SubmissionState, Wizard, WizardStep};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Where log output goes
enum LogTarget<'a> {
    /// The terminal belongs to the UI, so logs go to a file
    File(&'a Path),
    Stderr,
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the `info` default.
fn init_logging(target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Validate { file }) = &cli.command {
        init_logging(LogTarget::Stderr)?;
        validate_settings(file);
        return Ok(());
    }

    let settings = match Settings::resolve(cli.config.as_deref(), &cli.overrides()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("✗ Invalid settings: {:#}", e);
            std::process::exit(2);
        }
    };

    if cli.is_interactive() {
        let log_path = settings.log_path();
        init_logging(LogTarget::File(&log_path))?;
    } else {
        init_logging(LogTarget::Stderr)?;
    }
    info!("colorwise starting up");
    debug!(?settings, "Settings resolved");

    match cli.command {
        Some(Commands::Pair {
            age,
            gender,
            style,
            palette,
        }) => {
            let service = build_service(&settings, cli.offline)?;
            if !run_pair(&settings, service.as_ref(), age, gender, style, palette)? {
                std::process::exit(1);
            }
        }
        Some(Commands::Options) => print_options(),
        Some(Commands::Validate { .. }) => {}
        Some(Commands::Run) | None => {
            info!("Launching interactive questionnaire");
            let service = build_service(&settings, cli.offline)?;
            run_tui(&settings, service)?;
        }
    }

    Ok(())
}

fn build_service(settings: &Settings, offline: bool) -> Result<Arc<dyn PairingService>> {
    if offline {
        info!("Offline mode: pairing answered locally");
        return Ok(Arc::new(OfflinePairingService));
    }
    let service = HttpPairingService::new(settings).context("Failed to build HTTP client")?;
    info!("Pairing endpoint: {}", service.endpoint());
    Ok(Arc::new(service))
}

fn validate_settings(path: &Path) {
    info!("Validating settings file: {:?}", path);
    match Settings::load_from_file(path) {
        Ok(settings) => match settings.validate() {
            Ok(()) => {
                info!("Settings validation successful");
                println!("✓ Settings file is valid: {}", path.display());
                println!("  pairing endpoint: {}", settings.pair_endpoint());
            }
            Err(e) => {
                error!("Settings validation failed: {}", e);
                eprintln!("✗ Settings validation failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to load settings file: {:#}", e);
            eprintln!("✗ Failed to load settings file: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn print_options() {
    for step in WizardStep::all().iter().filter(|s| !s.is_terminal()) {
        println!("{} ({})", step, step.title());
        for option in step.options() {
            println!("  {}", option);
        }
    }
}

/// Drive the wizard headlessly. Returns `false` when pairing failed.
fn run_pair(
    settings: &Settings,
    service: &dyn PairingService,
    age: AgeRange,
    gender: Gender,
    style: Style,
    palette: Palette,
) -> Result<bool> {
    let mut wizard = Wizard::new(settings.reference_url.clone());
    for (step, value) in [
        (WizardStep::Age, age.to_string()),
        (WizardStep::Gender, gender.to_string()),
        (WizardStep::Style, style.to_string()),
        (WizardStep::Palette, palette.to_string()),
    ] {
        if !wizard.select_option(step, &value) || !wizard.advance().moved() {
            anyhow::bail!("{} answer {:?} was not accepted", step, value);
        }
    }

    let submission = wizard
        .begin_submission()
        .context("Answers incomplete, nothing to submit")?;
    let result = service.submit_answers(&submission.request);
    wizard.complete_submission(submission.ticket, result);

    for line in wizard.summary_lines() {
        println!("{}", line);
    }
    println!();

    match wizard.submission() {
        SubmissionState::Delivered(outfit) => {
            for line in outfit.display_lines() {
                println!("{}", line);
            }
            Ok(true)
        }
        SubmissionState::Failed { reason } => {
            eprintln!("✗ Could not get a recommendation: {}", reason);
            Ok(false)
        }
        other => anyhow::bail!("Unexpected submission state {:?}", other),
    }
}

/// Run the terminal UI
fn run_tui(settings: &Settings, service: Arc<dyn PairingService>) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| ColorwiseError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    if let Err(e) = crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(
            ColorwiseError::terminal(format!("Failed to enter alternate screen: {}", e)).into(),
        );
    }

    let result = (|| -> Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)
            .map_err(|e| ColorwiseError::terminal(format!("Failed to create terminal: {}", e)))?;

        let wizard = Wizard::new(settings.reference_url.clone());
        let mut app = App::new(wizard, service, Box::new(SystemOpener));
        app.run(&mut terminal)?;
        Ok(())
    })();

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Err(ref e) = result {
        error!("Interactive session failed: {:#}", e);
    }
    result
}
