//! Opening the external color-analysis reference.
//!
//! The palette step's "I don't know" entry hands a URL to the platform's
//! default opener. The child is detached (stdio nulled) and never waited on,
//! so a slow browser start cannot stall the event loop.

use crate::config::is_http_url;
use crate::error::{ColorwiseError, Result};
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Something that can show a URL to the user
pub trait ReferenceOpener {
    fn open(&self, url: &str) -> Result<()>;
}

/// Launches the OS default handler for URLs
#[derive(Debug, Clone, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl ReferenceOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        if !is_http_url(url) {
            return Err(ColorwiseError::config(format!(
                "Refusing to open non-http reference {:?}",
                url
            )));
        }

        info!("Opening reference resource {}", url);
        Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| {
                warn!("Failed to launch URL opener: {}", e);
                ColorwiseError::general(format!("Could not open {}: {}", url, e))
            })
    }
}
