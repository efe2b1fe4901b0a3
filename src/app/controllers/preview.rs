use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::buffers::SourceSnapshot;
use crate::app::infrastructure::error::Result;
use crate::app::services::composer::{compose, compose_standalone};
use crate::app::services::sandbox::{SandboxPolicy, host_page};
use crate::app::services::scheduler::RunScheduler;

const HOST_PAGE_FILE: &str = "preview.html";
const BROWSER_EXPORT_FILE: &str = "project.html";

/// What caused a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTrigger {
    /// First render after launch.
    Startup,
    /// Debounce timer.
    Auto,
    /// Run button, menu item or Ctrl+Enter.
    Manual,
}

impl RunTrigger {
    /// Manual runs report failures in a dialog and may open the system browser.
    pub fn is_manual(self) -> bool {
        self == Self::Manual
    }
}

/// Decides when the preview runs and produces what it loads.
pub struct PreviewController {
    pub scheduler: RunScheduler,
    policy: SandboxPolicy,
    runs: u64,
}

impl PreviewController {
    pub fn new(auto_run: bool) -> Self {
        Self {
            scheduler: RunScheduler::new(auto_run),
            policy: SandboxPolicy::PLAYGROUND,
            runs: 0,
        }
    }

    pub fn policy(&self) -> &SandboxPolicy {
        &self.policy
    }

    /// Number of compositions produced so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Compose `snapshot` and wrap it in the sandbox host page.
    pub fn render(&mut self, snapshot: &SourceSnapshot) -> String {
        self.runs += 1;
        host_page(&compose(snapshot), &self.policy)
    }

    /// Manual run: cancels any pending auto-run and renders immediately.
    pub fn run_now(&mut self, snapshot: &SourceSnapshot) -> String {
        self.scheduler.run_now();
        self.render(snapshot)
    }

    /// First render after launch. Leaves the scheduler untouched.
    pub fn startup(&mut self, snapshot: &SourceSnapshot) -> String {
        self.render(snapshot)
    }

    /// Debounce timer fired. Renders only if `ticket` is still current.
    pub fn on_timer(&mut self, ticket: u64, snapshot: &SourceSnapshot) -> Option<String> {
        if self.scheduler.on_timer(ticket) {
            Some(self.render(snapshot))
        } else {
            None
        }
    }
}

/// Write the host page for the webview and return its path.
pub fn write_preview_file(page: &str) -> Result<PathBuf> {
    let path = preview_dir()?.join(HOST_PAGE_FILE);
    fs::write(&path, page)?;
    Ok(path)
}

/// Write the standalone document to a user-chosen path.
pub fn export_standalone(snapshot: &SourceSnapshot, path: &Path) -> Result<()> {
    fs::write(path, compose_standalone(snapshot))?;
    Ok(())
}

/// Write the standalone document to the temp directory for the system browser.
pub fn write_browser_copy(snapshot: &SourceSnapshot) -> Result<PathBuf> {
    let path = preview_dir()?.join(BROWSER_EXPORT_FILE);
    export_standalone(snapshot, &path)?;
    Ok(path)
}

/// Remove the temp directory holding preview files.
pub fn cleanup_preview_files() {
    let dir = std::env::temp_dir().join("ferrispen");
    match fs::remove_dir_all(&dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::debug!("Could not remove {}: {}", dir.display(), e),
    }
}

fn preview_dir() -> Result<PathBuf> {
    let dir = std::env::temp_dir().join("ferrispen");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
