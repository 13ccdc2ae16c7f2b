//! Auto-saved wizard drafts
//!
//! The whole form is persisted as JSON under a single well-known file in the
//! user data directory, debounced so that at most one write happens per
//! quiet period of typing. Drafts outlive the process and are deleted on
//! successful submission or explicit discard. Storage failures are logged
//! and swallowed; the wizard keeps working in memory.

use crate::state::IcpValues;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet period before a pending draft hits disk
pub const DRAFT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// On-disk draft: the serialized form plus when it was last saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub saved_at: DateTime<Utc>,
    pub form: IcpValues,
}

/// Debounced persistence for the single wizard draft slot.
///
/// `save` must be called from within a tokio runtime (it schedules the
/// delayed write as a task). Only one draft can exist at a time: a second
/// wizard session overwrites the first's file.
pub struct DraftStore {
    path: Option<PathBuf>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DraftStore {
    /// Store at the default per-user location
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
            delay: DRAFT_DEBOUNCE,
            pending: None,
        }
    }

    /// Store at an explicit path with an explicit debounce interval
    pub fn with_path(path: PathBuf, delay: Duration) -> Self {
        Self {
            path: Some(path),
            delay,
            pending: None,
        }
    }

    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "resonate", "resonate-tui")
            .map(|dirs| dirs.data_dir().join("icp_draft.json"))
    }

    /// Schedule a persist of the full form after the quiet period.
    ///
    /// A new call within the window cancels and restarts the timer
    /// (trailing-edge debounce).
    pub fn save(&mut self, form: &IcpValues) {
        let Some(path) = self.path.clone() else {
            return;
        };
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let draft = Draft {
            saved_at: Utc::now(),
            form: form.clone(),
        };
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = write_draft(&path, &draft) {
                tracing::warn!("failed to persist draft: {err}");
            }
        }));
    }

    /// Synchronously read the last persisted form.
    ///
    /// Missing or malformed drafts are treated as absent, never as errors.
    pub fn load(&self) -> Option<IcpValues> {
        let path = self.path.as_ref()?;
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<Draft>(&content) {
            Ok(draft) => Some(draft.form),
            Err(err) => {
                tracing::debug!("discarding malformed draft: {err}");
                None
            }
        }
    }

    /// Delete the persisted draft immediately and cancel any pending write.
    ///
    /// Idempotent: clearing with no existing draft is a no-op.
    pub fn clear(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if let Err(err) = fs::remove_file(path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to delete draft: {err}");
            }
        }
    }

    /// Wait for a pending debounced write to land (used on shutdown so the
    /// latest keystrokes are not lost to the quiet period).
    pub async fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.await;
        }
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

fn write_draft(path: &Path, draft: &Draft) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(draft)?;
    fs::write(path, content)?;
    Ok(())
}
