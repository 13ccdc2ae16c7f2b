//! Multi-step profile wizard controller
//!
//! [`WizardSession`] owns the step index, the form, the per-field error map,
//! and the submission flag. Navigation re-validates only the current step;
//! submission re-validates every step so a resubmission after `back` cannot
//! bypass earlier checks. Field errors clear optimistically on edit (no
//! re-validation until the next `next`/`submit`). Every edit schedules a
//! debounced draft save; the draft is deleted only on successful submission
//! or explicit discard.

use crate::api::{ApiError, BackendClient};
use crate::state::draft::DraftStore;
use crate::state::forms::{
    validate_all, validate_step, ErrorMap, IcpForm, REVIEW_STEP, STEPS,
};
use std::time::Duration;
use tokio::time::Instant;

/// Suppression window after a successful advance; a repeated `next` inside
/// it (key autorepeat, double Enter) is ignored
const ADVANCE_GUARD: Duration = Duration::from_millis(200);

/// Whether the session creates a new profile or updates an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { icp_id: i64 },
}

/// Result of a `next` transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to the following step
    Advanced,
    /// Current step failed validation; errors are set, step unchanged
    ValidationFailed,
    /// Already on the review step: the caller should run `submit`
    Submit,
    /// Rejected (mid-submission, completed, or within the advance guard)
    Ignored,
}

/// Result of a `submit` transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the profile; the draft has been cleared
    Completed { id: i64 },
    /// Some step failed re-validation; errors hold the union of failures
    ValidationFailed,
    /// The gateway rejected the request; the form and draft are intact
    Failed,
    /// Rejected (not on the review step, mid-submission, or completed)
    Ignored,
}

/// One active wizard session (one per form; sessions share nothing)
pub struct WizardSession {
    pub mode: WizardMode,
    pub form: IcpForm,
    pub errors: ErrorMap,
    pub is_submitting: bool,
    /// Message from the last failed submission, shown on the review step
    pub submit_error: Option<String>,
    step: usize,
    /// Index into the current step's owned fields
    active_field: usize,
    completed: Option<i64>,
    draft: DraftStore,
    last_advance: Option<Instant>,
    advance_guard: Duration,
}

impl WizardSession {
    /// Start a creation session, resuming from a persisted draft if present
    pub fn new(draft: DraftStore) -> Self {
        let form = match draft.load() {
            Some(values) => IcpForm::from_values(&values),
            None => IcpForm::new(),
        };
        Self {
            mode: WizardMode::Create,
            form,
            errors: ErrorMap::new(),
            is_submitting: false,
            submit_error: None,
            step: 0,
            active_field: 0,
            completed: None,
            draft,
            last_advance: None,
            advance_guard: ADVANCE_GUARD,
        }
    }

    /// Start an edit session pre-filled from an existing profile.
    ///
    /// Any persisted creation draft is ignored (but subsequent edits use the
    /// same single draft slot).
    pub fn for_icp(icp: &crate::state::Icp, draft: DraftStore) -> Self {
        let mut session = Self::new(draft);
        session.mode = WizardMode::Edit { icp_id: icp.id };
        session.form = IcpForm::from_values(&icp.values());
        session
    }

    /// Current step index
    pub fn step(&self) -> usize {
        self.step
    }

    /// Title of the current step
    pub fn step_title(&self) -> &'static str {
        STEPS[self.step].title
    }

    /// Field names owned by the current step
    pub fn step_fields(&self) -> &'static [&'static str] {
        STEPS[self.step].fields
    }

    /// Whether the session sits on the terminal review step
    pub fn is_review(&self) -> bool {
        self.step == REVIEW_STEP
    }

    /// The created/updated resource id once the session has completed
    pub fn completed_id(&self) -> Option<i64> {
        self.completed
    }

    /// Wire name of the field currently focused within the step
    pub fn active_field_name(&self) -> Option<&'static str> {
        self.step_fields().get(self.active_field).copied()
    }

    /// Index of the focused field within the step
    pub fn active_field(&self) -> usize {
        self.active_field
    }

    /// Focus the next field of the current step (wraps)
    pub fn next_field(&mut self) {
        let count = self.step_fields().len();
        if count > 0 && !self.is_submitting {
            self.active_field = (self.active_field + 1) % count;
        }
    }

    /// Focus the previous field of the current step (wraps)
    pub fn prev_field(&mut self) {
        let count = self.step_fields().len();
        if count == 0 || self.is_submitting {
            return;
        }
        if self.active_field == 0 {
            self.active_field = count - 1;
        } else {
            self.active_field -= 1;
        }
    }

    fn frozen(&self) -> bool {
        self.is_submitting || self.completed.is_some()
    }

    /// Set a field's value.
    ///
    /// Clears that field's error immediately without re-validating (the next
    /// `next`/`submit` re-checks) and schedules a debounced draft save.
    pub fn edit(&mut self, field: &str, value: &str) {
        if self.frozen() {
            return;
        }
        let Some(form_field) = self.form.field_mut(field) else {
            return;
        };
        form_field.set(value);
        self.after_edit(field);
    }

    /// Append a character to the focused field
    pub fn push_char(&mut self, c: char) {
        if self.frozen() {
            return;
        }
        let Some(name) = self.active_field_name() else {
            return;
        };
        if let Some(field) = self.form.field_mut(name) {
            field.push_char(c);
        }
        self.after_edit(name);
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        if self.frozen() {
            return;
        }
        let Some(name) = self.active_field_name() else {
            return;
        };
        if let Some(field) = self.form.field_mut(name) {
            field.pop_char();
        }
        self.after_edit(name);
    }

    /// Cycle the focused select field forward
    pub fn select_next(&mut self) {
        if self.frozen() {
            return;
        }
        let Some(name) = self.active_field_name() else {
            return;
        };
        if let Some(field) = self.form.field_mut(name) {
            field.select_next();
        }
        self.after_edit(name);
    }

    /// Cycle the focused select field backward
    pub fn select_prev(&mut self) {
        if self.frozen() {
            return;
        }
        let Some(name) = self.active_field_name() else {
            return;
        };
        if let Some(field) = self.form.field_mut(name) {
            field.select_prev();
        }
        self.after_edit(name);
    }

    fn after_edit(&mut self, field: &str) {
        self.errors.remove(field);
        self.submit_error = None;
        self.draft.save(&self.form.values());
    }

    /// Validate the current step and advance on success.
    ///
    /// On the review step this returns [`NextOutcome::Submit`] instead; the
    /// caller drives the asynchronous `submit`.
    pub fn next(&mut self) -> NextOutcome {
        if self.frozen() {
            return NextOutcome::Ignored;
        }
        if self.is_review() {
            return NextOutcome::Submit;
        }
        if let Some(advanced_at) = self.last_advance {
            if advanced_at.elapsed() < self.advance_guard {
                return NextOutcome::Ignored;
            }
        }

        let errors = validate_step(self.step, &self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return NextOutcome::ValidationFailed;
        }

        self.errors.clear();
        self.step += 1;
        self.active_field = 0;
        self.last_advance = Some(Instant::now());
        NextOutcome::Advanced
    }

    /// Move to the previous step without validation; entered values are kept
    pub fn back(&mut self) {
        if self.frozen() || self.step == 0 {
            return;
        }
        self.step -= 1;
        self.active_field = 0;
    }

    /// Re-validate every step and dispatch the profile to the backend.
    ///
    /// Valid only from the review step. On gateway failure the form and the
    /// persisted draft stay intact so the user can retry; on success the
    /// draft is cleared and the session completes with the resource id.
    pub async fn submit<C>(&mut self, client: &mut C) -> SubmitOutcome
    where
        C: BackendClient + ?Sized,
    {
        if self.frozen() || !self.is_review() {
            return SubmitOutcome::Ignored;
        }

        let errors = validate_all(&self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return SubmitOutcome::ValidationFailed;
        }
        self.errors.clear();
        self.submit_error = None;

        self.is_submitting = true;
        let payload = self.form.values();
        let result = match &self.mode {
            WizardMode::Create => client.create_icp(&payload).await,
            WizardMode::Edit { icp_id } => client.update_icp(*icp_id, &payload).await,
        };
        self.is_submitting = false;

        match result {
            Ok(icp) => {
                self.draft.clear();
                self.completed = Some(icp.id);
                tracing::info!(icp_id = icp.id, "profile saved");
                SubmitOutcome::Completed { id: icp.id }
            }
            Err(err) => {
                tracing::warn!(code = %err.code, "profile submission rejected: {err}");
                self.submit_error = Some(submission_message(&err));
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete the persisted draft (explicit discard)
    pub fn discard_draft(&mut self) {
        self.draft.clear();
    }

    /// Wait for any pending debounced draft write (shutdown path)
    pub async fn flush_draft(&mut self) {
        self.draft.flush().await;
    }
}

/// User-facing message for a failed submission
fn submission_message(err: &ApiError) -> String {
    if err.code == "network" {
        format!("{err} — your answers are saved, try again")
    } else {
        err.to_string()
    }
}
