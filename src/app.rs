//! Application state and core logic

use crate::api::{ApiClient, BackendClient};
use crate::config::TuiConfig;
use crate::platform::COMMAND_MODIFIER;
use crate::state::{
    AnalyzeForm, AppState, DraftStore, ErrorMap, Form, IcpSortField, LoginForm, NextOutcome,
    SortDirection, SubmitOutcome, View, WizardSession,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Client for the Resonate backend
    pub api: ApiClient,
    /// Persisted user configuration
    pub config: TuiConfig,
    /// Login form (only meaningful in the Login view)
    pub login_form: LoginForm,
    /// Login validation errors
    pub login_errors: ErrorMap,
    /// Active wizard session, if a profile is being created or edited
    pub wizard: Option<WizardSession>,
    /// Email analyzer form
    pub analyze_form: AnalyzeForm,
    /// Analyzer validation errors
    pub analyze_errors: ErrorMap,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    #[allow(clippy::field_reassign_with_default)]
    pub async fn new() -> Result<Self> {
        let config = TuiConfig::load().unwrap_or_default();
        let api = ApiClient::new(config.resolved_base_url())?;

        let mut state = AppState::default();
        state.icp_sort_field = sort_field_from_config(config.icp_sort_field.as_deref());
        state.icp_sort_direction = sort_direction_from_config(config.icp_sort_direction.as_deref());

        let mut login_form = LoginForm::new();
        if let Some(email) = &config.login_email {
            login_form.email.set(email);
        }

        let mut app = Self {
            state,
            api,
            config,
            login_form,
            login_errors: ErrorMap::new(),
            wizard: None,
            analyze_form: AnalyzeForm::new(),
            analyze_errors: ErrorMap::new(),
            quit: false,
        };

        // A pre-issued token (RESONATE_TOKEN) skips the login form
        if app.api.is_authenticated() {
            app.state.current_view = View::Icps;
            app.refresh_icps().await;
        }

        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Flush pending background work before exiting (draft writes)
    pub async fn shutdown(&mut self) {
        if let Some(session) = self.wizard.as_mut() {
            session.flush_draft().await;
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle delete confirmation (modal)
        if self.state.confirm_delete.is_some() {
            self.handle_confirm_delete_key(key).await;
            return Ok(());
        }

        self.state.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key).await,
            View::Icps => self.handle_icps_key(key).await?,
            View::IcpDetail => self.handle_icp_detail_key(key),
            View::Wizard => self.handle_wizard_key(key).await,
            View::Analyze => self.handle_analyze_key(key).await,
            View::AnalysisDetail | View::Audit => self.handle_scroll_view_key(key),
        }
        Ok(())
    }

    async fn handle_confirm_delete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(icp_id) = self.state.confirm_delete.take() {
                    match self.api.delete_icp(icp_id).await {
                        Ok(()) => {
                            self.state.status_message = Some("Profile deleted".to_string());
                            self.refresh_icps().await;
                        }
                        Err(err) => self.push_error(format!("Failed to delete profile: {err}")),
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state.confirm_delete = None;
            }
            _ => {}
        }
    }

    async fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.login_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.login_form.prev_field(),
            KeyCode::Enter => self.submit_login().await,
            KeyCode::Backspace => {
                let field = self.login_form.get_active_field_mut();
                field.pop_char();
                self.login_errors.remove(field.name);
            }
            KeyCode::Char(c) => {
                let field = self.login_form.get_active_field_mut();
                field.push_char(c);
                self.login_errors.remove(field.name);
            }
            _ => {}
        }
    }

    async fn submit_login(&mut self) {
        let errors = self.login_form.validate();
        if !errors.is_empty() {
            self.login_errors = errors;
            return;
        }
        self.login_errors.clear();

        let email = self.login_form.email.as_str().to_string();
        let password = self.login_form.password.as_str().to_string();
        match self.api.login(&email, &password).await {
            Ok(()) => {
                self.state.user_email = Some(email.clone());
                self.config.login_email = Some(email);
                if let Err(err) = self.config.save() {
                    tracing::warn!("failed to save config: {err}");
                }
                self.login_form.password.clear();
                self.state.current_view = View::Icps;
                self.refresh_icps().await;
            }
            Err(err) => self.push_error(err.to_string()),
        }
    }

    async fn handle_icps_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_selection_down(self.state.icps.len());
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(icp_id) = self.state.selected_icp().map(|icp| icp.id) {
                    self.open_icp_detail(icp_id).await;
                }
            }
            KeyCode::Char('n') => self.start_create_wizard(),
            KeyCode::Char('e') => self.start_edit_wizard(),
            KeyCode::Char('d') => {
                self.state.confirm_delete = self.state.selected_icp().map(|icp| icp.id);
            }
            KeyCode::Char('a') => {
                self.analyze_errors.clear();
                self.analyze_form.selected_icp = 0;
                self.state.current_view = View::Analyze;
            }
            KeyCode::Char('g') => {
                self.load_audit_logs().await;
                self.state.scroll_offset = 0;
                self.state.current_view = View::Audit;
            }
            KeyCode::Char('s') => {
                self.state.cycle_icp_sort_field();
                self.persist_sort_preferences();
            }
            KeyCode::Char('S') => {
                self.state.toggle_icp_sort_direction();
                self.persist_sort_preferences();
            }
            KeyCode::Char('r') => {
                self.refresh_icps().await;
                self.state.status_message = Some("Refreshed".to_string());
            }
            _ => {}
        }
        Ok(())
    }

    async fn open_icp_detail(&mut self, icp_id: i64) {
        // Refresh the profile so the detail view shows current data; the
        // cached list entry is good enough when the backend is unreachable
        match self.api.get_icp(icp_id).await {
            Ok(icp) => {
                if let Some(existing) = self.state.icps.iter_mut().find(|i| i.id == icp_id) {
                    *existing = icp;
                }
            }
            Err(err) => tracing::debug!(code = %err.code, "using cached profile: {err}"),
        }
        self.state.scroll_offset = 0;
        self.state.current_view = View::IcpDetail;
    }

    fn handle_icp_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Icps,
            KeyCode::Char('e') => self.start_edit_wizard(),
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            _ => {}
        }
    }

    fn start_create_wizard(&mut self) {
        let store = DraftStore::new();
        let resumed = store.load().is_some();
        self.wizard = Some(WizardSession::new(store));
        if resumed {
            self.state.status_message = Some("Resumed saved draft".to_string());
        }
        self.state.current_view = View::Wizard;
    }

    fn start_edit_wizard(&mut self) {
        let Some(icp) = self.state.selected_icp() else {
            return;
        };
        self.wizard = Some(WizardSession::for_icp(icp, DraftStore::new()));
        self.state.current_view = View::Wizard;
    }

    async fn handle_wizard_key(&mut self, key: KeyEvent) {
        let Some(session) = self.wizard.as_mut() else {
            self.state.current_view = View::Icps;
            return;
        };

        // Discard draft and close
        if key.code == KeyCode::Char('d') && key.modifiers.contains(COMMAND_MODIFIER) {
            session.discard_draft();
            self.close_wizard().await;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                // Keep the draft: the session can be resumed later
                self.close_wizard().await;
            }
            KeyCode::Tab => session.next_field(),
            KeyCode::BackTab => session.prev_field(),
            KeyCode::Left => session.select_prev(),
            KeyCode::Right => session.select_next(),
            KeyCode::Backspace => {
                if session.is_review() {
                    session.back();
                } else {
                    session.backspace();
                }
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                // Newline in multiline fields; plain Enter advances the step
                if let Some(name) = session.active_field_name() {
                    if session
                        .form
                        .field(name)
                        .is_some_and(|field| field.is_multiline)
                    {
                        session.push_char('\n');
                    }
                }
            }
            KeyCode::Enter => {
                if session.next() == NextOutcome::Submit {
                    self.submit_wizard().await;
                }
            }
            KeyCode::Char(c) => session.push_char(c),
            _ => {}
        }
    }

    async fn submit_wizard(&mut self) {
        let Some(session) = self.wizard.as_mut() else {
            return;
        };
        match session.submit(&mut self.api).await {
            SubmitOutcome::Completed { id } => {
                self.wizard = None;
                self.state.status_message = Some("Profile saved!".to_string());
                self.refresh_icps().await;
                // Land on the saved profile
                if let Some(index) = self
                    .state
                    .sorted_icps()
                    .iter()
                    .position(|icp| icp.id == id)
                {
                    self.state.selected_index = index;
                }
                self.state.current_view = View::Icps;
            }
            // The review screen renders the error map / gateway message
            SubmitOutcome::ValidationFailed | SubmitOutcome::Failed | SubmitOutcome::Ignored => {}
        }
    }

    async fn close_wizard(&mut self) {
        if let Some(session) = self.wizard.as_mut() {
            session.flush_draft().await;
        }
        self.wizard = None;
        self.state.current_view = View::Icps;
    }

    async fn handle_analyze_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(COMMAND_MODIFIER) {
            self.submit_analysis().await;
            return;
        }
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Icps,
            KeyCode::Left => {
                if self.analyze_form.selected_icp > 0 {
                    self.analyze_form.selected_icp -= 1;
                }
            }
            KeyCode::Right => {
                if self.analyze_form.selected_icp + 1 < self.state.icps.len() {
                    self.analyze_form.selected_icp += 1;
                }
            }
            KeyCode::Enter => {
                self.analyze_form.content.push_char('\n');
                self.analyze_errors.remove("emailContent");
            }
            KeyCode::Backspace => {
                self.analyze_form.content.pop_char();
                self.analyze_errors.remove("emailContent");
            }
            KeyCode::Char(c) => {
                self.analyze_form.content.push_char(c);
                self.analyze_errors.remove("emailContent");
            }
            _ => {}
        }
    }

    async fn submit_analysis(&mut self) {
        let errors = self.analyze_form.validate();
        if !errors.is_empty() {
            self.analyze_errors = errors;
            return;
        }
        self.analyze_errors.clear();

        let Some(icp_id) = self
            .state
            .icps
            .get(self.analyze_form.selected_icp)
            .map(|icp| icp.id)
        else {
            self.push_error("Create a profile before analyzing an email");
            return;
        };

        let content = self.analyze_form.content.as_str().to_string();
        match self.api.analyze_email(icp_id, &content).await {
            Ok(analysis) => {
                self.state.analysis = Some(analysis);
                self.state.scroll_offset = 0;
                self.state.current_view = View::AnalysisDetail;
            }
            Err(err) => self.push_error(format!("Analysis failed: {err}")),
        }
    }

    fn handle_scroll_view_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                let back_to = match self.state.current_view {
                    View::AnalysisDetail => View::Analyze,
                    _ => View::Icps,
                };
                self.state.current_view = back_to;
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            _ => {}
        }
    }

    /// Reload the ICP list from the backend
    pub async fn refresh_icps(&mut self) {
        match self.api.list_icps().await {
            Ok(icps) => {
                if self.state.selected_index >= icps.len() {
                    self.state.reset_selection();
                }
                self.state.icps = icps;
            }
            Err(err) => {
                tracing::warn!(code = %err.code, "failed to list profiles: {err}");
                self.push_error(format!("Failed to load profiles: {err}"));
            }
        }
    }

    async fn load_audit_logs(&mut self) {
        match self.api.list_audit_logs().await {
            Ok(logs) => self.state.audit_logs = logs,
            Err(err) => self.push_error(format!("Failed to load audit log: {err}")),
        }
    }

    fn persist_sort_preferences(&mut self) {
        self.config.icp_sort_field = Some(
            match self.state.icp_sort_field {
                IcpSortField::Name => "name",
                IcpSortField::Industry => "industry",
                IcpSortField::CreatedAt => "created",
            }
            .to_string(),
        );
        self.config.icp_sort_direction = Some(
            match self.state.icp_sort_direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            }
            .to_string(),
        );
        if let Err(err) = self.config.save() {
            tracing::warn!("failed to save config: {err}");
        }
    }
}

fn sort_field_from_config(value: Option<&str>) -> IcpSortField {
    match value {
        Some("industry") => IcpSortField::Industry,
        Some("created") => IcpSortField::CreatedAt,
        _ => IcpSortField::Name,
    }
}

fn sort_direction_from_config(value: Option<&str>) -> SortDirection {
    match value {
        Some("desc") => SortDirection::Desc,
        _ => SortDirection::Asc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Icp;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn icp(id: i64, name: &str) -> Icp {
        Icp {
            id,
            name: name.to_string(),
            description: String::new(),
            industry: "Software".to_string(),
            company_size: "11-50".to_string(),
            persona_title: "VP of Sales".to_string(),
            persona_responsibilities: String::new(),
            pain_points: String::new(),
            goals: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// App wired to a backend that is not there; network-free paths only
    async fn offline_app() -> App {
        let config = TuiConfig::default();
        let api = ApiClient::new("http://127.0.0.1:1").unwrap();
        App {
            state: AppState::default(),
            api,
            config,
            login_form: LoginForm::new(),
            login_errors: ErrorMap::new(),
            wizard: None,
            analyze_form: AnalyzeForm::new(),
            analyze_errors: ErrorMap::new(),
            quit: false,
        }
    }

    #[tokio::test]
    async fn test_login_enter_with_empty_form_sets_validation_errors() {
        let mut app = offline_app().await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.login_errors.contains_key("email"));
        assert!(app.login_errors.contains_key("password"));
        assert_eq!(app.state.current_view, View::Login);
    }

    #[tokio::test]
    async fn test_login_typing_clears_field_error() {
        let mut app = offline_app().await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.login_errors.contains_key("email"));
        app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
        assert!(!app.login_errors.contains_key("email"));
        assert!(app.login_errors.contains_key("password"));
    }

    #[tokio::test]
    async fn test_icps_navigation_keys() {
        let mut app = offline_app().await;
        app.state.current_view = View::Icps;
        app.state.icps = vec![icp(1, "alpha"), icp(2, "beta"), icp(3, "gamma")];

        app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        assert_eq!(app.state.selected_index, 2);
        app.handle_key(key(KeyCode::Char('k'))).await.unwrap();
        assert_eq!(app.state.selected_index, 1);
    }

    #[tokio::test]
    async fn test_enter_opens_detail_view() {
        let mut app = offline_app().await;
        app.state.current_view = View::Icps;
        app.state.icps = vec![icp(1, "alpha")];
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.current_view, View::IcpDetail);
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.current_view, View::Icps);
    }

    #[tokio::test]
    async fn test_delete_asks_for_confirmation_and_cancel_keeps() {
        let mut app = offline_app().await;
        app.state.current_view = View::Icps;
        app.state.icps = vec![icp(1, "alpha")];

        app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
        assert_eq!(app.state.confirm_delete, Some(1));

        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.confirm_delete, None);
        assert_eq!(app.state.icps.len(), 1);
    }

    #[tokio::test]
    async fn test_error_modal_swallows_keys_until_dismissed() {
        let mut app = offline_app().await;
        app.state.current_view = View::Icps;
        app.push_error("boom");

        // 'q' would normally quit; the modal eats it
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(!app.state.has_errors());
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_sort_keys_update_state() {
        let mut app = offline_app().await;
        app.state.current_view = View::Icps;
        app.handle_key(key(KeyCode::Char('S'))).await.unwrap();
        assert_eq!(app.state.icp_sort_direction, SortDirection::Desc);
        app.handle_key(key(KeyCode::Char('s'))).await.unwrap();
        assert_eq!(app.state.icp_sort_field, IcpSortField::Industry);
    }

    #[tokio::test]
    async fn test_analyze_picker_stays_in_bounds() {
        let mut app = offline_app().await;
        app.state.current_view = View::Analyze;
        app.state.icps = vec![icp(1, "alpha"), icp(2, "beta")];

        app.handle_key(key(KeyCode::Left)).await.unwrap();
        assert_eq!(app.analyze_form.selected_icp, 0);
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.analyze_form.selected_icp, 1);
    }

    #[tokio::test]
    async fn test_analyze_submit_blocked_by_short_content() {
        let mut app = offline_app().await;
        app.state.current_view = View::Analyze;
        app.state.icps = vec![icp(1, "alpha")];
        app.analyze_form.content.set("too short");

        let submit = KeyEvent::new(KeyCode::Char('s'), COMMAND_MODIFIER);
        app.handle_key(submit).await.unwrap();
        assert!(app.analyze_errors.contains_key("emailContent"));
        assert_eq!(app.state.current_view, View::Analyze);
    }

    #[test]
    fn test_sort_config_round_trip() {
        assert_eq!(sort_field_from_config(Some("created")), IcpSortField::CreatedAt);
        assert_eq!(sort_field_from_config(Some("nonsense")), IcpSortField::Name);
        assert_eq!(sort_direction_from_config(Some("desc")), SortDirection::Desc);
        assert_eq!(sort_direction_from_config(None), SortDirection::Asc);
    }
}
