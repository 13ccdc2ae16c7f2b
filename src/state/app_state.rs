//! Application state definitions

use crate::state::IcpValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Icps,
    IcpDetail,
    Wizard,
    Analyze,
    AnalysisDetail,
    Audit,
}

/// Sort field for the ICP list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IcpSortField {
    #[default]
    Name,
    Industry,
    CreatedAt,
}

impl IcpSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Industry,
            Self::Industry => Self::CreatedAt,
            Self::CreatedAt => Self::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Industry => "Industry",
            Self::CreatedAt => "Created",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// An Ideal Customer Profile as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icp {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub persona_title: String,
    #[serde(default)]
    pub persona_responsibilities: String,
    #[serde(default)]
    pub pain_points: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Icp {
    /// Profile fields as a form snapshot (edit flow pre-fill)
    pub fn values(&self) -> IcpValues {
        IcpValues {
            name: self.name.clone(),
            description: self.description.clone(),
            industry: self.industry.clone(),
            company_size: self.company_size.clone(),
            persona_title: self.persona_title.clone(),
            persona_responsibilities: self.persona_responsibilities.clone(),
            pain_points: self.pain_points.clone(),
            goals: self.goals.clone(),
        }
    }
}

/// Structured feedback inside an analysis result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisFeedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub icp_alignment_score: Option<f64>,
    pub persona_match_score: Option<f64>,
}

/// Result of analyzing one email against an ICP.
///
/// The resonance score is computed by the backend and opaque to this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAnalysis {
    pub id: i64,
    pub icp_id: i64,
    #[serde(default)]
    pub resonance_score: Option<f64>,
    #[serde(default)]
    pub feedback: AnalysisFeedback,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i64,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Data
    pub icps: Vec<Icp>,
    pub audit_logs: Vec<AuditLog>,
    pub analysis: Option<EmailAnalysis>,

    // Session
    pub user_email: Option<String>,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Sorting
    pub icp_sort_field: IcpSortField,
    pub icp_sort_direction: SortDirection,

    // UI state
    pub status_message: Option<String>,
    pub confirm_delete: Option<i64>,
    errors: Vec<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Scroll down
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Cycle ICP sort field
    pub fn cycle_icp_sort_field(&mut self) {
        self.icp_sort_field = self.icp_sort_field.next();
        self.reset_selection();
    }

    /// Toggle ICP sort direction
    pub fn toggle_icp_sort_direction(&mut self) {
        self.icp_sort_direction = self.icp_sort_direction.toggle();
        self.reset_selection();
    }

    /// Get sorted ICPs
    pub fn sorted_icps(&self) -> Vec<&Icp> {
        let mut icps: Vec<_> = self.icps.iter().collect();

        icps.sort_by(|a, b| {
            let cmp = match self.icp_sort_field {
                IcpSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                IcpSortField::Industry => a.industry.cmp(&b.industry),
                IcpSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };

            match self.icp_sort_direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        });

        icps
    }

    /// The currently selected ICP, honoring the sorted order
    pub fn selected_icp(&self) -> Option<&Icp> {
        self.sorted_icps().get(self.selected_index).copied()
    }

    /// Push an error message onto the display queue
    pub fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Whether any error is waiting to be dismissed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icp(id: i64, name: &str, industry: &str) -> Icp {
        Icp {
            id,
            name: name.to_string(),
            description: String::new(),
            industry: industry.to_string(),
            company_size: "11-50".to_string(),
            persona_title: "VP of Sales".to_string(),
            persona_responsibilities: String::new(),
            pain_points: String::new(),
            goals: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn test_move_selection_down_stops_at_end() {
            let mut state = AppState::default();
            state.move_selection_down(2);
            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_move_selection_down_with_empty_list() {
            let mut state = AppState::default();
            state.move_selection_down(0);
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_move_selection_up_stops_at_zero() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_reset_selection() {
            let mut state = AppState::default();
            state.selected_index = 3;
            state.scroll_offset = 7;
            state.reset_selection();
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.scroll_offset, 0);
        }
    }

    mod sorting {
        use super::*;

        #[test]
        fn test_sorted_by_name_case_insensitive() {
            let mut state = AppState::default();
            state.icps = vec![icp(1, "zeta", "Software"), icp(2, "Alpha", "Finance")];
            let sorted = state.sorted_icps();
            assert_eq!(sorted[0].id, 2);
            assert_eq!(sorted[1].id, 1);
        }

        #[test]
        fn test_sort_direction_reverses() {
            let mut state = AppState::default();
            state.icps = vec![icp(1, "a", "Software"), icp(2, "b", "Finance")];
            state.icp_sort_direction = SortDirection::Desc;
            let sorted = state.sorted_icps();
            assert_eq!(sorted[0].id, 2);
        }

        #[test]
        fn test_cycle_sort_field_resets_selection() {
            let mut state = AppState::default();
            state.selected_index = 2;
            state.cycle_icp_sort_field();
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.icp_sort_field, IcpSortField::Industry);
        }

        #[test]
        fn test_selected_icp_follows_sorted_order() {
            let mut state = AppState::default();
            state.icps = vec![icp(1, "zeta", "Software"), icp(2, "Alpha", "Finance")];
            state.selected_index = 0;
            assert_eq!(state.selected_icp().map(|i| i.id), Some(2));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_error_queue_dismisses_in_order() {
            let mut state = AppState::default();
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_queue_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    mod models {
        use super::*;

        #[test]
        fn test_icp_deserializes_from_camel_case() {
            let json = r#"{
                "id": 7,
                "name": "Mid-Market SaaS",
                "companySize": "11-50",
                "personaTitle": "VP of Sales",
                "createdAt": "2025-11-02T09:30:00Z"
            }"#;
            let icp: Icp = serde_json::from_str(json).unwrap();
            assert_eq!(icp.id, 7);
            assert_eq!(icp.company_size, "11-50");
            assert!(icp.created_at.is_some());
            assert_eq!(icp.goals, "");
        }

        #[test]
        fn test_icp_values_snapshot() {
            let icp = icp(3, "Acme", "Software");
            let values = icp.values();
            assert_eq!(values.name, "Acme");
            assert_eq!(values.company_size, "11-50");
        }

        #[test]
        fn test_analysis_deserializes_with_partial_feedback() {
            let json = r#"{
                "id": 1,
                "icpId": 7,
                "resonanceScore": 82.5,
                "feedback": {"strengths": ["clear ask"]}
            }"#;
            let analysis: EmailAnalysis = serde_json::from_str(json).unwrap();
            assert_eq!(analysis.icp_id, 7);
            assert_eq!(analysis.resonance_score, Some(82.5));
            assert_eq!(analysis.feedback.strengths, vec!["clear ask"]);
            assert!(analysis.feedback.weaknesses.is_empty());
        }

        #[test]
        fn test_audit_log_deserializes() {
            let json = r#"{"id": 4, "action": "create", "resourceType": "icp", "resourceId": "7"}"#;
            let log: AuditLog = serde_json::from_str(json).unwrap();
            assert_eq!(log.action, "create");
            assert_eq!(log.resource_type, "icp");
        }
    }
}
