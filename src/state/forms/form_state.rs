//! Form state management and form structs

use super::field::FormField;
use super::rules::{validate_field, ErrorMap, FieldRule, EMAIL_PATTERN};
use crate::state::Icp;
use serde::{Deserialize, Serialize};

/// Industry options offered by the profile wizard
pub const INDUSTRIES: &[&str] = &[
    "Software",
    "Healthcare",
    "Finance",
    "Education",
    "Manufacturing",
    "Retail",
    "Other",
];

/// Company-size brackets offered by the profile wizard
pub const COMPANY_SIZES: &[&str] = &["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Plain snapshot of the profile form, in wire order.
///
/// This is both the draft persistence format and the request body shape for
/// create/update (the backend expects the camelCase field names).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IcpValues {
    pub name: String,
    pub description: String,
    pub industry: String,
    pub company_size: String,
    pub persona_title: String,
    pub persona_responsibilities: String,
    pub pain_points: String,
    pub goals: String,
}

/// The ICP profile form collected by the wizard
#[derive(Debug, Clone)]
pub struct IcpForm {
    pub name: FormField,
    pub description: FormField,
    pub industry: FormField,
    pub company_size: FormField,
    pub persona_title: FormField,
    pub persona_responsibilities: FormField,
    pub pain_points: FormField,
    pub goals: FormField,
}

impl IcpForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "ICP Name", false),
            description: FormField::text("description", "Description (optional)", true),
            industry: FormField::select("industry", "Industry", INDUSTRIES),
            company_size: FormField::select("companySize", "Company Size", COMPANY_SIZES),
            persona_title: FormField::text("personaTitle", "Job Title / Role", false),
            persona_responsibilities: FormField::text(
                "personaResponsibilities",
                "Key Responsibilities",
                true,
            ),
            pain_points: FormField::text("painPoints", "Pain Points", true),
            goals: FormField::text("goals", "Goals & Motivations", true),
        }
    }

    /// Rebuild a form from a persisted or fetched snapshot
    pub fn from_values(values: &IcpValues) -> Self {
        let mut form = Self::new();
        form.apply(values);
        form
    }

    /// Pre-fill the form from an existing profile (edit flow)
    pub fn from_icp(icp: &Icp) -> Self {
        Self::from_values(&icp.values())
    }

    fn all_fields(&self) -> [&FormField; 8] {
        [
            &self.name,
            &self.description,
            &self.industry,
            &self.company_size,
            &self.persona_title,
            &self.persona_responsibilities,
            &self.pain_points,
            &self.goals,
        ]
    }

    fn all_fields_mut(&mut self) -> [&mut FormField; 8] {
        [
            &mut self.name,
            &mut self.description,
            &mut self.industry,
            &mut self.company_size,
            &mut self.persona_title,
            &mut self.persona_responsibilities,
            &mut self.pain_points,
            &mut self.goals,
        ]
    }

    /// Look up a field by its wire name
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.all_fields().into_iter().find(|f| f.name == name)
    }

    /// Look up a field mutably by its wire name
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.all_fields_mut().into_iter().find(|f| f.name == name)
    }

    /// Current value of a field (empty string for unknown names)
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.as_str()).unwrap_or("")
    }

    /// Snapshot the current state in wire order
    pub fn values(&self) -> IcpValues {
        IcpValues {
            name: self.name.as_str().to_string(),
            description: self.description.as_str().to_string(),
            industry: self.industry.as_str().to_string(),
            company_size: self.company_size.as_str().to_string(),
            persona_title: self.persona_title.as_str().to_string(),
            persona_responsibilities: self.persona_responsibilities.as_str().to_string(),
            pain_points: self.pain_points.as_str().to_string(),
            goals: self.goals.as_str().to_string(),
        }
    }

    /// Overwrite every field from a snapshot
    pub fn apply(&mut self, values: &IcpValues) {
        self.name.set(&values.name);
        self.description.set(&values.description);
        self.industry.set(&values.industry);
        self.company_size.set(&values.company_size);
        self.persona_title.set(&values.persona_title);
        self.persona_responsibilities.set(&values.persona_responsibilities);
        self.pain_points.set(&values.pain_points);
        self.goals.set(&values.goals);
    }
}

impl Default for IcpForm {
    fn default() -> Self {
        Self::new()
    }
}

const LOGIN_EMAIL_RULE: FieldRule = FieldRule {
    required: true,
    min_len: None,
    max_len: Some(254),
    pattern: Some(EMAIL_PATTERN),
    allowed: None,
};

const LOGIN_PASSWORD_RULE: FieldRule = FieldRule {
    required: true,
    min_len: None,
    max_len: None,
    pattern: None,
    allowed: None,
};

/// Credentials form shown before a session token exists
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email", false),
            password: FormField::text("password", "Password", false),
            active_field_index: 0,
        }
    }

    /// Validate both fields; empty map means the form can be submitted
    pub fn validate(&self) -> ErrorMap {
        let mut errors = ErrorMap::new();
        if let Some(err) = validate_field(self.email.as_str(), &LOGIN_EMAIL_RULE) {
            errors.insert(self.email.name, err.to_string());
        }
        if let Some(err) = validate_field(self.password.as_str(), &LOGIN_PASSWORD_RULE) {
            errors.insert(self.password.name, err.to_string());
        }
        errors
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.email,
            _ => &mut self.password,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            1 => Some(&self.password),
            _ => None,
        }
    }
}

const EMAIL_CONTENT_RULE: FieldRule = FieldRule {
    required: true,
    min_len: Some(10),
    max_len: None,
    pattern: None,
    allowed: None,
};

/// Email analyzer form: the email body plus the target profile picked from
/// the loaded ICP list (the list is runtime data, so it is not a select
/// field).
#[derive(Debug, Clone)]
pub struct AnalyzeForm {
    pub content: FormField,
    pub selected_icp: usize,
}

impl AnalyzeForm {
    pub fn new() -> Self {
        Self {
            content: FormField::text("emailContent", "Email Content", true),
            selected_icp: 0,
        }
    }

    /// Validate the email body; empty map means it can be submitted
    pub fn validate(&self) -> ErrorMap {
        let mut errors = ErrorMap::new();
        if let Some(err) = validate_field(self.content.as_str(), &EMAIL_CONTENT_RULE) {
            errors.insert(self.content.name, err.to_string());
        }
        errors
    }
}

impl Default for AnalyzeForm {
    fn default() -> Self {
        Self::new()
    }
}
