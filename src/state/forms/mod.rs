//! Form domain layer
//!
//! Type-safe form handling for the login, analyzer, and profile-wizard
//! views: field value objects, declarative validation rules, and the static
//! wizard step table.

mod field;
mod form_state;
mod rules;
mod steps;

pub use field::FormField;
pub use form_state::{
    AnalyzeForm, Form, IcpForm, IcpValues, LoginForm, COMPANY_SIZES, INDUSTRIES,
};
pub use rules::{validate_field, ErrorMap, FieldRule, PatternRule, ValidationError};
pub use steps::{rule_for, validate_all, validate_step, StepDef, REVIEW_STEP, STEPS};
