//! Wizard step table and per-step validation
//!
//! The workflow is a static, code-level table: changing the wizard means
//! changing this table. Every field named here is bound to exactly one rule
//! in [`rule_for`]; the terminal review step owns no fields.

use super::form_state::{IcpForm, COMPANY_SIZES, INDUSTRIES};
use super::rules::{validate_field, ErrorMap, FieldRule};

/// One wizard step: a title and the fields it owns
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    pub title: &'static str,
    pub fields: &'static [&'static str],
}

/// The profile wizard, in order. The last step is the review step.
pub const STEPS: &[StepDef] = &[
    StepDef {
        title: "Basic Information",
        fields: &["name", "description", "industry", "companySize"],
    },
    StepDef {
        title: "Target Persona",
        fields: &["personaTitle", "personaResponsibilities"],
    },
    StepDef {
        title: "Pain Points & Goals",
        fields: &["painPoints", "goals"],
    },
    StepDef {
        title: "Review & Save",
        fields: &[],
    },
];

/// Index of the terminal review step
pub const REVIEW_STEP: usize = STEPS.len() - 1;

const NAME_RULE: FieldRule = FieldRule {
    required: true,
    min_len: Some(3),
    max_len: Some(100),
    pattern: None,
    allowed: None,
};

const DESCRIPTION_RULE: FieldRule = FieldRule {
    required: false,
    min_len: None,
    max_len: Some(500),
    pattern: None,
    allowed: None,
};

const INDUSTRY_RULE: FieldRule = FieldRule {
    required: true,
    min_len: None,
    max_len: None,
    pattern: None,
    allowed: Some(INDUSTRIES),
};

const COMPANY_SIZE_RULE: FieldRule = FieldRule {
    required: true,
    min_len: None,
    max_len: None,
    pattern: None,
    allowed: Some(COMPANY_SIZES),
};

const PERSONA_TITLE_RULE: FieldRule = FieldRule {
    required: true,
    min_len: None,
    max_len: Some(100),
    pattern: None,
    allowed: None,
};

const LONG_TEXT_RULE: FieldRule = FieldRule {
    required: true,
    min_len: None,
    max_len: Some(500),
    pattern: None,
    allowed: None,
};

/// Rule bound to a wizard field. Unknown names get a pass-everything rule;
/// the table tests below guarantee that never happens for owned fields.
pub fn rule_for(field: &str) -> FieldRule {
    match field {
        "name" => NAME_RULE,
        "description" => DESCRIPTION_RULE,
        "industry" => INDUSTRY_RULE,
        "companySize" => COMPANY_SIZE_RULE,
        "personaTitle" => PERSONA_TITLE_RULE,
        "personaResponsibilities" | "painPoints" | "goals" => LONG_TEXT_RULE,
        _ => FieldRule::default(),
    }
}

/// Validate exactly the fields owned by `step` against the current form.
///
/// Pure: reads the form, mutates nothing. The review step owns no fields and
/// therefore always returns an empty map.
pub fn validate_step(step: usize, form: &IcpForm) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let Some(def) = STEPS.get(step) else {
        return errors;
    };
    for field in def.fields {
        if let Some(err) = validate_field(form.value(field), &rule_for(field)) {
            errors.insert(field, err.to_string());
        }
    }
    errors
}

/// Validate every step and return the union of all failures
pub fn validate_all(form: &IcpForm) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for step in 0..STEPS.len() {
        errors.extend(validate_step(step, form));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IcpValues;

    fn valid_form() -> IcpForm {
        IcpForm::from_values(&IcpValues {
            name: "Mid-Market SaaS".into(),
            description: String::new(),
            industry: "Software".into(),
            company_size: "11-50".into(),
            persona_title: "VP of Sales".into(),
            persona_responsibilities: "Owns the outbound pipeline".into(),
            pain_points: "Low reply rates on cold outreach".into(),
            goals: "Book more qualified meetings".into(),
        })
    }

    mod table {
        use super::*;

        #[test]
        fn test_every_form_field_owned_by_exactly_one_step() {
            let form = IcpForm::new();
            let owned: Vec<&str> = STEPS.iter().flat_map(|s| s.fields).copied().collect();
            let mut deduped = owned.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(owned.len(), deduped.len(), "field owned by two steps");
            for field in &owned {
                assert!(form.field(field).is_some(), "step table names unknown field {field}");
            }
            // 8 form fields, all owned
            assert_eq!(owned.len(), 8);
        }

        #[test]
        fn test_review_step_is_terminal_and_empty() {
            assert_eq!(REVIEW_STEP, STEPS.len() - 1);
            assert!(STEPS[REVIEW_STEP].fields.is_empty());
        }

        #[test]
        fn test_every_owned_field_has_a_rule() {
            for step in STEPS {
                for field in step.fields {
                    let rule = rule_for(field);
                    let constrained = rule.required
                        || rule.min_len.is_some()
                        || rule.max_len.is_some()
                        || rule.pattern.is_some()
                        || rule.allowed.is_some();
                    assert!(constrained, "field {field} has a default (unbound) rule");
                }
            }
        }
    }

    mod aggregation {
        use super::*;

        #[test]
        fn test_valid_form_has_no_errors_on_any_step() {
            let form = valid_form();
            for step in 0..STEPS.len() {
                assert!(validate_step(step, &form).is_empty(), "step {step} failed");
            }
        }

        #[test]
        fn test_missing_required_field_yields_exactly_one_entry() {
            let mut form = valid_form();
            form.persona_title.clear();
            let errors = validate_step(1, &form);
            assert_eq!(errors.len(), 1);
            assert!(errors.contains_key("personaTitle"));
        }

        #[test]
        fn test_step_only_checks_its_own_fields() {
            let mut form = valid_form();
            form.name.clear(); // owned by step 0
            assert!(validate_step(1, &form).is_empty());
            assert!(validate_step(2, &form).is_empty());
        }

        #[test]
        fn test_review_step_always_valid() {
            let errors = validate_step(REVIEW_STEP, &IcpForm::new());
            assert!(errors.is_empty());
        }

        #[test]
        fn test_out_of_range_step_is_empty() {
            assert!(validate_step(99, &IcpForm::new()).is_empty());
        }

        #[test]
        fn test_validate_all_unions_step_errors() {
            let mut form = valid_form();
            form.name.clear();
            form.goals.clear();
            let errors = validate_all(&form);
            assert_eq!(errors.len(), 2);
            assert!(errors.contains_key("name"));
            assert!(errors.contains_key("goals"));
        }

        #[test]
        fn test_optional_description_may_stay_empty() {
            let form = valid_form();
            assert_eq!(form.value("description"), "");
            assert!(validate_step(0, &form).is_empty());
        }

        #[test]
        fn test_short_name_reports_length_message() {
            let mut form = valid_form();
            form.name.set("ab");
            let errors = validate_step(0, &form);
            assert!(errors["name"].contains("at least 3"));
        }
    }
}
