//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    /// Choice among a fixed option list; `selected` is an index into
    /// `options`, or `None` while nothing has been picked yet.
    Select {
        options: &'static [&'static str],
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str, is_multiline: bool) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Text(String::new()),
            is_multiline,
        }
    }

    /// Create a new select field over a fixed option list
    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Select {
                options,
                selected: None,
            },
            is_multiline: false,
        }
    }

    /// Get the field value as a string slice (empty for unselected selects)
    pub fn as_str(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Select { options, selected } => {
                selected.and_then(|i| options.get(i)).copied().unwrap_or("")
            }
        }
    }

    /// Set the field value from a string.
    ///
    /// For select fields the value must be one of the options; anything else
    /// resets the selection (a stale draft value must not resurrect an
    /// option the table no longer offers).
    pub fn set(&mut self, value: &str) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.clear();
                s.push_str(value);
            }
            FieldValue::Select { options, selected } => {
                *selected = options.iter().position(|o| *o == value);
            }
        }
    }

    /// Push a character to the field value (text fields only)
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value (text fields only)
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Cycle a select field to the next option (no-op for text fields)
    pub fn select_next(&mut self) {
        if let FieldValue::Select { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(selected.map_or(0, |i| (i + 1) % options.len()));
        }
    }

    /// Cycle a select field to the previous option (no-op for text fields)
    pub fn select_prev(&mut self) {
        if let FieldValue::Select { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            });
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Select { selected, .. } => *selected = None,
        }
    }

    /// Whether this is a select field
    pub fn is_select(&self) -> bool {
        matches!(self.value, FieldValue::Select { .. })
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Select { options, selected } => match selected {
                Some(i) => options.get(*i).copied().unwrap_or("").to_string(),
                None => "(select)".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: &[&str] = &["1-10", "11-50", "51-200"];

    #[test]
    fn test_text_field_char_editing() {
        let mut field = FormField::text("name", "Name", false);
        field.push_char('a');
        field.push_char('b');
        assert_eq!(field.as_str(), "ab");
        field.pop_char();
        assert_eq!(field.as_str(), "a");
    }

    #[test]
    fn test_text_field_set_replaces_value() {
        let mut field = FormField::text("name", "Name", false);
        field.set("Acme Buyers");
        field.set("Acme");
        assert_eq!(field.as_str(), "Acme");
    }

    #[test]
    fn test_select_starts_unselected() {
        let field = FormField::select("companySize", "Company Size", SIZES);
        assert_eq!(field.as_str(), "");
        assert_eq!(field.display_value(), "(select)");
    }

    #[test]
    fn test_select_cycles_forward_and_wraps() {
        let mut field = FormField::select("companySize", "Company Size", SIZES);
        field.select_next();
        assert_eq!(field.as_str(), "1-10");
        field.select_next();
        field.select_next();
        assert_eq!(field.as_str(), "51-200");
        field.select_next();
        assert_eq!(field.as_str(), "1-10");
    }

    #[test]
    fn test_select_cycles_backward_from_unselected() {
        let mut field = FormField::select("companySize", "Company Size", SIZES);
        field.select_prev();
        assert_eq!(field.as_str(), "51-200");
    }

    #[test]
    fn test_select_set_matches_option() {
        let mut field = FormField::select("companySize", "Company Size", SIZES);
        field.set("11-50");
        assert_eq!(field.as_str(), "11-50");
    }

    #[test]
    fn test_select_set_unknown_value_resets() {
        let mut field = FormField::select("companySize", "Company Size", SIZES);
        field.set("11-50");
        field.set("10000+");
        assert_eq!(field.as_str(), "");
    }

    #[test]
    fn test_select_ignores_char_editing() {
        let mut field = FormField::select("companySize", "Company Size", SIZES);
        field.push_char('x');
        field.pop_char();
        assert_eq!(field.as_str(), "");
    }

    #[test]
    fn test_clear() {
        let mut field = FormField::text("name", "Name", false);
        field.set("Acme");
        field.clear();
        assert_eq!(field.as_str(), "");

        let mut select = FormField::select("companySize", "Company Size", SIZES);
        select.select_next();
        select.clear();
        assert_eq!(select.as_str(), "");
    }
}
