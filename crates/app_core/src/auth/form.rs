use std::fmt;

use contracts::enums::auth_mode::AuthMode;

use crate::platform::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Required fields left blank. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<FormField>,
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(FormField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything the auth screen renders from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub email_form_visible: bool,
    pub email: String,
    pub password: String,
    /// Only collected in sign-up mode.
    pub name: String,
    /// An auth call is outstanding; submissions are rejected.
    pub busy: bool,
    /// Last message shown to the user.
    pub notice: Option<Notice>,
}

impl AuthFormState {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn clear_fields(&mut self) {
        self.email.clear();
        self.password.clear();
        self.name.clear();
    }

    /// Blank (or whitespace-only) required fields, in form order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.mode.is_sign_up() && self.name.trim().is_empty() {
            missing.push(FormField::Name);
        }
        if self.email.trim().is_empty() {
            missing.push(FormField::Email);
        }
        if self.password.is_empty() {
            missing.push(FormField::Password);
        }
        missing
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
