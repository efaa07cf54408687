use serde::{Deserialize, Serialize};

/// Which form the auth screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "signin",
            AuthMode::SignUp => "signup",
        }
    }

    pub fn is_sign_up(&self) -> bool {
        matches!(self, AuthMode::SignUp)
    }
}
