use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Social login providers offered on the auth screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Facebook,
    Github,
}

impl SocialProvider {
    /// Provider id as the auth service expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Facebook => "facebook",
            SocialProvider::Github => "github",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Facebook => "Facebook",
            SocialProvider::Github => "GitHub",
        }
    }

    pub fn all() -> [SocialProvider; 3] {
        [
            SocialProvider::Google,
            SocialProvider::Facebook,
            SocialProvider::Github,
        ]
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "facebook" => Ok(SocialProvider::Facebook),
            "github" => Ok(SocialProvider::Github),
            _ => Err(format!("Unsupported provider: {}", s)),
        }
    }
}
