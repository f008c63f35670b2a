//! Deployment environment classification

use std::fmt;
use std::str::FromStr;

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Development,
    Staging,
    Production,
    Test,
}

impl Environment {
    /// Classify a free-form `APP_ENV` tag.
    ///
    /// Matching ignores case and surrounding whitespace. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => Some(Self::Development),
            "stage" | "staging" => Some(Self::Staging),
            "prod" | "production" => Some(Self::Production),
            "test" | "testing" => Some(Self::Test),
            _ => None,
        }
    }

    /// Canonical lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownEnvironment(s.to_owned()))
    }
}

/// Returned when a tag does not name a known environment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown environment: {0}")]
pub struct UnknownEnvironment(pub String);
