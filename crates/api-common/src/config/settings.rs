//! Application settings loaded from environment variables.
//!
//! Variable names are matched case-insensitively and carry no prefix, so
//! `APP_ENV`, `app_env` and `App_Env` all feed the same field. A variable
//! that is unset or empty falls back to its default, which means building
//! [`Settings`] never fails.

use std::env;
use std::fmt;

use serde::Serialize;

use super::environment::Environment;

/// Environment variable feeding [`Settings::app_env`].
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Environment variable feeding [`Settings::jwt_secret`].
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

/// Default deployment environment tag.
pub const DEFAULT_APP_ENV: &str = "dev";

/// Default JWT signing secret. Only suitable for local development.
pub const DEFAULT_JWT_SECRET: &str = "change_me";

/// Immutable, process-wide settings.
///
/// Build once at startup with [`Settings::from_env`] and hand it to
/// consumers by reference (or behind an `Arc`).
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    app_env: String,
    #[serde(skip_serializing)]
    jwt_secret: String,
    #[serde(skip_serializing)]
    defaulted: Vec<&'static str>,
}

impl Settings {
    /// Create settings from explicit values.
    pub fn new(app_env: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            app_env: app_env.into(),
            jwt_secret: jwt_secret.into(),
            defaulted: Vec::new(),
        }
    }

    /// Load settings from the process environment.
    ///
    /// Variables whose name or value is not valid Unicode are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Load settings from an arbitrary set of `(name, value)` pairs.
    ///
    /// When several case variants of a name carry a value, the last one
    /// seen wins, whatever its case.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut app_env = Lookup::new(APP_ENV_VAR);
        let mut jwt_secret = Lookup::new(JWT_SECRET_VAR);

        for (name, value) in vars {
            let (name, value) = (name.as_ref(), value.as_ref());
            app_env.offer(name, value);
            jwt_secret.offer(name, value);
        }

        let mut defaulted = Vec::new();
        Self {
            app_env: app_env.resolve_or(DEFAULT_APP_ENV, &mut defaulted),
            jwt_secret: jwt_secret.resolve_or(DEFAULT_JWT_SECRET, &mut defaulted),
            defaulted,
        }
    }

    /// Deployment environment tag, exactly as configured.
    pub fn app_env(&self) -> &str {
        &self.app_env
    }

    /// JWT signing secret.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Typed view of [`Settings::app_env`], if the tag is a known one.
    pub fn environment(&self) -> Option<Environment> {
        Environment::from_tag(&self.app_env)
    }

    /// Variables that were unset or empty when loading, in field order.
    ///
    /// Empty for settings built with [`Settings::new`].
    pub fn defaulted(&self) -> &[&'static str] {
        &self.defaulted
    }

    /// Whether the secret is still the built-in default.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for Settings {
    /// Settings as loaded from an environment with neither variable set.
    fn default() -> Self {
        Self {
            defaulted: vec![APP_ENV_VAR, JWT_SECRET_VAR],
            ..Self::new(DEFAULT_APP_ENV, DEFAULT_JWT_SECRET)
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_env", &self.app_env)
            .field("jwt_secret", &"[REDACTED]")
            .field("defaulted", &self.defaulted)
            .finish()
    }
}

/// Tracks the latest non-empty value for a single variable name.
struct Lookup {
    name: &'static str,
    value: Option<String>,
}

impl Lookup {
    fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    fn offer(&mut self, name: &str, value: &str) {
        if !value.is_empty() && name.eq_ignore_ascii_case(self.name) {
            self.value = Some(value.to_owned());
        }
    }

    fn resolve_or(self, default: &str, defaulted: &mut Vec<&'static str>) -> String {
        self.value.unwrap_or_else(|| {
            defaulted.push(self.name);
            default.to_owned()
        })
    }
}
