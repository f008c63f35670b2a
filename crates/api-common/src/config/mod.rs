//! Configuration loaded from the process environment

mod environment;
mod settings;

pub use environment::{Environment, UnknownEnvironment};
pub use settings::{
    Settings, APP_ENV_VAR, DEFAULT_APP_ENV, DEFAULT_JWT_SECRET, JWT_SECRET_VAR,
};
