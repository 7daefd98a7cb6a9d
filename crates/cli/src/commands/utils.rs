use std::fmt;
use tips_core::{client::ApiError, store::StoreError};

#[derive(Debug)]
pub enum CliError {
    Config(String),
    Store(String),
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Store(msg) => write!(f, "Request failed: {msg}"),
            Self::General(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(error: StoreError) -> Self {
        match error.api().and_then(api_hint) {
            Some(hint) => Self::Store(format!("{error} ({hint})")),
            None => Self::Store(error.to_string()),
        }
    }
}

/// What the user can do about a failed request, when there is anything.
fn api_hint(error: &ApiError) -> Option<&'static str> {
    if error.is_unauthorized() {
        Some("session rejected, sign in again with --id-token")
    } else if error.is_not_found() {
        Some("no such record on the server")
    } else if error.is_transient() {
        Some("temporary failure, try again")
    } else {
        None
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::General(error.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub fn print_success(message: &str) {
    println!("[SUCCESS] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn print_info(message: &str) {
    println!("[INFO] {message}");
}
