// Error taxonomy. User alerts (high latency, site down) are not errors; see alerts.rs.

use thiserror::Error;

/// Backend request failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("login rejected for user {0:?}")]
    LoginRejected(String),
}

/// Page interactions that name something the page does not have.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UiError {
    #[error("unknown tab {0:?}")]
    UnknownTab(String),
    #[error("unknown tab button {0:?}")]
    UnknownButton(String),
    #[error("unknown input element {0:?}")]
    UnknownInput(String),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Ui(#[from] UiError),
}
