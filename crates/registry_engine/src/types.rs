use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub mobile: String,
    pub email: String,
}

/// A user as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: String,
}

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Failure body; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UserCreated(Result<(), ApiError>),
    UsersFetched(Result<Vec<UserRecord>, ApiError>),
    UserDeleted {
        id: i64,
        result: Result<(), ApiError>,
    },
    /// A scheduled form reset ran to completion without being cancelled.
    ResetElapsed { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn rejected(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .clone()
            .unwrap_or_else(|| format!("http status {status}"));
        Self::new(
            FailureKind::Rejected {
                status,
                server_message,
            },
            message,
        )
    }

    /// The server's own explanation, if it gave one.
    pub fn server_message(&self) -> Option<&str> {
        match &self.kind {
            FailureKind::Rejected { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }

    /// True when the server answered with a non-2xx status.
    pub fn is_rejection(&self) -> bool {
        matches!(self.kind, FailureKind::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Rejected {
        status: u16,
        server_message: Option<String>,
    },
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Rejected { status, .. } => write!(f, "rejected with status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
