pub type UserId = i64;

/// A registered user as reported by the backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub created_at: String,
}

/// Why a backend request did not succeed, reduced to what the UI needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The server answered with a non-2xx status, optionally explaining why.
    Rejected { message: Option<String> },
    /// The server could not be reached or answered with something unreadable.
    Unreachable,
}

pub const CONNECT_FAILURE_MESSAGE: &str =
    "Unable to connect to server. Please make sure the backend is running.";

impl RequestFailure {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Text for a banner: the server's message, `fallback` for a bare
    /// rejection, or the fixed connect message.
    pub fn banner_text(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            Self::Rejected { .. } => fallback.to_string(),
            Self::Unreachable => CONNECT_FAILURE_MESSAGE.to_string(),
        }
    }
}
