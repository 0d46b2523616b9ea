use crate::{Effect, RequestFailure, User, UserId};

pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch users";
pub const DELETE_FALLBACK_MESSAGE: &str = "Failed to delete user";
pub const DELETE_CONFIRM_QUESTION: &str = "Are you sure you want to delete this user?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<User>),
    Failed(String),
}

/// Listing flow: the server's user list and the delete action.
///
/// The list only ever changes by replacing it with a fresh fetch result.
/// While a fetch is running or after it failed, the last loaded list stays
/// available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    state: ListState,
    previous: Vec<User>,
    changed: bool,
}

impl ListingState {
    /// Creates a mounted listing along with its initial load.
    pub fn mount() -> (Self, Vec<Effect>) {
        let listing = Self {
            state: ListState::Loading,
            previous: Vec::new(),
            changed: true,
        };
        (listing, vec![Effect::FetchUsers])
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// The most recent list the server returned.
    pub fn users(&self) -> &[User] {
        match &self.state {
            ListState::Loaded(users) => users,
            ListState::Loading | ListState::Failed(_) => &self.previous,
        }
    }

    /// Starts a fetch. Overlapping fetches are allowed; the last response
    /// applied wins.
    pub fn refresh(&mut self) -> Vec<Effect> {
        if !self.is_loading() {
            if let ListState::Loaded(users) =
                std::mem::replace(&mut self.state, ListState::Loading)
            {
                self.previous = users;
            }
            self.changed = true;
        }
        vec![Effect::FetchUsers]
    }

    pub fn apply_fetch_result(&mut self, result: Result<Vec<User>, RequestFailure>) {
        self.state = match result {
            Ok(users) => {
                self.previous.clear();
                ListState::Loaded(users)
            }
            Err(failure) => ListState::Failed(failure.banner_text(FETCH_FALLBACK_MESSAGE)),
        };
        self.changed = true;
    }

    /// Returns whether anything changed since the last call, then resets.
    pub(crate) fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn request_delete(&self, id: UserId) -> Vec<Effect> {
        vec![Effect::ConfirmDelete { id }]
    }

    pub fn confirm_delete(&self, id: UserId, accepted: bool) -> Vec<Effect> {
        if accepted {
            vec![Effect::DeleteUser { id }]
        } else {
            Vec::new()
        }
    }

    /// Success resynchronizes from the server; failure raises an alert and
    /// leaves the list untouched.
    pub fn apply_delete_result(&mut self, result: Result<(), RequestFailure>) -> Vec<Effect> {
        match result {
            Ok(()) => self.refresh(),
            Err(RequestFailure::Rejected {
                message: Some(message),
            }) if !message.trim().is_empty() => vec![Effect::Alert { message }],
            Err(_) => vec![Effect::Alert {
                message: DELETE_FALLBACK_MESSAGE.to_string(),
            }],
        }
    }
}
