use std::time::Duration;

use crate::{ResetToken, UserDraft, UserId};

/// How long the success banner stays up before the form is cleared.
pub const FORM_RESET_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the draft to the backend.
    CreateUser { draft: UserDraft },
    /// GET the full user list.
    FetchUsers,
    /// DELETE a single user.
    DeleteUser { id: UserId },
    /// Ask the user a blocking yes/no question before deleting.
    ConfirmDelete { id: UserId },
    /// Show a blocking error notification.
    Alert { message: String },
    ScheduleFormReset { token: ResetToken, delay: Duration },
    CancelFormReset { token: ResetToken },
}
