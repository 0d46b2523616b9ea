#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one of the form inputs.
    FieldEdited { field: crate::Field, value: String },
    /// User pressed Submit.
    SubmitClicked,
    /// Backend answered the create request.
    UserCreated(Result<(), crate::RequestFailure>),
    /// The post-success reset timer fired.
    FormResetElapsed { token: crate::ResetToken },
    /// The form is being torn down.
    FormDisposed,
    /// The user list became visible; triggers the initial load.
    ListingMounted,
    /// The user list was torn down.
    ListingUnmounted,
    /// User pressed Refresh.
    RefreshClicked,
    /// Backend answered a list request.
    UsersFetched(Result<Vec<crate::User>, crate::RequestFailure>),
    /// User pressed Delete on a row.
    DeleteClicked { id: crate::UserId },
    /// Answer to the delete confirmation prompt.
    DeleteConfirmation { id: crate::UserId, accepted: bool },
    /// Backend answered a delete request.
    UserDeleted {
        id: crate::UserId,
        result: Result<(), crate::RequestFailure>,
    },
}
