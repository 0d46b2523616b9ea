//! Registry core: pure state machine and view-model helpers.
mod draft;
mod effect;
mod form;
mod listing;
mod msg;
mod state;
mod timestamp;
mod update;
mod user;
mod validation;
mod view_model;

pub use draft::{Field, UserDraft};
pub use effect::{Effect, FORM_RESET_DELAY};
pub use form::{
    FormNotice, FormState, ResetToken, SubmissionState, SUBMIT_FALLBACK_MESSAGE,
    SUBMIT_SUCCESS_MESSAGE,
};
pub use listing::{
    ListState, ListingState, DELETE_CONFIRM_QUESTION, DELETE_FALLBACK_MESSAGE,
    FETCH_FALLBACK_MESSAGE,
};
pub use msg::Msg;
pub use state::AppState;
pub use timestamp::{format_timestamp, format_timestamp_in, INVALID_DATE};
pub use update::update;
pub use user::{RequestFailure, User, UserId, CONNECT_FAILURE_MESSAGE};
pub use validation::{
    validate, ValidationErrors, EMAIL_INVALID, EMAIL_REQUIRED, MOBILE_INVALID, MOBILE_REQUIRED,
    NAME_REQUIRED,
};
pub use view_model::{
    AppViewModel, Banner, FieldView, FormView, ListBody, ListView, UserRowView,
    EMPTY_LIST_SUBTITLE, EMPTY_LIST_TITLE,
};
