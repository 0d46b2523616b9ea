//! Registry engine: HTTP access to the user backend and effect execution.
mod api;
mod engine;
mod timer;
mod types;

pub use api::{ApiSettings, ReqwestUsersApi, UsersApi};
pub use engine::EngineHandle;
pub use types::{ApiError, EngineEvent, FailureKind, NewUser, UserRecord};
