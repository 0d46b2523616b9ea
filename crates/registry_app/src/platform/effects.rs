use registry_core::{Effect, Msg, RequestFailure, User, DELETE_CONFIRM_QUESTION};
use registry_engine::{ApiError, EngineEvent, EngineHandle, NewUser, UserRecord};
use registry_logging::{registry_info, registry_warn};

use super::console::Console;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Executes effects. Confirmation answers come back immediately as
    /// follow-up messages; everything else reports later through the engine.
    pub fn run(&self, effects: Vec<Effect>, console: &mut dyn Console) -> Vec<Msg> {
        let mut follow_up = Vec::new();
        for effect in effects {
            match effect {
                Effect::CreateUser { draft } => {
                    registry_info!(
                        "CreateUser name_len={} mobile_len={} email_len={}",
                        draft.name.len(),
                        draft.mobile.len(),
                        draft.email.len()
                    );
                    self.engine.create_user(NewUser {
                        name: draft.name,
                        mobile: draft.mobile,
                        email: draft.email,
                    });
                }
                Effect::FetchUsers => {
                    registry_info!("FetchUsers");
                    self.engine.fetch_users();
                }
                Effect::DeleteUser { id } => {
                    registry_info!("DeleteUser id={}", id);
                    self.engine.delete_user(id);
                }
                Effect::ConfirmDelete { id } => {
                    let accepted = console.confirm(DELETE_CONFIRM_QUESTION);
                    registry_info!("ConfirmDelete id={} accepted={}", id, accepted);
                    follow_up.push(Msg::DeleteConfirmation { id, accepted });
                }
                Effect::Alert { message } => console.alert(&message),
                Effect::ScheduleFormReset { token, delay } => {
                    self.engine.schedule_reset(token, delay);
                }
                Effect::CancelFormReset { token } => self.engine.cancel_reset(token),
            }
        }
        follow_up
    }

    pub fn try_next(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    #[cfg(test)]
    pub fn wait_next(&self, timeout: std::time::Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UserCreated(result) => {
            Msg::UserCreated(result.map_err(|err| map_failure("create", err)))
        }
        EngineEvent::UsersFetched(result) => Msg::UsersFetched(
            result
                .map(|records| records.into_iter().map(map_user).collect())
                .map_err(|err| map_failure("list", err)),
        ),
        EngineEvent::UserDeleted { id, result } => Msg::UserDeleted {
            id,
            result: result.map_err(|err| map_failure("delete", err)),
        },
        EngineEvent::ResetElapsed { token } => Msg::FormResetElapsed { token },
    }
}

fn map_user(record: UserRecord) -> User {
    User {
        id: record.id,
        name: record.name,
        mobile: record.mobile,
        email: record.email,
        created_at: record.created_at,
    }
}

fn map_failure(operation: &str, err: ApiError) -> RequestFailure {
    registry_warn!("{} request failed: {}", operation, err);
    if err.is_rejection() {
        RequestFailure::Rejected {
            message: err.server_message().map(ToOwned::to_owned),
        }
    } else {
        RequestFailure::Unreachable
    }
}

#[cfg(test)]
mod tests {
    use registry_engine::FailureKind;

    use super::*;

    fn api_error(kind: FailureKind) -> ApiError {
        ApiError {
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn rejections_keep_server_message() {
        let failure = map_failure(
            "create",
            api_error(FailureKind::Rejected {
                status: 400,
                server_message: Some("Email already exists".to_string()),
            }),
        );
        assert_eq!(failure, RequestFailure::rejected("Email already exists"));
    }

    #[test]
    fn transport_problems_are_unreachable() {
        for kind in [
            FailureKind::Network,
            FailureKind::Timeout,
            FailureKind::MalformedResponse,
            FailureKind::InvalidUrl,
        ] {
            assert_eq!(map_failure("list", api_error(kind)), RequestFailure::Unreachable);
        }
    }

    #[test]
    fn reset_event_maps_to_reset_message() {
        assert_eq!(
            map_event(EngineEvent::ResetElapsed { token: 4 }),
            Msg::FormResetElapsed { token: 4 }
        );
    }
}
