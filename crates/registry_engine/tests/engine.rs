use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use registry_engine::{
    ApiError, EngineEvent, EngineHandle, FailureKind, NewUser, UserRecord, UsersApi,
};

const WAIT: Duration = Duration::from_secs(2);

#[derive(Default)]
struct FakeApi {
    users: Mutex<Vec<UserRecord>>,
    list_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl UsersApi for FakeApi {
    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        let record = UserRecord {
            id: users.len() as i64 + 1,
            name: user.name.clone(),
            mobile: user.mobile.clone(),
            email: user.email.clone(),
            created_at: "2024-01-05T15:07:00Z".to_string(),
        };
        users.push(record);
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().clone())
    }

    async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|user| user.id != id);
        if users.len() == before {
            return Err(ApiError {
                kind: FailureKind::Rejected {
                    status: 404,
                    server_message: Some("User not found".to_string()),
                },
                message: "User not found".to_string(),
            });
        }
        Ok(())
    }
}

fn jane() -> NewUser {
    NewUser {
        name: "Jane Doe".to_string(),
        mobile: "9876543210".to_string(),
        email: "jane@example.com".to_string(),
    }
}

#[test]
fn commands_report_back_as_events() {
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api.clone());

    engine.create_user(jane());
    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::UserCreated(Ok(()))) => {}
        other => panic!("unexpected event {other:?}"),
    }

    engine.fetch_users();
    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::UsersFetched(Ok(users))) => assert_eq!(users.len(), 1),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);

    engine.delete_user(1);
    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::UserDeleted { id: 1, result: Ok(()) })
    );

    engine.delete_user(1);
    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::UserDeleted { id: 1, result: Err(err) }) => {
            assert_eq!(err.server_message(), Some("User not found"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn reset_timer_fires_after_delay() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default()));
    engine.schedule_reset(3, Duration::from_millis(20));
    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ResetElapsed { token: 3 })
    );
}

#[test]
fn cancelled_reset_never_fires() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default()));
    engine.schedule_reset(1, Duration::from_millis(50));
    engine.cancel_reset(1);
    engine.schedule_reset(2, Duration::from_millis(100));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ResetElapsed { token: 2 })
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(100)), None);
}

#[test]
fn try_recv_is_empty_when_idle() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default()));
    assert_eq!(engine.try_recv(), None);
}
