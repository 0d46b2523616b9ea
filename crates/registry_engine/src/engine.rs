use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use registry_logging::{registry_debug, registry_error, registry_info};

use crate::api::{ApiSettings, ReqwestUsersApi, UsersApi};
use crate::timer::ResetTimers;
use crate::{ApiError, EngineEvent, NewUser};

enum EngineCommand {
    Create(NewUser),
    Fetch,
    Delete { id: i64 },
    ScheduleReset { token: u64, delay: Duration },
    CancelReset { token: u64 },
}

/// Runs backend requests and timers on a background tokio runtime.
///
/// Commands are independent: several fetches may be in flight at once and
/// their events arrive in completion order. Dropping the handle cancels all
/// pending timers and stops the runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    timers: ResetTimers,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        registry_info!("Backend base url: {}", settings.base_url);
        let api = ReqwestUsersApi::new(settings)?;
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<dyn UsersApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let timers = ResetTimers::new();
        let loop_timers = timers.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    registry_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                dispatch(&runtime, &api, &loop_timers, command, &event_tx);
            }
            registry_debug!("Engine command channel closed");
        });

        Self {
            cmd_tx,
            event_rx,
            timers,
        }
    }

    pub fn create_user(&self, user: NewUser) {
        self.send(EngineCommand::Create(user));
    }

    pub fn fetch_users(&self) {
        self.send(EngineCommand::Fetch);
    }

    pub fn delete_user(&self, id: i64) {
        self.send(EngineCommand::Delete { id });
    }

    pub fn schedule_reset(&self, token: u64, delay: Duration) {
        self.send(EngineCommand::ScheduleReset { token, delay });
    }

    pub fn cancel_reset(&self, token: u64) {
        // Cancel synchronously so a timer cannot fire after this returns.
        if !self.timers.cancel(token) {
            self.send(EngineCommand::CancelReset { token });
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            registry_error!("Engine is not running; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.timers.cancel_all();
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    api: &Arc<dyn UsersApi>,
    timers: &ResetTimers,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let api = Arc::clone(api);
    let event_tx = event_tx.clone();
    match command {
        EngineCommand::Create(user) => {
            runtime.spawn(async move {
                let result = api.create_user(&user).await;
                let _ = event_tx.send(EngineEvent::UserCreated(result));
            });
        }
        EngineCommand::Fetch => {
            runtime.spawn(async move {
                let result = api.list_users().await;
                let _ = event_tx.send(EngineEvent::UsersFetched(result));
            });
        }
        EngineCommand::Delete { id } => {
            runtime.spawn(async move {
                let result = api.delete_user(id).await;
                let _ = event_tx.send(EngineEvent::UserDeleted { id, result });
            });
        }
        EngineCommand::ScheduleReset { token, delay } => {
            let elapsed = timers.arm(token, delay);
            runtime.spawn(async move {
                if elapsed.await {
                    let _ = event_tx.send(EngineEvent::ResetElapsed { token });
                }
            });
        }
        EngineCommand::CancelReset { token } => {
            timers.cancel(token);
        }
    }
}
