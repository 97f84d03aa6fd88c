//! UseCase layer.
//!
//! Each use case locks the shared `Session`, applies one action and hands the
//! resulting deliveries to the `BroadcastRouter` before releasing the lock, so
//! handlers never interleave and fan-out order matches processing order.

pub mod command;
pub mod connect_participant;
pub mod control_playback;
pub mod disconnect_participant;
pub mod get_session_state;
pub mod react;
pub mod run_poll;
pub mod send_message;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{BroadcastRouter, Delivery, Session, deliver};

pub use command::SessionCommand;
pub use connect_participant::ConnectParticipantUseCase;
pub use control_playback::ControlPlaybackUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use get_session_state::{GetSessionStateUseCase, SessionState};
pub use react::ReactUseCase;
pub use run_poll::RunPollUseCase;
pub use send_message::SendMessageUseCase;

/// Session shared by every use case
pub type SharedSession = Arc<Mutex<Session>>;

/// Lock the session, mutate it, and deliver while still holding the lock.
async fn apply<F>(session: &SharedSession, router: &dyn BroadcastRouter, f: F)
where
    F: FnOnce(&mut Session) -> Vec<Delivery> + Send,
{
    let mut session = session.lock().await;
    let deliveries = f(&mut *session);
    deliver(router, deliveries).await;
}
