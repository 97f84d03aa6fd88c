//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::conversion::parse_client_event,
    ui::state::AppState,
    usecase::SessionCommand,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id = ConnectionIdFactory::generate().map_err(|e| {
        tracing::error!("Failed to generate connection id: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id)))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This is the only writer of the socket, so the router never waits on a slow client.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, receiver) = socket.split();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .connect_participant_usecase
        .execute(connection_id.clone(), tx)
        .await;
    tracing::info!("Connection '{}' opened", connection_id);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();
    let (stop_tx, stop_rx) = oneshot::channel();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        let handler_id = connection_id_clone.clone();
        read_frames(receiver, stop_rx, &connection_id_clone, move |text| {
            let state = state_clone.clone();
            let connection_id = handler_id.clone();
            async move { handle_text(&state, &connection_id, &text).await }
        })
        .await;
    });

    // Spawn a task to push frames from the router to this client
    let mut send_task = pusher_loop(rx, sender);

    let writer_ended_first = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => true,
    };
    if writer_ended_first {
        // The reader stops between frames; a handler in flight still finishes its delivery
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::error!("Reader of '{}' failed: {}", connection_id, e);
        }
    } else {
        send_task.abort();
    }

    // Runs exactly once per connection, whichever side ended first
    state
        .disconnect_participant_usecase
        .execute(connection_id.clone())
        .await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Read frames until the client closes, the stream fails, or `stop` fires.
///
/// `stop` is only checked while waiting for the next frame, never during `on_text`.
async fn read_frames<S, E, F, Fut>(
    mut frames: S,
    mut stop: oneshot::Receiver<()>,
    connection_id: &ConnectionId,
    mut on_text: F,
) where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: std::fmt::Display,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let msg = tokio::select! {
            biased;
            _ = &mut stop => {
                tracing::debug!("Reader of '{}' stopped", connection_id);
                break;
            }
            msg = frames.next() => msg,
        };

        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => on_text(text.to_string()).await,
            Message::Close(_) => {
                tracing::debug!("Connection '{}' requested close", connection_id);
                break;
            }
            Message::Binary(_) => {
                tracing::warn!("Ignoring binary frame from '{}'", connection_id);
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }
}

/// Parse one text frame and run the matching use case.
///
/// Rejected frames are logged and dropped; the connection stays open.
async fn handle_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    match parse_client_event(text) {
        Ok(command) => {
            tracing::debug!("'{}' -> {}", connection_id, command.name());
            dispatch(state, connection_id.clone(), command).await;
        }
        Err(e) => {
            tracing::warn!("Rejected frame from '{}': {}", connection_id, e);
        }
    }
}

async fn dispatch(state: &AppState, sender: ConnectionId, command: SessionCommand) {
    match command {
        SessionCommand::Join { username } => {
            state
                .connect_participant_usecase
                .join(sender, username)
                .await
        }
        SessionCommand::SendMessage { content, username } => {
            state
                .send_message_usecase
                .execute(sender, content, username)
                .await
        }
        SessionCommand::LoadVideo { url, video_id } => {
            state
                .control_playback_usecase
                .load_video(sender, url, video_id)
                .await
        }
        SessionCommand::SetPlayPause {
            is_playing,
            current_time,
        } => {
            state
                .control_playback_usecase
                .set_play_pause(sender, is_playing, current_time)
                .await
        }
        SessionCommand::ReportProgress { current_time } => {
            state
                .control_playback_usecase
                .report_progress(sender, current_time)
                .await
        }
        SessionCommand::Seek { current_time } => {
            state
                .control_playback_usecase
                .seek(sender, current_time)
                .await
        }
        SessionCommand::SyncRequest {
            current_time,
            is_playing,
        } => {
            state
                .control_playback_usecase
                .sync_request(sender, current_time, is_playing)
                .await
        }
        SessionCommand::GiveAward { award } => state.react_usecase.give_award(sender, award).await,
        SessionCommand::SurpriseMe { message } => {
            state.react_usecase.surprise(sender, message).await
        }
        SessionCommand::Typing { is_typing } => state.react_usecase.typing(sender, is_typing).await,
        SessionCommand::StartPoll { options } => state.run_poll_usecase.start(options).await,
        SessionCommand::PollVote {
            poll_id,
            option,
            user,
        } => {
            state
                .run_poll_usecase
                .vote(sender, poll_id, option, user)
                .await
        }
        SessionCommand::PollEnd => state.run_poll_usecase.end().await,
    }
}
