//! WebSocket subscription endpoint
//!
//! One task per connected viewer. The viewer subscribes to a contest
//! channel, then receives one JSON `ScoreboardPush` per score change from
//! the moment of subscription. A viewer that falls behind its bounded
//! buffer is disconnected and must re-fetch the snapshot to resync.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use types::ids::ContestId;

use crate::state::AppState;
use crate::websocket::{parse_subscribe_message, Channel, SubscribeMessage, SubscribeResponse};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    state.metrics.client_connected();
    let (mut sender, mut receiver) = socket.split();

    let Some(contest_id) = await_subscription(&mut sender, &mut receiver).await else {
        state.metrics.client_disconnected();
        return;
    };

    let mut rx = state.registry.subscribe(contest_id);
    info!(%contest_id, "viewer subscribed");

    let metrics = state.metrics.clone();
    let mut forward = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(push) => {
                    let Ok(payload) = serde_json::to_string(&push) else {
                        break;
                    };
                    if sender.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        %contest_id,
                        skipped,
                        "viewer lagged behind its buffer, disconnecting for resync"
                    );
                    metrics.record_lagged_disconnect();
                    break;
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Drain the client side until it goes away; the forward task ending
    // (lag or send failure) tears the connection down as well.
    loop {
        tokio::select! {
            message = receiver.next() => {
                match message {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
            _ = &mut forward => break,
        }
    }

    forward.abort();
    state.metrics.client_disconnected();
    debug!(%contest_id, "viewer disconnected");
}

/// Read messages until a valid subscribe request arrives.
async fn await_subscription(
    sender: &mut SplitSink<WebSocket, Message>,
    receiver: &mut SplitStream<WebSocket>,
) -> Option<ContestId> {
    while let Some(Ok(message)) = receiver.next().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => return None,
            _ => continue,
        };

        let Some(request) = parse_subscribe_message(&text) else {
            debug!("ignoring malformed subscription message");
            continue;
        };

        match resolve_subscription(&request) {
            Ok(contest_id) => {
                let response = SubscribeResponse::accepted(&request);
                let Ok(payload) = serde_json::to_string(&response) else {
                    return None;
                };
                if sender.send(Message::Text(payload)).await.is_err() {
                    return None;
                }
                return Some(contest_id);
            }
            Err(reason) => {
                let response = SubscribeResponse::rejected(&request, reason);
                if let Ok(payload) = serde_json::to_string(&response) {
                    if sender.send(Message::Text(payload)).await.is_err() {
                        return None;
                    }
                }
            }
        }
    }
    None
}

fn resolve_subscription(request: &SubscribeMessage) -> Result<ContestId, String> {
    if request.action != "subscribe" {
        return Err(format!("unsupported action: {}", request.action));
    }
    let [channel] = request.channels.as_slice() else {
        return Err("exactly one channel per subscription".to_string());
    };
    match Channel::parse(channel) {
        Some(Channel::Scoreboard { contest_id }) => Ok(contest_id),
        None => Err(format!("unknown channel: {channel}")),
    }
}
