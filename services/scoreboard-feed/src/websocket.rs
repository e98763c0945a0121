//! WebSocket subscription protocol
//!
//! Viewers subscribe to a per-contest channel after fetching an initial
//! snapshot. Flow: subscribe → receive deltas. There is no resume: a
//! dropped stream means re-fetch the snapshot and re-subscribe.

use serde::{Deserialize, Serialize};

use types::ids::ContestId;

/// Channels available for subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Live score deltas for one contest: `scoreboard@{contestId}`
    Scoreboard { contest_id: ContestId },
}

impl Channel {
    /// Parse a channel string into a Channel enum.
    ///
    /// Format: `scoreboard@17`
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('@').collect();
        match parts.as_slice() {
            ["scoreboard", contest] => contest.parse::<u32>().ok().map(|id| {
                Channel::Scoreboard {
                    contest_id: ContestId::new(id),
                }
            }),
            _ => None,
        }
    }

    /// Serialize as channel string.
    pub fn to_channel_string(&self) -> String {
        match self {
            Channel::Scoreboard { contest_id } => format!("scoreboard@{}", contest_id),
        }
    }
}

/// Client subscription request message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeMessage {
    /// Action: "subscribe"
    pub action: String,
    /// Channels to subscribe to
    pub channels: Vec<String>,
}

/// Server response to a subscription request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub action: String,
    pub channels: Vec<String>,
    pub success: bool,
    pub error: Option<String>,
}

impl SubscribeResponse {
    pub fn accepted(request: &SubscribeMessage) -> Self {
        Self {
            action: request.action.clone(),
            channels: request.channels.clone(),
            success: true,
            error: None,
        }
    }

    pub fn rejected(request: &SubscribeMessage, error: impl Into<String>) -> Self {
        Self {
            action: request.action.clone(),
            channels: request.channels.clone(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Parse a raw JSON message into a SubscribeMessage.
pub fn parse_subscribe_message(json: &str) -> Option<SubscribeMessage> {
    serde_json::from_str(json).ok()
}
