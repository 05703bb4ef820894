//! Client events and wire decoding.
//!
//! Every mutation of [`ClientState`] is driven by exactly one `ClientEvent`.
//! The transport delivers events as JSON envelopes of the form
//! `{"type": "...", "payload": ...}`; [`ClientEvent::from_json`] converts
//! them, rejecting anything outside the closed protocol with a
//! [`ProtocolViolation`].
//!
//! [`ClientState`]: crate::state::ClientState

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::state::action::{Ability, Action};
use crate::state::session::Lobby;

/// An event consumed by the state dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Server announced the match roster and scheduled start
    SessionStarted {
        player_id: String,
        peer_ids: BTreeSet<String>,
        start_at: DateTime<Utc>,
    },

    /// Server confirmed a player action for a turn
    ActionConfirmed(Action),

    /// Locally captured input, not yet confirmed
    LocalInput(Action),

    /// Free-text feedback for the player
    Feedback(String),

    /// Local clock advanced one turn
    ClockTick,

    /// Server told us which player we are
    IdentityAssigned(String),

    /// Matchmaking refreshed the joinable-lobby listing
    LobbiesRefreshed(Vec<Lobby>),
}

/// Fatal protocol error.
///
/// Everything else in this crate is a policy no-op; these are programming or
/// peer errors that must not be absorbed silently. The dispatcher and the
/// wire decoder return them instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// Event envelope carried a type outside the closed set
    UnknownEventKind(String),

    /// Ability name outside the closed set
    UnknownAbility(String),

    /// Envelope payload missing a field or carrying the wrong shape
    MalformedPayload {
        kind: &'static str,
        field: &'static str,
    },

    /// Local input for a turn earlier than the local clock
    StaleInput { input_turn: u64, local_turn: u64 },
}

impl std::fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEventKind(kind) => write!(f, "Unknown event kind '{}'", kind),
            Self::UnknownAbility(name) => write!(f, "Unknown ability '{}'", name),
            Self::MalformedPayload { kind, field } => {
                write!(f, "Malformed '{}' payload: bad or missing '{}'", kind, field)
            }
            Self::StaleInput {
                input_turn,
                local_turn,
            } => write!(
                f,
                "Input for turn {} behind local clock at turn {}",
                input_turn, local_turn
            ),
        }
    }
}

impl std::error::Error for ProtocolViolation {}

impl ClientEvent {
    /// Decode a wire envelope.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ProtocolViolation> {
        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or(ProtocolViolation::MalformedPayload {
                kind: "envelope",
                field: "type",
            })?;

        match kind {
            "RECEIVED_START" => {
                let payload = payload_of(value, "RECEIVED_START")?;
                let player_id = str_field(payload, "RECEIVED_START", "playerId")?;
                let peers = payload.get("peerIds").and_then(|p| p.as_array()).ok_or(
                    ProtocolViolation::MalformedPayload {
                        kind: "RECEIVED_START",
                        field: "peerIds",
                    },
                )?;
                let mut peer_ids = BTreeSet::new();
                for peer in peers {
                    let id = peer.as_str().ok_or(ProtocolViolation::MalformedPayload {
                        kind: "RECEIVED_START",
                        field: "peerIds",
                    })?;
                    peer_ids.insert(id.to_string());
                }
                let millis = payload.get("startAt").and_then(|t| t.as_i64()).ok_or(
                    ProtocolViolation::MalformedPayload {
                        kind: "RECEIVED_START",
                        field: "startAt",
                    },
                )?;
                let start_at = Utc.timestamp_millis_opt(millis).single().ok_or(
                    ProtocolViolation::MalformedPayload {
                        kind: "RECEIVED_START",
                        field: "startAt",
                    },
                )?;
                Ok(Self::SessionStarted {
                    player_id,
                    peer_ids,
                    start_at,
                })
            }
            "RECEIVED_ACTION" => Ok(Self::ActionConfirmed(decode_action(
                payload_of(value, "RECEIVED_ACTION")?,
                "RECEIVED_ACTION",
            )?)),
            "INPUT" => Ok(Self::LocalInput(decode_action(
                payload_of(value, "INPUT")?,
                "INPUT",
            )?)),
            "FEEDBACK" => {
                let payload = payload_of(value, "FEEDBACK")?;
                let text = payload.as_str().ok_or(ProtocolViolation::MalformedPayload {
                    kind: "FEEDBACK",
                    field: "payload",
                })?;
                Ok(Self::Feedback(text.to_string()))
            }
            "TICK" => Ok(Self::ClockTick),
            "YOU" => {
                let payload = payload_of(value, "YOU")?;
                let id = payload.as_str().ok_or(ProtocolViolation::MalformedPayload {
                    kind: "YOU",
                    field: "payload",
                })?;
                Ok(Self::IdentityAssigned(id.to_string()))
            }
            "RECEIVED_LOBBIES" => {
                let payload = payload_of(value, "RECEIVED_LOBBIES")?;
                let entries = payload.get("lobbies").and_then(|l| l.as_array()).ok_or(
                    ProtocolViolation::MalformedPayload {
                        kind: "RECEIVED_LOBBIES",
                        field: "lobbies",
                    },
                )?;
                let mut lobbies = Vec::with_capacity(entries.len());
                for entry in entries {
                    let id = str_field(entry, "RECEIVED_LOBBIES", "id")?;
                    let members = entry.get("playerIds").and_then(|p| p.as_array()).ok_or(
                        ProtocolViolation::MalformedPayload {
                            kind: "RECEIVED_LOBBIES",
                            field: "playerIds",
                        },
                    )?;
                    let mut player_ids = Vec::with_capacity(members.len());
                    for member in members {
                        let id =
                            member.as_str().ok_or(ProtocolViolation::MalformedPayload {
                                kind: "RECEIVED_LOBBIES",
                                field: "playerIds",
                            })?;
                        player_ids.push(id.to_string());
                    }
                    lobbies.push(Lobby::new(id, player_ids));
                }
                Ok(Self::LobbiesRefreshed(lobbies))
            }
            other => Err(ProtocolViolation::UnknownEventKind(other.to_string())),
        }
    }
}

fn payload_of<'a>(
    value: &'a serde_json::Value,
    kind: &'static str,
) -> Result<&'a serde_json::Value, ProtocolViolation> {
    value
        .get("payload")
        .ok_or(ProtocolViolation::MalformedPayload {
            kind,
            field: "payload",
        })
}

fn str_field(
    value: &serde_json::Value,
    kind: &'static str,
    field: &'static str,
) -> Result<String, ProtocolViolation> {
    value
        .get(field)
        .and_then(|f| f.as_str())
        .map(str::to_string)
        .ok_or(ProtocolViolation::MalformedPayload { kind, field })
}

fn decode_action(
    payload: &serde_json::Value,
    kind: &'static str,
) -> Result<Action, ProtocolViolation> {
    let player_id = str_field(payload, kind, "playerId")?;
    let turn_count = payload.get("turnCount").and_then(|t| t.as_u64()).ok_or(
        ProtocolViolation::MalformedPayload {
            kind,
            field: "turnCount",
        },
    )?;
    let ability = match payload.get("projectileType") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(name)) => Some(
            Ability::from_str(name)
                .ok_or_else(|| ProtocolViolation::UnknownAbility(name.clone()))?,
        ),
        Some(_) => {
            return Err(ProtocolViolation::MalformedPayload {
                kind,
                field: "projectileType",
            })
        }
    };
    Ok(Action::new(player_id, turn_count, ability))
}
