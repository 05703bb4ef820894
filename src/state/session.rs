//! Session identity and lobby listing.
//!
//! A session moves from `Unjoined` to `Joined` exactly once, when the server
//! announces the match roster and scheduled start. Identity assignment is
//! orthogonal: the server may announce the local player's id before or after
//! the join, and the assignment simply overwrites whatever is held. The
//! lobby listing is an always-available read that is replaced wholesale on
//! every refresh, independent of session phase.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No match roster received yet
    #[default]
    Unjoined,
    /// Roster and start time received; the match runs from `start_at`
    Joined,
}

/// The participants a snapshot is initialized with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Local player's id
    pub player_id: String,

    /// Every other participant
    pub peer_ids: BTreeSet<String>,
}

/// Session identity and lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    phase: SessionPhase,

    /// Local player's id, once known
    player_id: Option<String>,

    /// Other participants, set on join
    peer_ids: BTreeSet<String>,

    /// Scheduled match start, set on join
    start_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the local player's identity.
    pub fn assign_identity(&mut self, player_id: String) {
        self.player_id = Some(player_id);
    }

    /// Join a match: fix identity, roster, and start time.
    pub fn join(&mut self, player_id: String, peer_ids: BTreeSet<String>, start_at: DateTime<Utc>) {
        self.phase = SessionPhase::Joined;
        self.player_id = Some(player_id);
        self.peer_ids = peer_ids;
        self.start_at = Some(start_at);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_joined(&self) -> bool {
        self.phase == SessionPhase::Joined
    }

    /// Local player's id, if assigned.
    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    /// Whether the given id is the local player.
    pub fn is_local(&self, player_id: &str) -> bool {
        self.player_id() == Some(player_id)
    }

    pub fn peer_ids(&self) -> &BTreeSet<String> {
        &self.peer_ids
    }

    pub fn start_at(&self) -> Option<DateTime<Utc>> {
        self.start_at
    }

    /// Roster for initializing a snapshot.
    pub fn roster(&self) -> Roster {
        Roster {
            player_id: self.player_id.clone().unwrap_or_default(),
            peer_ids: self.peer_ids.clone(),
        }
    }
}

/// One joinable lobby as advertised by the matchmaking service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lobby {
    /// Unique lobby ID
    pub id: String,

    /// Current members
    pub player_ids: Vec<String>,
}

impl Lobby {
    pub fn new(id: impl Into<String>, player_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            player_ids,
        }
    }

    /// Convert to JSON for render layers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "playerIds": self.player_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_session_is_unjoined() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Unjoined);
        assert!(!session.is_joined());
        assert_eq!(session.player_id(), None);
        assert_eq!(session.start_at(), None);
    }

    #[test]
    fn test_join_sets_identity_roster_and_start() {
        let mut session = Session::new();
        let start = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        session.join(
            "me".to_string(),
            BTreeSet::from(["p2".to_string(), "p3".to_string()]),
            start,
        );

        assert!(session.is_joined());
        assert!(session.is_local("me"));
        assert!(!session.is_local("p2"));
        assert_eq!(session.peer_ids().len(), 2);
        assert_eq!(session.start_at(), Some(start));
    }

    #[test]
    fn test_identity_can_arrive_before_join() {
        let mut session = Session::new();
        session.assign_identity("early".to_string());
        assert!(!session.is_joined());
        assert!(session.is_local("early"));
    }

    #[test]
    fn test_identity_overwrites_after_join() {
        let mut session = Session::new();
        let start = Utc.timestamp_millis_opt(0).unwrap();
        session.join("me".to_string(), BTreeSet::new(), start);

        session.assign_identity("me-confirmed".to_string());
        assert!(session.is_local("me-confirmed"));
        assert!(!session.is_local("me"));
        // Join-time roster and start survive the overwrite
        assert!(session.is_joined());
        assert_eq!(session.start_at(), Some(start));
    }

    #[test]
    fn test_roster_reflects_session() {
        let mut session = Session::new();
        session.join(
            "me".to_string(),
            BTreeSet::from(["p2".to_string()]),
            Utc.timestamp_millis_opt(0).unwrap(),
        );

        let roster = session.roster();
        assert_eq!(roster.player_id, "me");
        assert!(roster.peer_ids.contains("p2"));
    }

    #[test]
    fn test_lobby_to_json() {
        let lobby = Lobby::new("L1", vec!["a".to_string(), "b".to_string()]);
        let json = lobby.to_json();
        assert_eq!(json["id"], "L1");
        assert_eq!(json["playerIds"][1], "b");
    }
}
