//! Player actions and abilities.
//!
//! An `Action` is one player's intended move for one turn. The same shape is
//! used for locally-issued (optimistic) actions and for server-confirmed
//! (validated) actions; only the pool it sits in differs.

use serde::Serialize;

/// The closed set of abilities a player can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Single-cell shot
    Basic,
    /// Area blast
    Bomb,
    /// Diagonal cross pattern
    DiagCross,
}

/// All abilities, in wire order.
pub const ABILITIES: [Ability; 3] = [Ability::Basic, Ability::Bomb, Ability::DiagCross];

impl Ability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Bomb => "bomb",
            Self::DiagCross => "diag_cross",
        }
    }

    /// Parse the wire form. Returns `None` for unrecognized names; the
    /// caller decides whether that is a protocol violation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(Self::Basic),
            "bomb" => Some(Self::Bomb),
            "diag_cross" => Some(Self::DiagCross),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single player's move for a specific turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Who issued the action
    pub player_id: String,

    /// The turn the action applies to
    pub turn_count: u64,

    /// Ability used, if any (movement-only actions carry none).
    /// `projectileType` on the wire.
    #[serde(rename = "projectileType")]
    pub ability: Option<Ability>,
}

impl Action {
    pub fn new(player_id: impl Into<String>, turn_count: u64, ability: Option<Ability>) -> Self {
        Self {
            player_id: player_id.into(),
            turn_count,
            ability,
        }
    }

    /// Convert to the wire form used by the transport.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "playerId": self.player_id,
            "turnCount": self.turn_count,
            "projectileType": self.ability.map(|a| a.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_round_trip() {
        for ability in ABILITIES {
            assert_eq!(Ability::from_str(ability.as_str()), Some(ability));
        }
        assert_eq!(Ability::from_str("laser"), None);
    }

    #[test]
    fn test_action_to_json() {
        let action = Action::new("p1", 4, Some(Ability::Bomb));
        let json = action.to_json();
        assert_eq!(json["playerId"], "p1");
        assert_eq!(json["turnCount"], 4);
        assert_eq!(json["projectileType"], "bomb");

        let bare = Action::new("p1", 5, None);
        assert_eq!(bare.to_json()["projectileType"], serde_json::Value::Null);
    }
}
