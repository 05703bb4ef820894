//! Per-ability cooldown tracking.
//!
//! Each ability carries a remaining-turns-until-ready counter that is aged by
//! the local clock tick and set when an ability use is accepted. The table is
//! purely local bookkeeping for input gating; the server remains the
//! authority on whether an action was actually legal.

use std::collections::HashMap;

use crate::state::action::{Ability, ABILITIES};

/// Default base cooldown, in turns, for an ability.
pub fn base_cooldown(ability: Ability) -> u64 {
    match ability {
        Ability::Basic => 1,
        Ability::Bomb => 2,
        Ability::DiagCross => 3,
    }
}

/// Remaining and base cooldown for one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CooldownEntry {
    remaining: u64,
    base: u64,
}

/// Cooldown state for every ability.
///
/// A fresh table starts each ability at its base value, matching the wire
/// protocol's initial client state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownTable {
    entries: HashMap<Ability, CooldownEntry>,
}

impl Default for CooldownTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CooldownTable {
    /// Create a table with the default base cooldowns.
    pub fn new() -> Self {
        Self::with_bases(ABILITIES.iter().map(|&a| (a, base_cooldown(a))))
    }

    /// Create a table with custom base cooldowns. Abilities not listed fall
    /// back to their defaults.
    pub fn with_bases(bases: impl IntoIterator<Item = (Ability, u64)>) -> Self {
        let mut entries: HashMap<Ability, CooldownEntry> = ABILITIES
            .iter()
            .map(|&a| {
                let base = base_cooldown(a);
                (
                    a,
                    CooldownEntry {
                        remaining: base,
                        base,
                    },
                )
            })
            .collect();
        for (ability, base) in bases {
            entries.insert(ability, CooldownEntry { remaining: base, base });
        }
        Self { entries }
    }

    /// Age every cooldown by one turn, floored at zero.
    pub fn tick(&mut self) {
        for entry in self.entries.values_mut() {
            entry.remaining = entry.remaining.saturating_sub(1);
        }
    }

    /// Record an attempted ability use.
    ///
    /// An ability counts as cooling down only when its counter is strictly
    /// between zero and the base value. A counter at zero or still at its
    /// base is treated as ready and reset to `base + elapsed + 1`, where
    /// `elapsed` is the number of turns the input's turn is ahead of the
    /// local clock. Mid-cooldown uses leave the counter untouched: the input
    /// still goes into the optimistic queue and the server decides its fate,
    /// so the player is not punished with a fresh cooldown for it.
    pub fn record_use(&mut self, ability: Ability, elapsed: u64) {
        if let Some(entry) = self.entries.get_mut(&ability) {
            let is_cooling_down = entry.remaining != 0 && entry.remaining < entry.base;
            if !is_cooling_down {
                entry.remaining = entry.base + elapsed + 1;
            }
        }
    }

    /// Turns remaining before the ability is ready. Zero means ready.
    pub fn remaining(&self, ability: Ability) -> u64 {
        self.entries.get(&ability).map_or(0, |e| e.remaining)
    }

    /// Base cooldown configured for the ability.
    pub fn base(&self, ability: Ability) -> u64 {
        self.entries.get(&ability).map_or(0, |e| e.base)
    }

    /// Whether the ability would be accepted by [`record_use`] right now.
    ///
    /// [`record_use`]: Self::record_use
    pub fn is_ready(&self, ability: Ability) -> bool {
        self.entries
            .get(&ability)
            .map_or(true, |e| e.remaining == 0 || e.remaining >= e.base)
    }

    /// Convert to JSON for render layers.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for ability in ABILITIES {
            obj.insert(
                ability.as_str().to_string(),
                serde_json::json!(self.remaining(ability)),
            );
        }
        serde_json::Value::Object(obj)
    }
}
