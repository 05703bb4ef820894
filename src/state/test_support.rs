//! Deterministic in-test simulation.
//!
//! Stands in for the real game simulation in tests: advancing just moves the
//! turn counter to the target and records what the engine asked for, so
//! tests can assert exactly when and with which actions the simulation ran.

use crate::state::action::Action;
use crate::state::reconcile::{Simulation, Snapshot};
use crate::state::session::Roster;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSnapshot {
    turn: u64,
    roster: Roster,
    advances: Vec<(u64, Vec<Action>)>,
}

impl GridSnapshot {
    pub fn at_turn(turn: u64) -> Self {
        Self {
            turn,
            ..Self::default()
        }
    }

    /// Every `advance` call this snapshot has seen: (target turn, pool).
    pub fn advances(&self) -> &[(u64, Vec<Action>)] {
        &self.advances
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

impl Snapshot for GridSnapshot {
    fn turn_count(&self) -> u64 {
        self.turn
    }
}

pub struct GridSim;

impl Simulation for GridSim {
    type Snapshot = GridSnapshot;

    fn init(&self, roster: &Roster) -> GridSnapshot {
        GridSnapshot {
            turn: 0,
            roster: roster.clone(),
            advances: Vec::new(),
        }
    }

    fn advance(
        &self,
        mut snapshot: GridSnapshot,
        validated: &[Action],
        target_turn: u64,
    ) -> GridSnapshot {
        snapshot.advances.push((target_turn, validated.to_vec()));
        snapshot.turn = snapshot.turn.max(target_turn);
        snapshot
    }
}
