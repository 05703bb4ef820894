//! Snapshot reconciliation.
//!
//! The authoritative game snapshot is produced by an external, deterministic
//! simulation; this module defines the trait seam for it and the engine that
//! folds newly confirmed actions into the snapshot.
//!
//! The engine never reorders events. Confirmations arrive in whatever order
//! the transport delivers them, and all turn skew is absorbed by comparing
//! the snapshot's turn count against the boundary turn of each confirmation.

use crate::state::action::Action;
use crate::state::session::Roster;

/// Authoritative game state produced by the simulation.
///
/// Opaque to this crate apart from its turn counter; it is replaced
/// wholesale on every reconciliation and never mutated in place.
pub trait Snapshot {
    /// The last turn folded into this snapshot. Monotonic, non-negative.
    fn turn_count(&self) -> u64;
}

/// The external deterministic simulation step.
///
/// `advance` must be pure and total over any target turn at or beyond the
/// snapshot's current turn: same snapshot, same actions, same target, same
/// result. The reconciliation engine relies on this to replay turns safely.
pub trait Simulation {
    type Snapshot: Snapshot;

    /// Build a fresh snapshot for a session roster.
    fn init(&self, roster: &Roster) -> Self::Snapshot;

    /// Advance the snapshot to `target_turn`, applying every validated
    /// action whose turn falls in the simulated range.
    fn advance(
        &self,
        snapshot: Self::Snapshot,
        validated: &[Action],
        target_turn: u64,
    ) -> Self::Snapshot;
}

/// Fold a newly confirmed action into the snapshot.
///
/// `boundary_turn` is the turn immediately preceding the incoming action's
/// turn: everything up to and including it is fully resolved once this
/// returns. When the snapshot is still behind the boundary the simulation is
/// advanced to it and the validated pool pruned to actions beyond the
/// boundary; otherwise both are left as-is. Either way the incoming action is
/// appended to the pool afterwards.
///
/// Re-delivering a confirmation for an already-resolved boundary is
/// harmless: the advancing branch is skipped entirely, so no turn is ever
/// replayed into the simulation twice.
pub fn reconcile<S: Simulation>(
    sim: &S,
    mut snapshot: S::Snapshot,
    mut validated: Vec<Action>,
    incoming: Action,
    boundary_turn: u64,
) -> (S::Snapshot, Vec<Action>) {
    if snapshot.turn_count() < boundary_turn {
        snapshot = sim.advance(snapshot, &validated, boundary_turn);
        validated.retain(|action| action.turn_count > boundary_turn);
    }
    validated.push(incoming);
    (snapshot, validated)
}
