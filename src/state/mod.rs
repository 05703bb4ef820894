//! Client state reconciliation for GridFire.
//!
//! This module holds the core types and the event dispatcher:
//!
//! - `action` - Player actions and abilities
//! - `cooldown` - Per-ability cooldown tracking
//! - `optimistic` - FIFO queue of unconfirmed local actions
//! - `reconcile` - Simulation seam and snapshot reconciliation
//! - `session` - Session identity and lobby listing
//! - `event` - Event union, wire decoding, protocol violations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        ClientState                               │
//! │                                                                  │
//! │  ┌──────────────┐  ┌─────────────────┐  ┌──────────────────┐    │
//! │  │   Session    │  │ OptimisticQueue │  │  CooldownTable   │    │
//! │  │              │  │                 │  │                  │    │
//! │  │ identity     │  │ unconfirmed     │  │ ability →        │    │
//! │  │ roster       │  │ local actions,  │  │   turns until    │    │
//! │  │ start time   │  │ oldest first    │  │   ready          │    │
//! │  └──────────────┘  └─────────────────┘  └──────────────────┘    │
//! │                                                                  │
//! │  snapshot (authoritative, simulation-owned)                      │
//! │  validated pool (confirmed actions not yet folded in)            │
//! │  turn_count (local clock) / feedback / lobbies                   │
//! └──────────────────────────────────────────────────────────────────┘
//!
//!       event ──▶ ClientState::apply ──▶ new ClientState
//! ```
//!
//! One event enters `apply` at a time and routes to exactly one handler;
//! handlers call into the components above and hand back a new, fully-formed
//! aggregate. Nothing mutates shared state outside a transition, so replaying
//! the same event sequence always yields the same state.

pub mod action;
pub mod cooldown;
pub mod event;
pub mod optimistic;
pub mod reconcile;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use action::{Ability, Action, ABILITIES};
pub use cooldown::{base_cooldown, CooldownTable};
pub use event::{ClientEvent, ProtocolViolation};
pub use optimistic::OptimisticQueue;
pub use reconcile::{reconcile, Simulation, Snapshot};
pub use session::{Lobby, Roster, Session, SessionPhase};

/// The full client-side view of a match.
///
/// This is the aggregate root and single unit of ownership: every transition
/// consumes the current value and returns a new one, so no partially-applied
/// state is ever observable. Consumers (rendering, networking) read the
/// returned value and must never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientState<S> {
    /// Session identity and lifecycle
    pub session: Session,

    /// Local clock, advanced only by [`ClientEvent::ClockTick`]
    pub turn_count: u64,

    /// Free-text feedback for the player
    pub feedback: String,

    /// Authoritative snapshot, owned here and replaced on reconciliation
    pub snapshot: S,

    /// Server-confirmed actions not yet folded into the snapshot
    pub validated: Vec<Action>,

    /// Locally-issued actions awaiting server confirmation
    pub optimistic: OptimisticQueue,

    /// Per-ability cooldown counters
    pub cooldowns: CooldownTable,

    /// Joinable lobbies, replaced wholesale on refresh
    pub lobbies: Vec<Lobby>,
}

impl<S> ClientState<S> {
    /// Create the initial client state with a freshly initialized snapshot.
    pub fn new<Sim>(sim: &Sim) -> Self
    where
        Sim: Simulation<Snapshot = S>,
    {
        Self {
            session: Session::new(),
            turn_count: 0,
            feedback: String::new(),
            snapshot: sim.init(&Roster::default()),
            validated: Vec::new(),
            optimistic: OptimisticQueue::new(),
            cooldowns: CooldownTable::new(),
            lobbies: Vec::new(),
        }
    }
}

impl<S: Snapshot> ClientState<S> {
    /// Apply one event, producing the next state.
    ///
    /// This is the sole mutation entry point. It is total over the declared
    /// event set; the only errors are [`ProtocolViolation`]s, which are fatal
    /// peer/programming errors rather than game-logic edge cases. Edge cases
    /// (empty-queue confirms, mid-cooldown uses, nothing to prune) are policy
    /// no-ops inside the components.
    pub fn apply<Sim>(mut self, sim: &Sim, event: ClientEvent) -> Result<Self, ProtocolViolation>
    where
        Sim: Simulation<Snapshot = S>,
    {
        match event {
            ClientEvent::SessionStarted {
                player_id,
                peer_ids,
                start_at,
            } => {
                self.session.join(player_id, peer_ids, start_at);
                self.snapshot = sim.init(&self.session.roster());
                Ok(self)
            }

            ClientEvent::ActionConfirmed(action) => {
                // Turn 0 has no preceding turn to resolve; saturating to a
                // zero boundary lands in the non-advancing branch, which
                // appends and confirms without touching the snapshot.
                let boundary_turn = action.turn_count.saturating_sub(1);

                let (snapshot, validated) = reconcile(
                    sim,
                    self.snapshot,
                    std::mem::take(&mut self.validated),
                    action.clone(),
                    boundary_turn,
                );
                self.snapshot = snapshot;
                self.validated = validated;
                self.optimistic.confirm(&action, self.session.player_id());
                Ok(self)
            }

            ClientEvent::LocalInput(action) => {
                // Inputs are dispatched before any tick that postdates
                // their capture, so a turn behind the local clock means the
                // event feed itself is broken, not a slow player.
                if action.turn_count < self.turn_count {
                    return Err(ProtocolViolation::StaleInput {
                        input_turn: action.turn_count,
                        local_turn: self.turn_count,
                    });
                }
                if let Some(ability) = action.ability {
                    let elapsed = action.turn_count - self.turn_count;
                    self.cooldowns.record_use(ability, elapsed);
                }
                self.optimistic.enqueue(action);
                Ok(self)
            }

            ClientEvent::Feedback(text) => {
                self.feedback = text;
                Ok(self)
            }

            ClientEvent::ClockTick => {
                // The only event that ages cooldowns and moves the local
                // clock; snapshot and queues are untouched.
                self.cooldowns.tick();
                self.turn_count += 1;
                Ok(self)
            }

            ClientEvent::IdentityAssigned(player_id) => {
                self.session.assign_identity(player_id);
                Ok(self)
            }

            ClientEvent::LobbiesRefreshed(lobbies) => {
                self.lobbies = lobbies;
                Ok(self)
            }
        }
    }
}
