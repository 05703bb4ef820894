//! GridFire Client State Library
//!
//! This crate provides the state-reconciliation core for GridFire game
//! clients: an authoritative, server-confirmed turn stream is reconciled
//! against speculative local input so the player gets instant feedback for
//! their own actions while always converging to the server's ground truth.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Event Dispatcher** - One pure transition per event; the only way
//!   client state ever changes.
//!
//! - **Reconciliation Engine** - Folds newly confirmed actions into the
//!   authoritative snapshot by re-running the external simulation up to the
//!   boundary turn, pruning already-applied actions.
//!
//! - **Optimistic Queue** - Locally-issued actions awaiting the server's
//!   echo; confirmed oldest-first.
//!
//! - **Cooldown Tracker** - Per-ability remaining-turn counters, aged by the
//!   local clock tick.
//!
//! - **Session & Lobbies** - Session lifecycle, identity assignment, and the
//!   joinable-lobby listing.
//!
//! # Design Principles
//!
//! 1. **One event at a time** - [`ClientState::apply`] consumes the current
//!    state and returns the next one; there is no other mutation path and no
//!    shared mutable state.
//!
//! 2. **The simulation is external** - The deterministic game step is a
//!    [`Simulation`] the caller supplies; this crate decides only when to
//!    invoke it and how to merge its results.
//!
//! 3. **Edge cases are policy, violations are fatal** - Empty-queue confirms
//!    and mid-cooldown uses are silent no-ops; anything outside the protocol
//!    is a [`ProtocolViolation`], never absorbed.
//!
//! 4. **No networking** - This crate is pure state; the transport hands in
//!    already-parsed events (or JSON envelopes via
//!    [`ClientEvent::from_json`]).
//!
//! # Example
//!
//! ```rust
//! use gridfire_client::state::{
//!     Action, ClientEvent, ClientState, Roster, Simulation, Snapshot,
//! };
//!
//! // A trivial stand-in for the real game simulation.
//! struct Turns(u64);
//! impl Snapshot for Turns {
//!     fn turn_count(&self) -> u64 {
//!         self.0
//!     }
//! }
//! struct Sim;
//! impl Simulation for Sim {
//!     type Snapshot = Turns;
//!     fn init(&self, _roster: &Roster) -> Turns {
//!         Turns(0)
//!     }
//!     fn advance(&self, snapshot: Turns, _validated: &[Action], target_turn: u64) -> Turns {
//!         Turns(snapshot.0.max(target_turn))
//!     }
//! }
//!
//! let sim = Sim;
//! let state = ClientState::new(&sim);
//! let state = state
//!     .apply(&sim, ClientEvent::IdentityAssigned("p1".to_string()))
//!     .unwrap();
//! let state = state
//!     .apply(&sim, ClientEvent::LocalInput(Action::new("p1", 0, None)))
//!     .unwrap();
//!
//! assert_eq!(state.optimistic.len(), 1);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
