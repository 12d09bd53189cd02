//! Server-authoritative engine for a hidden-information deduction game.
//!
//! The library owns all game state: it deals a secret solution plus hands
//! from a themed card catalog, drives the Suggest -> Share -> Record ->
//! (Accused) round cycle in which every living seat acts simultaneously, and
//! projects a per-seat redacted view after each event. Transports feed it
//! plain deserialized events and fan the resulting snapshots back out.

pub mod card;
pub mod dealer;
pub mod error;
pub mod events;
pub mod game;
pub mod player;
pub mod skin;
pub mod snapshot;
pub mod turn;
pub mod utils;

pub use error::GameError;
pub use game::{ConnectionId, Game};
pub use skin::SkinBook;
