//! Room registry and game state machine for Bullpen.
//!
//! This crate is the whole game: code validation and scoring, the
//! two-player room lifecycle, and the four event handlers the server
//! dispatches to. Handlers never touch the network — they mutate the
//! [`RoomRegistry`] and return a list of [`Effect`]s (emit to a
//! connection, emit to a room group, join/drop a group) that the caller
//! applies through whatever transport it owns. That keeps every state
//! transition directly unit-testable.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — owns all rooms; creation, lookup, deletion
//! - [`Room`] — one match: players, secrets, turn, guess log
//! - [`Code`] — a 4-digit secret/guess with validation and scoring
//! - [`Effect`] — an outbound side effect requested by a handler
//! - [`engine`] — `submit_secret` / `submit_guess`, the in-game moves

mod code;
mod effect;
pub mod engine;
mod error;
mod registry;
mod room;

pub use code::{Code, InvalidCode, Score};
pub use effect::Effect;
pub use error::GameError;
pub use registry::RoomRegistry;
pub use room::{GuessRecord, Phase, Player, Room, MAX_PLAYERS};
