//! Core protocol types for Bullpen's wire format.
//!
//! Every message on the wire is a single JSON object carrying an `event`
//! tag plus the event's payload fields, e.g.
//! `{"event":"join_room","room_id":"A3F9K","name":"Ana"}`. The
//! internally-tagged serde representation below produces exactly that
//! shape, so the Rust enums double as the wire documentation.

use std::fmt;

use bullpen_transport::ConnectionId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A room's short public identifier.
///
/// Five characters drawn from uppercase ASCII letters and digits —
/// short enough to read over voice chat, long enough that collisions
/// are rare. Generation lives in the game crate; this type just carries
/// the value around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Wraps an already-generated identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Recipient — who should receive an outbound event?
// ---------------------------------------------------------------------------

/// Specifies who should receive a server event.
///
/// Handlers return `(Recipient, ServerEvent)` pairs; the hub resolves
/// `Room` recipients against its broadcast-group membership. This never
/// travels on the wire — it's routing metadata only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Send to one specific connection.
    Connection(ConnectionId),

    /// Send to every connection grouped under a room.
    Room(RoomId),
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// Events a client sends to the server.
///
/// The sender's [`ConnectionId`] is NOT part of any payload — the server
/// already knows it from the socket the event arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Open a new room with the sender as its first player.
    CreateRoom { name: String },

    /// Join an existing room as the second player.
    JoinRoom { room_id: RoomId, name: String },

    /// Submit the sender's secret code for the given room.
    SubmitSecret { room_id: RoomId, secret: String },

    /// Submit a guess against the opponent's secret.
    SubmitGuess { room_id: RoomId, guess: String },
}

// ---------------------------------------------------------------------------
// Outbound events
// ---------------------------------------------------------------------------

/// Events the server sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Sent once when a connection is accepted, so the client learns the
    /// identifier the server will use for it in `guess_result.player_id`.
    Connected { connection_id: ConnectionId },

    /// The room was created; sent to the creator only.
    RoomCreated { room_id: RoomId },

    /// Current player names in join order; broadcast to the room.
    RoomUpdate { players: Vec<String> },

    /// Room-level rejection (unknown id, room full); sent to the caller only.
    RoomError { message: String },

    /// The submitted secret was rejected; sent to the submitter only.
    SecretError { message: String },

    /// The submitted secret was accepted; sent to the submitter only.
    SecretSaved,

    /// Both secrets are in — the game begins. Broadcast to the room.
    StartGame { current_player: String },

    /// It is the recipient's turn to guess.
    YourTurn,

    /// The recipient must wait for the opponent's guess.
    WaitTurn,

    /// The guess was rejected (out of turn or malformed); submitter only.
    InvalidTurn { message: String },

    /// A scored, non-winning guess; broadcast to the room.
    GuessResult {
        player_id: ConnectionId,
        guess: String,
        bulls: u8,
        cows: u8,
    },

    /// The game is over. Each player receives their own copy with their
    /// own secret in `your_secret` and the other player's in
    /// `opponent_secret`.
    GameOver {
        winner: String,
        your_secret: String,
        opponent_secret: String,
    },
}

// =========================================================================
// Tests
// =========================================================================
