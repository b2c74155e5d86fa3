//! A single room: two players, their secrets, the turn, the guess log.

use bullpen_protocol::{ConnectionId, RoomId};
use rand::Rng;

use crate::{Code, GameError};

/// A room never holds more than two players.
pub const MAX_PLAYERS: usize = 2;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a room.
///
/// ```text
/// Forming --second join--> Full --both secrets set--> InProgress
/// ```
///
/// Strictly forward — a room never re-enters an earlier phase. There is
/// no `Finished` variant: a finished room is deleted from the registry,
/// and a missing entry is exactly what "finished" means to late guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One player, waiting for an opponent.
    Forming,
    /// Two players, collecting secrets.
    Full,
    /// Both secrets set, turns alternating.
    InProgress,
}

impl Phase {
    /// Returns `true` while secrets may still be submitted.
    pub fn accepts_secrets(&self) -> bool {
        matches!(self, Self::Forming | Self::Full)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forming => write!(f, "Forming"),
            Self::Full => write!(f, "Full"),
            Self::InProgress => write!(f, "InProgress"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player and guess log
// ---------------------------------------------------------------------------

/// One scored guess, appended to the guesser's log. Append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRecord {
    /// The guessed code.
    pub code: Code,
    /// Exact positional matches.
    pub bulls: u8,
    /// Right digit, wrong position.
    pub cows: u8,
}

/// A participant in a room, keyed by their connection.
#[derive(Debug, Clone)]
pub struct Player {
    /// The connection this player arrived on — their only identity.
    pub conn: ConnectionId,
    /// Display name shown to the opponent.
    pub name: String,
    /// `None` until submitted; never replaced afterwards.
    pub secret: Option<Code>,
    /// This player's guesses, in submission order.
    pub guesses: Vec<GuessRecord>,
}

impl Player {
    fn new(conn: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            conn,
            name: name.into(),
            secret: None,
            guesses: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// The shared state for one two-player match.
///
/// Owned exclusively by the [`RoomRegistry`](crate::RoomRegistry); the
/// registry entry is the sole source of truth for the game while the
/// room exists.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    phase: Phase,
    /// Insertion order is join order; holds 1 or 2 entries.
    players: Vec<Player>,
    /// When set, always one of `players`.
    current_turn: Option<ConnectionId>,
}

impl Room {
    /// Creates a room in phase `Forming` with the creator as sole player.
    pub fn new(
        id: RoomId,
        creator: ConnectionId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            phase: Phase::Forming,
            players: vec![Player::new(creator, name)],
            current_turn: None,
        }
    }

    /// The room's public identifier.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The connection currently permitted to guess, once the game runs.
    pub fn current_turn(&self) -> Option<ConnectionId> {
        self.current_turn
    }

    /// All players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Display names in join order, as broadcast in `room_update`.
    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Adds the second player; transitions `Forming` → `Full`.
    ///
    /// A connection already seated in the room never takes a second
    /// seat — rejoining refreshes the display name and leaves the
    /// roster, phase, and secret untouched.
    pub fn add_player(
        &mut self,
        conn: ConnectionId,
        name: impl Into<String>,
    ) -> Result<(), GameError> {
        if let Some(player) = self.player_mut(conn) {
            player.name = name.into();
            return Ok(());
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::RoomFull);
        }
        self.players.push(Player::new(conn, name));
        if self.players.len() == MAX_PLAYERS {
            self.phase = Phase::Full;
        }
        Ok(())
    }

    /// Looks up a player by connection.
    pub fn player(&self, conn: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.conn == conn)
    }

    /// Mutable lookup, used for secret intake and guess-log appends.
    pub fn player_mut(
        &mut self,
        conn: ConnectionId,
    ) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.conn == conn)
    }

    /// The single other player, once the room is full.
    pub fn opponent_of(&self, conn: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.conn != conn)
    }

    /// `true` when every player slot is filled and has a secret.
    pub fn all_secrets_set(&self) -> bool {
        self.players.len() == MAX_PLAYERS
            && self.players.iter().all(|p| p.secret.is_some())
    }

    /// Transitions to `InProgress`, picking the first turn uniformly at
    /// random among the players. Returns the chosen connection.
    pub fn start(&mut self) -> ConnectionId {
        let idx = rand::rng().random_range(0..self.players.len());
        let first = self.players[idx].conn;
        self.current_turn = Some(first);
        self.phase = Phase::InProgress;
        first
    }

    /// Hands the turn to the given player (the opponent after a
    /// non-winning guess).
    pub fn set_turn(&mut self, conn: ConnectionId) {
        debug_assert!(self.player(conn).is_some());
        self.current_turn = Some(conn);
    }

    /// Appends a scored guess to the guesser's log.
    pub fn record_guess(
        &mut self,
        conn: ConnectionId,
        record: GuessRecord,
    ) {
        if let Some(player) = self.player_mut(conn) {
            player.guesses.push(record);
        }
    }
}
