//! Error taxonomy for room and game operations.
//!
//! Every variant is a validation rejection, not a fault: it is reported
//! to the offending connection only and leaves room state untouched.
//! The `Display` strings are part of the wire contract — they travel
//! verbatim in `room_error`, `secret_error`, and `invalid_turn` payloads.

/// Errors that can occur during room and game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The room id is not (or no longer) in the registry.
    #[error("Room does not exist")]
    RoomNotFound,

    /// The room already has two players.
    #[error("Room is full")]
    RoomFull,

    /// The submitted secret failed the code format rules.
    #[error("Invalid secret")]
    InvalidSecret,

    /// The submitted guess failed the code format rules.
    #[error("Invalid guess")]
    InvalidGuess,

    /// The guesser does not hold the current turn.
    #[error("Not your turn")]
    NotYourTurn,

    /// The player already has a secret on record for this room.
    #[error("Secret already submitted")]
    SecretAlreadySubmitted,

    /// The room has left the secret-collection phase.
    #[error("Game already started")]
    GameAlreadyStarted,
}
