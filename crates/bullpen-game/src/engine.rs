//! In-game moves: secret intake, turn gating, scoring, win detection.
//!
//! Both handlers follow the same shape: look the room up, validate,
//! mutate, and describe the outbound traffic as [`Effect`]s. A guess for
//! a room id that is not in the registry is a silent no-op — a finished
//! room is indistinguishable from a stale or late message.

use bullpen_protocol::{ConnectionId, RoomId, ServerEvent};

use crate::{Code, Effect, GameError, GuessRecord, RoomRegistry};

/// Records a player's secret; starts the game once both are in.
///
/// Rejections (`secret_error`) go to the submitter only: a malformed
/// code, a re-submission, or a submission after the game has started.
/// When the second secret lands, the handler initializes the turn order
/// (uniformly random first player) and emits `start_game` to the room
/// followed by `your_turn` / `wait_turn` to the individual players —
/// start fires at most once per room.
pub fn submit_secret(
    registry: &mut RoomRegistry,
    room_id: &RoomId,
    conn: ConnectionId,
    secret: &str,
) -> Vec<Effect> {
    let Some(room) = registry.get_mut(room_id) else {
        tracing::debug!(%room_id, %conn, "secret for unknown room ignored");
        return Vec::new();
    };
    if room.player(conn).is_none() {
        tracing::warn!(%room_id, %conn, "secret from non-member ignored");
        return Vec::new();
    }

    let reject = |e: GameError| {
        tracing::debug!(%room_id, %conn, error = %e, "secret rejected");
        vec![Effect::to_connection(
            conn,
            ServerEvent::SecretError { message: e.to_string() },
        )]
    };

    let code = match Code::parse(secret) {
        Ok(code) => code,
        Err(_) => return reject(GameError::InvalidSecret),
    };
    if !room.phase().accepts_secrets() {
        return reject(GameError::GameAlreadyStarted);
    }
    if room.player(conn).is_some_and(|p| p.secret.is_some()) {
        return reject(GameError::SecretAlreadySubmitted);
    }

    if let Some(player) = room.player_mut(conn) {
        player.secret = Some(code);
    }
    let mut effects =
        vec![Effect::to_connection(conn, ServerEvent::SecretSaved)];

    if room.all_secrets_set() {
        let first = room.start();
        if let (Some(first_player), Some(other)) =
            (room.player(first), room.opponent_of(first))
        {
            let current_player = first_player.name.clone();
            let other_conn = other.conn;
            tracing::info!(%room_id, first = %first, "game started");
            effects.push(Effect::to_room(
                room_id.clone(),
                ServerEvent::StartGame { current_player },
            ));
            effects.push(Effect::to_connection(
                first,
                ServerEvent::YourTurn,
            ));
            effects.push(Effect::to_connection(
                other_conn,
                ServerEvent::WaitTurn,
            ));
        }
    }

    effects
}

/// Scores a guess against the opponent's secret.
///
/// Out-of-turn and malformed guesses are bounced back as `invalid_turn`
/// with no state change (turn is checked first, matching the original
/// service). A non-winning guess is logged, broadcast as `guess_result`,
/// and flips the turn. Four bulls ends the game: each player gets their
/// own `game_over` payload (own secret and opponent's), the room is
/// deleted, and its broadcast group dissolved.
pub fn submit_guess(
    registry: &mut RoomRegistry,
    room_id: &RoomId,
    conn: ConnectionId,
    guess: &str,
) -> Vec<Effect> {
    let Some(room) = registry.get_mut(room_id) else {
        tracing::debug!(%room_id, %conn, "guess for unknown room ignored");
        return Vec::new();
    };

    let reject = |e: GameError| {
        tracing::debug!(%room_id, %conn, error = %e, "guess rejected");
        vec![Effect::to_connection(
            conn,
            ServerEvent::InvalidTurn { message: e.to_string() },
        )]
    };

    if room.current_turn() != Some(conn) {
        return reject(GameError::NotYourTurn);
    }
    let code = match Code::parse(guess) {
        Ok(code) => code,
        Err(_) => return reject(GameError::InvalidGuess),
    };

    // The turn holder is always a member with a full opponent slot once
    // the game is in progress.
    let Some(guesser) = room.player(conn) else {
        return reject(GameError::NotYourTurn);
    };
    let guesser_name = guesser.name.clone();
    let Some(opponent) = room.opponent_of(conn) else {
        return reject(GameError::NotYourTurn);
    };
    let opp_conn = opponent.conn;
    let Some(opp_secret) = opponent.secret else {
        return reject(GameError::NotYourTurn);
    };

    let score = opp_secret.score(&code);

    if score.is_win() {
        let mut effects = Vec::new();
        for player in room.players() {
            let (Some(own), Some(theirs)) = (
                player.secret,
                room.opponent_of(player.conn).and_then(|o| o.secret),
            ) else {
                continue;
            };
            effects.push(Effect::to_connection(
                player.conn,
                ServerEvent::GameOver {
                    winner: guesser_name.clone(),
                    your_secret: own.to_string(),
                    opponent_secret: theirs.to_string(),
                },
            ));
        }
        effects.push(Effect::DropGroup(room_id.clone()));
        registry.delete_room(room_id);
        tracing::info!(%room_id, winner = %conn, "game over");
        return effects;
    }

    room.record_guess(
        conn,
        GuessRecord { code, bulls: score.bulls, cows: score.cows },
    );
    room.set_turn(opp_conn);
    tracing::debug!(
        %room_id,
        %conn,
        bulls = score.bulls,
        cows = score.cows,
        "guess scored"
    );

    vec![
        Effect::to_room(
            room_id.clone(),
            ServerEvent::GuessResult {
                player_id: conn,
                guess: code.to_string(),
                bulls: score.bulls,
                cows: score.cows,
            },
        ),
        Effect::to_connection(opp_conn, ServerEvent::YourTurn),
        Effect::to_connection(conn, ServerEvent::WaitTurn),
    ]
}
