//! Integration tests for the Bullpen server, handler, and full match flow.
//!
//! These talk to a real server over WebSocket with hand-written JSON, so
//! they double as a check on the wire format clients actually see.

use std::time::Duration;

use bullpen::BullpenServerBuilder;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::Message;

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a server on a random port and returns the address.
async fn start_server() -> String {
    let server = BullpenServerBuilder::new()
        .bind("127.0.0.1:0")
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

/// Connects and drains the `connected` greeting.
async fn connect(addr: &str) -> ClientWs {
    let (mut ws, _) =
        tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .expect("should connect");
    let greeting = recv_event(&mut ws).await;
    assert_eq!(greeting["event"], "connected");
    assert!(greeting["connection_id"].is_u64());
    ws
}

async fn send_event(ws: &mut ClientWs, event: Value) {
    let text = event.to_string();
    ws.send(Message::Text(text.into())).await.expect("send event");
}

/// Receives the next server event, with a timeout so a missing event
/// fails the test instead of hanging it.
async fn recv_event(ws: &mut ClientWs) -> Value {
    let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out waiting for event")
        .expect("stream ended")
        .expect("recv event");
    serde_json::from_slice(&msg.into_data()).expect("decode event")
}

/// Asserts that no event arrives within a short window.
async fn expect_silence(ws: &mut ClientWs) {
    let result =
        tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "expected silence, got {result:?}");
}

/// Creates a room from `ws` and returns the room id. Drains the
/// `room_created` and `room_update` events.
async fn create_room(ws: &mut ClientWs, name: &str) -> String {
    send_event(ws, json!({"event": "create_room", "name": name})).await;

    let created = recv_event(ws).await;
    assert_eq!(created["event"], "room_created");
    let room_id = created["room_id"]
        .as_str()
        .expect("room_id should be a string")
        .to_string();
    assert_eq!(room_id.len(), 5);

    let update = recv_event(ws).await;
    assert_eq!(update["event"], "room_update");
    assert_eq!(update["players"], json!([name]));

    room_id
}

/// Drives two connections through create/join/secrets to a started game.
///
/// Returns `(turn_ws, wait_ws, turn_secret, wait_secret)` where
/// `turn_ws` holds the first turn, and each secret belongs to the socket
/// in the same position.
async fn start_match<'a>(
    ws1: &'a mut ClientWs,
    ws2: &'a mut ClientWs,
    room_id: &str,
) -> (&'a mut ClientWs, &'a mut ClientWs, String, String) {
    send_event(
        ws2,
        json!({"event": "join_room", "room_id": room_id, "name": "Ben"}),
    )
    .await;
    let update = recv_event(ws2).await;
    assert_eq!(update["event"], "room_update");
    assert_eq!(update["players"], json!(["Ana", "Ben"]));
    let update = recv_event(ws1).await;
    assert_eq!(update["event"], "room_update");

    let (ana_secret, ben_secret) = ("1234", "5678");
    send_event(
        ws1,
        json!({"event": "submit_secret", "room_id": room_id, "secret": ana_secret}),
    )
    .await;
    assert_eq!(recv_event(ws1).await["event"], "secret_saved");

    send_event(
        ws2,
        json!({"event": "submit_secret", "room_id": room_id, "secret": ben_secret}),
    )
    .await;
    assert_eq!(recv_event(ws2).await["event"], "secret_saved");

    // Both secrets in: start_game broadcast, then per-player turn events.
    let start1 = recv_event(ws1).await;
    let start2 = recv_event(ws2).await;
    assert_eq!(start1["event"], "start_game");
    assert_eq!(start2["event"], "start_game");
    assert_eq!(start1["current_player"], start2["current_player"]);

    let turn1 = recv_event(ws1).await;
    let turn2 = recv_event(ws2).await;

    if start1["current_player"] == "Ana" {
        assert_eq!(turn1["event"], "your_turn");
        assert_eq!(turn2["event"], "wait_turn");
        (ws1, ws2, ana_secret.to_string(), ben_secret.to_string())
    } else {
        assert_eq!(start1["current_player"], "Ben");
        assert_eq!(turn1["event"], "wait_turn");
        assert_eq!(turn2["event"], "your_turn");
        (ws2, ws1, ben_secret.to_string(), ana_secret.to_string())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_create_room_returns_id_and_roster() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;
    let room_id = create_room(&mut ws, "Ana").await;
    assert!(
        room_id
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
}

#[tokio::test]
async fn test_join_unknown_room_rejected() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send_event(
        &mut ws,
        json!({"event": "join_room", "room_id": "ZZZZZ", "name": "Ben"}),
    )
    .await;

    let err = recv_event(&mut ws).await;
    assert_eq!(err["event"], "room_error");
    assert_eq!(err["message"], "Room does not exist");
}

#[tokio::test]
async fn test_third_join_rejected_room_full() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;
    let mut ws3 = connect(&addr).await;

    let room_id = create_room(&mut ws1, "Ana").await;
    send_event(
        &mut ws2,
        json!({"event": "join_room", "room_id": room_id, "name": "Ben"}),
    )
    .await;
    assert_eq!(recv_event(&mut ws2).await["event"], "room_update");

    send_event(
        &mut ws3,
        json!({"event": "join_room", "room_id": room_id, "name": "Cal"}),
    )
    .await;
    let err = recv_event(&mut ws3).await;
    assert_eq!(err["event"], "room_error");
    assert_eq!(err["message"], "Room is full");
}

#[tokio::test]
async fn test_invalid_secret_rejected() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;
    let room_id = create_room(&mut ws, "Ana").await;

    for bad in ["1123", "0234", "12a4", "123", "12345"] {
        send_event(
            &mut ws,
            json!({"event": "submit_secret", "room_id": room_id, "secret": bad}),
        )
        .await;
        let err = recv_event(&mut ws).await;
        assert_eq!(err["event"], "secret_error", "secret {bad:?}");
        assert_eq!(err["message"], "Invalid secret");
    }
}

#[tokio::test]
async fn test_duplicate_secret_rejected() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;
    let room_id = create_room(&mut ws, "Ana").await;

    send_event(
        &mut ws,
        json!({"event": "submit_secret", "room_id": room_id, "secret": "1234"}),
    )
    .await;
    assert_eq!(recv_event(&mut ws).await["event"], "secret_saved");

    send_event(
        &mut ws,
        json!({"event": "submit_secret", "room_id": room_id, "secret": "5678"}),
    )
    .await;
    let err = recv_event(&mut ws).await;
    assert_eq!(err["event"], "secret_error");
    assert_eq!(err["message"], "Secret already submitted");
}

#[tokio::test]
async fn test_guess_out_of_turn_rejected() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;
    let room_id = create_room(&mut ws1, "Ana").await;

    let (_turn_ws, wait_ws, _, _) =
        start_match(&mut ws1, &mut ws2, &room_id).await;

    send_event(
        wait_ws,
        json!({"event": "submit_guess", "room_id": room_id, "guess": "1234"}),
    )
    .await;
    let err = recv_event(wait_ws).await;
    assert_eq!(err["event"], "invalid_turn");
    assert_eq!(err["message"], "Not your turn");
}

#[tokio::test]
async fn test_malformed_guess_rejected_without_losing_turn() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;
    let room_id = create_room(&mut ws1, "Ana").await;

    let (turn_ws, _wait_ws, turn_secret, _) =
        start_match(&mut ws1, &mut ws2, &room_id).await;

    send_event(
        turn_ws,
        json!({"event": "submit_guess", "room_id": room_id, "guess": "11x"}),
    )
    .await;
    let err = recv_event(turn_ws).await;
    assert_eq!(err["event"], "invalid_turn");
    assert_eq!(err["message"], "Invalid guess");

    // Turn was not consumed: a valid guess still goes through.
    send_event(
        turn_ws,
        json!({"event": "submit_guess", "room_id": room_id, "guess": turn_secret}),
    )
    .await;
    assert_eq!(recv_event(turn_ws).await["event"], "guess_result");
}

#[tokio::test]
async fn test_full_match_to_game_over() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;
    let room_id = create_room(&mut ws1, "Ana").await;

    let (turn_ws, wait_ws, turn_secret, wait_secret) =
        start_match(&mut ws1, &mut ws2, &room_id).await;

    // Turn holder opens with a non-winning guess against the opponent.
    send_event(
        turn_ws,
        json!({"event": "submit_guess", "room_id": room_id, "guess": "9876"}),
    )
    .await;

    let result = recv_event(turn_ws).await;
    assert_eq!(result["event"], "guess_result");
    assert_eq!(result["guess"], "9876");
    assert!(result["bulls"].is_u64());
    assert!(result["cows"].is_u64());
    assert_ne!(result["bulls"], 4);
    assert_eq!(recv_event(turn_ws).await["event"], "wait_turn");

    assert_eq!(recv_event(wait_ws).await["event"], "guess_result");
    assert_eq!(recv_event(wait_ws).await["event"], "your_turn");

    // Opponent wins by guessing the turn holder's secret exactly.
    send_event(
        wait_ws,
        json!({"event": "submit_guess", "room_id": room_id, "guess": turn_secret}),
    )
    .await;

    let over_winner = recv_event(wait_ws).await;
    assert_eq!(over_winner["event"], "game_over");
    assert_eq!(over_winner["your_secret"], wait_secret.as_str());
    assert_eq!(over_winner["opponent_secret"], turn_secret.as_str());

    let over_loser = recv_event(turn_ws).await;
    assert_eq!(over_loser["event"], "game_over");
    assert_eq!(over_loser["winner"], over_winner["winner"]);
    assert_eq!(over_loser["your_secret"], turn_secret.as_str());
    assert_eq!(over_loser["opponent_secret"], wait_secret.as_str());

    // The room is gone: a guess after game over draws no response.
    send_event(
        turn_ws,
        json!({"event": "submit_guess", "room_id": room_id, "guess": "1234"}),
    )
    .await;
    expect_silence(turn_ws).await;
}

#[tokio::test]
async fn test_garbage_frames_skipped() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    ws.send(Message::Text("not json".to_string().into()))
        .await
        .expect("send");
    ws.send(Message::Text(r#"{"event": "no_such_event"}"#.to_string().into()))
        .await
        .expect("send");

    // The connection survives and a valid event still works.
    let room_id = create_room(&mut ws, "Ana").await;
    assert_eq!(room_id.len(), 5);
}

#[tokio::test]
async fn test_rooms_are_independent() {
    let addr = start_server().await;
    let mut ws1 = connect(&addr).await;
    let mut ws2 = connect(&addr).await;

    let room1 = create_room(&mut ws1, "Ana").await;
    let room2 = create_room(&mut ws2, "Ben").await;
    assert_ne!(room1, room2);

    // Ana's secret lands in her room only; Ben hears nothing.
    send_event(
        &mut ws1,
        json!({"event": "submit_secret", "room_id": room1, "secret": "1234"}),
    )
    .await;
    assert_eq!(recv_event(&mut ws1).await["event"], "secret_saved");
    expect_silence(&mut ws2).await;
}
