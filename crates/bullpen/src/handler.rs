//! Per-connection handler: decode inbound events, dispatch, apply effects.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`], plus a writer task that drains the
//! connection's outbound channel. All game state is touched under one
//! lock, held for the full read-modify-emit sequence of each event —
//! emits are non-blocking channel sends, so holding it is cheap and it
//! keeps "both secrets set" checks and win-path deletion atomic.

use std::sync::Arc;

use bullpen_game::{Effect, RoomRegistry, engine};
use bullpen_protocol::{ClientEvent, Codec, ConnectionId, ServerEvent};
use bullpen_transport::{Connection, WebSocketConnection};
use tokio::sync::Mutex;

use crate::BullpenError;
use crate::hub::Hub;

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) core: Mutex<Core>,
    pub(crate) codec: C,
}

/// Everything behind the lock: the room registry and the hub.
pub(crate) struct Core {
    pub(crate) registry: RoomRegistry,
    pub(crate) hub: Hub,
}

/// Drop guard that unregisters a connection from the hub when the
/// handler exits, even on panic. `Drop` is synchronous, so the async
/// lock is taken in a fire-and-forget task.
struct ConnGuard<C: Codec> {
    conn_id: ConnectionId,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Drop for ConnGuard<C> {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            state.core.lock().await.hub.unregister(conn_id);
        });
    }
}

/// Routes one inbound event to its handler.
///
/// This is the dispatch table for the core's public surface; every
/// handler is pure with respect to the registry plus returned effects,
/// which is what the unit tests in `bullpen-game` exercise directly.
fn dispatch(
    registry: &mut RoomRegistry,
    conn_id: ConnectionId,
    event: ClientEvent,
) -> Vec<Effect> {
    match event {
        ClientEvent::CreateRoom { name } => {
            registry.create_room(conn_id, &name)
        }
        ClientEvent::JoinRoom { room_id, name } => {
            registry.join_room(&room_id, conn_id, &name)
        }
        ClientEvent::SubmitSecret { room_id, secret } => {
            engine::submit_secret(registry, &room_id, conn_id, &secret)
        }
        ClientEvent::SubmitGuess { room_id, guess } => {
            engine::submit_guess(registry, &room_id, conn_id, &guess)
        }
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), BullpenError>
where
    C: Codec + Clone,
{
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    // Register the outbound channel and greet the client with its id
    // before any inbound event can race ahead of it.
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    {
        let mut core = state.core.lock().await;
        core.hub.register(conn_id, tx);
        core.hub.emit_to(
            conn_id,
            ServerEvent::Connected { connection_id: conn_id },
        );
    }
    let _guard = ConnGuard { conn_id, state: Arc::clone(&state) };

    // Writer task: drains the outbound channel onto the socket. Ends
    // when the hub drops the sender (unregister) or the send fails.
    let writer_conn = conn.clone();
    let writer_codec = state.codec.clone();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let bytes = match writer_codec.encode(&event) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "encode failed");
                    continue;
                }
            };
            if writer_conn.send(&bytes).await.is_err() {
                break;
            }
        }
    });

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "bad event skipped");
                continue;
            }
        };

        let mut core = state.core.lock().await;
        let effects = dispatch(&mut core.registry, conn_id, event);
        core.hub.apply(effects);
    }

    // _guard drops here → hub unregister fires, ending the writer.
    Ok(())
}
