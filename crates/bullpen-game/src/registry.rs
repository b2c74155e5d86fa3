//! Room registry: creates, stores, and deletes rooms.
//!
//! Process-wide and non-persistent — the registry lives from process
//! start to process stop, injected into handlers rather than reached as
//! ambient state. It holds no game logic beyond room capacity; turns and
//! scoring live in [`engine`](crate::engine).

use std::collections::HashMap;

use bullpen_protocol::{ConnectionId, RoomId, ServerEvent};
use rand::Rng;

use crate::{Effect, GameError, Room};

/// Alphabet for room identifiers: uppercase letters and digits.
const ROOM_ID_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Room identifiers are 5 characters, short enough to share by hand.
const ROOM_ID_LEN: usize = 5;

/// All active rooms, keyed by room id.
///
/// A room's entry here is the sole source of truth for its game. Entries
/// are removed exactly once, by the winning-guess path; a missing entry
/// means the game is over (or never existed).
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { rooms: HashMap::new() }
    }

    /// Creates a room with `creator` as its sole player.
    ///
    /// Emits `room_created` to the creator, then `room_update` to the
    /// room group (which at this point is just the creator).
    pub fn create_room(
        &mut self,
        creator: ConnectionId,
        name: &str,
    ) -> Vec<Effect> {
        let room_id = self.generate_room_id();
        let room = Room::new(room_id.clone(), creator, name);
        let players = room.player_names();
        self.rooms.insert(room_id.clone(), room);
        tracing::info!(%room_id, conn = %creator, "room created");

        vec![
            Effect::JoinGroup(creator, room_id.clone()),
            Effect::to_connection(
                creator,
                ServerEvent::RoomCreated { room_id: room_id.clone() },
            ),
            Effect::to_room(room_id, ServerEvent::RoomUpdate { players }),
        ]
    }

    /// Adds `joiner` as the second player of an existing room.
    ///
    /// On rejection (`RoomNotFound`, `RoomFull`) a `room_error` goes to
    /// the joiner only and nothing changes.
    pub fn join_room(
        &mut self,
        room_id: &RoomId,
        joiner: ConnectionId,
        name: &str,
    ) -> Vec<Effect> {
        match self.try_join(room_id, joiner, name) {
            Ok(players) => {
                tracing::info!(%room_id, conn = %joiner, "player joined");
                vec![
                    Effect::JoinGroup(joiner, room_id.clone()),
                    Effect::to_room(
                        room_id.clone(),
                        ServerEvent::RoomUpdate { players },
                    ),
                ]
            }
            Err(e) => {
                tracing::debug!(%room_id, conn = %joiner, error = %e, "join rejected");
                vec![Effect::to_connection(
                    joiner,
                    ServerEvent::RoomError { message: e.to_string() },
                )]
            }
        }
    }

    fn try_join(
        &mut self,
        room_id: &RoomId,
        joiner: ConnectionId,
        name: &str,
    ) -> Result<Vec<String>, GameError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or(GameError::RoomNotFound)?;
        room.add_player(joiner, name)?;
        Ok(room.player_names())
    }

    /// Removes a room. No-op if the id is absent.
    pub fn delete_room(&mut self, room_id: &RoomId) {
        if self.rooms.remove(room_id).is_some() {
            tracing::info!(%room_id, "room deleted");
        }
    }

    /// Looks up a room by id.
    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Mutable lookup, for the game engine.
    pub fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Whether a room with this id currently exists.
    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Allocates a fresh identifier, re-rolling on collision with an
    /// existing room. The original service skipped the collision check
    /// and would silently overwrite a live room; the loop closes that
    /// hole at no cost.
    fn generate_room_id(&self) -> RoomId {
        let mut rng = rand::rng();
        loop {
            let id: String = (0..ROOM_ID_LEN)
                .map(|_| {
                    let i = rng.random_range(0..ROOM_ID_CHARSET.len());
                    char::from(ROOM_ID_CHARSET[i])
                })
                .collect();
            let id = RoomId::new(id);
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }
}
