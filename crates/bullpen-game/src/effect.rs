//! Outbound side effects requested by game handlers.

use bullpen_protocol::{ConnectionId, Recipient, RoomId, ServerEvent};

/// A side effect a handler asks the transport layer to perform.
///
/// Handlers mutate registry/room state and return these instead of
/// talking to the network, mirroring the three primitives the transport
/// offers: emit to one connection, emit to a room group, and group
/// membership changes. Effects are applied strictly in order — a
/// `JoinGroup` must take hold before a following room broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver an event to a single connection or a whole room group.
    Emit(Recipient, ServerEvent),

    /// Register a connection into a room's broadcast group.
    JoinGroup(ConnectionId, RoomId),

    /// Dissolve a room's broadcast group (on game over).
    DropGroup(RoomId),
}

impl Effect {
    /// Emit to one connection.
    pub fn to_connection(conn: ConnectionId, event: ServerEvent) -> Self {
        Effect::Emit(Recipient::Connection(conn), event)
    }

    /// Emit to everyone in a room's group.
    pub fn to_room(room_id: RoomId, event: ServerEvent) -> Self {
        Effect::Emit(Recipient::Room(room_id), event)
    }
}
