//! The hub: outbound fan-out to connections and room broadcast groups.
//!
//! Game handlers describe WHERE events should go ([`Recipient`]); the
//! hub knows HOW to get them there. It holds one unbounded channel
//! sender per live connection (the receiving end is drained by that
//! connection's writer task) and the membership set of each room's
//! broadcast group.

use std::collections::{HashMap, HashSet};

use bullpen_game::Effect;
use bullpen_protocol::{ConnectionId, Recipient, RoomId, ServerEvent};
use tokio::sync::mpsc;

/// Channel sender delivering outbound events to one connection's writer.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Routes outbound events to connections and room groups.
#[derive(Debug, Default)]
pub struct Hub {
    /// Per-connection outbound channels.
    connections: HashMap<ConnectionId, EventSender>,
    /// Broadcast-group membership, keyed by room id.
    groups: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl Hub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection's outbound channel.
    pub fn register(&mut self, conn: ConnectionId, sender: EventSender) {
        self.connections.insert(conn, sender);
    }

    /// Removes a connection and its group memberships.
    ///
    /// Dropping the sender ends the connection's writer task. The rooms
    /// the connection was playing in are NOT touched — an abandoned room
    /// stays in the registry (known gap, there is no reconnect).
    pub fn unregister(&mut self, conn: ConnectionId) {
        self.connections.remove(&conn);
        for members in self.groups.values_mut() {
            members.remove(&conn);
        }
        self.groups.retain(|_, members| !members.is_empty());
    }

    /// Adds a connection to a room's broadcast group.
    pub fn join_group(&mut self, conn: ConnectionId, room_id: RoomId) {
        self.groups.entry(room_id).or_default().insert(conn);
    }

    /// Dissolves a room's broadcast group entirely.
    pub fn drop_group(&mut self, room_id: &RoomId) {
        self.groups.remove(room_id);
    }

    /// Sends an event to a single connection. Silently drops if the
    /// connection is gone.
    pub fn emit_to(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.connections.get(&conn) {
            let _ = sender.send(event);
        } else {
            tracing::debug!(%conn, "emit to unknown connection dropped");
        }
    }

    /// Sends an event to every member of a room's group.
    pub fn emit_to_group(&self, room_id: &RoomId, event: ServerEvent) {
        let Some(members) = self.groups.get(room_id) else {
            tracing::debug!(%room_id, "emit to unknown group dropped");
            return;
        };
        for conn in members {
            self.emit_to(*conn, event.clone());
        }
    }

    /// Applies a handler's effect list, strictly in order.
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Emit(Recipient::Connection(conn), event) => {
                    self.emit_to(conn, event);
                }
                Effect::Emit(Recipient::Room(room_id), event) => {
                    self.emit_to_group(&room_id, event);
                }
                Effect::JoinGroup(conn, room_id) => {
                    self.join_group(conn, room_id);
                }
                Effect::DropGroup(room_id) => {
                    self.drop_group(&room_id);
                }
            }
        }
    }
}
