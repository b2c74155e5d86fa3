//! Wire protocol for Bullpen.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`RoomId`],
//!   [`Recipient`]) — the named events that travel on the wire and the
//!   routing metadata attached to outbound ones.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how events are converted
//!   to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! The protocol layer sits between transport (raw bytes) and the game
//! core. It doesn't know about connections or rooms — it only knows how
//! to name and serialize events.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientEvent, Recipient, RoomId, ServerEvent};

// Re-exported so downstream crates get the whole identity story from here.
pub use bullpen_transport::ConnectionId;
