//! Unified error type for the Bullpen server.

use bullpen_protocol::ProtocolError;
use bullpen_transport::TransportError;

/// Top-level error that wraps the lower-layer errors.
///
/// Game-rule rejections never surface here — they travel back to the
/// offending connection as `room_error` / `secret_error` /
/// `invalid_turn` events. This type covers the faults that actually end
/// a connection or stop the server: transport and codec failures.
#[derive(Debug, thiserror::Error)]
pub enum BullpenError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
