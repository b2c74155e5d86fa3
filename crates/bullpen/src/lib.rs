//! # Bullpen
//!
//! A WebSocket server for two-player bulls-and-cows matches.
//!
//! Players connect, create or join a five-letter room, submit a secret
//! 4-digit code, and take turns guessing the opponent's code until one
//! of them scores four bulls. The game rules live in `bullpen-game`;
//! this crate wires them to the network: an accept loop, a
//! per-connection handler task, and the [`Hub`] that fans outbound
//! events out to connections and room groups.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bullpen::BullpenServerBuilder;
//!
//! # async fn run() -> Result<(), bullpen::BullpenError> {
//! let server = BullpenServerBuilder::new()
//!     .bind("0.0.0.0:10000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod hub;
mod server;

pub use error::BullpenError;
pub use hub::Hub;
pub use server::{BullpenServer, BullpenServerBuilder};
