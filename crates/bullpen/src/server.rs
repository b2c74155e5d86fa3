//! `BullpenServer` builder and accept loop.
//!
//! This is the entry point for running a Bullpen server. It ties
//! together all the layers: transport → protocol → game.

use std::sync::Arc;

use bullpen_game::RoomRegistry;
use bullpen_protocol::{Codec, JsonCodec};
use bullpen_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::BullpenError;
use crate::handler::{Core, ServerState, handle_connection};
use crate::hub::Hub;

/// Builder for configuring and starting a Bullpen server.
///
/// # Example
///
/// ```rust,ignore
/// let server = BullpenServer::builder()
///     .bind("0.0.0.0:10000")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct BullpenServerBuilder {
    bind_addr: String,
}

impl BullpenServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { bind_addr: "127.0.0.1:8080".to_string() }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Builds the server.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport` as defaults.
    pub async fn build(
        self,
    ) -> Result<BullpenServer<JsonCodec>, BullpenError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            core: Mutex::new(Core {
                registry: RoomRegistry::new(),
                hub: Hub::new(),
            }),
            codec: JsonCodec,
        });

        Ok(BullpenServer { transport, state })
    }
}

impl Default for BullpenServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Bullpen server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct BullpenServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl<C> BullpenServer<C>
where
    C: Codec + Clone,
{
    /// Creates a new builder.
    pub fn builder() -> BullpenServerBuilder {
        BullpenServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), BullpenError> {
        tracing::info!("Bullpen server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(conn, state).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
