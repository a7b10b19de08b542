//! Connection Controller
//!
//! Opens and closes the gateway connection. The handshake that follows a
//! successful connect is driven by the session.

use crate::domain::config::GatewayConfig;
use crate::error::Result;
use crate::services::{ConnectionState, GatewayClient};

/// Connection page controller
pub struct ConnectionController;

impl ConnectionController {
    pub fn connect(client: &dyn GatewayClient, config: &GatewayConfig) -> Result<()> {
        tracing::info!("Connecting to {}", config.endpoint());
        client.connect(config)
    }

    pub fn disconnect(client: &dyn GatewayClient) -> Result<()> {
        tracing::info!("Disconnecting");
        client.disconnect()
    }

    /// Connect button: disconnects when connected, connects otherwise
    pub fn connect_or_disconnect(client: &dyn GatewayClient, config: &GatewayConfig) -> Result<()> {
        match client.state() {
            ConnectionState::Disconnected => Self::connect(client, config),
            _ => Self::disconnect(client),
        }
    }
}
