//! Connection Page
//!
//! Shows the gateway endpoint and the connection status. The inputs are
//! locked while connected; leaving the page is only offered once an
//! installation has been built.

use crate::app::navigation::PageKind;
use crate::domain::config::GatewayConfig;
use crate::domain::installation::Installation;
use crate::error::Result;
use crate::features::page::{DashboardPage, PageContext};
use crate::services::{AccessLevel, ConnectionState};

use super::controller::ConnectionController;

#[derive(Debug, Clone)]
pub struct ConnectionPage {
    host: String,
    port: u16,
    user: Option<String>,
    connected: bool,
    access_level: AccessLevel,
    gateway_version: String,
    installation: Option<String>,
}

impl ConnectionPage {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            user: config.user.clone(),
            connected: false,
            access_level: AccessLevel::None,
            gateway_version: String::new(),
            installation: None,
        }
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn inputs_locked(&self) -> bool {
        self.connected
    }

    /// Back navigation is offered once an installation is available
    pub fn can_leave(&self) -> bool {
        self.connected && self.installation.is_some()
    }

    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }
}

impl DashboardPage for ConnectionPage {
    fn kind(&self) -> PageKind {
        PageKind::Connection
    }

    fn activate(&mut self, ctx: &PageContext<'_>) -> Result<()> {
        let gateway = &ctx.config.gateway;
        self.host = gateway.host.clone();
        self.port = gateway.port;
        self.user = gateway.user.clone();

        match ctx.client.state() {
            ConnectionState::Connected => {
                self.connected = true;
                Ok(())
            }
            ConnectionState::Connecting => Ok(()),
            ConnectionState::Disconnected => {
                self.on_disconnected();
                if gateway.auto_connect {
                    ConnectionController::connect(ctx.client, gateway)?;
                }
                Ok(())
            }
        }
    }

    fn deactivate(&mut self, _ctx: &PageContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_connected(&mut self, access_level: AccessLevel, gateway_version: &str) {
        self.connected = true;
        self.access_level = access_level;
        self.gateway_version = gateway_version.to_string();
    }

    fn on_disconnected(&mut self) {
        self.connected = false;
        self.access_level = AccessLevel::None;
        self.installation = None;
    }

    fn on_installation_ready(&mut self, installation: &Installation) {
        self.installation = Some(format!(
            "{} ({})",
            installation.device_access_id(),
            installation.driver().name()
        ));
    }

    fn summary(&self) -> String {
        let user = self.user.as_deref().unwrap_or("-");
        match (&self.installation, self.connected) {
            (Some(installation), true) => format!(
                "connected to {}:{} as {} ({:?}, gateway {}), installation {}",
                self.host, self.port, user, self.access_level, self.gateway_version, installation
            ),
            (None, true) => format!("connected to {}:{} as {}", self.host, self.port, user),
            (_, false) => format!("not connected ({}:{})", self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AppConfig;
    use crate::services::{ClientRequest, GatewayClient, SimulatedGateway};

    #[test]
    fn activation_auto_connects() {
        let (gateway, _events) = SimulatedGateway::new();
        let config = AppConfig::default();
        let mut page = ConnectionPage::new(&config.gateway);
        let ctx = PageContext {
            client: &gateway,
            installation: None,
            config: &config,
        };

        page.activate(&ctx).expect("activate");
        assert_eq!(gateway.state(), ConnectionState::Connected);
        assert!(matches!(
            gateway.requests().as_slice(),
            [ClientRequest::Connect { port: 1987, .. }]
        ));
    }

    #[test]
    fn activation_without_auto_connect_waits() {
        let (gateway, _events) = SimulatedGateway::new();
        let mut config = AppConfig::default();
        config.gateway.auto_connect = false;
        let mut page = ConnectionPage::new(&config.gateway);
        let ctx = PageContext {
            client: &gateway,
            installation: None,
            config: &config,
        };

        page.activate(&ctx).expect("activate");
        assert!(gateway.requests().is_empty());
        assert!(!page.inputs_locked());
    }

    #[test]
    fn leaving_needs_an_installation() {
        let mut page = ConnectionPage::new(&GatewayConfig::default());
        page.on_connected(AccessLevel::Basic, "1.0");
        assert!(page.inputs_locked());
        assert!(!page.can_leave());

        page.on_installation_ready(&Installation::demo("demo"));
        assert!(page.can_leave());
        assert!(page.summary().contains("demo (Demo)"));

        page.on_disconnected();
        assert!(!page.can_leave());
        assert!(!page.inputs_locked());
    }
}
