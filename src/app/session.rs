//! Session - Connection Handshake and Event Dispatch
//!
//! The session owns the gateway client handle, the current installation and
//! the pages. It runs the handshake (connected -> enumerate -> describe ->
//! installation), applies every received property value to the current
//! installation and forwards notifications to the active page. Everything
//! the user should see travels as an [`AppEvent`].

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::app::container::PageContainer;
use crate::app::navigation::PageKind;
use crate::domain::config::AppConfig;
use crate::domain::installation::Installation;
use crate::domain::property::PropertyResult;
use crate::error::{Error, HandshakeError, Result};
use crate::eventing::app_event::AppEvent;
use crate::features::connection::controller::ConnectionController;
use crate::features::overview::controller::OverviewController;
use crate::features::page::{DashboardPage, PageContext};
use crate::services::handshake::{self, DESCRIPTION_FLAGS};
use crate::services::{GatewayClient, GatewayEvent};

pub struct Session {
    client: Arc<dyn GatewayClient>,
    config: AppConfig,
    installation: Option<Installation>,
    pages: PageContainer,
    app_events: Sender<AppEvent>,
}

impl Session {
    pub fn new(
        client: Arc<dyn GatewayClient>,
        config: AppConfig,
        app_events: Sender<AppEvent>,
    ) -> Self {
        let pages = PageContainer::new(&config);
        Self {
            client,
            config,
            installation: None,
            pages,
            app_events,
        }
    }

    /// Show the connection page, which connects if configured to
    pub fn start(&mut self) {
        self.change_to_page(PageKind::Connection);
    }

    pub fn installation(&self) -> Option<&Installation> {
        self.installation.as_ref()
    }

    pub fn pages(&self) -> &PageContainer {
        &self.pages
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn change_to_page(&mut self, kind: PageKind) {
        let ctx = PageContext {
            client: self.client.as_ref(),
            installation: self.installation.as_ref(),
            config: &self.config,
        };
        self.pages.change_to(kind, &ctx);
        self.surface(AppEvent::PageChanged { page: kind });
    }

    /// Connect button of the connection page
    pub fn connect_or_disconnect(&mut self) -> Result<()> {
        ConnectionController::connect_or_disconnect(self.client.as_ref(), &self.config.gateway)
    }

    /// Power switch of the overview page
    pub fn toggle_inverter(&mut self) -> Result<()> {
        let Some(installation) = self.installation.as_ref() else {
            return Err(Error::NoInstallation { page: "overview" });
        };
        OverviewController::toggle_power(
            self.pages.overview_mut(),
            self.client.as_ref(),
            installation,
        )
    }

    /// Messages button of the overview page
    pub fn open_messages(&mut self) {
        let next = OverviewController::open_messages(self.pages.overview_mut());
        self.change_to_page(next);
    }

    /// Handle every event currently queued, including those caused by
    /// handling earlier ones
    pub fn pump(&mut self, events: &Receiver<GatewayEvent>) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: GatewayEvent) {
        tracing::trace!("Gateway event {}", event.kind());
        match event {
            GatewayEvent::Connected {
                access_level,
                gateway_version,
            } => {
                tracing::info!(
                    "Connected with access level {:?}, gateway {}",
                    access_level,
                    gateway_version
                );
                self.surface(AppEvent::ConnectionChanged {
                    connected: true,
                    detail: Some(self.config.gateway.endpoint()),
                });
                if let Some(page) = self.pages.active_page_mut() {
                    page.on_connected(access_level, &gateway_version);
                }
                if let Err(e) = self.client.enumerate() {
                    self.surface(AppEvent::error(format!("Enumeration request failed: {e}")));
                }
            }
            GatewayEvent::Disconnected => {
                tracing::info!("Disconnected");
                self.surface(AppEvent::ConnectionChanged {
                    connected: false,
                    detail: None,
                });
                if let Some(page) = self.pages.active_page_mut() {
                    page.on_disconnected();
                }
            }
            GatewayEvent::Error { reason } => {
                tracing::warn!("Gateway error: {}", reason);
                self.surface(AppEvent::error(reason));
            }
            GatewayEvent::Enumerated {
                status,
                device_count,
            } => {
                if let Err(e) = handshake::check_enumeration(status) {
                    self.fail_handshake(e);
                    return;
                }
                tracing::info!("Devices enumerated, {} devices present", device_count);
                if let Err(e) = self.client.describe(DESCRIPTION_FLAGS) {
                    self.surface(AppEvent::error(format!("Description request failed: {e}")));
                }
            }
            GatewayEvent::Described {
                status,
                description,
                ..
            } => match handshake::installation_from_description(status, &description) {
                Ok(installation) => self.install(installation),
                Err(e) => self.fail_handshake(e),
            },
            GatewayEvent::PropertiesRead { results } => {
                self.apply_read_results(results);
                self.refresh_active_page();
            }
            GatewayEvent::PropertiesSubscribed { results } => {
                warn_failures("Subscribing", &results);
            }
            GatewayEvent::PropertiesUnsubscribed { results } => {
                warn_failures("Unsubscribing", &results);
            }
            GatewayEvent::PropertyUpdated { id, value } => {
                match self.installation.as_mut() {
                    Some(installation) => installation.set_property_value(id, value),
                    None => tracing::debug!("Update of {} without installation", id),
                }
                self.refresh_active_page();
            }
            GatewayEvent::DeviceMessage(message) => {
                tracing::info!("Device message from {}: {}", message.source(), message.message);
                if let Some(page) = self.pages.active_page_mut() {
                    page.on_device_message(&message);
                }
            }
            GatewayEvent::MessagesRead {
                status,
                count,
                messages,
            } => {
                tracing::debug!("Read {} device message(s) with status {}", count, status);
                if let Some(page) = self.pages.active_page_mut() {
                    page.on_messages_read(status, messages);
                }
            }
        }
    }

    /// Replace the installation and continue with the overview
    fn install(&mut self, installation: Installation) {
        self.surface(AppEvent::InstallationReady {
            device_access_id: installation.device_access_id().to_string(),
            driver: installation.driver().name(),
            inverters: installation.inverter_count(),
            solar_chargers: installation.solar_charger_count(),
            batteries: installation.battery_count(),
        });
        if let Some(page) = self.pages.active_page_mut() {
            page.on_installation_ready(&installation);
        }
        self.installation = Some(installation);
        self.change_to_page(PageKind::Overview);
    }

    fn fail_handshake(&mut self, error: HandshakeError) {
        tracing::warn!("{}: {}", error.title(), error);
        if let Err(e) = self.client.disconnect() {
            tracing::warn!("Disconnect after failed handshake: {}", e);
        }
        self.surface(AppEvent::handshake_failed(&error));
    }

    fn apply_read_results(&mut self, results: Vec<PropertyResult>) {
        for result in results {
            match (result.successful_value(), self.installation.as_mut()) {
                (Some(value), Some(installation)) => {
                    installation.set_property_value(result.id, value)
                }
                (Some(_), None) => tracing::debug!("Read of {} without installation", result.id),
                (None, _) => tracing::warn!("Reading {} failed: {}", result.id, result.status),
            }
        }
    }

    fn refresh_active_page(&mut self) {
        let Some(installation) = self.installation.as_ref() else {
            return;
        };
        if let Some(page) = self.pages.active_page_mut() {
            page.refresh(installation);
        }
    }

    fn surface(&self, event: AppEvent) {
        if self.app_events.send(event).is_err() {
            tracing::debug!("No front-end listening for application events");
        }
    }
}

fn warn_failures(action: &str, results: &[PropertyResult]) {
    for result in results {
        if result.status != crate::services::Status::Success {
            tracing::warn!("{} {} failed: {}", action, result.id, result.status);
        }
    }
}
