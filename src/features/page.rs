//! DashboardPage - Page Lifecycle Contract
//!
//! A page is either active or inactive; the page container guarantees that
//! exactly one page is active and that the previous page is deactivated before
//! the next one is activated. Pages never own the installation: they get it
//! through a [`PageContext`] on every call, so a reconnect that replaces the
//! installation is picked up on the next activation.

use crate::app::navigation::PageKind;
use crate::domain::config::AppConfig;
use crate::domain::installation::{Installation, Reading};
use crate::domain::message::DeviceMessage;
use crate::error::{Error, Result};
use crate::services::{AccessLevel, GatewayClient, Status};

/// Everything a page may use while it is being activated or deactivated
pub struct PageContext<'a> {
    pub client: &'a dyn GatewayClient,
    pub installation: Option<&'a Installation>,
    pub config: &'a AppConfig,
}

impl<'a> PageContext<'a> {
    /// The current installation, or an error naming the page that needs it
    pub fn installation(&self, page: &'static str) -> Result<&'a Installation> {
        self.installation.ok_or(Error::NoInstallation { page })
    }
}

pub trait DashboardPage {
    fn kind(&self) -> PageKind;

    /// Request the data the page shows
    fn activate(&mut self, ctx: &PageContext<'_>) -> Result<()>;

    /// Release whatever `activate` subscribed to
    fn deactivate(&mut self, ctx: &PageContext<'_>) -> Result<()>;

    /// Re-read the displayed values after the installation received values
    fn refresh(&mut self, _installation: &Installation) {}

    fn on_connected(&mut self, _access_level: AccessLevel, _gateway_version: &str) {}

    fn on_disconnected(&mut self) {}

    fn on_installation_ready(&mut self, _installation: &Installation) {}

    fn on_device_message(&mut self, _message: &DeviceMessage) {}

    fn on_messages_read(&mut self, _status: Status, _messages: Vec<DeviceMessage>) {}

    /// One-line textual view of the page
    fn summary(&self) -> String;
}

/// Show `reading` in `text`; keep the previous text while it is not available
pub fn update_text(text: &mut String, reading: Reading<f64>, format: impl Fn(f64) -> String) {
    match reading {
        Ok(value) => *text = format(value),
        Err(e) => tracing::trace!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::installation::{Quantity, ValueNotAvailable};

    #[test]
    fn not_available_keeps_previous_text() {
        let mut text = "...".to_string();
        update_text(
            &mut text,
            Err(ValueNotAvailable {
                quantity: Quantity::PvPower,
                missing: Vec::new(),
            }),
            |v| v.to_string(),
        );
        assert_eq!(text, "...");

        update_text(&mut text, Ok(1.5), |v| format!("{v:.1}"));
        assert_eq!(text, "1.5");

        update_text(
            &mut text,
            Err(ValueNotAvailable {
                quantity: Quantity::PvPower,
                missing: Vec::new(),
            }),
            |v| v.to_string(),
        );
        assert_eq!(text, "1.5");
    }
}
