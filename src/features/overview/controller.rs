//! Overview Controller
//!
//! Inverter power switch and message badge handling.

use crate::app::navigation::PageKind;
use crate::domain::installation::Installation;
use crate::error::Result;
use crate::services::GatewayClient;

use super::page::OverviewPage;

/// Overview page controller
pub struct OverviewController;

impl OverviewController {
    /// Send the opposite of the switch position and flip the switch right
    /// away. The real state follows through the subscribed state point.
    pub fn toggle_power(
        page: &mut OverviewPage,
        client: &dyn GatewayClient,
        installation: &Installation,
    ) -> Result<()> {
        let turn_on = !page.inverter_on();
        if turn_on {
            installation.inverter_turn_on(client)?;
        } else {
            installation.inverter_turn_off(client)?;
        }
        page.set_inverter_switch(turn_on);
        Ok(())
    }

    /// Clear the badge; the caller switches to the returned page
    pub fn open_messages(page: &mut OverviewPage) -> PageKind {
        page.reset_unread_messages();
        PageKind::Messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::GatewayConfig;
    use crate::domain::description::DeviceDescriptor;
    use crate::domain::message::DeviceMessage;
    use crate::features::page::DashboardPage;
    use crate::services::{ClientRequest, SimulatedGateway};

    #[test]
    fn toggle_sends_command_and_flips_switch() {
        let (gateway, _events) = SimulatedGateway::new();
        gateway
            .connect(&GatewayConfig::default())
            .expect("connect");
        gateway.clear_requests();
        let installation = Installation::demo("demo");
        let mut page = OverviewPage::new(99);

        OverviewController::toggle_power(&mut page, &gateway, &installation).expect("toggle");
        assert!(page.inverter_on());
        OverviewController::toggle_power(&mut page, &gateway, &installation).expect("toggle");
        assert!(!page.inverter_on());

        let targets: Vec<_> = gateway
            .requests()
            .into_iter()
            .filter_map(|request| match request {
                ClientRequest::Write(command) => Some(command.property_id.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec!["demo.inv.1415", "demo.inv.1399"]);
    }

    #[test]
    fn failed_toggle_leaves_switch_alone() {
        let (gateway, _events) = SimulatedGateway::new();
        let installation = Installation::xcom485i("xcom", &[DeviceDescriptor::new("bat")]);
        let mut page = OverviewPage::new(99);

        assert!(OverviewController::toggle_power(&mut page, &gateway, &installation).is_err());
        assert!(!page.inverter_on());
    }

    #[test]
    fn opening_messages_clears_badge() {
        let mut page = OverviewPage::new(99);
        page.on_device_message(&DeviceMessage::new("a", "b", 1, "m"));
        assert_eq!(OverviewController::open_messages(&mut page), PageKind::Messages);
        assert_eq!(page.unread_messages(), 0);
    }
}
