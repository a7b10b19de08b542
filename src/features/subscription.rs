//! Subscription - Read and Subscribe Plan of a Page
//!
//! A plan names the categories a page shows and whether it follows them
//! continuously. The property ids are computed from the installation at the
//! moment of the call and never cached, so deactivation after a reconnect
//! unsubscribes the ids of the installation that is current by then.

use crate::domain::category::PropertyCategory;
use crate::domain::installation::Installation;
use crate::domain::property::PropertyId;
use crate::error::Result;
use crate::services::GatewayClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionPlan {
    pub categories: PropertyCategory,
    /// Subscribe after the initial read, unsubscribe on deactivation
    pub subscribe: bool,
}

impl SubscriptionPlan {
    /// Read once, then follow updates
    pub const fn live(categories: PropertyCategory) -> Self {
        Self {
            categories,
            subscribe: true,
        }
    }

    /// Read once only
    pub const fn read_once(categories: PropertyCategory) -> Self {
        Self {
            categories,
            subscribe: false,
        }
    }

    /// Issue one batched read and, for live plans, one batched subscribe
    /// for the same ids. Returns the ids requested.
    pub fn activate(
        &self,
        client: &dyn GatewayClient,
        installation: &Installation,
    ) -> Result<Vec<PropertyId>> {
        let ids = installation.get_property_ids(self.categories);
        if ids.is_empty() {
            tracing::debug!("Nothing to request for {:?}", self.categories);
            return Ok(ids);
        }

        client.read_properties(&ids)?;
        if self.subscribe {
            client.subscribe_to_properties(&ids)?;
        }
        Ok(ids)
    }

    /// Issue one batched unsubscribe for the ids `activate` would request now
    pub fn deactivate(
        &self,
        client: &dyn GatewayClient,
        installation: &Installation,
    ) -> Result<()> {
        if !self.subscribe {
            return Ok(());
        }
        let ids = installation.get_property_ids(self.categories);
        if ids.is_empty() {
            return Ok(());
        }
        client.unsubscribe_from_properties(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::GatewayConfig;
    use crate::domain::description::DeviceDescriptor;
    use crate::services::{ClientRequest, GatewayEvent, SimulatedGateway};
    use crossbeam_channel::Receiver;

    fn connected_gateway() -> (SimulatedGateway, Receiver<GatewayEvent>) {
        let (gateway, events) = SimulatedGateway::new();
        gateway
            .connect(&GatewayConfig::default())
            .expect("connect");
        gateway.clear_requests();
        (gateway, events)
    }

    #[test]
    fn live_plan_reads_then_subscribes_the_same_ids() {
        let (gateway, _events) = connected_gateway();
        let installation = Installation::demo("demo");
        let plan =
            SubscriptionPlan::live(PropertyCategory::BATTERY_CHARGE | PropertyCategory::PV_POWER);

        let ids = plan.activate(&gateway, &installation).expect("activate");
        assert_eq!(ids.len(), 2);
        assert_eq!(
            gateway.requests(),
            vec![
                ClientRequest::Read(ids.clone()),
                ClientRequest::Subscribe(ids.clone())
            ]
        );

        gateway.clear_requests();
        plan.deactivate(&gateway, &installation).expect("deactivate");
        assert_eq!(gateway.requests(), vec![ClientRequest::Unsubscribe(ids)]);
    }

    #[test]
    fn read_once_plan_never_subscribes() {
        let (gateway, _events) = connected_gateway();
        let installation = Installation::demo("demo");
        let plan = SubscriptionPlan::read_once(PropertyCategory::GRID_ENERGY_STATS);

        plan.activate(&gateway, &installation).expect("activate");
        plan.deactivate(&gateway, &installation).expect("deactivate");
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert!(matches!(&requests[0], ClientRequest::Read(ids) if ids.len() == 2));
    }

    #[test]
    fn empty_id_sets_are_not_sent() {
        let (gateway, _events) = connected_gateway();
        let installation =
            Installation::xcom485i("xcom", &[DeviceDescriptor::new("xt1")]);
        let plan = SubscriptionPlan::live(PropertyCategory::BATTERY_CHARGE);

        assert!(plan.activate(&gateway, &installation).expect("activate").is_empty());
        plan.deactivate(&gateway, &installation).expect("deactivate");
        assert!(gateway.requests().is_empty());
    }

    #[test]
    fn deactivation_uses_the_current_installation() {
        let (gateway, _events) = connected_gateway();
        let plan = SubscriptionPlan::live(PropertyCategory::GRID_POWER);

        let before = Installation::xcom485i("xcom", &[DeviceDescriptor::new("xt1")]);
        plan.activate(&gateway, &before).expect("activate");

        let after = Installation::xcom485i(
            "xcom",
            &[DeviceDescriptor::new("xt1"), DeviceDescriptor::new("xt2")],
        );
        gateway.clear_requests();
        plan.deactivate(&gateway, &after).expect("deactivate");
        assert_eq!(
            gateway.requests(),
            vec![ClientRequest::Unsubscribe(vec![
                PropertyId::from("xcom.xt1.3137"),
                PropertyId::from("xcom.xt2.3137"),
            ])]
        );
    }
}
