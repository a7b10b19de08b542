//! Energy Page
//!
//! Today and yesterday energy counters. They are read once on activation and
//! not followed, so deactivation has nothing to release.

use crate::app::navigation::PageKind;
use crate::constants::{DEFAULT_MAX_DIGITS, VALUE_PLACEHOLDER};
use crate::domain::category::PropertyCategory;
use crate::domain::installation::{Installation, Reading};
use crate::error::Result;
use crate::features::page::{DashboardPage, PageContext, update_text};
use crate::features::subscription::SubscriptionPlan;
use crate::utils::format::format_float_value;

pub const ENERGY_PLAN: SubscriptionPlan = SubscriptionPlan::read_once(
    PropertyCategory::PV_ENERGY_STATS
        .union(PropertyCategory::GRID_ENERGY_STATS)
        .union(PropertyCategory::OUTPUT_ENERGY_STATS)
        .union(PropertyCategory::BATTERY_ENERGY_STATS),
);

/// Digit budget of the production and consumption fields
const FLOW_MAX_DIGITS: usize = 6;

/// Today and yesterday text of one counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyPair {
    pub today: String,
    pub yesterday: String,
}

impl Default for EnergyPair {
    fn default() -> Self {
        Self {
            today: VALUE_PLACEHOLDER.to_string(),
            yesterday: VALUE_PLACEHOLDER.to_string(),
        }
    }
}

impl EnergyPair {
    fn update(&mut self, today: Reading<f64>, yesterday: Reading<f64>, max_digits: usize) {
        let format = |value| format_float_value(value, max_digits, Some(2));
        update_text(&mut self.today, today, format);
        update_text(&mut self.yesterday, yesterday, format);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnergyPage {
    pub solar: EnergyPair,
    pub grid: EnergyPair,
    pub consumption: EnergyPair,
    pub battery_charged: EnergyPair,
    pub battery_discharged: EnergyPair,
}

impl DashboardPage for EnergyPage {
    fn kind(&self) -> PageKind {
        PageKind::Energy
    }

    fn activate(&mut self, ctx: &PageContext<'_>) -> Result<()> {
        let installation = ctx.installation("energy")?;
        self.refresh(installation);
        ENERGY_PLAN.activate(ctx.client, installation)?;
        Ok(())
    }

    fn deactivate(&mut self, _ctx: &PageContext<'_>) -> Result<()> {
        Ok(())
    }

    fn refresh(&mut self, installation: &Installation) {
        self.solar.update(
            installation.pv_get_energy_today(),
            installation.pv_get_energy_yesterday(),
            FLOW_MAX_DIGITS,
        );
        self.grid.update(
            installation.grid_get_energy_today(),
            installation.grid_get_energy_yesterday(),
            FLOW_MAX_DIGITS,
        );
        self.consumption.update(
            installation.output_get_energy_today(),
            installation.output_get_energy_yesterday(),
            FLOW_MAX_DIGITS,
        );
        self.battery_charged.update(
            installation.battery_get_charge_today(),
            installation.battery_get_charge_yesterday(),
            DEFAULT_MAX_DIGITS,
        );
        self.battery_discharged.update(
            installation.battery_get_discharge_today(),
            installation.battery_get_discharge_yesterday(),
            DEFAULT_MAX_DIGITS,
        );
    }

    fn summary(&self) -> String {
        let pair = |label: &str, counter: &EnergyPair| {
            format!("{label} {} / {} kWh", counter.today, counter.yesterday)
        };
        [
            pair("solar", &self.solar),
            pair("grid", &self.grid),
            pair("consumption", &self.consumption),
            pair("charged", &self.battery_charged),
            pair("discharged", &self.battery_discharged),
        ]
        .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{AppConfig, GatewayConfig};
    use crate::services::{ClientRequest, GatewayClient, SimulatedGateway};

    #[test]
    fn reads_once_and_never_unsubscribes() {
        let (gateway, _events) = SimulatedGateway::new();
        gateway
            .connect(&GatewayConfig::default())
            .expect("connect");
        gateway.clear_requests();
        let installation = Installation::demo("demo");
        let config = AppConfig::default();
        let ctx = PageContext {
            client: &gateway,
            installation: Some(&installation),
            config: &config,
        };

        let mut page = EnergyPage::default();
        page.activate(&ctx).expect("activate");
        page.deactivate(&ctx).expect("deactivate");

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        let ClientRequest::Read(ids) = &requests[0] else {
            panic!("expected a read");
        };
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn counters_use_their_digit_budget() {
        let mut installation = Installation::demo("demo");
        installation.set_property_value("demo.sol.11007".into(), 1234.5678);
        installation.set_property_value("demo.bat.7007".into(), 1234.5678);

        let mut page = EnergyPage::default();
        page.refresh(&installation);
        assert_eq!(page.solar.today, "1234.56");
        assert_eq!(page.solar.yesterday, "...");
        assert_eq!(page.battery_charged.today, "1234.5");
    }
}
