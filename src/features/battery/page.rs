//! Battery Page

use crate::app::navigation::PageKind;
use crate::constants::{DEFAULT_MAX_DIGITS, VALUE_PLACEHOLDER};
use crate::domain::category::PropertyCategory;
use crate::domain::installation::Installation;
use crate::error::Result;
use crate::features::page::{DashboardPage, PageContext, update_text};
use crate::features::subscription::SubscriptionPlan;
use crate::utils::format::{battery_bars, format_float_value};

pub const BATTERY_PLAN: SubscriptionPlan = SubscriptionPlan::live(
    PropertyCategory::BATTERY_POWER
        .union(PropertyCategory::BATTERY_CHARGE)
        .union(PropertyCategory::BATTERY_CURRENT)
        .union(PropertyCategory::BATTERY_TEMPERATURE)
        .union(PropertyCategory::BATTERY_VOLTAGE),
);

#[derive(Debug, Clone)]
pub struct BatteryPage {
    power: String,
    voltage: String,
    current: String,
    charge: String,
    temperature: String,
    bars: u8,
}

impl Default for BatteryPage {
    fn default() -> Self {
        Self {
            power: VALUE_PLACEHOLDER.to_string(),
            voltage: VALUE_PLACEHOLDER.to_string(),
            current: VALUE_PLACEHOLDER.to_string(),
            charge: VALUE_PLACEHOLDER.to_string(),
            temperature: VALUE_PLACEHOLDER.to_string(),
            bars: 0,
        }
    }
}

impl BatteryPage {
    pub fn power(&self) -> &str {
        &self.power
    }

    pub fn voltage(&self) -> &str {
        &self.voltage
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn charge(&self) -> &str {
        &self.charge
    }

    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    pub fn bars(&self) -> u8 {
        self.bars
    }
}

fn decimals(max_decimals: usize) -> impl Fn(f64) -> String {
    move |value| format_float_value(value, DEFAULT_MAX_DIGITS, Some(max_decimals))
}

impl DashboardPage for BatteryPage {
    fn kind(&self) -> PageKind {
        PageKind::Battery
    }

    fn activate(&mut self, ctx: &PageContext<'_>) -> Result<()> {
        let installation = ctx.installation("battery")?;
        self.refresh(installation);
        BATTERY_PLAN.activate(ctx.client, installation)?;
        Ok(())
    }

    fn deactivate(&mut self, ctx: &PageContext<'_>) -> Result<()> {
        BATTERY_PLAN.deactivate(ctx.client, ctx.installation("battery")?)
    }

    fn refresh(&mut self, installation: &Installation) {
        update_text(&mut self.power, installation.battery_get_power(), decimals(2));
        update_text(&mut self.voltage, installation.battery_get_voltage(), decimals(2));
        update_text(&mut self.current, installation.battery_get_current(), decimals(2));
        update_text(&mut self.temperature, installation.battery_get_temperature(), decimals(1));
        if let Ok(charge) = installation.battery_get_charge() {
            self.charge = decimals(0)(charge);
            self.bars = battery_bars(charge);
        }
    }

    fn summary(&self) -> String {
        format!(
            "power {} kW | voltage {} V | current {} A | charge {}% ({}/10) | temperature {} °C",
            self.power, self.voltage, self.current, self.charge, self.bars, self.temperature
        )
    }
}
