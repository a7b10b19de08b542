//! Overview Page
//!
//! Power flow at a glance: PV, grid, output and battery power, the battery
//! level, the inverter switch and the unread device message badge.

use crate::app::navigation::PageKind;
use crate::constants::{DEFAULT_MAX_DIGITS, VALUE_PLACEHOLDER};
use crate::domain::category::PropertyCategory;
use crate::domain::installation::Installation;
use crate::domain::message::DeviceMessage;
use crate::error::Result;
use crate::features::page::{DashboardPage, PageContext, update_text};
use crate::features::subscription::SubscriptionPlan;
use crate::services::{AccessLevel, ConnectionState};
use crate::utils::format::{battery_bars, format_float_value};

pub const OVERVIEW_PLAN: SubscriptionPlan = SubscriptionPlan::live(
    PropertyCategory::INVERTER_STATE
        .union(PropertyCategory::PV_POWER)
        .union(PropertyCategory::GRID_POWER)
        .union(PropertyCategory::OUTPUT_POWER)
        .union(PropertyCategory::BATTERY_POWER)
        .union(PropertyCategory::BATTERY_CHARGE),
);

/// Width of the battery level field
const LEVEL_MAX_DIGITS: usize = 3;

fn format_power(value: f64) -> String {
    format_float_value(value, DEFAULT_MAX_DIGITS, Some(3))
}

#[derive(Debug, Clone)]
pub struct OverviewPage {
    connected: bool,
    inverter_count: Option<usize>,
    inverter_on: bool,
    pv_power: String,
    grid_power: String,
    output_power: String,
    battery_power: String,
    battery_level: String,
    battery_bars: u8,
    unread_messages: u32,
    badge_max: u32,
}

impl OverviewPage {
    pub fn new(badge_max: u32) -> Self {
        Self {
            connected: false,
            inverter_count: None,
            inverter_on: false,
            pv_power: VALUE_PLACEHOLDER.to_string(),
            grid_power: VALUE_PLACEHOLDER.to_string(),
            output_power: VALUE_PLACEHOLDER.to_string(),
            battery_power: VALUE_PLACEHOLDER.to_string(),
            battery_level: VALUE_PLACEHOLDER.to_string(),
            battery_bars: 0,
            unread_messages: 0,
            badge_max,
        }
    }

    pub fn inverter_on(&self) -> bool {
        self.inverter_on
    }

    /// Position of the power switch, set before the state is read back
    pub fn set_inverter_switch(&mut self, on: bool) {
        self.inverter_on = on;
    }

    pub fn inverter_count(&self) -> Option<usize> {
        self.inverter_count
    }

    pub fn pv_power(&self) -> &str {
        &self.pv_power
    }

    pub fn grid_power(&self) -> &str {
        &self.grid_power
    }

    pub fn output_power(&self) -> &str {
        &self.output_power
    }

    pub fn battery_power(&self) -> &str {
        &self.battery_power
    }

    pub fn battery_level(&self) -> &str {
        &self.battery_level
    }

    pub fn battery_bars(&self) -> u8 {
        self.battery_bars
    }

    pub fn unread_messages(&self) -> u32 {
        self.unread_messages
    }

    pub fn reset_unread_messages(&mut self) {
        self.unread_messages = 0;
    }
}

impl DashboardPage for OverviewPage {
    fn kind(&self) -> PageKind {
        PageKind::Overview
    }

    fn activate(&mut self, ctx: &PageContext<'_>) -> Result<()> {
        let installation = ctx.installation("overview")?;
        self.connected = ctx.client.state() == ConnectionState::Connected;
        self.refresh(installation);
        OVERVIEW_PLAN.activate(ctx.client, installation)?;
        Ok(())
    }

    fn deactivate(&mut self, ctx: &PageContext<'_>) -> Result<()> {
        OVERVIEW_PLAN.deactivate(ctx.client, ctx.installation("overview")?)
    }

    fn refresh(&mut self, installation: &Installation) {
        self.inverter_count = Some(installation.inverter_count());
        if let Ok(on) = installation.inverter_get_state() {
            self.inverter_on = on;
        }
        update_text(&mut self.pv_power, installation.pv_get_power(), format_power);
        update_text(&mut self.grid_power, installation.grid_get_power(), format_power);
        update_text(&mut self.output_power, installation.output_get_power(), format_power);
        update_text(&mut self.battery_power, installation.battery_get_power(), format_power);
        if let Ok(level) = installation.battery_get_charge() {
            self.battery_level = format_float_value(level, LEVEL_MAX_DIGITS, Some(0));
            self.battery_bars = battery_bars(level);
        }
    }

    fn on_connected(&mut self, _access_level: AccessLevel, _gateway_version: &str) {
        self.connected = true;
    }

    fn on_disconnected(&mut self) {
        self.connected = false;
    }

    fn on_device_message(&mut self, _message: &DeviceMessage) {
        if self.unread_messages < self.badge_max {
            self.unread_messages += 1;
        }
    }

    fn summary(&self) -> String {
        format!(
            "{} | inverters {} {} | PV {} kW | grid {} kW | output {} kW | \
             battery {} kW {}% [{}{}] | messages {}",
            if self.connected { "online" } else { "offline" },
            self.inverter_count
                .map_or_else(|| VALUE_PLACEHOLDER.to_string(), |count| count.to_string()),
            if self.inverter_on { "on" } else { "off" },
            self.pv_power,
            self.grid_power,
            self.output_power,
            self.battery_power,
            self.battery_level,
            "#".repeat(usize::from(self.battery_bars)),
            "-".repeat(usize::from(10 - self.battery_bars.min(10))),
            self.unread_messages
        )
    }
}
