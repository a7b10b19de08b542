//! PageContainer - Active Page Switching
//!
//! Holds one instance of every page and makes sure exactly one is active.
//! A switch always deactivates the current page before activating the next
//! one; failures of either step are logged and never stop the switch.

use crate::app::navigation::PageKind;
use crate::domain::config::AppConfig;
use crate::features::battery::page::BatteryPage;
use crate::features::connection::page::ConnectionPage;
use crate::features::energy::page::EnergyPage;
use crate::features::messages::page::MessagesPage;
use crate::features::overview::page::OverviewPage;
use crate::features::page::{DashboardPage, PageContext};

pub struct PageContainer {
    connection: ConnectionPage,
    overview: OverviewPage,
    battery: BatteryPage,
    energy: EnergyPage,
    messages: MessagesPage,
    active: Option<PageKind>,
}

impl PageContainer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            connection: ConnectionPage::new(&config.gateway),
            overview: OverviewPage::new(config.dashboard.message_badge_max),
            battery: BatteryPage::default(),
            energy: EnergyPage::default(),
            messages: MessagesPage::new(config.dashboard.message_limit),
            active: None,
        }
    }

    pub fn active(&self) -> Option<PageKind> {
        self.active
    }

    pub fn page(&self, kind: PageKind) -> &dyn DashboardPage {
        match kind {
            PageKind::Connection => &self.connection,
            PageKind::Overview => &self.overview,
            PageKind::Battery => &self.battery,
            PageKind::Energy => &self.energy,
            PageKind::Messages => &self.messages,
        }
    }

    pub fn page_mut(&mut self, kind: PageKind) -> &mut dyn DashboardPage {
        match kind {
            PageKind::Connection => &mut self.connection,
            PageKind::Overview => &mut self.overview,
            PageKind::Battery => &mut self.battery,
            PageKind::Energy => &mut self.energy,
            PageKind::Messages => &mut self.messages,
        }
    }

    pub fn active_page_mut(&mut self) -> Option<&mut dyn DashboardPage> {
        let kind = self.active?;
        Some(self.page_mut(kind))
    }

    /// Deactivate the current page, then activate `kind`
    pub fn change_to(&mut self, kind: PageKind, ctx: &PageContext<'_>) {
        if let Some(current) = self.active.take() {
            if let Err(e) = self.page_mut(current).deactivate(ctx) {
                tracing::warn!("Deactivating page {} failed: {}", current, e);
            }
        }

        tracing::info!("Switching to page {}", kind);
        self.active = Some(kind);
        if let Err(e) = self.page_mut(kind).activate(ctx) {
            tracing::warn!("Activating page {} failed: {}", kind, e);
        }
    }

    pub fn connection(&self) -> &ConnectionPage {
        &self.connection
    }

    pub fn overview(&self) -> &OverviewPage {
        &self.overview
    }

    pub fn overview_mut(&mut self) -> &mut OverviewPage {
        &mut self.overview
    }

    pub fn battery(&self) -> &BatteryPage {
        &self.battery
    }

    pub fn energy(&self) -> &EnergyPage {
        &self.energy
    }

    pub fn messages(&self) -> &MessagesPage {
        &self.messages
    }
}
