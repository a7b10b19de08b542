//! Navigation - Dashboard Pages
//!
//! Defines the pages available in the dashboard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Available pages in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PageKind {
    /// Gateway endpoint and connection status
    #[default]
    Connection,
    /// Power flow overview
    Overview,
    /// Battery details
    Battery,
    /// Energy of today and yesterday
    Energy,
    /// Device message list
    Messages,
}

impl PageKind {
    pub fn title(&self) -> &'static str {
        match self {
            PageKind::Connection => "Connection",
            PageKind::Overview => "Overview",
            PageKind::Battery => "Battery",
            PageKind::Energy => "Energy",
            PageKind::Messages => "Messages",
        }
    }

    /// All pages
    pub fn all() -> &'static [PageKind] {
        &[
            PageKind::Connection,
            PageKind::Overview,
            PageKind::Battery,
            PageKind::Energy,
            PageKind::Messages,
        ]
    }

    /// Pages reachable once an installation is available
    pub fn dashboards() -> &'static [PageKind] {
        &[
            PageKind::Overview,
            PageKind::Battery,
            PageKind::Energy,
            PageKind::Messages,
        ]
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
