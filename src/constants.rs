//! Dashboard Constants
//!
//! Centralized defaults and display constants shared by the pages.

/// Default gateway endpoint
pub const DEFAULT_GATEWAY_HOST: &str = "localhost";
pub const DEFAULT_GATEWAY_PORT: u16 = 1987;

/// Device messages fetched and kept by the messages page
pub const MESSAGE_LIMIT: usize = 20;

/// Upper bound of the unread message badge
pub const MESSAGE_BADGE_MAX: u32 = 99;

/// Text shown until a value has arrived
pub const VALUE_PLACEHOLDER: &str = "...";

/// Segments of the battery level indicator
pub const BATTERY_BAR_COUNT: u8 = 10;

/// Default digit budget of displayed values
pub const DEFAULT_MAX_DIGITS: usize = 5;

/// Headless runner timing
pub const TICK_INTERVAL_MS: u64 = 500;
pub const PAGE_DWELL_SECS: u64 = 3;
pub const RUN_SECS: u64 = 30;

/// Capacity of the user-facing event log
pub const EVENT_LOG_CAPACITY: usize = 200;

/// Most recent requests kept by the simulated gateway
pub const REQUEST_LOG_CAPACITY: usize = 256;

/// Identifiers for the platform configuration directory
pub const APP_QUALIFIER: &str = "org";
pub const APP_ORGANIZATION: &str = "solar-dashboard";
pub const APP_NAME: &str = "solar-dashboard";
pub const CONFIG_FILE_NAME: &str = "config.toml";
