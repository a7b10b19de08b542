//! Utilities - Configuration Storage and Display Formatting

pub mod config_store;
pub mod format;
