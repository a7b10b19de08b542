//! Solar Dashboard Library
//!
//! Core of a dashboard for an off-grid solar installation: it connects to a
//! gateway, discovers the devices behind it, subscribes to live values and
//! presents them as a set of pages (overview, battery, energy, messages).

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod services;
pub mod utils;
