//! Features - Vertical Feature Slices
//!
//! Each feature contains its page and, where it has actions, its controller.

pub mod battery;
pub mod connection;
pub mod energy;
pub mod messages;
pub mod overview;
pub mod page;
pub mod subscription;
