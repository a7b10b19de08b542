//! Messages Feature

pub mod page;
