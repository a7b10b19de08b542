//! Overview Feature

pub mod controller;
pub mod page;
