//! Application Layer
//!
//! Contains the session, the page container, navigation and the headless runner.

pub mod application;
pub mod container;
pub mod navigation;
pub mod session;
