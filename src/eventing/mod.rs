//! Eventing - Events Surfaced to the User

pub mod app_event;
