//! Domain - Pure Data Structures and Protocol Types
//!
//! These types don't depend on the gateway client and represent the business domain.

pub mod category;
pub mod command;
pub mod config;
pub mod description;
pub mod installation;
pub mod message;
pub mod property;
