//! Battery Feature

pub mod page;
