//! Energy Feature

pub mod page;
