//! PropertyCategory - Semantic Property Groups
//!
//! Pages ask an installation for groups of properties by category instead of
//! by concrete identifier. Categories are disjoint bits, so a union of several
//! categories can be tested for membership of each one.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of property categories
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PropertyCategory(u16);

impl PropertyCategory {
    pub const INVERTER_STATE: Self = Self(1 << 0);
    pub const PV_POWER: Self = Self(1 << 1);
    pub const PV_ENERGY_STATS: Self = Self(1 << 2);
    pub const GRID_POWER: Self = Self(1 << 3);
    pub const GRID_ENERGY_STATS: Self = Self(1 << 4);
    pub const OUTPUT_POWER: Self = Self(1 << 5);
    pub const OUTPUT_ENERGY_STATS: Self = Self(1 << 6);
    pub const BATTERY_POWER: Self = Self(1 << 7);
    pub const BATTERY_VOLTAGE: Self = Self(1 << 8);
    pub const BATTERY_CURRENT: Self = Self(1 << 9);
    pub const BATTERY_CHARGE: Self = Self(1 << 10);
    pub const BATTERY_TEMPERATURE: Self = Self(1 << 11);
    pub const BATTERY_ENERGY_STATS: Self = Self(1 << 12);

    /// The empty set
    pub const NONE: Self = Self(0);

    /// Every category
    pub const ALL: Self = Self((1 << 13) - 1);

    const NAMES: [(Self, &'static str); 13] = [
        (Self::INVERTER_STATE, "INVERTER_STATE"),
        (Self::PV_POWER, "PV_POWER"),
        (Self::PV_ENERGY_STATS, "PV_ENERGY_STATS"),
        (Self::GRID_POWER, "GRID_POWER"),
        (Self::GRID_ENERGY_STATS, "GRID_ENERGY_STATS"),
        (Self::OUTPUT_POWER, "OUTPUT_POWER"),
        (Self::OUTPUT_ENERGY_STATS, "OUTPUT_ENERGY_STATS"),
        (Self::BATTERY_POWER, "BATTERY_POWER"),
        (Self::BATTERY_VOLTAGE, "BATTERY_VOLTAGE"),
        (Self::BATTERY_CURRENT, "BATTERY_CURRENT"),
        (Self::BATTERY_CHARGE, "BATTERY_CHARGE"),
        (Self::BATTERY_TEMPERATURE, "BATTERY_TEMPERATURE"),
        (Self::BATTERY_ENERGY_STATS, "BATTERY_ENERGY_STATS"),
    ];

    /// Set union, usable in constants
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True if every category in `other` is also in `self`
    pub fn contains(self, other: Self) -> bool {
        !other.is_empty() && self.0 & other.0 == other.0
    }

    /// True if the two sets share at least one category
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the single categories in this set
    pub fn iter(self) -> impl Iterator<Item = PropertyCategory> {
        Self::NAMES
            .into_iter()
            .map(|(category, _)| category)
            .filter(move |category| self.intersects(*category))
    }
}

impl BitOr for PropertyCategory {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PropertyCategory {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PropertyCategory {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("PropertyCategory(NONE)");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(category, _)| self.intersects(*category))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "PropertyCategory({})", names.join(" | "))
    }
}
