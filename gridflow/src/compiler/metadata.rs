//! Aggregated program stats.
//!
//! Pieces fold their static costs into a [`Metadata`] during compilation.
//! Accumulation wraps on overflow; the compiler rejects any program whose
//! final stats are negative (`StatOverflow`), so wrap-around surfaces as a
//! compile error rather than a bogus program.

use std::collections::HashMap;

/// A named numeric stat of a compiled program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Complexity,
    Potency,
    Cost,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Complexity, Stat::Potency, Stat::Cost];

    pub fn name(self) -> &'static str {
        match self {
            Stat::Complexity => "complexity",
            Stat::Potency => "potency",
            Stat::Cost => "cost",
        }
    }
}

/// Additive accumulator for program stats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    stats: HashMap<Stat, i32>,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata::default()
    }

    /// Adds `value` to `stat`, wrapping on overflow.
    pub fn add_stat(&mut self, stat: Stat, value: i32) {
        let entry = self.stats.entry(stat).or_insert(0);
        *entry = entry.wrapping_add(value);
    }

    /// Current value of `stat`; unset stats read as zero.
    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }

    pub(crate) fn has_negative(&self) -> bool {
        Stat::ALL.iter().any(|s| self.stat(*s) < 0)
    }
}
