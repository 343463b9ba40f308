//! `StateId`: the dense handle the registry issues for each distinct state.

use std::fmt;

/// Opaque handle naming a registered state.
///
/// Ids are issued densely (0, 1, 2, ...) in registration order, so tables
/// keyed by state may index by [`StateId::index`] directly.
/// [`StateId::NO_STATE`] is the "absent" sentinel used for root parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    /// Sentinel for "no state". Never issued by a registry.
    pub const NO_STATE: Self = Self(u32::MAX);

    /// Wrap a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this id in dense per-state tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Whether this is the [`StateId::NO_STATE`] sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// `None` for the sentinel, `Some(self)` otherwise.
    #[must_use]
    pub const fn to_option(self) -> Option<Self> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }
}

impl Default for StateId {
    fn default() -> Self {
        Self::NO_STATE
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("none")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
