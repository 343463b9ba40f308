//! `PerStateInformation`: dense table of per-state records keyed by `StateId`.
//!
//! Registry ids are issued densely, so the table is a `Vec` indexed by
//! [`StateId::index`]. Slots hold `Option<T>` so the table can tell a record
//! that was materialised (even if still default-valued) from one that was
//! never touched. For records whose layout has a niche (such as an enum
//! field) the `Option` costs no space.

use planspace_kernel::state::StateId;

/// Default-initialising mapping from state id to `T`.
#[derive(Debug, Clone)]
pub struct PerStateInformation<T> {
    entries: Vec<Option<T>>,
    recorded: usize,
}

impl<T: Default> PerStateInformation<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            recorded: 0,
        }
    }

    /// Create an empty table with room for ids `0..capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            recorded: 0,
        }
    }

    /// The record for `id`, materialising `T::default()` on first access.
    ///
    /// # Panics
    ///
    /// Panics if `id` is [`StateId::NO_STATE`].
    pub fn get_mut(&mut self, id: StateId) -> &mut T {
        assert!(!id.is_none(), "per-state lookup with NO_STATE");
        let index = id.index();
        if index >= self.entries.len() {
            self.entries.resize_with(index + 1, || None);
        }
        let slot = &mut self.entries[index];
        if slot.is_none() {
            self.recorded += 1;
        }
        slot.get_or_insert_with(T::default)
    }
}

impl<T> PerStateInformation<T> {
    /// The record for `id`, or `None` if it was never materialised.
    #[must_use]
    pub fn get(&self, id: StateId) -> Option<&T> {
        self.entries.get(id.index()).and_then(Option::as_ref)
    }

    /// Whether a record exists for `id`.
    #[must_use]
    pub fn contains(&self, id: StateId) -> bool {
        self.get(id).is_some()
    }

    /// Number of recorded ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recorded
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    /// Recorded ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// Recorded `(id, record)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &T)> + '_ {
        self.entries.iter().enumerate().filter_map(|(index, slot)| {
            let id = StateId::new(u32::try_from(index).ok()?);
            Some((id, slot.as_ref()?))
        })
    }
}

impl<T: Default> Default for PerStateInformation<T> {
    fn default() -> Self {
        Self::new()
    }
}
