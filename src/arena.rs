//! Stable-id entity storage with tombstone removal.
//!
//! Every entity list in the world (asteroids, bullets, power-ups, floating
//! texts) lives in an [`Arena`].  Collision phases never mutate the list they
//! are scanning: they collect [`EntityId`]s, then call [`Arena::remove`] for
//! each one (which only tombstones the slot) and finish with a single
//! [`Arena::compact`] per category per frame.
//!
//! Ids are handed out monotonically and compaction preserves order, so the
//! slot vector is always sorted by id and lookups are a binary search.

/// Stable identifier of an entity within one [`Arena`].
///
/// Ids are never reused, including across restarts that build the new
/// arena with [`Arena::successor`], so the renderer can key retained GPU
/// resources (asteroid meshes, text entities) on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone)]
struct Slot<T> {
    id: EntityId,
    value: Option<T>,
}

/// Ordered, id-addressed collection with deferred removal.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    next_id: u32,
    live: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
            live: 0,
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty arena that continues this one's id sequence.
    pub fn successor(&self) -> Self {
        Self {
            slots: Vec::new(),
            next_id: self.next_id,
            live: 0,
        }
    }

    /// Append `value` and return its new id.
    pub fn insert(&mut self, value: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            value: Some(value),
        });
        self.live += 1;
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |slot| slot.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.index_of(id)
            .and_then(|i| self.slots[i].value.as_ref())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Tombstone `id` and return its value.  Returns `None` if the id was
    /// already removed, so removing the same id twice is harmless.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let i = self.index_of(id)?;
        let value = self.slots[i].value.take();
        if value.is_some() {
            self.live -= 1;
        }
        value
    }

    /// Drop tombstoned slots.
    pub fn compact(&mut self) {
        self.slots.retain(|slot| slot.value.is_some());
    }

    /// Number of live entities (tombstones excluded).
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    /// Iterate live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.value.as_ref().map(|v| (slot.id, v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.value.as_mut().map(|v| (slot.id, v)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.value.as_ref())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }
}

impl<T> Extend<T> for Arena<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
