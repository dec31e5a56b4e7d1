//! Player inventories

use crate::core::types::ObjectId;
use crate::world::entity_set::EntitySet;

/// A capacity-bounded set of object ids carried by one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    items: EntitySet<ObjectId>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: EntitySet::bounded(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.items.insert(id)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.items.remove(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.items.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    pub fn ids(&self) -> &[ObjectId] {
        self.items.ids()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.items.iter()
    }
}
