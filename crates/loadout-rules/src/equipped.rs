//! The character's socket-to-item assignment

use std::collections::BTreeMap;

use loadout_items::{Item, Slot};

use crate::stats::{aggregate, BonusStats};

/// At most one item per physical socket. Only the planner mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquippedSet {
    items: BTreeMap<Slot, Item>,
}

impl EquippedSet {
    /// Create an empty equipment set
    pub fn new() -> Self {
        Self::default()
    }

    /// Item in a socket, if any
    pub fn get(&self, slot: Slot) -> Option<&Item> {
        self.items.get(&slot)
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.items.contains_key(&slot)
    }

    /// Occupied sockets in socket order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Item)> {
        self.items.iter().map(|(&slot, item)| (slot, item))
    }

    /// Equipped items in socket order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Number of occupied sockets
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bonus stats of everything equipped, computed from scratch
    pub fn bonus_stats(&self) -> BonusStats {
        aggregate(self.items.values())
    }

    /// Put an item in a socket, returning the previous occupant
    pub(crate) fn place(&mut self, slot: Slot, item: Item) -> Option<Item> {
        self.items.insert(slot, item)
    }

    /// Empty a socket, returning its occupant
    pub(crate) fn remove(&mut self, slot: Slot) -> Option<Item> {
        self.items.remove(&slot)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::item;
    use loadout_items::SlotMask;

    #[test]
    fn test_new_set_is_empty() {
        let set = EquippedSet::new();
        assert!(set.is_empty());
        assert!(set.get(Slot::Head).is_none());
        assert!(set.bonus_stats().primary.is_zero());
    }

    #[test]
    fn test_place_replaces_occupant() {
        let mut set = EquippedSet::new();
        assert!(set.place(Slot::Ring1, item(1, SlotMask::RINGS)).is_none());
        let prev = set.place(Slot::Ring1, item(2, SlotMask::RINGS));
        assert_eq!(prev.map(|i| i.id.0), Some(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_paired_sockets_are_distinct_keys() {
        let mut set = EquippedSet::new();
        set.place(Slot::Ear1, item(1, SlotMask::EAR1));
        set.place(Slot::Ear2, item(1, SlotMask::EAR1));
        assert_eq!(set.len(), 2);
        let slots: Vec<Slot> = set.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![Slot::Ear1, Slot::Ear2]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut set = EquippedSet::new();
        set.place(Slot::Chest, item(1, SlotMask::CHEST));
        set.place(Slot::Legs, item(2, SlotMask::LEGS));
        assert!(set.remove(Slot::Head).is_none());
        assert!(set.remove(Slot::Chest).is_some());
        assert!(!set.is_occupied(Slot::Chest));
        set.clear();
        assert!(set.is_empty());
    }
}
