//! Slot compatibility
//!
//! An item fits a socket when its slot mask intersects the socket's family
//! mask. For single sockets the family mask is the socket's own bit; for a
//! pair it is both bits, so an ear item authored for `Ear1` also fits `Ear2`.

use loadout_items::{Slot, SlotMask};

use crate::equipped::EquippedSet;

/// Whether an item with `mask` may be placed in `slot`.
pub fn can_equip(mask: SlotMask, slot: Slot) -> bool {
    mask.intersects(slot.family().mask())
}

/// Every socket that accepts an item with `mask`, in socket order.
pub fn valid_slots(mask: SlotMask) -> Vec<Slot> {
    Slot::all()
        .iter()
        .copied()
        .filter(|&slot| can_equip(mask, slot))
        .collect()
}

/// First empty socket that accepts `mask`, falling back to the first
/// accepting socket when all of them are occupied.
pub fn auto_slot(mask: SlotMask, equipped: &EquippedSet) -> Option<Slot> {
    let candidates = valid_slots(mask);
    candidates
        .iter()
        .copied()
        .find(|&slot| !equipped.is_occupied(slot))
        .or_else(|| candidates.first().copied())
}
