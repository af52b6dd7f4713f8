//! Planner session
//!
//! Owns the editable baseline, the class selection and the equipped set,
//! and keeps the bonus record in step with the equipped set. Every mutation
//! rebuilds the bonus record from scratch.

use std::fmt;

use loadout_items::{Class, Item, Slot};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classes::{is_eligible, SelectedClasses};
use crate::compat::{auto_slot, can_equip};
use crate::equipped::EquippedSet;
use crate::stats::{parse_stat_input, BonusStats, CharacterStats, Stat, StatBlock};

/// Rules the planner applies when equipping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipPolicy {
    /// Refuse items none of the selected classes can use
    pub enforce_class_eligibility: bool,
}

impl Default for EquipPolicy {
    fn default() -> Self {
        Self {
            enforce_class_eligibility: true,
        }
    }
}

/// Why an equip attempt left the set unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The item does not fit the socket
    IncompatibleSlot,
    /// None of the selected classes may use the item
    IneligibleClass,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleSlot => write!(f, "Item does not fit that slot"),
            Self::IneligibleClass => write!(f, "None of the selected classes can use this item"),
        }
    }
}

/// Result of an equip attempt
#[derive(Debug, Clone, PartialEq)]
pub enum EquipOutcome {
    /// The item now occupies `slot`; `replaced` is the previous occupant
    Equipped { slot: Slot, replaced: Option<Item> },
    /// Nothing changed
    Rejected(Rejection),
}

impl EquipOutcome {
    pub fn is_equipped(&self) -> bool {
        matches!(self, Self::Equipped { .. })
    }
}

/// One interactive planning session
#[derive(Debug, Clone)]
pub struct Planner {
    base: StatBlock,
    classes: SelectedClasses,
    equipped: EquippedSet,
    bonus: BonusStats,
    policy: EquipPolicy,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(StatBlock::baseline(), SelectedClasses::default(), EquipPolicy::default())
    }
}

impl Planner {
    /// Start a session with nothing equipped
    pub fn new(base: StatBlock, classes: SelectedClasses, policy: EquipPolicy) -> Self {
        Self {
            base,
            classes,
            equipped: EquippedSet::new(),
            bonus: BonusStats::default(),
            policy,
        }
    }

    pub fn base(&self) -> &StatBlock {
        &self.base
    }

    /// Edit one baseline stat from user input; non-numeric input becomes 0.
    /// Returns the stored value.
    pub fn set_base_stat(&mut self, stat: Stat, input: &str) -> i32 {
        let value = parse_stat_input(input);
        *self.base.get_mut(stat) = value;
        debug!("Set base {} to {}", stat, value);
        value
    }

    pub fn classes(&self) -> &SelectedClasses {
        &self.classes
    }

    /// Toggle a class in the selection. Equipped items are left in place.
    pub fn toggle_class(&mut self, class: Class) -> bool {
        self.classes.toggle(class)
    }

    pub fn policy(&self) -> EquipPolicy {
        self.policy
    }

    pub fn equipped(&self) -> &EquippedSet {
        &self.equipped
    }

    pub fn bonus(&self) -> &BonusStats {
        &self.bonus
    }

    /// Baseline and bonuses for display
    pub fn stats(&self) -> CharacterStats {
        CharacterStats {
            base: self.base,
            bonus: self.bonus,
        }
    }

    /// Whether the current selection may use `item`
    pub fn is_eligible(&self, item: &Item) -> bool {
        is_eligible(&self.classes, item.classes)
    }

    /// Place `item` in `slot`, replacing any occupant.
    pub fn equip(&mut self, item: &Item, slot: Slot) -> EquipOutcome {
        if !can_equip(item.slots, slot) {
            debug!("Rejected {} for {}: incompatible slot", item.name, slot);
            return EquipOutcome::Rejected(Rejection::IncompatibleSlot);
        }
        if self.policy.enforce_class_eligibility && !self.is_eligible(item) {
            debug!("Rejected {} for {}: no eligible class", item.name, slot);
            return EquipOutcome::Rejected(Rejection::IneligibleClass);
        }

        let replaced = self.equipped.place(slot, item.clone());
        self.recompute();
        debug!("Equipped {} in {}", item.name, slot);
        EquipOutcome::Equipped { slot, replaced }
    }

    /// Place `item` in its first free compatible socket, or the first
    /// compatible socket when every one is taken.
    pub fn equip_auto(&mut self, item: &Item) -> EquipOutcome {
        match auto_slot(item.slots, &self.equipped) {
            Some(slot) => self.equip(item, slot),
            None => EquipOutcome::Rejected(Rejection::IncompatibleSlot),
        }
    }

    /// Empty a socket, returning what was there.
    pub fn unequip(&mut self, slot: Slot) -> Option<Item> {
        let removed = self.equipped.remove(slot)?;
        self.recompute();
        debug!("Unequipped {} from {}", removed.name, slot);
        Some(removed)
    }

    /// Empty every socket
    pub fn clear(&mut self) {
        self.equipped.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.bonus = self.equipped.bonus_stats();
    }
}
