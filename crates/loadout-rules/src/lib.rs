//! Loadout Rules - the equipment rules engine
//!
//! Pure decisions over the item catalog:
//! - Slot compatibility, including paired sockets
//! - Class eligibility for the selected classes
//! - Equip/unequip on a planner session with fully recomputed bonuses
//! - Catalog search

pub mod classes;
pub mod compat;
pub mod equipped;
pub mod filter;
pub mod planner;
pub mod stats;

pub use classes::{is_eligible, SelectedClasses, MAX_SELECTED_CLASSES};
pub use compat::{auto_slot, can_equip, valid_slots};
pub use equipped::EquippedSet;
pub use filter::{EmptyFilter, ItemFilter};
pub use planner::{EquipOutcome, EquipPolicy, Planner, Rejection};
pub use stats::{
    aggregate, parse_stat_input, BonusStats, CharacterStats, Stat, StatBlock, StatSection,
};
