//! Loadout Items - the static item catalog and its data shapes
//!
//! This crate provides the types the rules engine consumes:
//! - Slot and class bitmasks
//! - Item records with rarity and stat-bonus layers
//! - The embedded catalog dataset and its validation

pub mod catalog;
pub mod class;
pub mod error;
pub mod item;
pub mod slot;

pub use catalog::Catalog;
pub use class::{Class, ClassMask, CLASS_COUNT};
pub use error::{CatalogError, ParseNameError};
pub use item::{Item, ItemId, ItemStat, ItemStats, Rarity};
pub use slot::{Slot, SlotFamily, SlotMask, SLOT_COUNT};
