use thiserror::Error;

use crate::item::ItemId;

/// Errors raised while loading and validating the item catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("item {id} has an empty name")]
    EmptyName { id: ItemId },

    #[error("item {id} ({name}) has no equipment slot")]
    NoSlot { id: ItemId, name: String },

    #[error("item {id} ({name}) has unknown slot bits {bits:#x}")]
    UnknownSlotBits { id: ItemId, name: String, bits: u32 },

    #[error("item {id} ({name}) is usable by no class")]
    NoClass { id: ItemId, name: String },

    #[error("item {id} ({name}) has unknown class bits {bits:#x}")]
    UnknownClassBits { id: ItemId, name: String, bits: u32 },

    #[error("item {id} ({name}) has invalid rarity {rarity}")]
    InvalidRarity { id: ItemId, name: String, rarity: u8 },

    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
}

/// A name that does not match any known slot, class or stat.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct ParseNameError {
    kind: &'static str,
    name: String,
}

impl ParseNameError {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}
