//! Item catalog: the static item dataset embedded at build time

use std::collections::HashSet;

use serde::Deserialize;
use tracing::info;

use crate::class::ClassMask;
use crate::error::CatalogError;
use crate::item::{Item, ItemId, ItemStats, Rarity};
use crate::slot::SlotMask;

/// The built-in dataset
const BUILTIN_ITEMS: &str = include_str!("../data/items.json");

/// An item exactly as authored in the dataset, before validation
#[derive(Debug, Clone, Deserialize)]
struct ItemRecord {
    id: u32,
    name: String,
    #[serde(rename = "type", default)]
    item_type: u16,
    slot: u32,
    #[serde(default)]
    defense: i32,
    #[serde(default)]
    stats: ItemStats,
    #[serde(default)]
    heroic_stats: Option<ItemStats>,
    #[serde(default)]
    value: u32,
    rarity: u8,
    classes: u32,
    #[serde(rename = "casttime", default)]
    cast_time: u32,
    #[serde(default)]
    mana: i32,
    #[serde(rename = "manaregen", default)]
    mana_regen: i32,
    #[serde(default)]
    icon: Option<String>,
}

impl ItemRecord {
    /// Validate masks and rarity, producing a game item
    fn into_item(self) -> Result<Item, CatalogError> {
        let id = ItemId(self.id);

        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { id });
        }
        if self.slot == 0 {
            return Err(CatalogError::NoSlot { id, name: self.name });
        }
        let Some(slots) = SlotMask::from_bits(self.slot) else {
            return Err(CatalogError::UnknownSlotBits {
                id,
                bits: self.slot & !SlotMask::all().bits(),
                name: self.name,
            });
        };
        if self.classes == 0 {
            return Err(CatalogError::NoClass { id, name: self.name });
        }
        let Some(classes) = ClassMask::from_bits(self.classes) else {
            return Err(CatalogError::UnknownClassBits {
                id,
                bits: self.classes & !ClassMask::all().bits(),
                name: self.name,
            });
        };
        let Some(rarity) = Rarity::from_ordinal(self.rarity) else {
            return Err(CatalogError::InvalidRarity {
                id,
                rarity: self.rarity,
                name: self.name,
            });
        };

        Ok(Item {
            id,
            name: self.name,
            item_type: self.item_type,
            slots,
            classes,
            rarity,
            defense: self.defense,
            value: self.value,
            stats: self.stats,
            heroic_stats: self.heroic_stats,
            cast_time: self.cast_time,
            mana: self.mana,
            mana_regen: self.mana_regen,
            icon: self.icon,
        })
    }
}

/// Read-only list of every item the planner knows about.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Load the dataset compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_ITEMS)
    }

    /// Parse and validate a JSON array of item records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ItemRecord> = serde_json::from_str(json)?;
        let catalog = Self::from_items(
            records
                .into_iter()
                .map(ItemRecord::into_item)
                .collect::<Result<Vec<_>, _>>()?,
        )?;
        info!("Loaded item catalog with {} items", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from already constructed items, rejecting duplicate ids.
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// All items in dataset order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Exact, case-insensitive name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;

    fn record_json(id: u32, slot: u32, classes: u32, rarity: u8) -> String {
        format!(
            r#"[{{"id": {id}, "name": "Test Item", "type": 10, "slot": {slot},
                 "defense": 3, "stats": {{"agility": 1}}, "value": 5,
                 "rarity": {rarity}, "classes": {classes},
                 "casttime": 0, "mana": 0, "manaregen": 0}}]"#
        )
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 22);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_builtin_tiers_are_independent() {
        let catalog = Catalog::builtin().unwrap();
        let normal = catalog.get(ItemId(28034)).unwrap();
        let enchanted = catalog.get(ItemId(1028034)).unwrap();
        let legendary = catalog.get(ItemId(2028034)).unwrap();
        assert_eq!(normal.rarity, Rarity::Normal);
        assert_eq!(enchanted.rarity, Rarity::Enchanted);
        assert_eq!(legendary.rarity, Rarity::Legendary);
        assert_eq!(normal.stats.strength, Some(15));
        assert_eq!(enchanted.stats.strength, Some(30));
        assert!(normal.heroic_stats.is_none());
        assert_eq!(legendary.heroic_stats.as_ref().unwrap().spelldmg, Some(40));
        assert_eq!(normal.classes.classes(), vec![Class::Magician]);
    }

    #[test]
    fn test_builtin_masks() {
        let catalog = Catalog::builtin().unwrap();
        let ring = catalog.find_by_name("copper championship ring").unwrap();
        assert_eq!(ring.slots, SlotMask::RINGS);
        assert!(ring.is_universal());
        let sword = catalog.get(ItemId(1074)).unwrap();
        assert_eq!(sword.slots, SlotMask::WEAPONS);
        assert_eq!(sword.item_type, 0);
        assert_eq!(sword.value, 30000);
        let orb = catalog.get(ItemId(1113)).unwrap();
        assert_eq!(orb.cast_time, 4000);
        assert_eq!(orb.icon.as_deref(), Some("973"));
    }

    #[test]
    fn test_record_converts() {
        let catalog = Catalog::from_json(&record_json(7, 4096, 65535, 2)).unwrap();
        let item = catalog.get(ItemId(7)).unwrap();
        assert_eq!(item.slots, SlotMask::HANDS);
        assert_eq!(item.rarity, Rarity::Enchanted);
        assert_eq!(item.defense, 3);
        assert_eq!(item.stats.agility, Some(1));
    }

    #[test]
    fn test_rejects_zero_slot() {
        let err = Catalog::from_json(&record_json(7, 0, 65535, 1)).unwrap_err();
        assert!(matches!(err, CatalogError::NoSlot { .. }));
    }

    #[test]
    fn test_rejects_unknown_slot_bits() {
        let err = Catalog::from_json(&record_json(7, 4096 | (1 << 23), 65535, 1)).unwrap_err();
        match err {
            CatalogError::UnknownSlotBits { bits, .. } => assert_eq!(bits, 1 << 23),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_bad_classes() {
        let err = Catalog::from_json(&record_json(7, 4096, 0, 1)).unwrap_err();
        assert!(matches!(err, CatalogError::NoClass { .. }));
        let err = Catalog::from_json(&record_json(7, 4096, 1 << 16, 1)).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownClassBits { .. }));
    }

    #[test]
    fn test_rejects_bad_rarity() {
        let err = Catalog::from_json(&record_json(7, 4096, 65535, 4)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRarity { rarity: 4, .. }));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = record_json(7, 4096, 65535, 1);
        let body = json.trim().trim_start_matches('[').trim_end_matches(']');
        let doubled = format!("[{body},{body}]");
        let err = Catalog::from_json(&doubled).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ItemId(7))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Catalog::from_json("[{").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
