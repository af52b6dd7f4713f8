//! Catalog search
//!
//! Filters combine with AND. Whether a filter with no active criteria shows
//! the whole catalog or nothing is a product setting ([`EmptyFilter`]).

use loadout_items::{Catalog, Item, ItemStat, Rarity, Slot};
use serde::{Deserialize, Serialize};

use crate::classes::{is_eligible, SelectedClasses};
use crate::compat::can_equip;

/// What an inactive filter shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyFilter {
    /// No criteria, no results
    #[default]
    Nothing,
    /// No criteria, whole catalog
    All,
}

/// Search criteria for the item list
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive substring of the item name
    pub text: Option<String>,
    /// Socket the item must fit; a paired socket matches either side
    pub slot: Option<Slot>,
    pub rarity: Option<Rarity>,
    /// Bonus field the item must carry with a non-zero value
    pub stat: Option<ItemStat>,
    /// Keep only items usable by this selection. Refines results but does
    /// not by itself make the filter active.
    pub eligible_for: Option<SelectedClasses>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    pub fn with_stat(mut self, stat: ItemStat) -> Self {
        self.stat = Some(stat);
        self
    }

    pub fn eligible_for(mut self, classes: SelectedClasses) -> Self {
        self.eligible_for = Some(classes);
        self
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether any search criterion is set
    pub fn is_active(&self) -> bool {
        self.needle().is_some() || self.slot.is_some() || self.rarity.is_some() || self.stat.is_some()
    }

    /// Whether an item passes every set criterion
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_with(item, self.needle().as_deref())
    }

    fn matches_with(&self, item: &Item, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            if !item.name.to_lowercase().contains(needle) {
                return false;
            }
        }
        if let Some(slot) = self.slot {
            if !can_equip(item.slots, slot) {
                return false;
            }
        }
        if let Some(rarity) = self.rarity {
            if item.rarity != rarity {
                return false;
            }
        }
        if let Some(stat) = self.stat {
            if !item.has_stat(stat) {
                return false;
            }
        }
        if let Some(classes) = &self.eligible_for {
            if !is_eligible(classes, item.classes) {
                return false;
            }
        }
        true
    }

    /// Matching items in catalog order
    pub fn apply<'a>(&self, catalog: &'a Catalog, empty: EmptyFilter) -> Vec<&'a Item> {
        if !self.is_active() && empty == EmptyFilter::Nothing {
            return Vec::new();
        }
        let needle = self.needle();
        catalog
            .items()
            .iter()
            .filter(|item| self.matches_with(item, needle.as_deref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_items::{Class, ItemId};

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn ids(items: &[&Item]) -> Vec<u32> {
        items.iter().map(|item| item.id.0).collect()
    }

    #[test]
    fn test_inactive_filter_shows_nothing_by_default() {
        let catalog = catalog();
        let filter = ItemFilter::new();
        assert!(!filter.is_active());
        assert!(filter.apply(&catalog, EmptyFilter::default()).is_empty());
        assert_eq!(filter.apply(&catalog, EmptyFilter::All).len(), catalog.len());
    }

    #[test]
    fn test_blank_text_is_inactive() {
        assert!(!ItemFilter::new().with_text("   ").is_active());
    }

    #[test]
    fn test_text_is_case_insensitive_substring() {
        let catalog = catalog();
        let found = ItemFilter::new().with_text("ORB OF").apply(&catalog, EmptyFilter::Nothing);
        assert_eq!(ids(&found), vec![28034, 1028034, 2028034, 1113]);
    }

    #[test]
    fn test_slot_filter_matches_either_side_of_pair() {
        let catalog = catalog();
        let secondary = ItemFilter::new()
            .with_slot(Slot::Secondary)
            .apply(&catalog, EmptyFilter::Nothing);
        let primary = ItemFilter::new()
            .with_slot(Slot::Primary)
            .apply(&catalog, EmptyFilter::Nothing);
        assert_eq!(ids(&secondary), ids(&primary));
        assert!(ids(&secondary).contains(&28034));
        assert!(ids(&secondary).contains(&1044));

        let rings = ItemFilter::new()
            .with_slot(Slot::Ring2)
            .apply(&catalog, EmptyFilter::Nothing);
        assert_eq!(ids(&rings), vec![1454]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let catalog = catalog();
        let found = ItemFilter::new()
            .with_text("robe")
            .with_rarity(Rarity::Legendary)
            .apply(&catalog, EmptyFilter::Nothing);
        assert_eq!(ids(&found), vec![2031239]);

        let none = ItemFilter::new()
            .with_text("gloves")
            .with_slot(Slot::Chest)
            .apply(&catalog, EmptyFilter::All);
        assert!(none.is_empty());
    }

    #[test]
    fn test_stat_filter_needs_non_zero_value() {
        let catalog = catalog();
        let found = ItemFilter::new()
            .with_stat(ItemStat::HealAmount)
            .apply(&catalog, EmptyFilter::Nothing);
        assert_eq!(ids(&found), vec![1031239, 2031239]);

        // The normal robe lists spelldmg as zero.
        let dmg = ItemFilter::new()
            .with_stat(ItemStat::SpellDamage)
            .with_text("robe")
            .apply(&catalog, EmptyFilter::Nothing);
        assert!(!ids(&dmg).contains(&31239));
    }

    #[test]
    fn test_eligibility_refines_results() {
        let catalog = catalog();
        let warrior = SelectedClasses::new(Class::Warrior);
        let found = ItemFilter::new()
            .with_slot(Slot::Primary)
            .eligible_for(warrior.clone())
            .apply(&catalog, EmptyFilter::Nothing);
        assert!(!ids(&found).contains(&28034));
        assert!(ids(&found).contains(&1074));

        let only_classes = ItemFilter::new().eligible_for(warrior);
        assert!(!only_classes.is_active());
        assert!(only_classes.apply(&catalog, EmptyFilter::Nothing).is_empty());
    }

    #[test]
    fn test_matches_single_item() {
        let catalog = catalog();
        let ring = catalog.get(ItemId(1454)).unwrap();
        assert!(ItemFilter::new().with_slot(Slot::Ring1).matches(ring));
        assert!(!ItemFilter::new().with_slot(Slot::Neck).matches(ring));
    }
}
