//! Item data model
//!
//! Immutable equipment definitions: slot and class masks, rarity, defense
//! and the base/heroic stat-bonus records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::class::ClassMask;
use crate::error::ParseNameError;
use crate::slot::{normalize, SlotMask};

/// Unique item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Normal,
    Enchanted,
    Legendary,
}

impl Rarity {
    pub fn all() -> &'static [Rarity] {
        &[Self::Normal, Self::Enchanted, Self::Legendary]
    }

    /// Rarity from the catalog encoding (1 = Normal, 2 = Enchanted, 3 = Legendary)
    pub fn from_ordinal(value: u8) -> Option<Rarity> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::Enchanted),
            3 => Some(Self::Legendary),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Enchanted => 2,
            Self::Legendary => 3,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Enchanted => "Enchanted",
            Self::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rarity {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "normal" | "1" => Ok(Self::Normal),
            "enchanted" | "2" => Ok(Self::Enchanted),
            "legendary" | "3" => Ok(Self::Legendary),
            _ => Err(ParseNameError::new("rarity", s)),
        }
    }
}

/// A single field of a stat-bonus record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemStat {
    Strength,
    Stamina,
    Agility,
    Dexterity,
    Wisdom,
    Intelligence,
    Charisma,
    PoisonResist,
    MagicResist,
    DiseaseResist,
    FireResist,
    ColdResist,
    CorruptionResist,
    Hp,
    Mana,
    Endurance,
    Attack,
    Accuracy,
    SpellDamage,
    HealAmount,
}

impl ItemStat {
    pub fn all() -> &'static [ItemStat] {
        &[
            Self::Strength,
            Self::Stamina,
            Self::Agility,
            Self::Dexterity,
            Self::Wisdom,
            Self::Intelligence,
            Self::Charisma,
            Self::PoisonResist,
            Self::MagicResist,
            Self::DiseaseResist,
            Self::FireResist,
            Self::ColdResist,
            Self::CorruptionResist,
            Self::Hp,
            Self::Mana,
            Self::Endurance,
            Self::Attack,
            Self::Accuracy,
            Self::SpellDamage,
            Self::HealAmount,
        ]
    }

    /// Field key used by the catalog data
    pub fn key(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Stamina => "stamina",
            Self::Agility => "agility",
            Self::Dexterity => "dexterity",
            Self::Wisdom => "wisdom",
            Self::Intelligence => "intelligence",
            Self::Charisma => "charisma",
            Self::PoisonResist => "poison_resist",
            Self::MagicResist => "magic_resist",
            Self::DiseaseResist => "disease_resist",
            Self::FireResist => "fire_resist",
            Self::ColdResist => "cold_resist",
            Self::CorruptionResist => "corruption_resist",
            Self::Hp => "hp",
            Self::Mana => "mana",
            Self::Endurance => "endurance",
            Self::Attack => "attack",
            Self::Accuracy => "accuracy",
            Self::SpellDamage => "spelldmg",
            Self::HealAmount => "healamt",
        }
    }
}

impl fmt::Display for ItemStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ItemStat {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        ItemStat::all()
            .iter()
            .copied()
            .find(|stat| normalize(stat.key()) == key)
            .ok_or_else(|| ParseNameError::new("stat", s))
    }
}

/// Stat-bonus record. A field is populated when it is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamina: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agility: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wisdom: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charisma: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poison_resist: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magic_resist: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease_resist: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fire_resist: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_resist: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corruption_resist: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endurance: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelldmg: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healamt: Option<i32>,
}

impl ItemStats {
    /// Value of a field, if populated
    pub fn get(&self, stat: ItemStat) -> Option<i32> {
        match stat {
            ItemStat::Strength => self.strength,
            ItemStat::Stamina => self.stamina,
            ItemStat::Agility => self.agility,
            ItemStat::Dexterity => self.dexterity,
            ItemStat::Wisdom => self.wisdom,
            ItemStat::Intelligence => self.intelligence,
            ItemStat::Charisma => self.charisma,
            ItemStat::PoisonResist => self.poison_resist,
            ItemStat::MagicResist => self.magic_resist,
            ItemStat::DiseaseResist => self.disease_resist,
            ItemStat::FireResist => self.fire_resist,
            ItemStat::ColdResist => self.cold_resist,
            ItemStat::CorruptionResist => self.corruption_resist,
            ItemStat::Hp => self.hp,
            ItemStat::Mana => self.mana,
            ItemStat::Endurance => self.endurance,
            ItemStat::Attack => self.attack,
            ItemStat::Accuracy => self.accuracy,
            ItemStat::SpellDamage => self.spelldmg,
            ItemStat::HealAmount => self.healamt,
        }
    }

    /// Populated fields with their values, in field order
    pub fn populated(&self) -> impl Iterator<Item = (ItemStat, i32)> + '_ {
        ItemStat::all()
            .iter()
            .filter_map(move |&stat| self.get(stat).map(|value| (stat, value)))
    }

    /// Whether the field is populated with a non-zero value
    pub fn has(&self, stat: ItemStat) -> bool {
        self.get(stat).is_some_and(|value| value != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }
}

/// An equipment definition from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Numeric item type code (weapon, armor, jewelry, ...)
    pub item_type: u16,
    /// Sockets this item fits
    pub slots: SlotMask,
    /// Classes allowed to use this item
    pub classes: ClassMask,
    pub rarity: Rarity,
    /// Armor value, added to AC
    pub defense: i32,
    /// Currency worth, informational only
    pub value: u32,
    /// Bonuses active once equipped
    pub stats: ItemStats,
    /// Secondary bonus layer, tracked apart from `stats`
    pub heroic_stats: Option<ItemStats>,
    /// Cast time in milliseconds for clicky effects
    pub cast_time: u32,
    pub mana: i32,
    pub mana_regen: i32,
    pub icon: Option<String>,
}

impl Item {
    /// Whether the item is usable by every class
    pub fn is_universal(&self) -> bool {
        self.classes == ClassMask::ALL
    }

    /// Whether either bonus record carries a non-zero value for `stat`
    pub fn has_stat(&self, stat: ItemStat) -> bool {
        self.stats.has(stat) || self.heroic_stats.as_ref().is_some_and(|h| h.has(stat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item() -> Item {
        Item {
            id: ItemId(1094),
            name: "Dirk of the Traitor".to_string(),
            item_type: 2,
            slots: SlotMask::PRIMARY | SlotMask::SECONDARY,
            classes: ClassMask::from_bits_truncate(16777),
            rarity: Rarity::Normal,
            defense: 0,
            value: 0,
            stats: ItemStats {
                strength: Some(4),
                agility: Some(4),
                dexterity: Some(4),
                spelldmg: Some(9),
                poison_resist: Some(0),
                ..Default::default()
            },
            heroic_stats: None,
            cast_time: 0,
            mana: 0,
            mana_regen: 0,
            icon: Some("574".to_string()),
        }
    }

    #[test]
    fn test_rarity_order() {
        assert!(Rarity::Normal < Rarity::Enchanted);
        assert!(Rarity::Enchanted < Rarity::Legendary);
        for &rarity in Rarity::all() {
            assert_eq!(Rarity::from_ordinal(rarity.ordinal()), Some(rarity));
        }
        assert_eq!(Rarity::from_ordinal(0), None);
        assert_eq!(Rarity::from_ordinal(4), None);
    }

    #[test]
    fn test_populated_fields_in_order() {
        let item = test_item();
        let fields: Vec<_> = item.stats.populated().collect();
        assert_eq!(
            fields,
            vec![
                (ItemStat::Strength, 4),
                (ItemStat::Agility, 4),
                (ItemStat::Dexterity, 4),
                (ItemStat::PoisonResist, 0),
                (ItemStat::SpellDamage, 9),
            ]
        );
    }

    #[test]
    fn test_zero_field_is_not_a_stat() {
        let item = test_item();
        assert!(item.has_stat(ItemStat::SpellDamage));
        assert!(!item.has_stat(ItemStat::PoisonResist));
        assert!(!item.has_stat(ItemStat::Hp));
    }

    #[test]
    fn test_heroic_stat_counts() {
        let mut item = test_item();
        item.heroic_stats = Some(ItemStats {
            healamt: Some(25),
            ..Default::default()
        });
        assert!(item.has_stat(ItemStat::HealAmount));
    }

    #[test]
    fn test_stats_json_skips_missing_fields() {
        let stats: ItemStats = serde_json::from_str(r#"{"strength": 15, "hp": 0}"#).unwrap();
        assert_eq!(stats.strength, Some(15));
        assert_eq!(stats.hp, Some(0));
        assert_eq!(stats.mana, None);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"strength":15,"hp":0}"#);
    }

    #[test]
    fn test_parse_item_stat() {
        assert_eq!("spelldmg".parse::<ItemStat>().unwrap(), ItemStat::SpellDamage);
        assert_eq!("Fire Resist".parse::<ItemStat>().unwrap(), ItemStat::FireResist);
        assert!("luck".parse::<ItemStat>().is_err());
    }
}
