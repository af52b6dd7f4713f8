//! Character stats and bonus aggregation
//!
//! A [`StatBlock`] holds one value per displayed stat, grouped the way the
//! character sheet groups them. The same shape carries the editable
//! baseline, the primary bonus and the heroic bonus. Bonus records are
//! always rebuilt from the equipped items by [`aggregate`].

use std::fmt;
use std::str::FromStr;

use loadout_items::{Item, ItemStat, ParseNameError};
use serde::{Deserialize, Deserializer, Serialize};

/// One displayed character stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Hp,
    Mp,
    En,
    Ac,
    Mit,
    Avd,
    Atk,
    Dmg,
    Heal,
    Acc,
    Str,
    Sta,
    Agi,
    Dex,
    Wis,
    Int,
    Cha,
    Poison,
    Magic,
    Disease,
    Fire,
    Cold,
    Corruption,
}

/// Character sheet section a stat is shown under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatSection {
    Health,
    Combat,
    Attributes,
    Resistances,
}

impl StatSection {
    pub fn all() -> &'static [StatSection] {
        &[Self::Health, Self::Combat, Self::Attributes, Self::Resistances]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Combat => "Combat",
            Self::Attributes => "Attributes",
            Self::Resistances => "Resistances",
        }
    }

    /// Stats shown in this section, in display order
    pub fn stats(self) -> impl Iterator<Item = Stat> {
        Stat::all().iter().copied().filter(move |s| s.section() == self)
    }
}

impl Stat {
    pub fn all() -> &'static [Stat] {
        &[
            Self::Hp,
            Self::Mp,
            Self::En,
            Self::Ac,
            Self::Mit,
            Self::Avd,
            Self::Atk,
            Self::Dmg,
            Self::Heal,
            Self::Acc,
            Self::Str,
            Self::Sta,
            Self::Agi,
            Self::Dex,
            Self::Wis,
            Self::Int,
            Self::Cha,
            Self::Poison,
            Self::Magic,
            Self::Disease,
            Self::Fire,
            Self::Cold,
            Self::Corruption,
        ]
    }

    /// Field key as written in the settings file
    pub fn key(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Mp => "mp",
            Self::En => "en",
            Self::Ac => "ac",
            Self::Mit => "mit",
            Self::Avd => "avd",
            Self::Atk => "atk",
            Self::Dmg => "dmg",
            Self::Heal => "heal",
            Self::Acc => "acc",
            Self::Str => "str",
            Self::Sta => "sta",
            Self::Agi => "agi",
            Self::Dex => "dex",
            Self::Wis => "wis",
            Self::Int => "int",
            Self::Cha => "cha",
            Self::Poison => "poison",
            Self::Magic => "magic",
            Self::Disease => "disease",
            Self::Fire => "fire",
            Self::Cold => "cold",
            Self::Corruption => "corruption",
        }
    }

    pub fn section(self) -> StatSection {
        match self {
            Self::Hp | Self::Mp | Self::En => StatSection::Health,
            Self::Ac | Self::Mit | Self::Avd | Self::Atk | Self::Dmg | Self::Heal | Self::Acc => {
                StatSection::Combat
            }
            Self::Str | Self::Sta | Self::Agi | Self::Dex | Self::Wis | Self::Int | Self::Cha => {
                StatSection::Attributes
            }
            Self::Poison | Self::Magic | Self::Disease | Self::Fire | Self::Cold | Self::Corruption => {
                StatSection::Resistances
            }
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key().to_uppercase())
    }
}

impl FromStr for Stat {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.key() == key)
            .ok_or_else(|| ParseNameError::new("stat", s))
    }
}

impl From<ItemStat> for Stat {
    /// Character stat an item bonus field feeds into
    fn from(field: ItemStat) -> Self {
        match field {
            ItemStat::Strength => Stat::Str,
            ItemStat::Stamina => Stat::Sta,
            ItemStat::Agility => Stat::Agi,
            ItemStat::Dexterity => Stat::Dex,
            ItemStat::Wisdom => Stat::Wis,
            ItemStat::Intelligence => Stat::Int,
            ItemStat::Charisma => Stat::Cha,
            ItemStat::PoisonResist => Stat::Poison,
            ItemStat::MagicResist => Stat::Magic,
            ItemStat::DiseaseResist => Stat::Disease,
            ItemStat::FireResist => Stat::Fire,
            ItemStat::ColdResist => Stat::Cold,
            ItemStat::CorruptionResist => Stat::Corruption,
            ItemStat::Hp => Stat::Hp,
            ItemStat::Mana => Stat::Mp,
            ItemStat::Endurance => Stat::En,
            ItemStat::Attack => Stat::Atk,
            ItemStat::Accuracy => Stat::Acc,
            ItemStat::SpellDamage => Stat::Dmg,
            ItemStat::HealAmount => Stat::Heal,
        }
    }
}

/// Health pools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "HealthStats::baseline")]
pub struct HealthStats {
    #[serde(deserialize_with = "lenient_i32")]
    pub hp: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub mp: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub en: i32,
}

impl HealthStats {
    pub fn baseline() -> Self {
        Self { hp: 49, mp: 23, en: 18 }
    }
}

/// Combat ratings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "CombatStats::baseline")]
pub struct CombatStats {
    #[serde(deserialize_with = "lenient_i32")]
    pub ac: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub mit: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub avd: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub atk: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub dmg: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub heal: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub acc: i32,
}

impl CombatStats {
    pub fn baseline() -> Self {
        Self {
            ac: 28,
            mit: 2,
            avd: 15,
            atk: 14,
            dmg: 10,
            heal: 5,
            acc: 0,
        }
    }
}

/// The seven attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "Attributes::baseline")]
pub struct Attributes {
    #[serde(deserialize_with = "lenient_i32")]
    pub str: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub sta: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub agi: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub dex: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub wis: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub int: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub cha: i32,
}

impl Attributes {
    pub fn baseline() -> Self {
        Self {
            str: 55,
            sta: 65,
            agi: 71,
            dex: 70,
            wis: 107,
            int: 115,
            cha: 115,
        }
    }
}

/// Elemental and status resistances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "Resistances::baseline")]
pub struct Resistances {
    #[serde(deserialize_with = "lenient_i32")]
    pub poison: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub magic: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub disease: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub fire: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub cold: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub corruption: i32,
}

impl Resistances {
    pub fn baseline() -> Self {
        Self {
            poison: 10,
            magic: 15,
            disease: 8,
            fire: 12,
            cold: 12,
            corruption: 0,
        }
    }
}

/// One value per [`Stat`]. `Default` is all zeros; missing fields in a
/// deserialized block take the starting baseline instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "StatBlock::baseline")]
pub struct StatBlock {
    pub health: HealthStats,
    pub combat: CombatStats,
    pub attributes: Attributes,
    pub resistances: Resistances,
}

impl StatBlock {
    /// All-zero record
    pub fn zero() -> Self {
        Self::default()
    }

    /// Starting baseline of a fresh character
    pub fn baseline() -> Self {
        Self {
            health: HealthStats::baseline(),
            combat: CombatStats::baseline(),
            attributes: Attributes::baseline(),
            resistances: Resistances::baseline(),
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.health.hp,
            Stat::Mp => self.health.mp,
            Stat::En => self.health.en,
            Stat::Ac => self.combat.ac,
            Stat::Mit => self.combat.mit,
            Stat::Avd => self.combat.avd,
            Stat::Atk => self.combat.atk,
            Stat::Dmg => self.combat.dmg,
            Stat::Heal => self.combat.heal,
            Stat::Acc => self.combat.acc,
            Stat::Str => self.attributes.str,
            Stat::Sta => self.attributes.sta,
            Stat::Agi => self.attributes.agi,
            Stat::Dex => self.attributes.dex,
            Stat::Wis => self.attributes.wis,
            Stat::Int => self.attributes.int,
            Stat::Cha => self.attributes.cha,
            Stat::Poison => self.resistances.poison,
            Stat::Magic => self.resistances.magic,
            Stat::Disease => self.resistances.disease,
            Stat::Fire => self.resistances.fire,
            Stat::Cold => self.resistances.cold,
            Stat::Corruption => self.resistances.corruption,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Hp => &mut self.health.hp,
            Stat::Mp => &mut self.health.mp,
            Stat::En => &mut self.health.en,
            Stat::Ac => &mut self.combat.ac,
            Stat::Mit => &mut self.combat.mit,
            Stat::Avd => &mut self.combat.avd,
            Stat::Atk => &mut self.combat.atk,
            Stat::Dmg => &mut self.combat.dmg,
            Stat::Heal => &mut self.combat.heal,
            Stat::Acc => &mut self.combat.acc,
            Stat::Str => &mut self.attributes.str,
            Stat::Sta => &mut self.attributes.sta,
            Stat::Agi => &mut self.attributes.agi,
            Stat::Dex => &mut self.attributes.dex,
            Stat::Wis => &mut self.attributes.wis,
            Stat::Int => &mut self.attributes.int,
            Stat::Cha => &mut self.attributes.cha,
            Stat::Poison => &mut self.resistances.poison,
            Stat::Magic => &mut self.resistances.magic,
            Stat::Disease => &mut self.resistances.disease,
            Stat::Fire => &mut self.resistances.fire,
            Stat::Cold => &mut self.resistances.cold,
            Stat::Corruption => &mut self.resistances.corruption,
        }
    }

    /// Add another block onto this one
    pub fn add(&mut self, other: &StatBlock) {
        for &stat in Stat::all() {
            let value = self.get_mut(stat);
            *value = value.saturating_add(other.get(stat));
        }
    }

    /// Combined total of two blocks (non-mutating)
    pub fn combined(&self, other: &StatBlock) -> StatBlock {
        let mut result = *self;
        result.add(other);
        result
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// Bonuses contributed by equipped items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusStats {
    /// Defense plus every base bonus field; folded into the totals
    pub primary: StatBlock,
    /// Heroic bonus fields; displayed next to the totals
    pub heroic: StatBlock,
}

impl BonusStats {
    /// Add one item's contribution
    pub fn add_item(&mut self, item: &Item) {
        self.primary.combat.ac = self.primary.combat.ac.saturating_add(item.defense);
        for (field, value) in item.stats.populated() {
            let slot = self.primary.get_mut(Stat::from(field));
            *slot = slot.saturating_add(value);
        }
        if let Some(heroic) = &item.heroic_stats {
            for (field, value) in heroic.populated() {
                let slot = self.heroic.get_mut(Stat::from(field));
                *slot = slot.saturating_add(value);
            }
        }
    }
}

/// Sum the bonuses of a set of items, starting from zero.
pub fn aggregate<'a>(items: impl IntoIterator<Item = &'a Item>) -> BonusStats {
    let mut bonus = BonusStats::default();
    for item in items {
        bonus.add_item(item);
    }
    bonus
}

/// Baseline plus item bonuses, as shown on the character sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterStats {
    pub base: StatBlock,
    pub bonus: BonusStats,
}

impl CharacterStats {
    /// Displayed value: baseline plus primary bonus
    pub fn total(&self, stat: Stat) -> i32 {
        self.base.get(stat).saturating_add(self.bonus.primary.get(stat))
    }

    /// Heroic adjunct shown beside the total
    pub fn heroic(&self, stat: Stat) -> i32 {
        self.bonus.heroic.get(stat)
    }

    /// Every total at once
    pub fn totals(&self) -> StatBlock {
        self.base.combined(&self.bonus.primary)
    }
}

/// Coerce free-form numeric input the way a number field does: an optional
/// sign followed by leading digits, anything else is zero. Out of range
/// values saturate.
pub fn parse_stat_input(input: &str) -> i32 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        (acc * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1)
    });
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Any JSON/TOML value, for lenient stat fields
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accept numbers, numeric strings and garbage; garbage becomes zero.
fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Int(n) => n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
        LooseNumber::Float(f) if f.is_finite() => {
            f.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }
        LooseNumber::Float(_) => 0,
        LooseNumber::Text(s) => parse_stat_input(&s),
        LooseNumber::Other(_) => 0,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_items::{ClassMask, ItemId, ItemStats, Rarity, SlotMask};
    use proptest::prelude::*;

    fn item(id: u32, defense: i32, stats: ItemStats, heroic: Option<ItemStats>) -> Item {
        Item {
            id: ItemId(id),
            name: format!("Item {id}"),
            item_type: 0,
            slots: SlotMask::CHEST,
            classes: ClassMask::ALL,
            rarity: Rarity::Normal,
            defense,
            value: 0,
            stats,
            heroic_stats: heroic,
            cast_time: 0,
            mana: 0,
            mana_regen: 0,
            icon: None,
        }
    }

    #[test]
    fn test_every_stat_in_one_section() {
        let per_section: usize = StatSection::all().iter().map(|s| s.stats().count()).sum();
        assert_eq!(per_section, Stat::all().len());
        assert_eq!(StatSection::Health.stats().collect::<Vec<_>>(), vec![Stat::Hp, Stat::Mp, Stat::En]);
    }

    #[test]
    fn test_get_mut_matches_get() {
        let mut block = StatBlock::zero();
        for (i, &stat) in Stat::all().iter().enumerate() {
            *block.get_mut(stat) = i as i32 + 1;
        }
        for (i, &stat) in Stat::all().iter().enumerate() {
            assert_eq!(block.get(stat), i as i32 + 1);
        }
    }

    #[test]
    fn test_stat_keys_parse_back() {
        for &stat in Stat::all() {
            assert_eq!(stat.key().parse::<Stat>().unwrap(), stat);
        }
        assert_eq!("STR".parse::<Stat>().unwrap(), Stat::Str);
        assert!("luck".parse::<Stat>().is_err());
    }

    #[test]
    fn test_empty_aggregate_is_zero() {
        let bonus = aggregate(std::iter::empty());
        assert!(bonus.primary.is_zero());
        assert!(bonus.heroic.is_zero());
    }

    #[test]
    fn test_aggregate_maps_fields() {
        let robe = item(
            1,
            60,
            ItemStats {
                strength: Some(15),
                mana: Some(100),
                spelldmg: Some(0),
                accuracy: Some(8),
                healamt: Some(3),
                ..Default::default()
            },
            Some(ItemStats {
                healamt: Some(25),
                spelldmg: Some(25),
                ..Default::default()
            }),
        );
        let bonus = aggregate([&robe]);
        assert_eq!(bonus.primary.combat.ac, 60);
        assert_eq!(bonus.primary.attributes.str, 15);
        assert_eq!(bonus.primary.health.mp, 100);
        assert_eq!(bonus.primary.combat.dmg, 0);
        assert_eq!(bonus.primary.combat.acc, 8);
        assert_eq!(bonus.primary.combat.heal, 3);
        assert_eq!(bonus.heroic.combat.heal, 25);
        assert_eq!(bonus.heroic.combat.dmg, 25);
        assert_eq!(bonus.heroic.combat.ac, 0);
    }

    #[test]
    fn test_heroic_not_in_totals() {
        let orb = item(
            2,
            0,
            ItemStats {
                intelligence: Some(40),
                ..Default::default()
            },
            Some(ItemStats {
                intelligence: Some(10),
                ..Default::default()
            }),
        );
        let stats = CharacterStats {
            base: StatBlock::baseline(),
            bonus: aggregate([&orb]),
        };
        assert_eq!(stats.total(Stat::Int), 155);
        assert_eq!(stats.heroic(Stat::Int), 10);
        assert_eq!(stats.totals().attributes.int, 155);
    }

    #[test]
    fn test_strength_scenario() {
        let mut base = StatBlock::zero();
        base.attributes.str = 55;
        base.attributes.sta = 65;
        let belt = item(
            3,
            0,
            ItemStats {
                strength: Some(30),
                ..Default::default()
            },
            None,
        );
        let stats = CharacterStats {
            base,
            bonus: aggregate([&belt]),
        };
        assert_eq!(stats.total(Stat::Str), 85);
        assert_eq!(stats.total(Stat::Sta), 65);
    }

    #[test]
    fn test_totals_saturate() {
        let mut base = StatBlock::zero();
        base.attributes.str = i32::MAX;
        base.resistances.fire = i32::MIN;
        let ring = item(
            4,
            i32::MAX,
            ItemStats {
                strength: Some(2),
                fire_resist: Some(-3),
                ..Default::default()
            },
            None,
        );
        let stats = CharacterStats {
            base,
            bonus: aggregate([&ring, &ring]),
        };
        assert_eq!(stats.bonus.primary.combat.ac, i32::MAX);
        assert_eq!(stats.total(Stat::Str), i32::MAX);
        assert_eq!(stats.total(Stat::Fire), i32::MIN);
        assert_eq!(stats.totals().attributes.str, i32::MAX);
    }

    #[test]
    fn test_parse_stat_input() {
        assert_eq!(parse_stat_input("42"), 42);
        assert_eq!(parse_stat_input("  -7"), -7);
        assert_eq!(parse_stat_input("+3"), 3);
        assert_eq!(parse_stat_input("12abc"), 12);
        assert_eq!(parse_stat_input("abc"), 0);
        assert_eq!(parse_stat_input(""), 0);
        assert_eq!(parse_stat_input("-"), 0);
        assert_eq!(parse_stat_input("3.9"), 3);
        assert_eq!(parse_stat_input("99999999999"), i32::MAX);
        assert_eq!(parse_stat_input("-99999999999"), i32::MIN);
    }

    #[test]
    fn test_deserialize_missing_fields_use_baseline() {
        let block: StatBlock =
            serde_json::from_str(r#"{"attributes": {"str": 60}}"#).unwrap();
        assert_eq!(block.attributes.str, 60);
        assert_eq!(block.attributes.sta, 65);
        assert_eq!(block.health, HealthStats::baseline());
        assert_eq!(block.resistances, Resistances::baseline());
    }

    #[test]
    fn test_deserialize_coerces_garbage() {
        let block: StatBlock = serde_json::from_str(
            r#"{"health": {"hp": "120", "mp": "lots", "en": 7.8},
                "combat": {"ac": true, "mit": null}}"#,
        )
        .unwrap();
        assert_eq!(block.health.hp, 120);
        assert_eq!(block.health.mp, 0);
        assert_eq!(block.health.en, 7);
        assert_eq!(block.combat.ac, 0);
        assert_eq!(block.combat.mit, 0);
        assert_eq!(block.combat.avd, 15);
    }

    fn arb_stats() -> impl Strategy<Value = ItemStats> {
        (
            proptest::option::of(-50i32..50),
            proptest::option::of(-50i32..50),
            proptest::option::of(0i32..200),
            proptest::option::of(0i32..40),
        )
            .prop_map(|(strength, fire_resist, hp, spelldmg)| ItemStats {
                strength,
                fire_resist,
                hp,
                spelldmg,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn aggregate_ignores_item_order(
            entries in proptest::collection::vec((0i32..100, arb_stats(), proptest::option::of(arb_stats())), 0..8),
            seed in any::<u64>(),
        ) {
            let items: Vec<Item> = entries
                .into_iter()
                .enumerate()
                .map(|(i, (defense, stats, heroic))| item(i as u32, defense, stats, heroic))
                .collect();
            let mut shuffled: Vec<&Item> = items.iter().collect();
            let len = shuffled.len();
            if len > 1 {
                shuffled.rotate_left((seed as usize) % len);
                shuffled.reverse();
            }
            prop_assert_eq!(aggregate(&items), aggregate(shuffled));
        }
    }
}
