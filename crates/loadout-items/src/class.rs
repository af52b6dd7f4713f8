//! Character classes and class bitmasks

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ParseNameError;
use crate::slot::normalize;

bitflags! {
    /// Set of classes allowed to use an item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassMask: u32 {
        const WARRIOR       = 1 << 0;
        const CLERIC        = 1 << 1;
        const PALADIN       = 1 << 2;
        const RANGER        = 1 << 3;
        const SHADOW_KNIGHT = 1 << 4;
        const DRUID         = 1 << 5;
        const MONK          = 1 << 6;
        const BARD          = 1 << 7;
        const ROGUE         = 1 << 8;
        const SHAMAN        = 1 << 9;
        const NECROMANCER   = 1 << 10;
        const WIZARD        = 1 << 11;
        const MAGICIAN      = 1 << 12;
        const ENCHANTER     = 1 << 13;
        const BEASTLORD     = 1 << 14;
        const BERSERKER     = 1 << 15;

        /// Usable by every class
        const ALL = 0xFFFF;
    }
}

/// A playable character archetype, declared in bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Class {
    Warrior,
    Cleric,
    Paladin,
    Ranger,
    ShadowKnight,
    Druid,
    Monk,
    Bard,
    Rogue,
    Shaman,
    Necromancer,
    Wizard,
    Magician,
    Enchanter,
    Beastlord,
    Berserker,
}

/// Number of playable classes
pub const CLASS_COUNT: usize = 16;

impl Class {
    /// All classes in bit order
    pub fn all() -> &'static [Class] {
        &[
            Self::Warrior,
            Self::Cleric,
            Self::Paladin,
            Self::Ranger,
            Self::ShadowKnight,
            Self::Druid,
            Self::Monk,
            Self::Bard,
            Self::Rogue,
            Self::Shaman,
            Self::Necromancer,
            Self::Wizard,
            Self::Magician,
            Self::Enchanter,
            Self::Beastlord,
            Self::Berserker,
        ]
    }

    /// Order used by the class picker: Magician first, then alphabetical
    pub fn picker_order() -> &'static [Class] {
        &[
            Self::Magician,
            Self::Bard,
            Self::Beastlord,
            Self::Berserker,
            Self::Cleric,
            Self::Druid,
            Self::Enchanter,
            Self::Monk,
            Self::Necromancer,
            Self::Paladin,
            Self::Ranger,
            Self::Rogue,
            Self::ShadowKnight,
            Self::Shaman,
            Self::Warrior,
            Self::Wizard,
        ]
    }

    pub fn bit(self) -> ClassMask {
        ClassMask::from_bits_retain(1 << self as u32)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Cleric => "Cleric",
            Self::Paladin => "Paladin",
            Self::Ranger => "Ranger",
            Self::ShadowKnight => "Shadow Knight",
            Self::Druid => "Druid",
            Self::Monk => "Monk",
            Self::Bard => "Bard",
            Self::Rogue => "Rogue",
            Self::Shaman => "Shaman",
            Self::Necromancer => "Necromancer",
            Self::Wizard => "Wizard",
            Self::Magician => "Magician",
            Self::Enchanter => "Enchanter",
            Self::Beastlord => "Beastlord",
            Self::Berserker => "Berserker",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Class {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Class::all()
            .iter()
            .copied()
            .find(|class| normalize(class.name()) == key)
            .ok_or_else(|| ParseNameError::new("class", s))
    }
}

impl ClassMask {
    /// Classes contained in this mask, in bit order
    pub fn classes(self) -> Vec<Class> {
        Class::all()
            .iter()
            .copied()
            .filter(|class| self.contains(class.bit()))
            .collect()
    }
}
