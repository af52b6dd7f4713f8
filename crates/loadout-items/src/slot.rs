//! Equipment sockets and slot bitmasks
//!
//! Each of the 23 sockets owns one bit of a [`SlotMask`]. Items carry a mask
//! of the sockets they fit; paired sockets (ears, bracers, rings, weapon
//! hands) are grouped into a [`SlotFamily`] so either socket accepts an item
//! authored for one side.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ParseNameError;

bitflags! {
    /// Set of equipment sockets, one bit per socket.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SlotMask: u32 {
        const CHARM        = 1 << 0;
        const EAR1         = 1 << 1;
        const HEAD         = 1 << 2;
        const FACE         = 1 << 3;
        const EAR2         = 1 << 4;
        const NECK         = 1 << 5;
        const SHOULDERS    = 1 << 6;
        const ARMS         = 1 << 7;
        const BACK         = 1 << 8;
        const BRACER1      = 1 << 9;
        const BRACER2      = 1 << 10;
        const RANGE        = 1 << 11;
        const HANDS        = 1 << 12;
        const PRIMARY      = 1 << 13;
        const SECONDARY    = 1 << 14;
        const RING1        = 1 << 15;
        const RING2        = 1 << 16;
        const CHEST        = 1 << 17;
        const LEGS         = 1 << 18;
        const FEET         = 1 << 19;
        const WAIST        = 1 << 20;
        const POWER_SOURCE = 1 << 21;
        const AMMO         = 1 << 22;

        const EARS    = Self::EAR1.bits() | Self::EAR2.bits();
        const BRACERS = Self::BRACER1.bits() | Self::BRACER2.bits();
        const RINGS   = Self::RING1.bits() | Self::RING2.bits();
        const WEAPONS = Self::PRIMARY.bits() | Self::SECONDARY.bits();
    }
}

/// A physical equipment socket. Variants are declared in bit order, so the
/// derived ordering is the socket order used for display and auto-placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Charm,
    Ear1,
    Head,
    Face,
    Ear2,
    Neck,
    Shoulders,
    Arms,
    Back,
    Bracer1,
    Bracer2,
    Range,
    Hands,
    Primary,
    Secondary,
    Ring1,
    Ring2,
    Chest,
    Legs,
    Feet,
    Waist,
    PowerSource,
    Ammo,
}

/// Number of physical sockets
pub const SLOT_COUNT: usize = 23;

impl Slot {
    /// All sockets in bit order
    pub fn all() -> &'static [Slot] {
        &[
            Self::Charm,
            Self::Ear1,
            Self::Head,
            Self::Face,
            Self::Ear2,
            Self::Neck,
            Self::Shoulders,
            Self::Arms,
            Self::Back,
            Self::Bracer1,
            Self::Bracer2,
            Self::Range,
            Self::Hands,
            Self::Primary,
            Self::Secondary,
            Self::Ring1,
            Self::Ring2,
            Self::Chest,
            Self::Legs,
            Self::Feet,
            Self::Waist,
            Self::PowerSource,
            Self::Ammo,
        ]
    }

    /// The single bit this socket owns
    pub fn bit(self) -> SlotMask {
        SlotMask::from_bits_retain(1 << self as u32)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Charm => "Charm",
            Self::Ear1 => "Ear 1",
            Self::Head => "Head",
            Self::Face => "Face",
            Self::Ear2 => "Ear 2",
            Self::Neck => "Neck",
            Self::Shoulders => "Shoulders",
            Self::Arms => "Arms",
            Self::Back => "Back",
            Self::Bracer1 => "Bracer 1",
            Self::Bracer2 => "Bracer 2",
            Self::Range => "Range",
            Self::Hands => "Hands",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Ring1 => "Ring 1",
            Self::Ring2 => "Ring 2",
            Self::Chest => "Chest",
            Self::Legs => "Legs",
            Self::Feet => "Feet",
            Self::Waist => "Waist",
            Self::PowerSource => "Power Source",
            Self::Ammo => "Ammo",
        }
    }

    /// Which family this socket belongs to
    pub fn family(self) -> SlotFamily {
        match self {
            Self::Ear1 | Self::Ear2 => SlotFamily::Ear,
            Self::Bracer1 | Self::Bracer2 => SlotFamily::Bracer,
            Self::Ring1 | Self::Ring2 => SlotFamily::Ring,
            Self::Primary | Self::Secondary => SlotFamily::Weapon,
            other => SlotFamily::Single(other),
        }
    }

    /// Whether this socket is one half of a pair
    pub fn is_paired(self) -> bool {
        !matches!(self.family(), SlotFamily::Single(_))
    }

    /// The other socket of this socket's pair
    pub fn paired(self) -> Option<Slot> {
        match self {
            Self::Ear1 => Some(Self::Ear2),
            Self::Ear2 => Some(Self::Ear1),
            Self::Bracer1 => Some(Self::Bracer2),
            Self::Bracer2 => Some(Self::Bracer1),
            Self::Ring1 => Some(Self::Ring2),
            Self::Ring2 => Some(Self::Ring1),
            Self::Primary => Some(Self::Secondary),
            Self::Secondary => Some(Self::Primary),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = ParseNameError;

    /// Case-insensitive, ignoring spaces, `_` and `-`. Also accepts the
    /// grid labels `Wrist1`/`Wrist2`, `Belt` and `Power`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        let slot = match key.as_str() {
            "charm" => Self::Charm,
            "ear1" => Self::Ear1,
            "head" => Self::Head,
            "face" => Self::Face,
            "ear2" => Self::Ear2,
            "neck" => Self::Neck,
            "shoulders" | "shoulder" => Self::Shoulders,
            "arms" => Self::Arms,
            "back" => Self::Back,
            "bracer1" | "wrist1" => Self::Bracer1,
            "bracer2" | "wrist2" => Self::Bracer2,
            "range" => Self::Range,
            "hands" => Self::Hands,
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "ring1" => Self::Ring1,
            "ring2" => Self::Ring2,
            "chest" => Self::Chest,
            "legs" => Self::Legs,
            "feet" => Self::Feet,
            "waist" | "belt" => Self::Waist,
            "powersource" | "power" => Self::PowerSource,
            "ammo" => Self::Ammo,
            _ => return Err(ParseNameError::new("slot", s)),
        };
        Ok(slot)
    }
}

/// Group of sockets that share game-rule treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotFamily {
    Ear,
    Bracer,
    Ring,
    Weapon,
    Single(Slot),
}

impl SlotFamily {
    /// Union of the bits of every socket in the family
    pub fn mask(self) -> SlotMask {
        match self {
            Self::Ear => SlotMask::EARS,
            Self::Bracer => SlotMask::BRACERS,
            Self::Ring => SlotMask::RINGS,
            Self::Weapon => SlotMask::WEAPONS,
            Self::Single(slot) => slot.bit(),
        }
    }

    /// Sockets belonging to this family, in socket order
    pub fn slots(self) -> Vec<Slot> {
        let mask = self.mask();
        Slot::all()
            .iter()
            .copied()
            .filter(|slot| mask.contains(slot.bit()))
            .collect()
    }
}

/// Lowercase and strip separators, for forgiving name lookups
pub(crate) fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
