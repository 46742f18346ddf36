//! # Biped Slots
//!
//! The closed set of body locations an equipped item can occupy.
//!
//! Several head-family slots render as part of the head and are collapsed
//! onto [`BipedSlot::Head`] before they are used as store keys, so toggling
//! a circlet and toggling a helmet address the same override.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ToggleError, ToggleResult};

/// A biped equipment slot.
///
/// The discriminants are the on-disk slot numbers and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum BipedSlot {
    /// Helmets and hoods.
    Head = 0,
    /// Hair.
    Hair = 1,
    /// Body armor and clothing.
    Body = 2,
    /// Gloves and gauntlets.
    Hands = 3,
    /// Forearms.
    Forearms = 4,
    /// Amulets and necklaces.
    Amulet = 5,
    /// Rings.
    Ring = 6,
    /// Boots and shoes.
    Feet = 7,
    /// Calves.
    Calves = 8,
    /// Shields.
    Shield = 9,
    /// Tails.
    Tail = 10,
    /// Long hair.
    LongHair = 11,
    /// Circlets.
    Circlet = 12,
    /// Ears.
    Ears = 13,
    /// Mouth.
    ModMouth = 14,
    /// Neck.
    ModNeck = 15,
    /// Primary chest.
    ModChestPrimary = 16,
    /// Back.
    ModBack = 17,
    /// First miscellaneous slot.
    ModMisc1 = 18,
    /// Primary pelvis.
    ModPelvisPrimary = 19,
    /// Decapitated head.
    DecapitateHead = 20,
    /// Decapitation.
    Decapitate = 21,
    /// Secondary pelvis.
    ModPelvisSecondary = 22,
    /// Right leg.
    ModLegRight = 23,
    /// Left leg.
    ModLegLeft = 24,
    /// Face jewelry.
    ModFaceJewelry = 25,
    /// Secondary chest.
    ModChestSecondary = 26,
    /// Shoulders.
    ModShoulder = 27,
    /// Left arm.
    ModArmLeft = 28,
    /// Right arm.
    ModArmRight = 29,
    /// Second miscellaneous slot.
    ModMisc2 = 30,
    /// Effects.
    Fx01 = 31,
}

/// Slots that alias [`BipedSlot::Head`] in the toggle store.
pub const HEAD_FAMILY_SLOTS: [BipedSlot; 4] = [
    BipedSlot::Hair,
    BipedSlot::LongHair,
    BipedSlot::Circlet,
    BipedSlot::Ears,
];

impl BipedSlot {
    /// Number of biped slots.
    pub const COUNT: usize = 32;

    /// Every slot, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Head,
        Self::Hair,
        Self::Body,
        Self::Hands,
        Self::Forearms,
        Self::Amulet,
        Self::Ring,
        Self::Feet,
        Self::Calves,
        Self::Shield,
        Self::Tail,
        Self::LongHair,
        Self::Circlet,
        Self::Ears,
        Self::ModMouth,
        Self::ModNeck,
        Self::ModChestPrimary,
        Self::ModBack,
        Self::ModMisc1,
        Self::ModPelvisPrimary,
        Self::DecapitateHead,
        Self::Decapitate,
        Self::ModPelvisSecondary,
        Self::ModLegRight,
        Self::ModLegLeft,
        Self::ModFaceJewelry,
        Self::ModChestSecondary,
        Self::ModShoulder,
        Self::ModArmLeft,
        Self::ModArmRight,
        Self::ModMisc2,
        Self::Fx01,
    ];

    /// Converts an on-disk slot number back into a slot.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::InvalidSlot`] if `raw` is not a biped slot.
    pub fn from_raw(raw: u32) -> ToggleResult<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(ToggleError::InvalidSlot(raw))
    }

    /// Returns the on-disk slot number.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Returns true if this slot aliases the head slot.
    #[inline]
    #[must_use]
    pub fn is_head_family(self) -> bool {
        HEAD_FAMILY_SLOTS.contains(&self)
    }

    /// Returns the slot used as the store key.
    ///
    /// Head-family slots collapse onto [`BipedSlot::Head`]; everything else
    /// maps to itself.
    #[inline]
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.is_head_family() {
            Self::Head
        } else {
            self
        }
    }
}

impl fmt::Display for BipedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}({})", self.raw())
    }
}

impl TryFrom<u32> for BipedSlot {
    type Error = ToggleError;

    fn try_from(raw: u32) -> ToggleResult<Self> {
        Self::from_raw(raw)
    }
}
