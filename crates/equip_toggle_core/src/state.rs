//! # Toggle States
//!
//! Identifiers and per-slot visibility values.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ToggleError, ToggleResult};

/// Identifier of a character in the host simulation.
///
/// Stable within one session only. Identifiers read back from a save must be
/// resolved against the loaded save before use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<u32> for ActorId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Camera perspective a toggle applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Perspective {
    /// First-person camera.
    FirstPerson,
    /// Third-person camera.
    ThirdPerson,
}

impl Perspective {
    /// Maps the host's `is_first_person` flag onto a perspective.
    #[inline]
    #[must_use]
    pub const fn from_first_person(first_person: bool) -> Self {
        if first_person {
            Self::FirstPerson
        } else {
            Self::ThirdPerson
        }
    }

    /// Returns true for [`Perspective::FirstPerson`].
    #[inline]
    #[must_use]
    pub const fn is_first_person(self) -> bool {
        matches!(self, Self::FirstPerson)
    }
}

/// Visibility of a slot in one perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum SlotState {
    /// The slot is hidden.
    #[default]
    Hide = 0,
    /// The slot is shown.
    Show = 1,
}

impl SlotState {
    /// Returns the on-disk value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> i32 {
        self as i32
    }

    /// Converts an on-disk value back into a state.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::InvalidState`] for anything but 0 or 1.
    pub const fn from_raw(raw: i32) -> ToggleResult<Self> {
        match raw {
            0 => Ok(Self::Hide),
            1 => Ok(Self::Show),
            _ => Err(ToggleError::InvalidState(raw)),
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hide => f.write_str("hide"),
            Self::Show => f.write_str("show"),
        }
    }
}

/// Overrides recorded for one slot.
///
/// Either field may be absent; absence means "no override recorded" and is
/// distinct from any [`SlotState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToggleState {
    /// First-person override.
    pub first_person: Option<SlotState>,
    /// Third-person override.
    pub third_person: Option<SlotState>,
}

impl ToggleState {
    /// Creates a toggle state from both fields.
    #[inline]
    #[must_use]
    pub const fn new(first_person: Option<SlotState>, third_person: Option<SlotState>) -> Self {
        Self {
            first_person,
            third_person,
        }
    }

    /// Returns the override for a perspective.
    #[inline]
    #[must_use]
    pub const fn get(&self, perspective: Perspective) -> Option<SlotState> {
        match perspective {
            Perspective::FirstPerson => self.first_person,
            Perspective::ThirdPerson => self.third_person,
        }
    }

    /// Sets the override for a perspective, leaving the other one alone.
    #[inline]
    pub fn set(&mut self, perspective: Perspective, state: SlotState) {
        match perspective {
            Perspective::FirstPerson => self.first_person = Some(state),
            Perspective::ThirdPerson => self.third_person = Some(state),
        }
    }

    /// Returns true if neither perspective has an override.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_person.is_none() && self.third_person.is_none()
    }
}
