//! # Equipment Toggle Core
//!
//! Per-actor equipment visibility overrides, tracked separately for first
//! and third person.
//!
//! ## Layout
//!
//! ```text
//! ActorId ──> BipedSlot ──> ToggleState { first_person, third_person }
//! ```
//!
//! ## Thread Safety
//!
//! [`AutoToggleMap`] guards its whole mapping with a single mutex. Every
//! operation is atomic with respect to every other one, which is what the
//! save/load callbacks rely on to see a consistent snapshot.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use equip_toggle_core::{ActorId, AutoToggleMap, BipedSlot, Perspective, SlotState, ToggleApi};
//!
//! let api = ToggleApi::new(Arc::new(AutoToggleMap::new()));
//! let player = ActorId(0x14);
//!
//! api.set_toggle_state(player, BipedSlot::Circlet, SlotState::Show, Perspective::ThirdPerson);
//! assert_eq!(
//!     api.get_toggle_state(player, BipedSlot::Head, Perspective::ThirdPerson),
//!     SlotState::Show,
//! );
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod api;
pub mod error;
pub mod slot;
pub mod state;
pub mod store;

pub use api::ToggleApi;
pub use error::{ToggleError, ToggleResult};
pub use slot::{BipedSlot, HEAD_FAMILY_SLOTS};
pub use state::{ActorId, Perspective, SlotState, ToggleState};
pub use store::{ActorToggles, AutoToggleMap, SlotToggles, ToggleSnapshot};
