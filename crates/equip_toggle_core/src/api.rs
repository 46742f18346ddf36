//! # Toggle API
//!
//! The two entry points the rest of the plugin uses.
//!
//! Both normalize the slot before touching the store, so every head-family
//! slot reads and writes the [`BipedSlot::Head`] entry.
//!
//! `get_toggle_state` is self-initializing: a miss records the default state
//! for that perspective and returns it. Equip handlers depend on that, so the
//! read is allowed to mutate the store.

use std::sync::Arc;
use tracing::debug;

use crate::slot::BipedSlot;
use crate::state::{ActorId, Perspective, SlotState};
use crate::store::AutoToggleMap;

/// Handle to the shared toggle store with slot normalization applied.
#[derive(Clone, Debug)]
pub struct ToggleApi {
    store: Arc<AutoToggleMap>,
    default_state: SlotState,
}

impl ToggleApi {
    /// Creates an API over `store`, defaulting misses to [`SlotState::Hide`].
    #[must_use]
    pub fn new(store: Arc<AutoToggleMap>) -> Self {
        Self {
            store,
            default_state: SlotState::Hide,
        }
    }

    /// Overrides the state recorded on a miss.
    #[must_use]
    pub fn with_default_state(mut self, default_state: SlotState) -> Self {
        self.default_state = default_state;
        self
    }

    /// Records an override for `(actor, slot)` in one perspective.
    pub fn set_toggle_state(
        &self,
        actor: ActorId,
        slot: BipedSlot,
        state: SlotState,
        perspective: Perspective,
    ) {
        let slot = slot.normalized();
        debug!(%actor, %slot, %state, ?perspective, "set toggle state");
        self.store.add(actor, slot, state, perspective);
    }

    /// Returns the override for `(actor, slot)` in one perspective.
    ///
    /// On a miss, the default state is stored for that perspective and
    /// returned. Later calls return the stored value without mutating.
    pub fn get_toggle_state(&self, actor: ActorId, slot: BipedSlot, perspective: Perspective) -> SlotState {
        self.store
            .toggle_state_or_insert(actor, slot.normalized(), perspective, self.default_state)
    }

    /// Drops everything recorded for an actor that will never come back.
    pub fn forget_actor(&self, actor: ActorId) -> bool {
        let removed = self.store.remove(actor);
        if removed {
            debug!(%actor, "forgot actor");
        }
        removed
    }

    /// The state recorded on a miss.
    #[must_use]
    pub const fn default_state(&self) -> SlotState {
        self.default_state
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<AutoToggleMap> {
        &self.store
    }
}
