//! # Concurrent Toggle Store
//!
//! `ActorId -> (BipedSlot -> ToggleState)` behind one coarse mutex.
//!
//! ## Locking
//!
//! ```text
//! gameplay thread ──┐
//! gameplay thread ──┼──> Mutex<ActorToggles> <── save / load callback
//! pruning thread  ──┘                              (holds the lock for
//!                                                   the whole record)
//! ```
//!
//! Ordinary operations never do I/O while the lock is held. Save and load do,
//! on purpose: they must observe or produce the whole store at one instant,
//! and they run rarely.

use parking_lot::{Mutex, MutexGuard};
use std::collections::{BTreeMap, HashMap};

use crate::slot::BipedSlot;
use crate::state::{ActorId, Perspective, SlotState, ToggleState};

/// Toggle states for one actor, keyed by slot.
pub type SlotToggles = HashMap<BipedSlot, ToggleState>;

/// Toggle states for every tracked actor.
pub type ActorToggles = HashMap<ActorId, SlotToggles>;

/// Ordered copy of the store, for comparisons and diagnostics.
pub type ToggleSnapshot = BTreeMap<ActorId, BTreeMap<BipedSlot, ToggleState>>;

/// Thread-safe per-actor toggle store.
///
/// Keys are used exactly as given; slot normalization happens one layer up
/// in [`crate::ToggleApi`].
#[derive(Debug, Default)]
pub struct AutoToggleMap {
    map: Mutex<ActorToggles>,
}

impl AutoToggleMap {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `state` for one perspective of `(actor, slot)`.
    ///
    /// The other perspective of an existing entry is left untouched.
    pub fn add(&self, actor: ActorId, slot: BipedSlot, state: SlotState, perspective: Perspective) {
        let mut map = self.map.lock();
        map.entry(actor)
            .or_default()
            .entry(slot)
            .or_default()
            .set(perspective, state);
    }

    /// Drops every entry for `actor`.
    ///
    /// Returns whether the actor was tracked.
    pub fn remove(&self, actor: ActorId) -> bool {
        self.map.lock().remove(&actor).is_some()
    }

    /// Returns the recorded state for one perspective, if any.
    #[must_use]
    pub fn toggle_state(
        &self,
        actor: ActorId,
        slot: BipedSlot,
        perspective: Perspective,
    ) -> Option<SlotState> {
        self.map
            .lock()
            .get(&actor)
            .and_then(|slots| slots.get(&slot))
            .and_then(|state| state.get(perspective))
    }

    /// Returns the recorded state, inserting `default` first if there is none.
    ///
    /// Lookup and insertion happen under one lock acquisition.
    pub fn toggle_state_or_insert(
        &self,
        actor: ActorId,
        slot: BipedSlot,
        perspective: Perspective,
        default: SlotState,
    ) -> SlotState {
        let mut map = self.map.lock();
        let entry = map.entry(actor).or_default().entry(slot).or_default();
        if let Some(state) = entry.get(perspective) {
            state
        } else {
            entry.set(perspective, default);
            default
        }
    }

    /// Empties the store.
    pub fn clear(&self) {
        self.map.lock().clear();
    }

    /// Number of tracked actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    /// Returns true if no actor is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }

    /// Total number of slot entries across all actors.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.map.lock().values().map(HashMap::len).sum()
    }

    /// Copies the whole store under one lock acquisition.
    #[must_use]
    pub fn snapshot(&self) -> ToggleSnapshot {
        self.map
            .lock()
            .iter()
            .map(|(actor, slots)| {
                let slots = slots.iter().map(|(slot, state)| (*slot, *state)).collect();
                (*actor, slots)
            })
            .collect()
    }

    /// Locks the store and hands out the raw mapping.
    ///
    /// Used by the persistence layer, which must hold the lock for a whole
    /// save or load. Every other operation blocks until the guard drops.
    pub fn lock(&self) -> MutexGuard<'_, ActorToggles> {
        self.map.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const PLAYER: ActorId = ActorId(0x14);
    const LYDIA: ActorId = ActorId(0x000A_2C94);

    #[test]
    fn test_add_then_get() {
        let store = AutoToggleMap::new();
        store.add(PLAYER, BipedSlot::Body, SlotState::Show, Perspective::FirstPerson);

        assert_eq!(
            store.toggle_state(PLAYER, BipedSlot::Body, Perspective::FirstPerson),
            Some(SlotState::Show)
        );
        assert_eq!(
            store.toggle_state(PLAYER, BipedSlot::Body, Perspective::ThirdPerson),
            None
        );
        assert_eq!(store.toggle_state(LYDIA, BipedSlot::Body, Perspective::FirstPerson), None);
    }

    #[test]
    fn test_partial_update_keeps_other_perspective() {
        let store = AutoToggleMap::new();
        store.add(PLAYER, BipedSlot::Feet, SlotState::Show, Perspective::ThirdPerson);
        store.add(PLAYER, BipedSlot::Feet, SlotState::Hide, Perspective::FirstPerson);

        assert_eq!(
            store.toggle_state(PLAYER, BipedSlot::Feet, Perspective::ThirdPerson),
            Some(SlotState::Show)
        );

        store.add(PLAYER, BipedSlot::Feet, SlotState::Hide, Perspective::ThirdPerson);
        assert_eq!(
            store.toggle_state(PLAYER, BipedSlot::Feet, Perspective::FirstPerson),
            Some(SlotState::Hide)
        );
        assert_eq!(store.slot_count(), 1);
    }

    #[test]
    fn test_remove_reports_presence() {
        let store = AutoToggleMap::new();
        store.add(LYDIA, BipedSlot::Hands, SlotState::Hide, Perspective::ThirdPerson);

        assert!(store.remove(LYDIA));
        assert!(!store.remove(LYDIA));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let store = AutoToggleMap::new();
        store.add(PLAYER, BipedSlot::Head, SlotState::Show, Perspective::FirstPerson);
        store.add(LYDIA, BipedSlot::Body, SlotState::Hide, Perspective::ThirdPerson);
        assert_eq!(store.len(), 2);

        store.clear();
        assert_eq!(store.len(), 0);
        assert_eq!(store.slot_count(), 0);
    }

    #[test]
    fn test_or_insert_only_inserts_once() {
        let store = AutoToggleMap::new();
        let first =
            store.toggle_state_or_insert(PLAYER, BipedSlot::Ring, Perspective::FirstPerson, SlotState::Hide);
        assert_eq!(first, SlotState::Hide);

        store.add(PLAYER, BipedSlot::Ring, SlotState::Show, Perspective::FirstPerson);
        let second =
            store.toggle_state_or_insert(PLAYER, BipedSlot::Ring, Perspective::FirstPerson, SlotState::Hide);
        assert_eq!(second, SlotState::Show);
        assert_eq!(
            store.toggle_state(PLAYER, BipedSlot::Ring, Perspective::ThirdPerson),
            None
        );
    }

    #[test]
    fn test_snapshot_is_ordered_copy() {
        let store = AutoToggleMap::new();
        store.add(LYDIA, BipedSlot::Shield, SlotState::Hide, Perspective::ThirdPerson);
        store.add(PLAYER, BipedSlot::Amulet, SlotState::Show, Perspective::FirstPerson);

        let snapshot = store.snapshot();
        let actors: Vec<_> = snapshot.keys().copied().collect();
        assert_eq!(actors, vec![PLAYER, LYDIA]);

        store.clear();
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let store = Arc::new(AutoToggleMap::new());
        let threads = 8u32;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for slot in BipedSlot::ALL {
                        store.add(ActorId(t), slot, SlotState::Show, Perspective::ThirdPerson);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.len(), threads as usize);
        assert_eq!(store.slot_count(), threads as usize * BipedSlot::COUNT);
    }
}
