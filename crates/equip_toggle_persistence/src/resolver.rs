//! # Identifier Resolution
//!
//! Actor identifiers stored in a save may point somewhere else, or nowhere,
//! once that save is loaded. The host's save-loading subsystem owns the
//! mapping; the codec asks it about every stored actor.

use equip_toggle_core::ActorId;

/// Maps an identifier from a save onto the current session.
pub trait ActorIdResolver {
    /// Returns the current identifier for `old`, or `None` if the actor no
    /// longer exists.
    fn resolve(&self, old: ActorId) -> Option<ActorId>;
}

/// Resolver that keeps every identifier as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityResolver;

impl ActorIdResolver for IdentityResolver {
    fn resolve(&self, old: ActorId) -> Option<ActorId> {
        Some(old)
    }
}

impl<F> ActorIdResolver for F
where
    F: Fn(ActorId) -> Option<ActorId>,
{
    fn resolve(&self, old: ActorId) -> Option<ActorId> {
        self(old)
    }
}
