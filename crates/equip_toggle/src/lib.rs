//! # Equipment Toggle
//!
//! Per-actor, per-slot equipment visibility overrides that survive save
//! and load.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  HostMessage  ┌───────────────┐     ┌─────────────────┐
//! │    Host    │──────────────>│ PluginContext │────>│ AutoToggleMap   │
//! └────────────┘               └───────┬───────┘     └─────────────────┘
//!                                      │ save / load / revert
//!                              ┌───────┴────────┐
//!                              │ companion file │  <save>.etog
//!                              └────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use equip_toggle::{HostMessage, MessageQueue, PluginConfig, PluginContext};
//! use equip_toggle::{ActorId, BipedSlot, Perspective, SlotState};
//!
//! let mut config = PluginConfig::default();
//! config.companion.directory = std::env::temp_dir().join("equip_toggle_doc");
//!
//! let ctx = PluginContext::new(config);
//! let (host, inbox) = MessageQueue::create_pair(16);
//!
//! ctx.api().set_toggle_state(ActorId(0x14), BipedSlot::Hair, SlotState::Show, Perspective::FirstPerson);
//! host.send_blocking(HostMessage::SaveGame("DocSave".into()));
//! host.send_blocking(HostMessage::PreLoadGame("DocSave.ess".into()));
//! host.send_blocking(HostMessage::DeleteGame("DocSave".into()));
//! assert_eq!(ctx.drain(&inbox), 3);
//!
//! assert_eq!(
//!     ctx.api().get_toggle_state(ActorId(0x14), BipedSlot::Head, Perspective::FirstPerson),
//!     SlotState::Show,
//! );
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod companion;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod messaging;

pub use companion::{save_stem, CompanionFiles, SAVE_EXTENSION};
pub use config::{CompanionConfig, LoggingConfig, PluginConfig, ToggleConfig};
pub use context::PluginContext;
pub use error::{ConfigError, ConfigResult, PluginError, PluginResult};
pub use messaging::{HostMessage, MessageQueue, MessageReceiver, MessageSender, DEFAULT_QUEUE_CAPACITY};

pub use equip_toggle_core::{
    ActorId, AutoToggleMap, BipedSlot, Perspective, SlotState, ToggleApi, ToggleError, ToggleState,
};
pub use equip_toggle_persistence::{ActorIdResolver, IdentityResolver, SerializationCallbacks};
