//! # Equipment Toggle Persistence
//!
//! Saves the toggle store into the host's co-save and restores it on load.
//!
//! ## Record
//!
//! One record, type `'ATG'`, version [`SERIALIZATION_VERSION`]:
//!
//! ```text
//! [u64: actor count]
//!   [u32: actor id]
//!   [u64: slot count]
//!     [u32: slot] [i32: first person] [i32: third person]   (-1 = absent)
//! ```
//!
//! ## Failure Model
//!
//! Every failure is logged and contained. A failed save leaves a truncated
//! record behind; a failed or mismatched load loses the persisted toggles.
//! Neither aborts the host's own save or load.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use equip_toggle_core::{ActorId, AutoToggleMap, BipedSlot, Perspective, SlotState};
//! use equip_toggle_persistence::{CoSaveReader, CoSaveWriter, IdentityResolver, SerializationCallbacks};
//!
//! let store = Arc::new(AutoToggleMap::new());
//! store.add(ActorId(0x14), BipedSlot::Head, SlotState::Show, Perspective::FirstPerson);
//!
//! let callbacks = SerializationCallbacks::new(Arc::clone(&store));
//! let mut writer = CoSaveWriter::new();
//! callbacks.save(&mut writer).unwrap();
//! let bytes = writer.finish().unwrap();
//!
//! store.clear();
//! let mut reader = CoSaveReader::from_bytes(bytes).unwrap();
//! callbacks.load(&mut reader, &IdentityResolver);
//! assert_eq!(store.slot_count(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod callbacks;
pub mod codec;
pub mod cosave;
pub mod error;
pub mod record;
pub mod resolver;
pub mod type_code;

pub use callbacks::{LoadSummary, SerializationCallbacks, AUTO_TOGGLE_RECORD, SERIALIZATION_VERSION};
pub use codec::{load_toggles, save_toggles, LoadStats, ABSENT_STATE};
pub use cosave::{CoSaveReader, CoSaveWriter, COSAVE_FORMAT_VERSION, COSAVE_MAGIC};
pub use error::{CodecError, CodecResult, StreamError, StreamResult};
pub use record::{RecordInfo, RecordReader, RecordWriter};
pub use resolver::{ActorIdResolver, IdentityResolver};
pub use type_code::TypeCode;
