//! # Serialization Callbacks
//!
//! The three entry points the host invokes around its own save/load cycle:
//!
//! - **save**: opens the auto-toggle record and writes the store into it
//! - **load**: walks every record, dispatching the ones this crate owns
//! - **revert**: empties the store before a different save is loaded
//!
//! None of them return errors to the host. Failures are logged with
//! `critical = true` and the host carries on.

use std::sync::Arc;

use equip_toggle_core::AutoToggleMap;
use tracing::{error, info};

use crate::codec::{load_toggles, save_toggles};
use crate::error::CodecResult;
use crate::record::{RecordInfo, RecordReader, RecordWriter};
use crate::resolver::ActorIdResolver;
use crate::type_code::TypeCode;

/// Type code of the auto-toggle record.
pub const AUTO_TOGGLE_RECORD: TypeCode = TypeCode::from_signature(*b"ATG");

/// Version written into, and required of, every auto-toggle record.
pub const SERIALIZATION_VERSION: u32 = 1;

/// Outcome of one load pass over a co-save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records decoded successfully.
    pub loaded: usize,
    /// Records ignored for a version mismatch or an unknown type.
    pub skipped: usize,
    /// Records whose body failed to decode.
    pub failed: usize,
}

/// Save, load and revert callbacks bound to one store.
#[derive(Clone, Debug)]
pub struct SerializationCallbacks {
    store: Arc<AutoToggleMap>,
}

impl SerializationCallbacks {
    /// Binds the callbacks to `store`.
    #[must_use]
    pub fn new(store: Arc<AutoToggleMap>) -> Self {
        Self { store }
    }

    /// The store these callbacks read and write.
    #[must_use]
    pub fn store(&self) -> &Arc<AutoToggleMap> {
        &self.store
    }

    /// Writes the auto-toggle record.
    ///
    /// Failures are logged before being returned; the host may ignore them.
    ///
    /// # Errors
    ///
    /// Returns the stream error that stopped the save. A partial record may
    /// already have been written.
    pub fn save<W: RecordWriter>(&self, writer: &mut W) -> CodecResult<()> {
        let result = self.write_auto_toggles(writer);
        if result.is_err() {
            error!(critical = true, "Failed to save auto toggle regs!");
        }

        info!("Finished saving data");
        result
    }

    fn write_auto_toggles<W: RecordWriter>(&self, writer: &mut W) -> CodecResult<()> {
        if let Err(err) = writer.open_record(AUTO_TOGGLE_RECORD, SERIALIZATION_VERSION) {
            error!("Failed to open serialization record! ({err})");
            return Err(err.into());
        }
        save_toggles(&self.store, writer)
    }

    /// Reads every record in the co-save.
    ///
    /// Records with the wrong version or an unknown type are skipped without
    /// touching the store. A damaged container header stops the pass.
    pub fn load<R, V>(&self, reader: &mut R, resolver: &V) -> LoadSummary
    where
        R: RecordReader,
        V: ActorIdResolver + ?Sized,
    {
        let mut summary = LoadSummary::default();

        loop {
            let info = match reader.next_record_info() {
                Ok(Some(info)) => info,
                Ok(None) => break,
                Err(err) => {
                    error!(critical = true, "Failed to read record header: {err}");
                    break;
                }
            };

            if info.version != SERIALIZATION_VERSION {
                error!(
                    critical = true,
                    "Loaded data is out of date! Read ({}), expected ({}) for type code ({})",
                    info.version,
                    SERIALIZATION_VERSION,
                    info.type_code
                );
                summary.skipped += 1;
                continue;
            }

            if info.type_code == AUTO_TOGGLE_RECORD {
                if self.read_auto_toggles(reader, resolver, &info) {
                    summary.loaded += 1;
                } else {
                    summary.failed += 1;
                }
            } else {
                error!(critical = true, "Unrecognized record type ({})!", info.type_code);
                summary.skipped += 1;
            }
        }

        summary
    }

    fn read_auto_toggles<R, V>(&self, reader: &mut R, resolver: &V, info: &RecordInfo) -> bool
    where
        R: RecordReader,
        V: ActorIdResolver + ?Sized,
    {
        match load_toggles(&self.store, reader, resolver) {
            Ok(stats) => {
                if stats.actors_dropped > 0 {
                    info!(
                        "Dropped {} of {} actors that no longer resolve",
                        stats.actors_dropped, stats.actors_read
                    );
                }
                true
            }
            Err(err) => {
                error!(
                    critical = true,
                    "Failed to load auto toggle regs from record ({}, {} bytes): {err}",
                    info.type_code,
                    info.length
                );
                false
            }
        }
    }

    /// Empties the store.
    pub fn revert(&self) {
        info!("Reverting...");
        self.store.clear();
    }
}
