//! # Toggle Record Codec
//!
//! Writes and reads the body of the auto-toggle record.
//!
//! Both directions hold the store lock for the whole body so the record is a
//! single consistent snapshot. Absent perspective states are written as
//! [`ABSENT_STATE`] and decoded straight back into `None`.
//!
//! The body has no per-actor length prefix. When an actor fails to resolve,
//! its slot entries are still read and thrown away; skipping them would
//! misalign every actor after it.

use bytemuck::Pod;
use equip_toggle_core::{ActorId, AutoToggleMap, BipedSlot, SlotState, ToggleState};
use std::fmt;
use tracing::{error, info};

use crate::error::{CodecError, CodecResult, StreamError};
use crate::record::{RecordReader, RecordWriter};
use crate::resolver::ActorIdResolver;

/// Wire value for "no state recorded".
pub const ABSENT_STATE: i32 = -1;

/// Counters from one load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Actor entries declared by the record.
    pub actors_read: usize,
    /// Actor entries dropped because they did not resolve.
    pub actors_dropped: usize,
    /// Slot entries consumed, including those of dropped actors.
    pub slots_read: usize,
}

/// Serializes the whole store into the open record.
///
/// Stops at the first failed write. Whatever was already written stays in
/// the record.
///
/// # Errors
///
/// Returns the first stream error.
pub fn save_toggles<W: RecordWriter>(store: &AutoToggleMap, writer: &mut W) -> CodecResult<()> {
    let map = store.lock();

    let num_actors = map.len() as u64;
    checked_write(writer, &num_actors, format_args!("number of actors ({num_actors})"))?;

    for (actor, slots) in map.iter() {
        checked_write(writer, actor, format_args!("actor id ({actor})"))?;

        let num_slots = slots.len() as u64;
        checked_write(
            writer,
            &num_slots,
            format_args!("number of toggles ({num_slots}) for {actor}"),
        )?;

        for (slot, state) in slots {
            checked_write(writer, &slot.raw(), format_args!("slot ({slot}) for {actor}"))?;

            let first_person = encode_state(state.first_person);
            checked_write(
                writer,
                &first_person,
                format_args!("first person toggle state ({first_person}) for {actor}"),
            )?;

            let third_person = encode_state(state.third_person);
            checked_write(
                writer,
                &third_person,
                format_args!("third person toggle state ({third_person}) for {actor}"),
            )?;
        }
    }

    Ok(())
}

/// Replaces the store contents with the current record.
///
/// The store is cleared only after the actor count has been read. Stored
/// actors are passed through `resolver`; unresolved ones are logged and
/// dropped. A slot listed twice for one actor keeps its last value.
///
/// # Errors
///
/// Fails on a truncated record or an unknown slot/state value. The store
/// then holds whatever was decoded before the failure.
pub fn load_toggles<R, V>(store: &AutoToggleMap, reader: &mut R, resolver: &V) -> CodecResult<LoadStats>
where
    R: RecordReader,
    V: ActorIdResolver + ?Sized,
{
    let num_actors = read_count(reader)?;

    let mut map = store.lock();
    map.clear();

    let mut stats = LoadStats {
        actors_read: num_actors,
        ..LoadStats::default()
    };

    for _ in 0..num_actors {
        let stored: ActorId = reader.read_record_data()?;
        let resolved = resolver.resolve(stored);
        if resolved.is_none() {
            error!("Failed to resolve actor id {stored}");
            stats.actors_dropped += 1;
        }

        let num_slots = read_count(reader)?;
        for _ in 0..num_slots {
            let slot = BipedSlot::from_raw(reader.read_record_data::<u32>()?)?;
            let first_person = decode_state(reader.read_record_data::<i32>()?)?;
            let third_person = decode_state(reader.read_record_data::<i32>()?)?;
            stats.slots_read += 1;

            if let Some(actor) = resolved {
                map.entry(actor)
                    .or_default()
                    .insert(slot, ToggleState::new(first_person, third_person));
            }
        }
    }

    info!("Loaded {} entries", map.len());

    Ok(stats)
}

fn checked_write<W: RecordWriter, T: Pod>(
    writer: &mut W,
    value: &T,
    what: fmt::Arguments<'_>,
) -> CodecResult<()> {
    writer.write_record_data(value).map_err(|err| {
        error!("Failed to save {what}: {err}");
        CodecError::from(err)
    })
}

fn read_count<R: RecordReader>(reader: &mut R) -> CodecResult<usize> {
    let count: u64 = reader.read_record_data()?;
    usize::try_from(count).map_err(|_| StreamError::Corrupt("entry count exceeds address space").into())
}

fn encode_state(state: Option<SlotState>) -> i32 {
    state.map_or(ABSENT_STATE, SlotState::raw)
}

fn decode_state(raw: i32) -> CodecResult<Option<SlotState>> {
    if raw == ABSENT_STATE {
        Ok(None)
    } else {
        Ok(Some(SlotState::from_raw(raw)?))
    }
}
