//! Snapshot decoder: one pass over the game's race result structures.
//!
//! The game keeps per-car records (finishing order) behind a pointer table
//! with a fixed stride; the player or bot name lives at a fixed offset inside
//! each pointed-to record. Every step short-circuits the capture, so a
//! snapshot is only ever observed complete.

use chrono::Utc;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::memory::{MemoryLayout, ReadMemory, decode_windows_1251};
use crate::race::map::map_display_name;
use crate::race::{RaceSnapshot, RaceType};

/// Decode one [`RaceSnapshot`] from the target's memory.
///
/// Fails unless the game currently holds a finished online race: the race
/// type must be one of the two online codes and the roster non-empty.
pub fn capture_snapshot<R: ReadMemory>(reader: &R, layout: &MemoryLayout) -> Result<RaceSnapshot> {
    let race_code = reader.read_u32(layout.race_type_addr)?;
    let race_type = match RaceType::from_code(race_code) {
        Some(t) if t.is_online() => t,
        _ => return Err(Error::InvalidRaceType(race_code)),
    };

    let player_count = reader.read_u32(layout.player_count_addr)?;
    if player_count == 0 {
        return Err(Error::EmptyRoster);
    }

    // The count is untrusted bytes from a foreign process; never reserve
    // from it, a garbage value on a mismatched build would allocate
    // gigabytes before the first slot read gets a chance to fail.
    let mut roster = Vec::new();
    for slot in 0..u64::from(player_count) {
        roster.push(read_slot_name(reader, layout, slot)?);
    }

    let map_name = read_map_name(reader, layout)?;

    debug!(
        map = %map_name,
        players = player_count,
        race_type = %race_type,
        "captured race snapshot"
    );

    Ok(RaceSnapshot::new(Utc::now(), map_name, race_type, roster))
}

/// Read the name for roster slot `slot`.
///
/// The table entry holds the address of the slot's car record inside the
/// target process; the name buffer sits `name_ptr_offset` bytes into it.
fn read_slot_name<R: ReadMemory>(reader: &R, layout: &MemoryLayout, slot: u64) -> Result<String> {
    let record_ptr_addr = layout.slot_ptr_addr(slot);
    let record_addr = u64::from(reader.read_u32(record_ptr_addr)?);

    let name_addr = record_addr + layout.name_ptr_offset;
    let buf = reader.read_bytes(name_addr, layout.name_len)?;
    let name = decode_windows_1251(&buf)?;

    trace!(slot, name = %name, "decoded roster slot");
    Ok(name)
}

fn read_map_name<R: ReadMemory>(reader: &R, layout: &MemoryLayout) -> Result<String> {
    let buf = reader.read_bytes(layout.map_name_addr, layout.map_name_len)?;
    let slug = decode_windows_1251(&buf)?.to_lowercase();

    map_display_name(&slug)
        .map(str::to_string)
        .ok_or(Error::UnknownMapSlug(slug))
}
