// --- File: crates/omboka_booking/src/logic.rs ---
//! Calendar-body parsing and the earlier-slot filter.
//!
//! Pure functions over already-fetched data; no I/O happens here.

use tracing::warn;

use crate::error::BookingError;
use crate::models::{parse_portal_timestamp, CurrentBooking, RawSlot, Slot, SlotStatus};

/// Marker the portal embeds in the HTML error page its backend serves when
/// it falls over.
const TECHNICAL_ERROR_MARKER: &str = "A technical error has unfortunately occurred";

/// Parse the calendar endpoint's response body into slots, portal order
/// preserved.
///
/// An unparseable body is never an empty result: the portal's own
/// technical-error page maps to [`BookingError::PortalInternal`] (worth
/// retrying later), anything else to [`BookingError::UnexpectedFormat`]
/// (the wire contract changed). Callers can therefore trust that an empty
/// list means "queried successfully, zero slots".
pub fn parse_calendar_body(body: &str) -> Result<Vec<Slot>, BookingError> {
    let raw: Vec<RawSlot> = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(err) => {
            if body.contains(TECHNICAL_ERROR_MARKER) {
                warn!("portal reported a technical error on the calendar endpoint");
                return Err(BookingError::PortalInternal);
            }
            return Err(BookingError::UnexpectedFormat(format!(
                "calendar body is not a slot list: {err}"
            )));
        }
    };

    raw.into_iter().map(slot_from_raw).collect()
}

fn slot_from_raw(raw: RawSlot) -> Result<Slot, BookingError> {
    let start = parse_portal_timestamp(&raw.start).map_err(|err| {
        BookingError::UnexpectedFormat(format!(
            "slot {} has unparseable start '{}': {err}",
            raw.id, raw.start
        ))
    })?;
    let status = raw
        .class_name
        .first()
        .map(|label| SlotStatus::from_label(label))
        .unwrap_or(SlotStatus::Unavailable);

    Ok(Slot {
        id: raw.id,
        start,
        status,
    })
}

/// Free slots strictly before the current reservation, in portal order.
pub fn earlier_slots(slots: &[Slot], booking: &CurrentBooking) -> Vec<Slot> {
    slots
        .iter()
        .filter(|slot| slot.status == SlotStatus::Free && slot.start < booking.date)
        .cloned()
        .collect()
}
