// --- File: crates/omboka_booking/src/extract.rs ---
//! Confirmation-page extraction.
//!
//! The portal renders the user's reservation inside a `div.personInfoPanel`
//! holding four `tdData` text cells: date, time, place, booking code. This
//! module is the only place that knows those class names; when the portal
//! markup changes, this is the file to touch.

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::BookingError;
use crate::models::{parse_portal_timestamp, CurrentBooking};

/// Cells the panel must carry, in order: date, time, place, booking code.
const EXPECTED_CELLS: usize = 4;

/// Recover the user's current reservation from the confirmation page.
///
/// A missing panel or the wrong number of cells means the portal rendered a
/// different page than expected -- usually rejected credentials, sometimes a
/// markup change. Either way this fails with [`BookingError::Parse`] and
/// never returns partial data.
pub(crate) fn extract_current_booking(
    body: &str,
    email: &str,
) -> Result<CurrentBooking, BookingError> {
    let panel_sel = Selector::parse("div.personInfoPanel").unwrap();
    let cell_sel = Selector::parse(".tdData").unwrap();

    let document = Html::parse_document(body);

    let panel = document
        .select(&panel_sel)
        .next()
        .ok_or_else(|| BookingError::Parse("confirmation page has no personInfoPanel".into()))?;

    let cells: Vec<String> = panel
        .select(&cell_sel)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();
    if cells.len() != EXPECTED_CELLS {
        return Err(BookingError::Parse(format!(
            "expected {EXPECTED_CELLS} booking detail cells, found {}",
            cells.len()
        )));
    }

    // The time cell reads like "10:00 (Office X)"; only the leading clock
    // time belongs to the timestamp.
    let clock = cells[1].split(' ').next().unwrap_or_default();
    let stamp = format!("{}T{}", cells[0], clock);
    let date = parse_portal_timestamp(&stamp)
        .map_err(|err| BookingError::Parse(format!("bad booking timestamp '{stamp}': {err}")))?;

    debug!(%date, place = %cells[2], "extracted current booking");

    Ok(CurrentBooking {
        date,
        place: cells[2].clone(),
        code: cells[3].clone(),
        email: email.to_string(),
    })
}
