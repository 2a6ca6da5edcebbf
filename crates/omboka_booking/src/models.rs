// --- File: crates/omboka_booking/src/models.rs ---
use chrono::{Local, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login data for the rebooking portal, supplied once at construction.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub code: String,
    pub email: String,
}

impl Credentials {
    pub fn new(code: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            email: email.into(),
        }
    }
}

/// The reservation the user currently holds, as recovered from the
/// portal's confirmation page during authentication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentBooking {
    /// Booked date and time, zoneless in the portal's local convention.
    pub date: NaiveDateTime,
    pub place: String,
    pub code: String,
    pub email: String,
}

impl fmt::Display for CurrentBooking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} on {} ({})",
            self.code,
            self.place,
            self.date.format("%Y-%m-%d %H:%M"),
            self.email
        )
    }
}

/// Classification the portal assigns to a calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Free,
    Booked,
    Unavailable,
}

impl SlotStatus {
    /// The portal labels entries through CSS class names; the first one
    /// carries the status. Unknown labels are treated as unavailable so the
    /// free-slot filter stays sound if the portal adds new ones.
    pub fn from_label(label: &str) -> Self {
        match label {
            "ledig" => SlotStatus::Free,
            "bokad" | "upptagen" => SlotStatus::Booked,
            _ => SlotStatus::Unavailable,
        }
    }
}

/// One calendar entry offered by the portal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub id: String,
    /// Slot start, zoneless in the portal's local convention.
    pub start: NaiveDateTime,
    pub status: SlotStatus,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {})", self.start.format("%Y-%m-%d %H:%M"), self.id)
    }
}

/// Calendar entry as transmitted by the portal.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSlot {
    pub id: String,
    pub start: String,
    #[serde(rename = "className", default)]
    pub class_name: Vec<String>,
}

/// Date range for a calendar query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QueryWindow {
    /// Window starting now and spanning `months` ahead.
    ///
    /// "Now" is local wall-clock time, zoneless, to line up with the
    /// portal's own timestamp convention.
    pub fn months_ahead(months: u32) -> Self {
        let start = Local::now().naive_local();
        let end = start
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }
}

impl Default for QueryWindow {
    fn default() -> Self {
        Self::months_ahead(4)
    }
}

/// Parse a timestamp the way the portal writes them: ISO-8601, no zone,
/// sometimes without seconds ("2024-05-01T09:00").
///
/// The value is taken as-is. Attaching or shifting a zone here would corrupt
/// comparisons between the confirmation page and the calendar feed, which
/// share the portal's local convention.
pub(crate) fn parse_portal_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
}
