// --- File: crates/omboka_booking/src/lib.rs ---
// Declare modules within this crate
pub mod error;
mod extract;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod models;
#[cfg(test)]
mod models_test;
pub mod session;

pub use error::BookingError;
pub use models::{Credentials, CurrentBooking, QueryWindow, Slot, SlotStatus};
pub use session::{BookingSession, SessionBuilder, PORTAL_ENTRY_URL};
