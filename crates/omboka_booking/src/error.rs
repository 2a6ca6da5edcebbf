// --- File: crates/omboka_booking/src/error.rs ---
use thiserror::Error;

/// Errors produced while talking to the rebooking portal.
///
/// From the caller's perspective everything here is recoverable by retrying
/// on the next scheduled check, except `Parse`: that one usually means the
/// credentials were rejected (the portal rendered a different page) or the
/// portal markup changed, and is worth surfacing to the user instead of
/// retrying blindly.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Network failure, timeout, or a non-success HTTP status on any request.
    /// Never retried internally; retry belongs to the scheduling layer.
    #[error("portal request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The confirmation page did not carry the expected booking details.
    #[error("could not extract booking details from the portal response: {0}")]
    Parse(String),

    /// The calendar endpoint answered with the portal's own technical-error
    /// page. The upstream server is at fault; try again later.
    #[error("the portal reported an internal technical error")]
    PortalInternal,

    /// The calendar endpoint answered with something that is neither a slot
    /// list nor the known error page. The wire contract changed.
    #[error("unexpected calendar response from the portal: {0}")]
    UnexpectedFormat(String),
}
