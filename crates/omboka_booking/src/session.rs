// --- File: crates/omboka_booking/src/session.rs ---
//! The booking session engine.
//!
//! [`SessionBuilder`] runs the portal's handshake -- bootstrap, then
//! authentication -- and yields an immutable [`BookingSession`] only when
//! the whole sequence succeeded. Slot queries are methods on the session;
//! there is no way to reach them on a half-constructed one.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::error::BookingError;
use crate::extract::extract_current_booking;
use crate::logic::{earlier_slots, parse_calendar_body};
use crate::models::{Credentials, CurrentBooking, QueryWindow, Slot};

/// Entry page of the portal's reschedule flow.
pub const PORTAL_ENTRY_URL: &str = "https://www.migrationsverket.se/ansokanbokning/omboka";

/// Suffix appended to the session URL for the login form post.
const FORM_SUFFIX: &str = "-1.-form=";
/// Suffix appended to the session URL for the calendar feed.
const CALENDAR_SUFFIX: &str = "-1.1-kalender-kalender";

// Widget identifiers baked into the portal's login form. Opaque constants;
// they must match the server's rendered form exactly.
const FIELD_BOOKING_CODE: &str = "bokningsnummer.border:bokningsnummer.border_body:bokningsnummer";
const FIELD_EMAIL: &str = "epost.border:epost.border_body:epost";
const FIELD_CONTINUE: &str = "fortsatt";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configures and runs the bootstrap + authentication handshake.
#[derive(Debug)]
pub struct SessionBuilder {
    credentials: Credentials,
    entry_url: String,
    timeout: Duration,
}

impl SessionBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            entry_url: PORTAL_ENTRY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the engine at a different entry URL (staging, a mock portal in
    /// tests).
    pub fn entry_url(mut self, url: impl Into<String>) -> Self {
        self.entry_url = url.into();
        self
    }

    /// Transport-level timeout for every portal request. Expiry surfaces as
    /// [`BookingError::Transport`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the handshake: acquire the tracking cookie and session-scoped
    /// URL, authenticate, and read back the current reservation.
    ///
    /// Any failure aborts construction; no retry happens at this layer --
    /// retry belongs to the caller's scheduling policy.
    pub async fn connect(self) -> Result<BookingSession, BookingError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .build()?;

        // The entry page redirects to a session-scoped URL, dropping the
        // tracking cookie into the jar on the way. The post-redirect URL is
        // the base every later request hangs off.
        let response = http
            .get(&self.entry_url)
            .send()
            .await?
            .error_for_status()?;
        let base_url = response.url().to_string();
        debug!(%base_url, "acquired portal session");

        // Login is a plain form post; the portal answers with a redirect to
        // the confirmation page, which becomes the new base URL.
        let form = [
            (FIELD_BOOKING_CODE, self.credentials.code.as_str()),
            (FIELD_EMAIL, self.credentials.email.as_str()),
            (FIELD_CONTINUE, "Next"),
        ];
        let response = http
            .post(format!("{base_url}{FORM_SUFFIX}"))
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        let base_url = response.url().to_string();
        let body = response.text().await?;

        let current_booking = extract_current_booking(&body, &self.credentials.email)?;
        info!(
            code = %current_booking.code,
            date = %current_booking.date,
            "authenticated against booking portal"
        );

        Ok(BookingSession {
            http,
            base_url,
            current_booking,
            cached_slots: Vec::new(),
        })
    }
}

/// An authenticated portal session.
///
/// Owns the cookie-carrying HTTP client, the session-scoped base URL and
/// the reservation recovered during login. The existence of a value implies
/// authentication succeeded; the base URL and booking never change
/// afterwards. One session per logical check -- nothing is persisted.
#[derive(Debug)]
pub struct BookingSession {
    http: Client,
    base_url: String,
    current_booking: CurrentBooking,
    cached_slots: Vec<Slot>,
}

impl BookingSession {
    /// The reservation the user currently holds.
    pub fn current_booking(&self) -> &CurrentBooking {
        &self.current_booking
    }

    /// Slots from the most recent [`Self::fetch_available_slots`] call.
    /// A last-fetch cache, not a source of truth.
    pub fn cached_slots(&self) -> &[Slot] {
        &self.cached_slots
    }

    /// Query the portal's calendar feed for the given window.
    ///
    /// Returns every slot the portal transmitted, in portal order and
    /// regardless of status, and replaces the cache. May be called
    /// repeatedly on one session.
    pub async fn fetch_available_slots(
        &mut self,
        window: QueryWindow,
    ) -> Result<Vec<Slot>, BookingError> {
        let form = [
            ("start", window.start.format("%Y-%m-%dT%H:%M:%S").to_string()),
            ("end", window.end.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ];
        let response = self
            .http
            .post(format!("{}{CALENDAR_SUFFIX}", self.base_url))
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let slots = parse_calendar_body(&body)?;
        debug!(
            count = slots.len(),
            from = %window.start,
            to = %window.end,
            "fetched calendar slots"
        );
        self.cached_slots = slots.clone();
        Ok(slots)
    }

    /// Free slots strictly earlier than the current reservation, from the
    /// last fetch. Never touches the network; an unfetched session yields
    /// an empty list.
    pub fn earlier_slots(&self) -> Vec<Slot> {
        earlier_slots(&self.cached_slots, &self.current_booking)
    }
}
