//! Per-chat watch jobs.
//!
//! Every chat that completes the conversation gets one background task that
//! re-checks the portal on its chosen period. Tasks are fully independent:
//! each tick opens a fresh session with its own cookie jar, so one user's
//! failure never disturbs another's schedule.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use omboka_booking::{
    BookingError, BookingSession, Credentials, QueryWindow, SessionBuilder, Slot,
};
use omboka_config::AppConfig;

/// Running watch tasks, one per chat. Registering a new watch for a chat
/// replaces the previous one.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<Mutex<HashMap<ChatId, JoinHandle<()>>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the watch for a chat, if any. Returns whether one was
    /// registered.
    pub async fn cancel(&self, chat_id: ChatId) -> bool {
        match self.jobs.lock().await.remove(&chat_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Start a repeating check for this chat, replacing any existing one.
    pub async fn spawn_watch(
        &self,
        bot: Bot,
        chat_id: ChatId,
        config: Arc<AppConfig>,
        credentials: Credentials,
        period: Duration,
    ) {
        // Hold the lock across spawn + insert so the task's own exit
        // cleanup cannot interleave with registration.
        let mut jobs = self.jobs.lock().await;
        if let Some(old) = jobs.remove(&chat_id) {
            old.abort();
        }
        info!(%chat_id, ?period, "starting watch");
        let handle = tokio::spawn(watch_loop(
            self.clone(),
            bot,
            chat_id,
            config,
            credentials,
            period,
        ));
        jobs.insert(chat_id, handle);
    }

    async fn forget(&self, chat_id: ChatId) {
        self.jobs.lock().await.remove(&chat_id);
    }
}

/// Open a fresh authenticated session using the configured portal settings.
pub async fn connect(
    config: &AppConfig,
    credentials: &Credentials,
) -> Result<BookingSession, BookingError> {
    let mut builder = SessionBuilder::new(credentials.clone())
        .timeout(Duration::from_secs(config.portal.timeout_secs));
    if let Some(url) = &config.portal.entry_url {
        builder = builder.entry_url(url);
    }
    builder.connect().await
}

async fn watch_loop(
    registry: JobRegistry,
    bot: Bot,
    chat_id: ChatId,
    config: Arc<AppConfig>,
    credentials: Credentials,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    loop {
        // The first tick completes immediately, so the user hears back
        // right after setting the watch up.
        ticker.tick().await;

        match check(&config, &credentials).await {
            Ok(earlier) if earlier.is_empty() => {
                info!(%chat_id, "no earlier slots");
            }
            Ok(earlier) => notify(&bot, chat_id, &earlier).await,
            Err(err @ BookingError::Parse(_)) => {
                // Rejected credentials will not fix themselves; tell the
                // user and stop this watch.
                let _ = bot
                    .send_message(
                        chat_id,
                        format!(
                            "I could no longer read your booking ({err}). Please /start again."
                        ),
                    )
                    .await;
                registry.forget(chat_id).await;
                return;
            }
            Err(err) => {
                error!(%chat_id, %err, "check failed, retrying next tick");
            }
        }
    }
}

async fn check(config: &AppConfig, credentials: &Credentials) -> Result<Vec<Slot>, BookingError> {
    let mut session = connect(config, credentials).await?;
    session
        .fetch_available_slots(QueryWindow::months_ahead(config.watcher.window_months))
        .await?;
    Ok(session.earlier_slots())
}

async fn notify(bot: &Bot, chat_id: ChatId, earlier: &[Slot]) {
    let mut text = String::from("Earlier slots are available!\n");
    for slot in earlier {
        text.push_str(&format!("  {slot}\n"));
    }
    if let Err(err) = bot.send_message(chat_id, text).await {
        error!(%chat_id, %err, "failed to deliver notification");
    }
}
