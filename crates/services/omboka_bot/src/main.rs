// File: services/omboka_bot/src/main.rs
mod conversation;
mod jobs;

use std::sync::Arc;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;

use conversation::{schema, State};
use jobs::JobRegistry;
use omboka_common::logging;

#[tokio::main]
async fn main() {
    logging::init();

    // Loads .env as a side effect, so TELOXIDE_TOKEN can live there too.
    let config = Arc::new(omboka_config::load_config().expect("Failed to load config"));

    let bot = Bot::from_env();
    tracing::info!("starting omboka bot");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![
            InMemStorage::<State>::new(),
            JobRegistry::new(),
            config
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
