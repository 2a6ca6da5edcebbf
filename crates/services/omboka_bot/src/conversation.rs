//! The bot's conversation flow: booking code, e-mail, check period.
//!
//! The dialogue verifies the booking before anything is scheduled, so a
//! mistyped code or e-mail is caught while the user is still around to fix
//! it. Only once the portal has confirmed the reservation does the chat get
//! a repeating watch job.

use std::sync::Arc;
use std::time::Duration;

use teloxide::dispatching::dialogue::{self, InMemStorage};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::warn;

use omboka_booking::Credentials;
use omboka_config::AppConfig;

use crate::jobs::{self, JobRegistry};

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    ReceiveCode,
    ReceiveEmail {
        code: String,
    },
    ReceiveInterval {
        code: String,
        email: String,
    },
}

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
enum Command {
    #[command(description = "set up a watch for earlier booking slots.")]
    Start,
    #[command(description = "stop the running watch.")]
    Stop,
    #[command(description = "display this text.")]
    Help,
}

type BotDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Stop].endpoint(stop))
        .branch(case![Command::Help].endpoint(help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(case![State::ReceiveCode].endpoint(receive_code))
        .branch(case![State::ReceiveEmail { code }].endpoint(receive_email))
        .branch(case![State::ReceiveInterval { code, email }].endpoint(receive_interval))
        .branch(dptree::endpoint(other_messages));

    dialogue::enter::<Update, InMemStorage<State>, State, _>().branch(message_handler)
}

async fn start(
    bot: Bot,
    dialogue: BotDialogue,
    registry: JobRegistry,
    msg: Message,
) -> HandlerResult {
    // A restart replaces whatever watch was running for this chat.
    if registry.cancel(msg.chat.id).await {
        bot.send_message(msg.chat.id, "Your previous watch has been cancelled.")
            .await?;
    }

    bot.send_message(
        msg.chat.id,
        "Hi! I can look for earlier booking times at Migrationsverket. \
         Note that you must already have a booked time!",
    )
    .await?;
    bot.send_message(msg.chat.id, "Please enter your current booking code:")
        .await?;
    dialogue.update(State::ReceiveCode).await?;
    Ok(())
}

async fn stop(
    bot: Bot,
    dialogue: BotDialogue,
    registry: JobRegistry,
    msg: Message,
) -> HandlerResult {
    if registry.cancel(msg.chat.id).await {
        bot.send_message(msg.chat.id, "Stopped watching for earlier slots.")
            .await?;
    } else {
        bot.send_message(msg.chat.id, "No watch is currently running.")
            .await?;
    }
    dialogue.exit().await?;
    Ok(())
}

async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

async fn receive_code(bot: Bot, dialogue: BotDialogue, msg: Message) -> HandlerResult {
    match msg.text() {
        Some(code) => {
            bot.send_message(msg.chat.id, "Please enter your booking e-mail:")
                .await?;
            dialogue
                .update(State::ReceiveEmail {
                    code: code.trim().to_string(),
                })
                .await?;
        }
        None => {
            bot.send_message(msg.chat.id, "Please send the booking code as plain text.")
                .await?;
        }
    }
    Ok(())
}

async fn receive_email(
    bot: Bot,
    dialogue: BotDialogue,
    code: String,
    config: Arc<AppConfig>,
    msg: Message,
) -> HandlerResult {
    let Some(email) = msg.text().map(str::trim) else {
        bot.send_message(msg.chat.id, "Please send the e-mail as plain text.")
            .await?;
        return Ok(());
    };

    // Look the booking up right away: this verifies the credentials while
    // the user is still in the conversation.
    match jobs::connect(&config, &Credentials::new(code.clone(), email)).await {
        Ok(session) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "This is your current booking:\n{}",
                    session.current_booking()
                ),
            )
            .await?;
            bot.send_message(msg.chat.id, "How often should I check (in hours)?")
                .await?;
            dialogue
                .update(State::ReceiveInterval {
                    code,
                    email: email.to_string(),
                })
                .await?;
        }
        Err(err) => {
            warn!(%err, "booking lookup failed");
            bot.send_message(msg.chat.id, format!("I could not look up that booking: {err}"))
                .await?;
            bot.send_message(msg.chat.id, "Please enter your current booking code:")
                .await?;
            dialogue.update(State::ReceiveCode).await?;
        }
    }
    Ok(())
}

async fn receive_interval(
    bot: Bot,
    dialogue: BotDialogue,
    (code, email): (String, String),
    registry: JobRegistry,
    config: Arc<AppConfig>,
    msg: Message,
) -> HandlerResult {
    // Bounded so Duration::from_secs_f64 cannot panic on absurd input.
    let hours = msg
        .text()
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|hours| *hours > 0.0 && *hours <= 8760.0);

    let Some(hours) = hours else {
        bot.send_message(msg.chat.id, "Invalid value!").await?;
        bot.send_message(msg.chat.id, "How often should I check (in hours)?")
            .await?;
        return Ok(());
    };

    bot.send_message(
        msg.chat.id,
        "I will let you know when an earlier booking becomes available!",
    )
    .await?;
    registry
        .spawn_watch(
            bot.clone(),
            msg.chat.id,
            config,
            Credentials::new(code, email),
            Duration::from_secs_f64(hours * 3600.0),
        )
        .await;
    dialogue.exit().await?;
    Ok(())
}

async fn other_messages(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Send /start to set up a watch, or /help for the command list.",
    )
    .await?;
    Ok(())
}
