//! Fixed-interval check loop.
//!
//! Each tick constructs a fresh portal session, queries the calendar and
//! prints any slots earlier than the current reservation. A failing tick is
//! logged and the loop keeps going: the portal being briefly down is a
//! normal condition for this tool, and the next tick is the retry.

use std::time::Duration;

use tracing::{error, info};

use omboka_booking::{BookingError, Credentials, QueryWindow, SessionBuilder};
use omboka_config::AppConfig;

use crate::cli::Cli;

pub async fn run(cli: Cli, config: AppConfig, interval_hours: f64) {
    let period = Duration::from_secs_f64(interval_hours * 3600.0);
    let mut ticker = tokio::time::interval(period);

    info!(
        interval_hours,
        once = cli.once,
        "watching for earlier booking slots"
    );

    loop {
        // The first tick completes immediately, so one check runs right away.
        ticker.tick().await;

        match check_once(&cli, &config).await {
            Ok(0) => info!("no earlier slots available"),
            Ok(count) => info!(count, "earlier slots found"),
            Err(err) => error!(%err, "check failed"),
        }

        if cli.once {
            break;
        }
    }
}

async fn check_once(cli: &Cli, config: &AppConfig) -> Result<usize, BookingError> {
    let credentials = Credentials::new(cli.booking_code.clone(), cli.booking_email.clone());

    let mut builder = SessionBuilder::new(credentials)
        .timeout(Duration::from_secs(config.portal.timeout_secs));
    if let Some(url) = &config.portal.entry_url {
        builder = builder.entry_url(url);
    }
    let mut session = builder.connect().await?;

    println!("Current booking: {}", session.current_booking());

    let months = cli.months.unwrap_or(config.watcher.window_months);
    session
        .fetch_available_slots(QueryWindow::months_ahead(months))
        .await?;

    let earlier = session.earlier_slots();
    if earlier.is_empty() {
        println!("No earlier slots right now.");
    } else {
        println!("Earlier slots:");
        for slot in &earlier {
            println!("  {slot}");
        }
    }

    Ok(earlier.len())
}
