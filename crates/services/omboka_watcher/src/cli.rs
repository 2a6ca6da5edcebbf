//! CLI argument definitions.

use clap::Parser;

/// Watch the Migrationsverket rebooking portal for appointment slots
/// earlier than your current reservation
#[derive(Parser, Debug)]
#[command(name = "omboka-watcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Booking code from the original reservation
    pub booking_code: String,

    /// E-mail address used for the original booking
    pub booking_email: String,

    /// Hours between checks (defaults to the configured interval)
    #[arg(short = 't', long)]
    pub interval: Option<f64>,

    /// How many months ahead to query the calendar
    #[arg(long)]
    pub months: Option<u32>,

    /// Run a single check and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_credentials() {
        let cli = Cli::try_parse_from(["omboka-watcher", "ABCD-1234", "a@b.com"]).unwrap();
        assert_eq!(cli.booking_code, "ABCD-1234");
        assert_eq!(cli.booking_email, "a@b.com");
        assert_eq!(cli.interval, None);
        assert!(!cli.once);
    }

    #[test]
    fn parses_interval_and_flags() {
        let cli = Cli::try_parse_from([
            "omboka-watcher",
            "ABCD-1234",
            "a@b.com",
            "-t",
            "0.5",
            "--months",
            "2",
            "--once",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.interval, Some(0.5));
        assert_eq!(cli.months, Some(2));
        assert!(cli.once);
        assert!(cli.debug);
    }

    #[test]
    fn missing_email_is_an_error() {
        assert!(Cli::try_parse_from(["omboka-watcher", "ABCD-1234"]).is_err());
    }
}
