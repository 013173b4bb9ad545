//! CustomFit CLI
//!
//! Drives the booking form controller against an in-memory page, so the
//! client-side checks and the booking endpoint can be exercised without a
//! browser.
//!
//! # Usage
//!
//! ```bash
//! customfit validate --date 2026-11-02 --time 10:30 --chest 38 --waist 32 --hips 40 --length 30
//! customfit --base-url https://customfit.example submit --date 2026-11-02 --time 10:30 \
//!     --chest 38 --waist 32 --hips 40 --length 30 \
//!     --field name="Ada Lovelace" --field email=ada@example.com --field tailor_id=1
//! customfit config init
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "customfit")]
#[command(version)]
#[command(about = "CustomFit booking command line", long_about = None)]
struct Cli {
    /// Site origin the booking endpoint is resolved against
    #[arg(long, env = "CUSTOMFIT_BASE_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Controller settings file (JSON)
    #[arg(long, short, env = "CUSTOMFIT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the client-side checks only
    Validate(BookingArgs),
    /// Validate, then post the booking
    Submit(BookingArgs),
    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write default settings to ~/.customfit/config.json
    Init,
    /// Print the settings in effect
    Show,
}

/// Booking form fields
#[derive(Args, Debug, Clone)]
pub struct BookingArgs {
    /// Appointment date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,
    /// Appointment time (HH:MM)
    #[arg(long)]
    pub time: String,
    #[arg(long)]
    pub chest: String,
    #[arg(long)]
    pub waist: String,
    #[arg(long)]
    pub hips: String,
    #[arg(long)]
    pub length: String,
    /// Extra form field, repeatable (name=value)
    #[arg(long = "field", value_parser = parse_key_val)]
    pub fields: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{}`", s))?;
    if key.is_empty() {
        return Err(format!("empty field name in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("customfit v{}", env!("CARGO_PKG_VERSION"));

    let accepted = match cli.command {
        Commands::Validate(args) => commands::validate::handle(&args, &settings, cli.format)?,
        Commands::Submit(args) => {
            // timers are spawned with spawn_local
            let local = tokio::task::LocalSet::new();
            local
                .run_until(commands::submit::handle(&args, &settings, &cli.base_url, cli.format))
                .await?
        }
        Commands::Config { action } => commands::config::handle(action, &settings, cli.format)?,
    };

    if !accepted {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("name=Ada Lovelace"),
            Ok(("name".to_string(), "Ada Lovelace".to_string()))
        );
        assert_eq!(parse_key_val("notes="), Ok(("notes".to_string(), String::new())));
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_cli_parses_submit() {
        let cli = Cli::try_parse_from([
            "customfit", "submit", "--date", "2026-11-02", "--time", "10:30", "--chest", "38",
            "--waist", "32", "--hips", "40", "--length", "30", "--field", "tailor_id=1",
        ])
        .unwrap();
        match cli.command {
            Commands::Submit(args) => {
                assert_eq!(args.fields, vec![("tailor_id".to_string(), "1".to_string())]);
                assert_eq!(args.time, "10:30");
            }
            _ => panic!("expected submit"),
        }
    }
}
