//! Config commands

use crate::output::OutputFormat;
use crate::ConfigCommands;
use customfit_booking::BookingConfig;

pub fn handle(
    action: ConfigCommands,
    settings: &BookingConfig,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    match action {
        ConfigCommands::Init => {
            let path = crate::config::init(&BookingConfig::default())?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Show => format.print_value(settings),
    }
    Ok(true)
}
