mod battery;
mod error;
mod gui;
mod gui_modules;
mod logger;
mod render;
mod scene;

use battery::ChargeLevel;
use clap::Parser;
use error::AppError;
use gui::{BatteryMonitor, Flags};
use iced::{window, Application, Settings, Size};
use log::debug;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive 3D battery cell monitor", long_about = None)]
struct Args {
    /// Initial charge level in percent
    #[arg(short, long, default_value_t = ChargeLevel::default().percent(),
          value_parser = clap::value_parser!(u8).range(0..=100))]
    charge: u8,

    /// Start in fullscreen mode
    #[arg(short, long)]
    fullscreen: bool,

    /// Log specification, e.g. `info` or `battery_monitor_rs=debug`
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also write log files into this directory
    #[arg(long, value_parser = clap::value_parser!(PathBuf))]
    log_dir: Option<PathBuf>,

    #[arg(long, default_value_t = 960.0)]
    width: f32,

    #[arg(long, default_value_t = 1000.0)]
    height: f32,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let _logger = logger::start_logger(&args.log_level, args.log_dir.as_deref())?;
    debug!("args: {args:?}");

    let flags = Flags {
        initial_charge: ChargeLevel::from_percent(args.charge),
        fullscreen: args.fullscreen,
    };

    BatteryMonitor::run(Settings {
        window: window::Settings {
            size: Size::new(args.width, args.height),
            ..window::Settings::default()
        },
        antialiasing: true,
        ..Settings::with_flags(flags)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["battery-monitor-rs"]).unwrap();
        assert_eq!(args.charge, 67);
        assert!(!args.fullscreen);
        assert_eq!(args.log_level, "info");
        assert!(args.log_dir.is_none());
    }

    #[test]
    fn test_args_reject_out_of_range_charge() {
        assert!(Args::try_parse_from(["battery-monitor-rs", "--charge", "101"]).is_err());
        let args = Args::try_parse_from(["battery-monitor-rs", "-c", "100"]).unwrap();
        assert_eq!(args.charge, 100);
    }

    #[test]
    fn test_clap_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
