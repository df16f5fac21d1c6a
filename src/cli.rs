use clap::Parser;
use std::path::PathBuf;

use crate::core::SunlightTime;

// Build version with timezone info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Zone:   Europe/Stockholm (fixed)\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Sunlight time picker
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Initial sunlight time: epoch ms, RFC 3339, or YYYY-MM-DDTHH:MM in Stockholm time
    #[arg(short = 't', long = "time", value_name = "TIME", value_parser = parse_time)]
    pub time: Option<SunlightTime>,

    /// Start with the sunlight panel expanded
    #[arg(short = 'e', long = "expanded")]
    pub expanded: bool,

    /// Start the sun animation on launch
    #[arg(short = 'a', long = "animate")]
    pub animate: bool,

    /// Enable logging to file (default: sunslider.log in the data directory)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// Log level for the given `-v` count
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn parse_time(s: &str) -> Result<SunlightTime, String> {
    SunlightTime::parse(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sunslider"]).unwrap();
        assert!(args.time.is_none());
        assert!(!args.expanded && !args.animate);
        assert!(args.log_file.is_none());
        assert_eq!(args.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_time_and_flags() {
        let args =
            Args::try_parse_from(["sunslider", "--time", "2024-06-15T10:30", "-e", "-a", "-vv"])
                .unwrap();
        assert_eq!(args.time, Some(SunlightTime::from_millis(1_718_440_200_000)));
        assert!(args.expanded && args.animate);
        assert_eq!(args.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_bare_log_flag() {
        let args = Args::try_parse_from(["sunslider", "--log"]).unwrap();
        assert_eq!(args.log_file, Some(None));
    }

    #[test]
    fn test_bad_time_rejected() {
        assert!(Args::try_parse_from(["sunslider", "--time", "noon"]).is_err());
    }
}
