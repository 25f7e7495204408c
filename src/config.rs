use std::path::PathBuf;

use clap::Parser;

use crate::date_key::DateKey;

#[derive(Debug, Parser)]
#[command(name = "calendar-todo", version, about = "Calendar-based todo list for the terminal")]
pub struct Config {
    /// Use this date as today instead of the system clock (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub today: Option<DateKey>,

    /// Write diagnostic logs to this file; logging is off without it
    #[arg(long, value_name = "PATH", env = "CALENDAR_TODO_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn today(&self) -> DateKey {
        self.today.unwrap_or_else(DateKey::today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["calendar-todo"]).unwrap();
        assert!(config.today.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_today_override() {
        let config = Config::try_parse_from(["calendar-todo", "--today", "2024-06-15"]).unwrap();
        assert_eq!(config.today().to_string(), "2024-06-15");
    }

    #[test]
    fn test_bad_today_is_rejected() {
        assert!(Config::try_parse_from(["calendar-todo", "--today", "15/06/2024"]).is_err());
    }
}
