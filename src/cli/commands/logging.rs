use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a numeric level (0-5) or a level name.
fn parse_log_level(level: &str) -> Result<u8, String> {
    if let Ok(parsed) = level.parse::<u8>() {
        if parsed <= 5 {
            return Ok(parsed);
        }
    }

    let lowered = level.trim().to_lowercase();
    LEVEL_NAMES
        .iter()
        .zip(0u8..)
        .find_map(|(name, index)| (*name == lowered).then_some(index))
        .ok_or_else(|| format!("invalid log level: {level}"))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::new(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("TRACKS_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_and_numbers() {
        assert_eq!(parse_log_level("error"), Ok(0));
        assert_eq!(parse_log_level("INFO"), Ok(2));
        assert_eq!(parse_log_level("trace"), Ok(4));
        assert_eq!(parse_log_level("3"), Ok(3));
        assert!(parse_log_level("9").is_err());
        assert!(parse_log_level("loud").is_err());
    }
}
