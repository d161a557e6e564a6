pub mod auth;
pub mod logging;
pub mod resources;

use crate::config::DEFAULT_STORE_PATH;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STORE: &str = "store";
pub const ARG_TIMEOUT: &str = "timeout";

const TIMEOUT_DEFAULT: &str = "10000";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("tracks")
        .about("Command line client for the tracks community Q&A API")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("API base URL, example: https://tracks.example.com/api")
                .env("TRACKS_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STORE)
                .long("store")
                .help("Path of the credential store file")
                .env("TRACKS_STORE")
                .global(true)
                .default_value(DEFAULT_STORE_PATH),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in milliseconds")
                .env("TRACKS_TIMEOUT_MS")
                .global(true)
                .default_value(TIMEOUT_DEFAULT)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .subcommand(Command::new("status").about("Show the stored session state"));

    let command = auth::with_subcommands(command);
    let command = resources::with_subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMEOUT_MS;

    const API_URL: &str = "https://tracks.example.com/api";

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "tracks");
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
        command.debug_assert();
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("TRACKS_API_URL", None::<&str>),
                ("TRACKS_STORE", None),
                ("TRACKS_TIMEOUT_MS", None),
                ("TRACKS_LOG_LEVEL", None),
            ],
            || {
                let matches = new().get_matches_from(["tracks", "--api-url", API_URL, "status"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).map(String::as_str),
                    Some(API_URL)
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_STORE).map(String::as_str),
                    Some(DEFAULT_STORE_PATH)
                );
                assert_eq!(
                    matches.get_one::<u64>(ARG_TIMEOUT).copied(),
                    Some(DEFAULT_TIMEOUT_MS)
                );
                assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(0));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("TRACKS_API_URL", Some(API_URL)),
                ("TRACKS_STORE", Some("/tmp/tracks.json")),
                ("TRACKS_TIMEOUT_MS", Some("2500")),
                ("TRACKS_LOG_LEVEL", Some("debug")),
            ],
            || {
                let matches = new().get_matches_from(["tracks", "categories"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).map(String::as_str),
                    Some(API_URL)
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_STORE).map(String::as_str),
                    Some("/tmp/tracks.json")
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(2500));
                assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(3));
                assert_eq!(matches.subcommand_name(), Some("categories"));
            },
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        temp_env::with_vars([("TRACKS_API_URL", None::<&str>)], || {
            let matches =
                new().get_matches_from(["tracks", "me", "--api-url", API_URL, "-vv"]);
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).map(String::as_str),
                Some(API_URL)
            );
            assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(2));
        });
    }

    #[test]
    fn test_zero_timeout_rejected() {
        temp_env::with_vars([("TRACKS_TIMEOUT_MS", None::<&str>)], || {
            let result = new().try_get_matches_from([
                "tracks",
                "--api-url",
                API_URL,
                "--timeout",
                "0",
                "status",
            ]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5u8 {
            temp_env::with_vars([("TRACKS_LOG_LEVEL", None::<&str>)], || {
                let mut args = vec![
                    "tracks".to_string(),
                    "--api-url".to_string(),
                    API_URL.to_string(),
                    "status".to_string(),
                ];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index as usize)));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index)
                );
            });
        }
    }
}
