use crate::cli::{
    actions::{auth, resources, Action},
    commands::{ARG_API_URL, ARG_STORE, ARG_TIMEOUT},
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

/// Reads the global options.
///
/// # Errors
/// Returns an error if `--api-url` is missing.
pub fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url (or TRACKS_API_URL)")?;
    let store_path = matches
        .get_one::<String>(ARG_STORE)
        .map(PathBuf::from)
        .context("missing required argument: --store")?;
    let timeout_ms = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .copied()
        .context("missing required argument: --timeout")?;

    Ok(GlobalArgs::new(api_url, store_path, timeout_ms))
}

/// Maps the parsed subcommand to an [`Action`].
///
/// # Errors
/// Returns an error if the subcommand is unknown or an argument is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    let action = match name {
        "status" => Action::Status,
        "register" => Action::Auth(auth::Args::Register {
            email: string(sub, "email")?,
            username: string(sub, "username")?,
        }),
        "verify-registration" => Action::Auth(auth::Args::VerifyRegistration {
            code: string(sub, "code")?,
        }),
        "set-password" => Action::Auth(auth::Args::SetPassword {
            password: secret(sub, "password")?,
            confirm: secret(sub, "confirm")?,
        }),
        "login" => Action::Auth(auth::Args::Login {
            username: string(sub, "username")?,
            password: secret(sub, "password")?,
        }),
        "verify-login" => Action::Auth(auth::Args::VerifyLogin {
            code: string(sub, "code")?,
        }),
        "logout" => Action::Auth(auth::Args::Logout),
        "me" => Action::Resource(resources::Args::Me),
        "update-me" => Action::Resource(resources::Args::UpdateMe {
            username: sub.get_one::<String>("username").cloned(),
            bio: sub.get_one::<String>("bio").cloned(),
            avatar: sub.get_one::<PathBuf>("avatar").cloned(),
        }),
        "user" => Action::Resource(resources::Args::User {
            username: string(sub, "username")?,
        }),
        "tracks" => Action::Resource(resources::Args::Tracks {
            page: sub.get_one::<u32>("page").copied().unwrap_or(1),
            search: sub.get_one::<String>("search").cloned(),
            all: sub.get_flag("all"),
        }),
        "track" => Action::Resource(resources::Args::Track {
            id: id(sub, "id")?,
        }),
        "create-track" => Action::Resource(resources::Args::CreateTrack {
            subject: string(sub, "subject")?,
            description: string(sub, "description")?,
            categories: sub
                .get_many::<u64>("category")
                .map(|ids| ids.copied().collect())
                .unwrap_or_default(),
            images: paths(sub, "image"),
        }),
        "like" => Action::Resource(resources::Args::Like { id: id(sub, "id")? }),
        "categories" => Action::Resource(resources::Args::Categories),
        "answers" => Action::Resource(resources::Args::Answers {
            track_id: id(sub, "track-id")?,
            page: sub.get_one::<u32>("page").copied(),
        }),
        "answer" => Action::Resource(resources::Args::Answer {
            track_id: id(sub, "track-id")?,
            comment: string(sub, "comment")?,
            solution: sub.get_flag("solution"),
            images: paths(sub, "image"),
        }),
        "solve" => Action::Resource(resources::Args::Solve {
            answer_id: id(sub, "answer-id")?,
        }),
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(action)
}

fn string(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

fn secret(matches: &ArgMatches, name: &str) -> Result<SecretString> {
    string(matches, name).map(SecretString::from)
}

fn id(matches: &ArgMatches, name: &str) -> Result<u64> {
    matches
        .get_one::<u64>(name)
        .copied()
        .with_context(|| format!("missing required argument: <{name}>"))
}

fn paths(matches: &ArgMatches, name: &str) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>(name)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
