use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

pub fn with_subcommands(command: Command) -> Command {
    let command = with_profile(command);
    let command = with_tracks(command);
    with_answers(command)
}

fn image_arg(help: &'static str) -> Arg {
    Arg::new("image")
        .long("image")
        .help(help)
        .action(ArgAction::Append)
        .value_parser(value_parser!(PathBuf))
}

fn page_arg() -> Arg {
    Arg::new("page")
        .long("page")
        .help("Page number, starting at 1")
        .value_parser(value_parser!(u32).range(1..))
}

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(value_parser!(u64))
}

fn with_profile(command: Command) -> Command {
    command
        .subcommand(Command::new("me").about("Show the signed-in user's profile"))
        .subcommand(
            Command::new("update-me")
                .about("Update username, bio or avatar")
                .arg(Arg::new("username").long("username").help("New username"))
                .arg(Arg::new("bio").long("bio").help("New bio"))
                .arg(
                    Arg::new("avatar")
                        .long("avatar")
                        .help("Path of the new avatar image")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("user")
                .about("Show another user's public profile")
                .arg(Arg::new("username").help("Username").required(true)),
        )
}

fn with_tracks(command: Command) -> Command {
    command
        .subcommand(
            Command::new("tracks")
                .about("List tracks")
                .arg(page_arg().conflicts_with("all"))
                .arg(Arg::new("search").long("search").help("Search query"))
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Follow pagination until every track is loaded")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("track")
                .about("Show one track")
                .arg(id_arg("id", "Track id")),
        )
        .subcommand(
            Command::new("create-track")
                .about("Publish a new track")
                .arg(
                    Arg::new("subject")
                        .long("subject")
                        .help("Subject line")
                        .required(true),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .help("Description")
                        .required(true),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Category id, repeat for several categories")
                        .action(ArgAction::Append)
                        .required(true)
                        .value_parser(value_parser!(u64)),
                )
                .arg(image_arg("Image to attach, repeat for several images")),
        )
        .subcommand(
            Command::new("like")
                .about("Like or unlike a track")
                .arg(id_arg("id", "Track id")),
        )
        .subcommand(Command::new("categories").about("List track categories"))
}

fn with_answers(command: Command) -> Command {
    command
        .subcommand(
            Command::new("answers")
                .about("List the answers of a track")
                .arg(id_arg("track-id", "Track id"))
                .arg(page_arg()),
        )
        .subcommand(
            Command::new("answer")
                .about("Post an answer to a track")
                .arg(id_arg("track-id", "Track id"))
                .arg(
                    Arg::new("comment")
                        .long("comment")
                        .help("Answer text")
                        .required(true),
                )
                .arg(
                    Arg::new("solution")
                        .long("solution")
                        .help("Post the answer as the solution")
                        .action(ArgAction::SetTrue),
                )
                .arg(image_arg("Image to attach, repeat for several images")),
        )
        .subcommand(
            Command::new("solve")
                .about("Mark an answer as the solution")
                .arg(id_arg("answer-id", "Answer id")),
        )
}
