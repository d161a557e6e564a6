use clap::{Arg, Command};

pub fn with_subcommands(command: Command) -> Command {
    let command = with_registration(command);
    with_login(command)
}

fn code_arg() -> Arg {
    Arg::new("code")
        .long("code")
        .help("Six digit verification code")
        .required(true)
}

fn with_registration(command: Command) -> Command {
    command
        .subcommand(
            Command::new("register")
                .about("Start a registration, a code is sent to the email address")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Email address")
                        .required(true),
                )
                .arg(
                    Arg::new("username")
                        .long("username")
                        .help("Username")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("verify-registration")
                .about("Confirm the registration code")
                .arg(code_arg()),
        )
        .subcommand(
            Command::new("set-password")
                .about("Choose a password and finish the registration")
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("New password")
                        .env("TRACKS_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                )
                .arg(
                    Arg::new("confirm")
                        .long("confirm")
                        .help("Repeat the new password")
                        .env("TRACKS_PASSWORD_CONFIRM")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
}

fn with_login(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Start a sign-in, a code is sent by email")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .help("Username")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Password")
                        .env("TRACKS_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("verify-login")
                .about("Confirm the sign-in code and store the session")
                .arg(code_arg()),
        )
        .subcommand(Command::new("logout").about("Remove every stored credential"))
}
