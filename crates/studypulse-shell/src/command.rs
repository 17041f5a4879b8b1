//! REPL command parsing.

use studypulse_application::{ProfileEdit, RegistrationForm};
use thiserror::Error;

/// Command words offered for completion.
pub const COMMAND_WORDS: &[&str] = &[
    "login", "register", "logout", "menu", "go", "accept", "profile", "lang", "notes", "show",
    "help", "quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Register(RegistrationForm),
    Logout,
    /// Sidebar click.
    Menu(String),
    /// Quick-action style navigation.
    Go(String),
    Accept(String),
    Profile(ProfileEdit),
    Lang(String),
    Notes,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

const LOGIN_USAGE: &str = "login <username> <password>";
const REGISTER_USAGE: &str = "register <username> <email> <display_name> <password> <confirm>";
const MENU_USAGE: &str = "menu <page>";
const GO_USAGE: &str = "go <page>";
const ACCEPT_USAGE: &str = "accept <request_id>";
const PROFILE_USAGE: &str = "profile <display_name> | <bio> | <interest, interest, ...>";
const LANG_USAGE: &str = "lang <zh-TW|zh-CN|en|ja>";

pub const HELP: &str = "\
login <username> <password>        Sign in
register <user> <email> <name> <password> <confirm>
logout                             Sign out
menu <page>                        Open a page from the sidebar
go <page>                          Jump to a page
accept <request_id>                Accept a friend request
profile <name> | <bio> | <a, b>    Update your profile
lang <code>                        Switch interface language
notes                              Show active notifications
show                               Print the current page again
quit                               Exit

pages: dashboard friends chat study resources study-room profile settings admin";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match word {
            "login" => match args.as_slice() {
                [username, password] => Ok(Self::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
                _ => Err(CommandError::Usage(LOGIN_USAGE)),
            },
            "register" => match args.as_slice() {
                [username, email, display_name, password, confirm] => {
                    Ok(Self::Register(RegistrationForm {
                        username: username.to_string(),
                        email: email.to_string(),
                        display_name: display_name.to_string(),
                        password: password.to_string(),
                        confirm_password: confirm.to_string(),
                    }))
                }
                _ => Err(CommandError::Usage(REGISTER_USAGE)),
            },
            "logout" => Ok(Self::Logout),
            "menu" => single(&args, MENU_USAGE).map(Self::Menu),
            "go" => single(&args, GO_USAGE).map(Self::Go),
            "accept" => single(&args, ACCEPT_USAGE).map(Self::Accept),
            "profile" => parse_profile(rest).map(Self::Profile),
            "lang" => single(&args, LANG_USAGE).map(Self::Lang),
            "notes" => Ok(Self::Notes),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn single(args: &[&str], usage: &'static str) -> Result<String, CommandError> {
    match args {
        [value] => Ok(value.to_string()),
        _ => Err(CommandError::Usage(usage)),
    }
}

/// `name | bio | a, b` with bio and interests optional.
fn parse_profile(rest: &str) -> Result<ProfileEdit, CommandError> {
    let mut parts = rest.split('|').map(str::trim);
    let display_name = parts
        .next()
        .filter(|name| !name.is_empty())
        .ok_or(CommandError::Usage(PROFILE_USAGE))?;
    let bio = parts.next().unwrap_or_default();
    let interests = parts
        .next()
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if parts.next().is_some() {
        return Err(CommandError::Usage(PROFILE_USAGE));
    }

    Ok(ProfileEdit {
        display_name: display_name.to_string(),
        bio: bio.to_string(),
        interests,
    })
}
