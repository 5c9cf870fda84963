//! One line of user input, parsed.

use std::str::FromStr;

use domains::PostId;
use services::search::UnknownField;
use services::SearchField;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String, remember: bool },
    Register { email: String, password: String, confirm: String },
    Logout,
    Scroll,
    /// Accept the sign-in prompt raised by the feed.
    SignIn,
    /// Close the sign-in prompt without navigating.
    Dismiss,
    Search(String),
    Toggle(SearchField),
    Clear,
    Comments(PostId),
    Comment { post_id: PostId, body: String },
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a post id")]
    BadPostId(String),
    #[error(transparent)]
    Field(#[from] UnknownField),
}

pub const HELP: &str = "\
commands:
  login <email> <password> [remember]
  register <email> <password> <confirm>
  logout
  scroll                  reveal the next page of posts
  signin | dismiss        answer the sign-in prompt
  search <text>           filter posts (empty text shows the feed)
  toggle <post|title|username>
  clear
  comments <postId>
  comment <postId> <text>
  show
  quit";

fn post_id(raw: &str) -> Result<PostId, ParseError> {
    raw.parse().map_err(|_| ParseError::BadPostId(raw.to_string()))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match verb {
            "" => return Err(ParseError::Empty),
            "login" => match args.as_slice() {
                [email, password] => Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                    remember: false,
                },
                [email, password, "remember"] => Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                    remember: true,
                },
                _ => return Err(ParseError::Usage("login <email> <password> [remember]")),
            },
            "register" => match args.as_slice() {
                [email, password, confirm] => Command::Register {
                    email: email.to_string(),
                    password: password.to_string(),
                    confirm: confirm.to_string(),
                },
                _ => return Err(ParseError::Usage("register <email> <password> <confirm>")),
            },
            "logout" => Command::Logout,
            "scroll" => Command::Scroll,
            "signin" => Command::SignIn,
            "dismiss" => Command::Dismiss,
            // Everything after the separating space, whitespace included.
            "search" => Command::Search(rest.to_string()),
            "toggle" => match args.as_slice() {
                [field] => Command::Toggle(field.parse()?),
                _ => return Err(ParseError::Usage("toggle <post|title|username>")),
            },
            "clear" => Command::Clear,
            "comments" => match args.as_slice() {
                [id] => Command::Comments(post_id(id)?),
                _ => return Err(ParseError::Usage("comments <postId>")),
            },
            "comment" => {
                let (id, body) = rest.trim_start().split_once(' ').ok_or(ParseError::Usage("comment <postId> <text>"))?;
                Command::Comment {
                    post_id: post_id(id)?,
                    body: body.to_string(),
                }
            }
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
