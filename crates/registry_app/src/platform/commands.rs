use registry_core::{Field, Msg, UserId};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  name <text>     set the full name
  mobile <text>   set the mobile number
  email <text>    set the email address
  submit          validate and register the user
  refresh         reload the user list
  delete <id>     delete a user (asks for confirmation)
  help            show this help
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit { field: Field, value: String },
    Submit,
    Refresh,
    Delete(UserId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("`delete` needs a numeric user id")]
    MissingId,
}

impl Command {
    /// The message this command feeds into the state machine, if any.
    pub fn into_msg(self) -> Option<Msg> {
        match self {
            Command::Edit { field, value } => Some(Msg::FieldEdited { field, value }),
            Command::Submit => Some(Msg::SubmitClicked),
            Command::Refresh => Some(Msg::RefreshClicked),
            Command::Delete(id) => Some(Msg::DeleteClicked { id }),
            Command::Help | Command::Quit => None,
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim_start()),
        None => (line, ""),
    };
    if keyword.is_empty() {
        return Err(CommandError::Empty);
    }

    if let Some(field) = Field::from_key(keyword) {
        return Ok(Command::Edit {
            field,
            value: rest.to_string(),
        });
    }

    match keyword.to_ascii_lowercase().as_str() {
        "submit" => Ok(Command::Submit),
        "refresh" => Ok(Command::Refresh),
        "delete" | "rm" => rest
            .trim()
            .parse()
            .map(Command::Delete)
            .map_err(|_| CommandError::MissingId),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_keeps_inner_spaces() {
        assert_eq!(
            parse_command("name   Jane  Doe\r\n"),
            Ok(Command::Edit {
                field: Field::Name,
                value: "Jane  Doe".to_string()
            })
        );
        assert_eq!(
            parse_command("Email"),
            Ok(Command::Edit {
                field: Field::Email,
                value: String::new()
            })
        );
    }

    #[test]
    fn delete_requires_an_id() {
        assert_eq!(parse_command("delete 5"), Ok(Command::Delete(5)));
        assert_eq!(parse_command("delete"), Err(CommandError::MissingId));
        assert_eq!(parse_command("delete five"), Err(CommandError::MissingId));
    }

    #[test]
    fn blank_and_unknown_input() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("register now"),
            Err(CommandError::Unknown("register".to_string()))
        );
    }

    #[test]
    fn commands_map_to_messages() {
        assert_eq!(Command::Submit.into_msg(), Some(Msg::SubmitClicked));
        assert_eq!(Command::Delete(3).into_msg(), Some(Msg::DeleteClicked { id: 3 }));
        assert_eq!(Command::Quit.into_msg(), None);
    }
}
