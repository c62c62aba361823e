use std::str::FromStr;

use thiserror::Error;

use crate::inbox::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Grant,
    Revoke,
    Simulate,
    Toggle(String),
    List(View),
    Dashboard,
    Sandbox(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "grant" => Command::Grant,
            "revoke" => Command::Revoke,
            "new" | "simulate" => Command::Simulate,
            "toggle" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "toggle",
                        what: "a message id",
                    });
                }
                Command::Toggle(rest.to_string())
            }
            "inbox" => Command::List(View::Inbox),
            "spam" => Command::List(View::Spam),
            "dashboard" | "stats" => Command::Dashboard,
            // Blank sandbox text is allowed and produces no request.
            "classify" => Command::Sandbox(rest.to_string()),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
commands:
  grant              grant SMS permission and scan existing messages
  revoke             revoke permission and drop all messages
  new | simulate     receive a simulated message
  toggle <id>        mark a message as spam / not spam
  inbox | spam       list messages in a folder
  dashboard          show classification statistics
  classify <text>    try the classifier without saving anything
  help               show this list
  quit               exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!("grant".parse::<Command>(), Ok(Command::Grant));
        assert_eq!("  NEW ".parse::<Command>(), Ok(Command::Simulate));
        assert_eq!("spam".parse::<Command>(), Ok(Command::List(View::Spam)));
        assert_eq!("stats".parse::<Command>(), Ok(Command::Dashboard));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "toggle msg-1700000000000-3".parse::<Command>(),
            Ok(Command::Toggle("msg-1700000000000-3".into()))
        );
    }

    #[test]
    fn sandbox_keeps_full_text() {
        assert_eq!(
            "classify  Win a FREE cruise now!! ".parse::<Command>(),
            Ok(Command::Sandbox("Win a FREE cruise now!!".into()))
        );
        assert_eq!("classify".parse::<Command>(), Ok(Command::Sandbox(String::new())));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "delete 3".parse::<Command>(),
            Err(CommandError::Unknown("delete".into()))
        );
        assert!(matches!(
            "toggle".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "toggle", .. })
        ));
    }
}
