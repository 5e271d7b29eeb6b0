// Terminal commands read from stdin by the binary.

use thiserror::Error;

pub const HELP: &str = "\
commands:
  ping <target>   run a ping check and refresh the ping log
  uptime <url>    run an uptime check and refresh the uptime log
  tab <name>      switch the visible log tab
  logs            reload both log lists
  history         show recent bandwidth samples recorded by the backend
  show            print the dashboard
  help            print this help
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping(String),
    Uptime(String),
    Tab(String),
    Logs,
    History,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };
        match word {
            "" => Err(CommandError::Empty),
            "ping" => arg("ping").map(Command::Ping),
            "uptime" => arg("uptime").map(Command::Uptime),
            "tab" => arg("tab").map(Command::Tab),
            "logs" => Ok(Command::Logs),
            "history" => Ok(Command::History),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
