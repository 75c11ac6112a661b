//! REPL input parsing.

use std::path::PathBuf;

use playground_types::NonEmptyString;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Empty,
    Prompt(NonEmptyString),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Models,
    /// Display name, or a 1-based index into the `/models` list.
    Model(String),
    Info,
    Temperature(f64),
    MaxTokens(u32),
    AttachImage(PathBuf),
    ClearImage,
    Reset,
    EnableAll,
    Refresh,
    Guide,
    Stats,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '/{0}' (try /help)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    MissingArgument(&'static str),
    #[error("'{value}' is not a valid value for /{command}")]
    InvalidNumber {
        command: &'static str,
        value: String,
    },
}

pub const HELP: &str = "\
Commands:
  /models            list enabled models (current one marked with *)
  /model <name|#>    switch model by display name or list number
  /info              describe the current model
  /temp <0.0-2.0>    set temperature (step 0.1)
  /max <256-4096>    set max tokens (step 256)
  /image <path>      attach an image to the next message (vision models only)
  /image clear       drop the pending image
  /reset             clear the conversation
  /enable-all        re-enable models disabled this session
  /refresh           reload the model list and re-enable all models
  /guide             model comparison guide
  /stats             session statistics
  /help              this help
  /quit              exit
Anything else is sent to the current model.";

pub fn parse(line: &str) -> Result<Input, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(NonEmptyString::new(line).map_or(Input::Empty, Input::Prompt));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "models" => Command::Models,
        "model" => {
            if arg.is_empty() {
                return Err(ParseError::MissingArgument("/model <name|#>"));
            }
            Command::Model(arg.to_string())
        }
        "info" => Command::Info,
        "temp" => Command::Temperature(number(arg, "temp", "/temp <0.0-2.0>")?),
        "max" => Command::MaxTokens(number(arg, "max", "/max <256-4096>")?),
        "image" => match arg {
            "" => return Err(ParseError::MissingArgument("/image <path> | /image clear")),
            "clear" => Command::ClearImage,
            path => Command::AttachImage(PathBuf::from(path)),
        },
        "reset" => Command::Reset,
        "enable-all" => Command::EnableAll,
        "refresh" => Command::Refresh,
        "guide" => Command::Guide,
        "stats" => Command::Stats,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Input::Command(command))
}

fn number<T: std::str::FromStr>(
    arg: &str,
    command: &'static str,
    usage: &'static str,
) -> Result<T, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(usage));
    }
    arg.parse().map_err(|_| ParseError::InvalidNumber {
        command,
        value: arg.to_string(),
    })
}
