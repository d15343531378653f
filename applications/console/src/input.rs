/// Line commands accepted on stdin
use roster_core::types::DraftField;

pub const HELP: &str = "\
Commands:
  name <text>    set the name field
  email <text>   set the email field
  submit         create the user
  reset          clear the form
  reload         fetch the list again
  toggle <id>    expand or collapse a row
  help           show this help
  quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Edit { field: DraftField, value: String },
    Submit,
    Reset,
    Reload,
    Toggle(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match command.to_ascii_lowercase().as_str() {
        // Field values may be cleared by passing nothing
        "name" => Input::Edit {
            field: DraftField::Name,
            value: rest.to_string(),
        },
        "email" => Input::Edit {
            field: DraftField::Email,
            value: rest.to_string(),
        },
        "submit" => Input::Submit,
        "reset" => Input::Reset,
        "reload" => Input::Reload,
        "toggle" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("toggle"));
            }
            Input::Toggle(rest.to_string())
        }
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };

    Ok(Some(input))
}
