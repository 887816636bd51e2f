//! Line parser for the interactive prompt.

use calc_api_types::Operation;
use calc_client::{FormInput, UiEvent};

pub const HELP: &str = "\
commands:
  register <username> <email> <password>
  login <username> <password>
  logout
  list                                  reload calculations
  submit <operand1> <operation> <operand2>
                                        add, or update while editing
                                        operation: add|subtract|multiply|divide or + - * /
  edit <id>                             load a calculation into the form
  cancel                                leave edit mode
  delete <id>
  health                                check the service
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
    Empty,
}

pub fn parse(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(Command::Empty);
    };

    let event = match (name, args) {
        ("help" | "?", []) => return Ok(Command::Help),
        ("quit" | "exit", []) => return Ok(Command::Quit),
        ("register", [username, email, password]) => UiEvent::Register {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        },
        ("login", [username, password]) => UiEvent::Login {
            username: username.to_string(),
            password: password.to_string(),
        },
        ("logout", []) => UiEvent::Logout,
        ("list" | "refresh", []) => UiEvent::Refresh,
        ("submit", [operand1, operation, operand2]) => UiEvent::Submit(FormInput::new(
            operand1,
            operand2,
            operation_name(operation),
        )),
        ("edit", [id]) => UiEvent::Edit(parse_id(id)?),
        ("cancel", []) => UiEvent::Cancel,
        ("delete", [id]) => UiEvent::Delete(parse_id(id)?),
        ("health", []) => UiEvent::Health,
        _ => return Err(format!("unrecognised command: {} (try `help`)", line.trim())),
    };

    Ok(Command::Event(event))
}

/// Symbols map to their operation name; anything else is passed through for
/// the form to validate.
fn operation_name(raw: &str) -> &str {
    let op = match raw {
        "+" => Operation::Add,
        "-" => Operation::Subtract,
        "*" | "x" | "\u{00d7}" => Operation::Multiply,
        "/" | "\u{00f7}" => Operation::Divide,
        other => return other,
    };
    op.as_str()
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| format!("invalid calculation id: {raw}"))
}
