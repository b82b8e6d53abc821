//! Line command parsing for the interactive shell.

/// How the user points at an alarm: 1-based list position or full id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmRef {
    Position(usize),
    Id(uuid::Uuid),
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show,
    Add,
    Edit(AlarmRef),
    Set { field: String, value: String },
    Save,
    Cancel,
    Toggle(AlarmRef),
    Delete(AlarmRef),
    Help,
    Quit,
}

/// Parses one input line. Returns a user-facing message on failure.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "show" => Command::Show,
        "add" | "new" => Command::Add,
        "edit" => Command::Edit(parse_alarm_ref(rest)?),
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map(|(field, value)| (field, value.trim()))
                .unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("usage: set <time|label|recurrence|sound> <value>".to_string());
            }
            Command::Set {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "save" | "commit" => Command::Save,
        "cancel" => Command::Cancel,
        "toggle" => Command::Toggle(parse_alarm_ref(rest)?),
        "delete" | "rm" => Command::Delete(parse_alarm_ref(rest)?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

fn parse_alarm_ref(value: &str) -> Result<AlarmRef, String> {
    if value.is_empty() {
        return Err("expected an alarm number or id".to_string());
    }
    if let Ok(position) = value.parse::<usize>() {
        if position == 0 {
            return Err("alarm numbers start at 1".to_string());
        }
        return Ok(AlarmRef::Position(position));
    }
    uuid::Uuid::parse_str(value)
        .map(AlarmRef::Id)
        .map_err(|_| format!("`{value}` is neither an alarm number nor an id"))
}
