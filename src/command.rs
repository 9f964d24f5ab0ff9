use thiserror::Error;

use crate::datetime::{self, DateTimeError};
use crate::model::Ms;

pub const ADD_USAGE: &str = "ADD <room-id> <capacity> <name...>";
pub const RESERVE_USAGE: &str =
    "RESERVE <reservation-id> <room-id> <yyyy-MM-dd HH:mm> <yyyy-MM-dd HH:mm>";
pub const CHECK_USAGE: &str = "CHECK <room-id> <yyyy-MM-dd HH:mm> <yyyy-MM-dd HH:mm>";
pub const LIST_USAGE: &str = "LIST [<room-id>]";

/// Parsed command from one protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddRoom {
        id: String,
        capacity: u32,
        name: String,
    },
    Reserve {
        id: String,
        room_id: String,
        start: Ms,
        end: Ms,
    },
    Check {
        room_id: String,
        start: Ms,
        end: Ms,
    },
    List {
        room_id: Option<String>,
    },
    Rooms,
    Export,
    /// Menu number whose command takes arguments; answered with its usage.
    Usage(&'static str),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid capacity: {0:?}")]
    InvalidCapacity(String),
    #[error(transparent)]
    DateTime(#[from] DateTimeError),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((keyword, args)) = tokens.split_first() else {
        return Err(CommandError::Empty);
    };

    match keyword.to_ascii_uppercase().as_str() {
        "ADD" => parse_add(args),
        "RESERVE" => parse_reserve(args),
        "CHECK" => parse_check(args),
        "LIST" => match args {
            [] => Ok(Command::List { room_id: None }),
            [room_id] => Ok(Command::List {
                room_id: Some(room_id.to_string()),
            }),
            _ => Err(CommandError::Usage(LIST_USAGE)),
        },
        "ROOMS" => no_args(args, Command::Rooms, "ROOMS"),
        "EXPORT" => no_args(args, Command::Export, "EXPORT"),
        "HELP" => Ok(Command::Help),
        "QUIT" | "EXIT" => Ok(Command::Quit),
        // Numbered menu of the interactive scheduler
        "1" => Ok(Command::Usage(ADD_USAGE)),
        "2" => Ok(Command::Usage(RESERVE_USAGE)),
        "3" => Ok(Command::Usage(CHECK_USAGE)),
        "4" => Ok(Command::List { room_id: None }),
        "5" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(keyword.to_string())),
    }
}

fn no_args(args: &[&str], cmd: Command, usage: &'static str) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(cmd)
    } else {
        Err(CommandError::Usage(usage))
    }
}

fn parse_add(args: &[&str]) -> Result<Command, CommandError> {
    let [id, capacity, name @ ..] = args else {
        return Err(CommandError::Usage(ADD_USAGE));
    };
    if name.is_empty() {
        return Err(CommandError::Usage(ADD_USAGE));
    }
    let capacity = capacity
        .parse::<u32>()
        .map_err(|_| CommandError::InvalidCapacity(capacity.to_string()))?;
    Ok(Command::AddRoom {
        id: id.to_string(),
        capacity,
        name: name.join(" "),
    })
}

fn parse_reserve(args: &[&str]) -> Result<Command, CommandError> {
    let [id, room_id, window @ ..] = args else {
        return Err(CommandError::Usage(RESERVE_USAGE));
    };
    let (start, end) = parse_window(window).ok_or(CommandError::Usage(RESERVE_USAGE))??;
    Ok(Command::Reserve {
        id: id.to_string(),
        room_id: room_id.to_string(),
        start,
        end,
    })
}

fn parse_check(args: &[&str]) -> Result<Command, CommandError> {
    let [room_id, window @ ..] = args else {
        return Err(CommandError::Usage(CHECK_USAGE));
    };
    let (start, end) = parse_window(window).ok_or(CommandError::Usage(CHECK_USAGE))??;
    Ok(Command::Check {
        room_id: room_id.to_string(),
        start,
        end,
    })
}

/// `<date> <time> <date> <time>`. `None` when the token count is wrong.
fn parse_window(tokens: &[&str]) -> Option<Result<(Ms, Ms), CommandError>> {
    let [start_date, start_time, end_date, end_time] = tokens else {
        return None;
    };
    let parsed = datetime::parse_datetime(&format!("{start_date} {start_time}")).and_then(|start| {
        let end = datetime::parse_datetime(&format!("{end_date} {end_time}"))?;
        Ok((start, end))
    });
    Some(parsed.map_err(CommandError::from))
}
