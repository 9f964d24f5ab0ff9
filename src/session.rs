use std::io;
use std::sync::Arc;
use std::time::Instant;

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::debug;

use crate::codec::{Line, LineDecoder};
use crate::command::{self, Command, CommandError, ADD_USAGE, CHECK_USAGE, LIST_USAGE, RESERVE_USAGE};
use crate::datetime::format_ms;
use crate::engine::{Engine, EngineError};
use crate::limits::MAX_LINE_LEN;
use crate::model::*;
use crate::observability::{command_label, COMMANDS_TOTAL, COMMAND_DURATION_SECONDS};

pub const GREETING: &str = "Welcome to the Conference Room Scheduler!";
pub const FAREWELL: &str = "Goodbye!";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Codec(#[from] LinesCodecError),
}

/// Rendered answer to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            quit: false,
        }
    }
}

/// Drive one client: greet, then answer each line until QUIT or EOF.
pub async fn run_session<R, W>(reader: R, writer: W, engine: Arc<Engine>) -> Result<(), SessionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(reader, LineDecoder::new(MAX_LINE_LEN));
    let mut out = FramedWrite::new(writer, LinesCodec::new());

    out.send(GREETING).await?;
    while let Some(line) = lines.next().await {
        let reply = match line? {
            Line::Text(text) if text.trim().is_empty() => continue,
            Line::Text(text) => execute_line(&engine, &text),
            Line::TooLong => rejected_line("Error: line too long"),
            Line::InvalidUtf8 => rejected_line("Error: invalid UTF-8"),
        };
        // One frame per reply; LinesCodec appends the final newline.
        out.send(reply.lines.join("\n")).await?;
        if reply.quit {
            break;
        }
    }
    Ok(())
}

fn rejected_line(message: &str) -> Reply {
    debug!("rejected line: {message}");
    metrics::counter!(COMMANDS_TOTAL, "command" => "invalid", "status" => "error").increment(1);
    Reply::line(message)
}

/// Parse and execute one protocol line against the engine.
pub fn execute_line(engine: &Engine, line: &str) -> Reply {
    match command::parse_command(line) {
        Ok(cmd) => {
            let label = command_label(&cmd);
            let started = Instant::now();
            let (reply, ok) = execute(engine, cmd);
            metrics::histogram!(COMMAND_DURATION_SECONDS, "command" => label)
                .record(started.elapsed().as_secs_f64());
            let status = if ok { "ok" } else { "error" };
            metrics::counter!(COMMANDS_TOTAL, "command" => label, "status" => status).increment(1);
            reply
        }
        Err(e) => {
            debug!("rejected line {line:?}: {e}");
            metrics::counter!(COMMANDS_TOTAL, "command" => "invalid", "status" => "error").increment(1);
            Reply::line(render_command_error(&e))
        }
    }
}

/// Execute a parsed command. The flag is false when the engine rejected it.
pub fn execute(engine: &Engine, cmd: Command) -> (Reply, bool) {
    match cmd {
        Command::AddRoom { id, capacity, name } => match engine.add_room(&id, &name, capacity) {
            Ok(_) => (Reply::line("Conference room added successfully!"), true),
            Err(e) => (Reply::line(render_engine_error(&e)), false),
        },
        Command::Reserve {
            id,
            room_id,
            start,
            end,
        } => match engine.make_reservation(&id, &room_id, start, end) {
            Ok(_) => (Reply::line("Reservation made successfully!"), true),
            Err(e) => (Reply::line(render_engine_error(&e)), false),
        },
        Command::Check { room_id, start, end } => {
            match engine.check_availability(&room_id, start, end) {
                Ok(available) => {
                    let state = if available { "available" } else { "not available" };
                    (
                        Reply::line(format!("Room {room_id} is {state} during the specified time")),
                        true,
                    )
                }
                Err(e) => (Reply::line(render_engine_error(&e)), false),
            }
        }
        Command::List { room_id: None } => {
            let mut lines = vec!["All reservations:".to_string()];
            lines.extend(engine.list_reservations().iter().map(render_reservation));
            (Reply { lines, quit: false }, true)
        }
        Command::List {
            room_id: Some(room_id),
        } => match engine.reservations_for_room(&room_id) {
            Ok(reservations) => {
                let mut lines = vec![format!("Reservations for room {room_id}:")];
                lines.extend(reservations.iter().map(render_reservation));
                (Reply { lines, quit: false }, true)
            }
            Err(e) => (Reply::line(render_engine_error(&e)), false),
        },
        Command::Rooms => {
            let mut lines = vec!["Conference rooms:".to_string()];
            lines.extend(engine.list_rooms().iter().map(render_room));
            (Reply { lines, quit: false }, true)
        }
        Command::Export => match serde_json::to_string(&engine.snapshot()) {
            Ok(json) => (Reply::line(json), true),
            Err(e) => (Reply::line(format!("Error: {e}")), false),
        },
        Command::Usage(usage) => (Reply::line(format!("Usage: {usage}")), true),
        Command::Help => {
            let lines = [ADD_USAGE, RESERVE_USAGE, CHECK_USAGE, LIST_USAGE, "ROOMS", "EXPORT", "HELP", "QUIT"]
                .iter()
                .map(|usage| format!("  {usage}"))
                .collect();
            (Reply { lines, quit: false }, true)
        }
        Command::Quit => (
            Reply {
                lines: vec![FAREWELL.to_string()],
                quit: true,
            },
            true,
        ),
    }
}

pub fn render_reservation(r: &Reservation) -> String {
    format!(
        "Reservation ID: {}, Room ID: {}, Start Time: {}, End Time: {}",
        r.id,
        r.room_id,
        format_ms(r.start()),
        format_ms(r.end())
    )
}

pub fn render_room(room: &Room) -> String {
    format!(
        "Room ID: {}, Name: {}, Capacity: {}",
        room.id, room.name, room.capacity
    )
}

fn render_engine_error(e: &EngineError) -> String {
    match e {
        EngineError::RoomNotFound(_) => "Invalid room ID".to_string(),
        EngineError::ConflictDetected(id) => {
            format!("Reservation conflicts with an existing reservation ({id})")
        }
        EngineError::CapacityExceeded { .. } => "Reservation exceeds room capacity".to_string(),
        other => format!("Error: {other}"),
    }
}

fn render_command_error(e: &CommandError) -> String {
    match e {
        CommandError::DateTime(_) => "Invalid date/time format".to_string(),
        CommandError::Usage(usage) => format!("Usage: {usage}"),
        CommandError::Unknown(_) | CommandError::Empty => "Invalid choice (try HELP)".to_string(),
        other => format!("Error: {other}"),
    }
}
