//! Console command parsing for the harness.
//!
//! One command per line:
//!
//! ```text
//! enter | leave | pause | resume
//! bounds <left> <top> <right> <bottom>
//! status
//! quit
//! ```
//!
//! `bounds` arguments are kept as raw text and go through [`BoundsForm`], so
//! they get the same fallback and validation as the settings surface.

use thiserror::Error;

use crate::application::edit_bounds::BoundsForm;
use crate::application::host_session::HostEvent;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Forward a lifecycle event to the session.
    Event(HostEvent),
    /// Submit new bounds through the settings form.
    Bounds(BoundsForm),
    Status,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try: enter, leave, pause, resume, bounds, status, quit)")]
    Unknown(String),

    #[error("'{command}' expects {expected} arguments, got {got}")]
    MissingArgument {
        command: &'static str,
        expected: usize,
        got: usize,
    },
}

/// Parses a single console line.
///
/// Commands are case-insensitive and surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`CommandError::Empty`] for a blank line,
/// [`CommandError::Unknown`] for an unrecognised verb, and
/// [`CommandError::MissingArgument`] when `bounds` has the wrong arity.
pub fn parse_command(line: &str) -> Result<HostCommand, CommandError> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    match verb.as_str() {
        "enter" => Ok(HostCommand::Event(HostEvent::EnterConfinedContext)),
        "leave" => Ok(HostCommand::Event(HostEvent::LeaveConfinedContext)),
        "pause" => Ok(HostCommand::Event(HostEvent::Pause)),
        "resume" => Ok(HostCommand::Event(HostEvent::Resume)),
        "status" => Ok(HostCommand::Status),
        "quit" | "exit" => Ok(HostCommand::Quit),
        "bounds" => match args.as_slice() {
            [l, t, r, b] => Ok(HostCommand::Bounds(BoundsForm::from_fields(l, t, r, b))),
            _ => Err(CommandError::MissingArgument {
                command: "bounds",
                expected: 4,
                got: args.len(),
            }),
        },
        _ => Err(CommandError::Unknown(verb)),
    }
}
