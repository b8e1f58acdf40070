//! The harness frame loop.
//!
//! Stands in for a host application's main loop: a `tokio` interval fires
//! `HostEvent::Frame` at the configured rate while console lines are parsed
//! into commands and dispatched to the same [`HostSession`].  Everything runs
//! on one task, so the controller is never touched concurrently.
//!
//! Console input arrives over an `mpsc` channel.  [`spawn_stdin_reader`]
//! feeds it from a plain OS thread; tests feed it directly.

use std::future::Future;
use std::io::BufRead;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::console::{parse_command, CommandError, HostCommand};
use crate::application::host_session::{HostEvent, HostSession};

/// Capacity of the console line channel.
const CONSOLE_CHANNEL_CAPACITY: usize = 32;

/// Why [`run_host_loop`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// A `quit` command was read.
    Quit,
    /// The shutdown future resolved (Ctrl+C in the binary).
    Interrupted,
    /// The optional run duration elapsed.
    Elapsed,
}

/// Runs frames and console commands until quit, shutdown or the deadline.
///
/// Closing the console channel does not stop the loop; frames keep ticking
/// until one of the other exits fires.  The session is left as-is on return;
/// the caller is responsible for `HostSession::shutdown`.
pub async fn run_host_loop<S>(
    session: &mut HostSession,
    mut commands: mpsc::Receiver<String>,
    frame_interval: Duration,
    stop_after: Option<Duration>,
    shutdown: S,
) -> LoopExit
where
    S: Future<Output = ()>,
{
    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let deadline = async move {
        match stop_after {
            Some(d) => sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    tokio::pin!(shutdown);

    let mut input_open = true;

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                info!("shutdown requested");
                return LoopExit::Interrupted;
            }
            () = &mut deadline => {
                info!("run duration elapsed");
                return LoopExit::Elapsed;
            }
            line = commands.recv(), if input_open => match line {
                Some(line) => {
                    if dispatch_line(session, &line).is_break() {
                        return LoopExit::Quit;
                    }
                }
                None => {
                    debug!("console input closed; frames continue");
                    input_open = false;
                }
            },
            _ = ticker.tick() => {
                session.handle(HostEvent::Frame);
            }
        }
    }
}

/// Starts a thread that forwards stdin lines into a channel.
///
/// The thread ends on EOF, on a read error, or when the receiver is dropped.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(CONSOLE_CHANNEL_CAPACITY);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("failed to read console input: {e}");
                    break;
                }
            }
        }
    });
    rx
}

/// Executes one console line.  Breaks only on `quit`.
fn dispatch_line(session: &mut HostSession, line: &str) -> ControlFlow<()> {
    match parse_command(line) {
        Ok(HostCommand::Event(event)) => {
            debug!(?event, "console event");
            session.handle(event);
        }
        Ok(HostCommand::Bounds(form)) => {
            session.submit_settings(&form);
        }
        Ok(HostCommand::Status) => {
            let status = session.status();
            info!(
                active = status.active,
                paused = status.paused,
                left = status.bounds.left,
                top = status.bounds.top,
                right = status.bounds.right,
                bottom = status.bounds.bottom,
                frames = status.frames,
                backend = session.controller().backend_name(),
                "status"
            );
        }
        Ok(HostCommand::Quit) => return ControlFlow::Break(()),
        Err(CommandError::Empty) => {}
        Err(e) => warn!("{e}"),
    }
    ControlFlow::Continue(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
