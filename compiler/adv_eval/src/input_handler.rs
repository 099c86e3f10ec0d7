//! Line source for `Input.read`.
//!
//! Mirrors the print handler: enum dispatch over stdin, a scripted queue of
//! lines, or a source that is already at end of input.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::BufRead;

/// Input handler implementation using enum dispatch.
pub enum InputHandlerImpl {
    Stdin,
    Scripted(Mutex<VecDeque<String>>),
    Closed,
}

impl InputHandlerImpl {
    /// Read one line without its terminator. `None` at end of input.
    pub fn read_line(&self) -> Option<String> {
        match self {
            Self::Stdin => {
                let mut line = String::new();
                match std::io::stdin().lock().read_line(&mut line) {
                    Ok(0) => None,
                    Ok(_) => {
                        let trimmed = line.trim_end_matches(['\n', '\r']).len();
                        line.truncate(trimmed);
                        Some(line)
                    }
                    Err(err) => {
                        tracing::warn!(%err, "failed to read from stdin, treating as end of input");
                        None
                    }
                }
            }
            Self::Scripted(lines) => lines.lock().pop_front(),
            Self::Closed => None,
        }
    }
}

#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedInputHandler"
)]
pub type SharedInputHandler = std::sync::Arc<InputHandlerImpl>;

/// Default stdin input handler.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedInputHandler"
)]
pub fn stdin_handler() -> SharedInputHandler {
    std::sync::Arc::new(InputHandlerImpl::Stdin)
}

/// Input handler that yields `lines` in order, then end of input.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedInputHandler"
)]
pub fn scripted_handler<I, S>(lines: I) -> SharedInputHandler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let queue = lines.into_iter().map(Into::into).collect();
    std::sync::Arc::new(InputHandlerImpl::Scripted(Mutex::new(queue)))
}

/// Input handler that is always at end of input.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedInputHandler"
)]
pub fn closed_handler() -> SharedInputHandler {
    std::sync::Arc::new(InputHandlerImpl::Closed)
}
