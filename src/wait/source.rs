//! Sources of pause/resume/quit requests.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::clock::{Clock, ManualClock};
use super::signal::UserRequest;
use crate::error::TrainerError;

/// Where a wait looks for user requests.
pub trait InterruptSource {
    /// Wait up to `timeout` for the next request (`None` waits indefinitely).
    ///
    /// Returns `Ok(None)` when the timeout passes with no request.
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<UserRequest>, TrainerError>;
}

impl<S: InterruptSource + ?Sized> InterruptSource for Box<S> {
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<UserRequest>, TrainerError> {
        (**self).poll(timeout)
    }
}

/// Reads requests from standard input on a background thread.
///
/// Each line typed is one request: an empty line toggles pause, `q` quits.
/// Once stdin closes, the source reports itself unavailable.
pub struct StdinSource {
    requests: Receiver<UserRequest>,
}

impl StdinSource {
    pub fn spawn() -> Result<Self, TrainerError> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-interrupts".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    match UserRequest::from_line(&line) {
                        Some(request) => {
                            if tx.send(request).is_err() {
                                break;
                            }
                        }
                        None => debug!(input = %line.trim(), "ignoring unrecognised input"),
                    }
                }
                debug!("stdin closed");
            })
            .map_err(|e| TrainerError::InterruptSourceUnavailable(e.to_string()))?;

        Ok(Self { requests: rx })
    }
}

impl InterruptSource for StdinSource {
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<UserRequest>, TrainerError> {
        let closed = || TrainerError::InterruptSourceUnavailable("stdin closed".to_string());
        match timeout {
            Some(timeout) => match self.requests.recv_timeout(timeout) {
                Ok(request) => Ok(Some(request)),
                Err(RecvTimeoutError::Timeout) => Ok(None),
                Err(RecvTimeoutError::Disconnected) => Err(closed()),
            },
            None => self.requests.recv().map(Some).map_err(|_| closed()),
        }
    }
}

/// A source that is never available, forcing plain uninterruptible sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterrupts;

impl InterruptSource for NoInterrupts {
    fn poll(&mut self, _timeout: Option<Duration>) -> Result<Option<UserRequest>, TrainerError> {
        Err(TrainerError::InterruptSourceUnavailable("interrupts disabled".to_string()))
    }
}

/// Requests delivered at fixed instants of a [`ManualClock`].
///
/// Polling advances the shared clock: to the next scripted instant if it
/// falls within the timeout, otherwise by the full timeout.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    clock: ManualClock,
    script: VecDeque<(Duration, Option<UserRequest>)>,
}

impl ScriptedSource {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            script: VecDeque::new(),
        }
    }

    /// Deliver `request` once virtual time reaches `at`.
    ///
    /// Entries must be added in time order.
    pub fn request_at(mut self, at: Duration, request: UserRequest) -> Self {
        self.script.push_back((at, Some(request)));
        self
    }

    /// Report the source as unavailable once virtual time reaches `at`.
    pub fn fail_at(mut self, at: Duration) -> Self {
        self.script.push_back((at, None));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InterruptSource for ScriptedSource {
    fn poll(&mut self, timeout: Option<Duration>) -> Result<Option<UserRequest>, TrainerError> {
        let now = self.clock.now();
        let due = match (self.script.front(), timeout) {
            (Some(&(at, _)), Some(timeout)) => at <= now.saturating_add(timeout),
            (Some(_), None) => true,
            (None, _) => false,
        };

        if due {
            if let Some((at, step)) = self.script.pop_front() {
                self.clock.advance_to(at);
                return match step {
                    Some(request) => Ok(Some(request)),
                    None => Err(TrainerError::InterruptSourceUnavailable("scripted failure".to_string())),
                };
            }
        }

        match timeout {
            Some(timeout) => {
                self.clock.advance(timeout);
                Ok(None)
            }
            None => Err(TrainerError::InterruptSourceUnavailable(
                "script exhausted while waiting indefinitely".to_string(),
            )),
        }
    }
}
