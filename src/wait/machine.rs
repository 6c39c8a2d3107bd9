//! Wait state machine
//!
//! Pure transition logic with no timers or I/O, so every pause/resume/quit
//! path can be exercised directly.
//!
//! ```text
//!              pause                 resume / pause
//!   Waiting ───────────► Paused ─────────────────────► done(Resumed)
//!      │                   │
//!      │ tick expired      │ quit
//!      ▼                   ▼
//!  done(Continue)      done(Quit)   ◄── quit (from Waiting)
//! ```

use super::signal::{PlaybackSignal, UserRequest};

/// Where a wait currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// Counting down the requested duration.
    Waiting,
    /// Suspended until the user resumes or quits.
    Paused,
}

/// Something that happened during a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitEvent {
    TickExpired,
    PauseRequested,
    ResumeRequested,
    QuitRequested,
}

/// Result of applying an event to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep waiting in the given state.
    Stay(WaitState),
    /// The wait is over.
    Finish(PlaybackSignal),
}

impl WaitEvent {
    /// Translate a user request into an event for the current state.
    ///
    /// The same key toggles, so its meaning depends on whether the wait is paused.
    pub fn from_request(state: WaitState, request: UserRequest) -> Self {
        match (state, request) {
            (_, UserRequest::Quit) => WaitEvent::QuitRequested,
            (WaitState::Waiting, UserRequest::TogglePause) => WaitEvent::PauseRequested,
            (WaitState::Paused, UserRequest::TogglePause) => WaitEvent::ResumeRequested,
        }
    }
}

impl WaitState {
    pub fn on(self, event: WaitEvent) -> Transition {
        match (self, event) {
            (_, WaitEvent::QuitRequested) => Transition::Finish(PlaybackSignal::Quit),

            (WaitState::Waiting, WaitEvent::TickExpired) => Transition::Finish(PlaybackSignal::Continue),
            (WaitState::Waiting, WaitEvent::PauseRequested) => Transition::Stay(WaitState::Paused),
            // Nothing to resume
            (WaitState::Waiting, WaitEvent::ResumeRequested) => Transition::Stay(WaitState::Waiting),

            // A pause has no deadline
            (WaitState::Paused, WaitEvent::TickExpired) => Transition::Stay(WaitState::Paused),
            (WaitState::Paused, WaitEvent::PauseRequested) | (WaitState::Paused, WaitEvent::ResumeRequested) => {
                Transition::Finish(PlaybackSignal::Resumed)
            }
        }
    }
}
