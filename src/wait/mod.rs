//! # Interruptible Wait Module
//!
//! The only place the trainer blocks. Every tone and every gap is held by a
//! wait that the user can cut short.
//!
//! ## Behavior
//! A wait of `d` seconds returns:
//! - [`PlaybackSignal::Continue`] if `d` elapses undisturbed
//! - [`PlaybackSignal::Quit`] if the user asks to quit
//! - [`PlaybackSignal::Resumed`] if the user paused and later resumed
//!
//! A pause request suspends the wait indefinitely until the user resumes or
//! quits. Listeners see [`PlaybackSignal::Paused`] when the suspension begins.
//!
//! ## Sub-modules
//! - `signal` - PlaybackSignal and UserRequest
//! - `machine` - The {Waiting, Paused} state machine and its events
//! - `clock` - Real and virtual time sources
//! - `source` - Where pause/quit requests come from (stdin, scripts)
//! - `interruptible` - The wait itself, driving the machine with a clock and a source
//!
//! ## Degraded Mode
//! If the interrupt source fails, the wait logs a warning once, stops
//! polling it for the rest of the session, and sleeps for the full duration
//! of every later wait.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use morse_trainer::wait::{InterruptibleWait, ManualClock, PlaybackSignal, ScriptedSource, UserRequest, Wait};
//!
//! let clock = ManualClock::new();
//! let source = ScriptedSource::new(clock.clone())
//!     .request_at(Duration::from_millis(20), UserRequest::Quit);
//! let mut waiter = InterruptibleWait::new(clock.clone(), source);
//!
//! assert_eq!(waiter.wait(0.010), PlaybackSignal::Continue);
//! assert_eq!(waiter.wait(1.0), PlaybackSignal::Quit);
//! assert_eq!(clock.elapsed(), Duration::from_millis(20));
//! ```

mod clock;
mod interruptible;
mod machine;
mod signal;
mod source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use interruptible::{InterruptibleWait, Wait};
pub use machine::{Transition, WaitEvent, WaitState};
pub use signal::{PlaybackSignal, UserRequest};
pub use source::{InterruptSource, NoInterrupts, ScriptedSource, StdinSource};
