//! The interruptible wait: a clock and an interrupt source driving the wait state machine.

use std::time::Duration;

use tracing::{info, warn};

use super::clock::Clock;
use super::machine::{Transition, WaitEvent, WaitState};
use super::signal::PlaybackSignal;
use super::source::InterruptSource;
use crate::error::TrainerError;

/// A blocking wait that may end early.
///
/// Everything above this trait treats it as synchronous: a call returns only
/// once the interval is over, one way or another.
pub trait Wait {
    /// Hold for about `duration_s` seconds and report how the wait ended.
    ///
    /// Returns `Continue`, `Resumed`, or `Quit`; `Paused` is only ever
    /// reported to listeners while the wait is suspended.
    fn wait(&mut self, duration_s: f64) -> PlaybackSignal;
}

impl<W: Wait + ?Sized> Wait for &mut W {
    fn wait(&mut self, duration_s: f64) -> PlaybackSignal {
        (**self).wait(duration_s)
    }
}

impl<W: Wait + ?Sized> Wait for Box<W> {
    fn wait(&mut self, duration_s: f64) -> PlaybackSignal {
        (**self).wait(duration_s)
    }
}

type Listener = Box<dyn FnMut(PlaybackSignal)>;

/// Wait driven by a [`Clock`] and an [`InterruptSource`].
pub struct InterruptibleWait<C, S> {
    clock: C,
    source: S,
    interrupts_enabled: bool,
    listener: Option<Listener>,
}

impl<C: Clock, S: InterruptSource> InterruptibleWait<C, S> {
    pub fn new(clock: C, source: S) -> Self {
        Self {
            clock,
            source,
            interrupts_enabled: true,
            listener: None,
        }
    }

    /// A wait that never polls `source`; every wait is a plain sleep.
    pub fn uninterruptible(clock: C, source: S) -> Self {
        Self {
            interrupts_enabled: false,
            ..Self::new(clock, source)
        }
    }

    /// Be told when a wait is paused and when it resumes.
    pub fn with_listener(mut self, listener: impl FnMut(PlaybackSignal) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// False once the interrupt source has failed; every later wait is a plain sleep.
    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn notify(&mut self, signal: PlaybackSignal) {
        if let Some(listener) = self.listener.as_mut() {
            listener(signal);
        }
    }

    fn disable_interrupts(&mut self, err: &TrainerError) {
        warn!(error = %err, "pause and quit are disabled for the rest of this session");
        self.interrupts_enabled = false;
    }
}

impl<C: Clock, S: InterruptSource> Wait for InterruptibleWait<C, S> {
    fn wait(&mut self, duration_s: f64) -> PlaybackSignal {
        let duration = seconds_to_duration(duration_s);
        if !self.interrupts_enabled {
            self.clock.sleep(duration);
            return PlaybackSignal::Continue;
        }

        let deadline = self.clock.now().saturating_add(duration);
        let mut state = WaitState::Waiting;

        loop {
            let timeout = match state {
                WaitState::Waiting => Some(deadline.saturating_sub(self.clock.now())),
                WaitState::Paused => None,
            };

            let event = if timeout == Some(Duration::ZERO) {
                WaitEvent::TickExpired
            } else {
                match self.source.poll(timeout) {
                    Ok(Some(request)) => WaitEvent::from_request(state, request),
                    // Woke before the deadline without a request; recompute the remainder
                    Ok(None) if state == WaitState::Waiting && self.clock.now() < deadline => continue,
                    Ok(None) => WaitEvent::TickExpired,
                    Err(err) => {
                        self.disable_interrupts(&err);
                        return match state {
                            WaitState::Waiting => {
                                let remaining = deadline.saturating_sub(self.clock.now());
                                self.clock.sleep(remaining);
                                PlaybackSignal::Continue
                            }
                            // Nobody can resume us any more
                            WaitState::Paused => {
                                self.notify(PlaybackSignal::Resumed);
                                PlaybackSignal::Resumed
                            }
                        };
                    }
                }
            };

            match state.on(event) {
                Transition::Stay(next) => {
                    if state == WaitState::Waiting && next == WaitState::Paused {
                        info!("playback paused");
                        self.notify(PlaybackSignal::Paused);
                    }
                    state = next;
                }
                Transition::Finish(signal) => {
                    match signal {
                        PlaybackSignal::Resumed => {
                            info!("playback resumed");
                            self.notify(PlaybackSignal::Resumed);
                        }
                        PlaybackSignal::Quit => info!("quit requested"),
                        PlaybackSignal::Continue | PlaybackSignal::Paused => {}
                    }
                    return signal;
                }
            }
        }
    }
}

/// Convert seconds to a `Duration`; zero, negative, and NaN become zero.
fn seconds_to_duration(seconds: f64) -> Duration {
    if seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
