//! Playback type definitions
//!
//! This module defines the intervals produced while sending, the
//! configuration captured at the start of each played unit, and the observer
//! hooks the engine calls as it goes.

use crate::code_table::Symbol;
use crate::error::TrainerError;
use crate::timing::TimingProfile;

/// What an interval does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    /// A dot or dash: the tone sounds for the whole interval.
    Tone(Symbol),
    /// Silence between the elements of one character (1 unit).
    IntraGap,
    /// Silence after a character (3 units, stretched).
    InterCharGap,
    /// Silence for a space in the text (7 units, stretched).
    InterWordGap,
    /// Silence before a character is spoken aloud (6 units).
    RevealGap,
}

/// One timed step of a transmission.
///
/// Produced on demand as a character is played and never stored by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub kind: IntervalKind,
    /// Length in seconds
    pub seconds: f64,
}

impl Interval {
    pub fn new(kind: IntervalKind, seconds: f64) -> Self {
        Self { kind, seconds }
    }

    pub fn is_tone(&self) -> bool {
        matches!(self.kind, IntervalKind::Tone(_))
    }
}

/// Settings captured at the start of a played unit.
///
/// # Fields
/// - `timing`: Character speed, Farnsworth speed, and gap multiplier
/// - `frequency_hz`: Tone pitch (validated to 400-1000 Hz by the settings provider)
/// - `trailing_gap`: Keep the inter-character gap after the last character of a text
/// - `voice_reveal`: Pause after each character and ask the observer to speak it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub timing: TimingProfile,
    pub frequency_hz: f64,
    pub trailing_gap: bool,
    pub voice_reveal: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            timing: TimingProfile::default(),
            frequency_hz: 500.0,
            trailing_gap: true,
            voice_reveal: false,
        }
    }
}

/// Hooks called by the transmitter while it plays.
///
/// This is how a display (or a test) follows along. Every method has an
/// empty default, and `()` is an observer that ignores everything.
pub trait PlaybackObserver {
    /// A character with a code is about to be sent.
    fn character_started(&mut self, _ch: char, _code: &str) {}

    /// An interval is starting; called before the interval's wait.
    fn interval(&mut self, _interval: &Interval) {}

    /// The reveal gap after `ch` has elapsed; time to say the character.
    fn reveal(&mut self, _ch: char) {}

    /// The audio sink failed. Called once; later tones are dropped silently.
    fn audio_failed(&mut self, _error: &TrainerError) {}
}

impl PlaybackObserver for () {}

impl<O: PlaybackObserver + ?Sized> PlaybackObserver for &mut O {
    fn character_started(&mut self, ch: char, code: &str) {
        (**self).character_started(ch, code)
    }

    fn interval(&mut self, interval: &Interval) {
        (**self).interval(interval)
    }

    fn reveal(&mut self, ch: char) {
        (**self).reveal(ch)
    }

    fn audio_failed(&mut self, error: &TrainerError) {
        (**self).audio_failed(error)
    }
}
