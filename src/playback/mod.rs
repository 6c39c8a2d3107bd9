//! # Playback Module
//!
//! Send characters, words, and text as Morse code.
//!
//! ## Purpose
//! This module turns text into the ordered sequence of tone and silence
//! intervals that make up a Morse transmission, and plays that sequence:
//! 1. **Tones** - Each dot or dash is synthesized fresh and handed to the audio sink
//! 2. **Gaps** - Silence between elements, characters, and words
//! 3. **Control** - Every interval is held by an interruptible wait, so the user
//!    can pause, resume, or quit at any point
//!
//! ## Sub-modules
//! - `types` - Interval, IntervalKind, PlaybackConfig, PlaybackObserver
//! - `engine` - Interval production and the [`Transmitter`]
//!
//! ## Entry Points
//! - [`Transmitter::play_text()`] - Send text (the usual entry point)
//! - [`Transmitter::play_word()`] / [`Transmitter::play_character()`] - Smaller units
//! - [`plan_text()`] / [`transmission_seconds()`] - Inspect a transmission without playing it
//!
//! ## Spacing Rules
//!
//! ### Inside a character
//! One intra-element gap between consecutive elements; none before the first
//! element or after the last.
//!
//! ### After a character
//! Exactly one inter-character gap, added by the character-level call only.
//!
//! ### Spaces
//! A space in the text plays one inter-word gap and nothing else. The
//! character before it still keeps its own inter-character gap.
//!
//! ### End of text
//! The last character keeps its inter-character gap unless
//! `PlaybackConfig::trailing_gap` is false.
//!
//! ## Example
//! ```rust
//! use morse_trainer::playback::{plan_text, IntervalKind, PlaybackConfig};
//!
//! let config = PlaybackConfig { trailing_gap: false, ..Default::default() };
//! let plan = plan_text("SOS", &config);
//!
//! let tones = plan.iter().filter(|i| i.is_tone()).count();
//! let char_gaps = plan.iter().filter(|i| i.kind == IntervalKind::InterCharGap).count();
//! assert_eq!(tones, 9);
//! assert_eq!(char_gaps, 2);
//! ```
//!
//! ## Related Modules
//! - `timing` - Supplies every interval length
//! - `tone` - Renders tone intervals into samples
//! - `wait` - Holds each interval and reports pause/quit
//! - `audio` - Where rendered tones are played

mod engine;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{
    character_intervals, element_intervals, plan_text, playable_units, transmission_seconds, Transmitter,
    REVEAL_UNITS,
};
pub use types::{Interval, IntervalKind, PlaybackConfig, PlaybackObserver};
