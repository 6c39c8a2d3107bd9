//! # Audio Module
//!
//! Where synthesized tones go.
//!
//! The playback engine only knows the [`AudioSink`] trait: hand over a
//! buffer and move on. Playback is fire-and-forget; the engine keeps time
//! with its own waits and never asks whether a tone has finished.
//!
//! ## Sinks
//! - [`NullSink`] - Discards every buffer (timing-only practice, tests)
//! - [`DeviceSink`] - The default output device via cpal (feature `sound`)
//!
//! ## Capability Detection
//! [`open_default_sink()`] runs once at start-up. If no device can be
//! opened, it logs a warning and falls back to [`NullSink`] so the trainer
//! still runs with correct timing.

#[cfg(feature = "sound")]
mod output;

#[cfg(feature = "sound")]
pub use output::DeviceSink;

use tracing::warn;

use crate::error::TrainerError;
use crate::tone::{ToneBuffer, DEFAULT_SAMPLE_RATE};

/// Something that can play a tone buffer.
pub trait AudioSink {
    /// Sample rate buffers should be synthesized at.
    fn sample_rate(&self) -> u32;

    /// Start playing `buffer` and return immediately.
    fn play(&mut self, buffer: ToneBuffer) -> Result<(), TrainerError>;
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }

    fn play(&mut self, buffer: ToneBuffer) -> Result<(), TrainerError> {
        (**self).play(buffer)
    }
}

impl<A: AudioSink + ?Sized> AudioSink for &mut A {
    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }

    fn play(&mut self, buffer: ToneBuffer) -> Result<(), TrainerError> {
        (**self).play(buffer)
    }
}

/// A sink that accepts and drops every buffer.
#[derive(Debug, Clone, Copy)]
pub struct NullSink {
    sample_rate: u32,
}

impl NullSink {
    pub fn new() -> Self {
        Self::with_sample_rate(DEFAULT_SAMPLE_RATE)
    }

    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for NullSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&mut self, _buffer: ToneBuffer) -> Result<(), TrainerError> {
        Ok(())
    }
}

/// Open the best available sink: the default output device, or silence.
pub fn open_default_sink() -> Box<dyn AudioSink> {
    match open_device_sink() {
        Ok(sink) => sink,
        Err(err) => {
            warn!(error = %err, "no audio output, continuing without sound");
            Box::new(NullSink::new())
        }
    }
}

#[cfg(feature = "sound")]
fn open_device_sink() -> Result<Box<dyn AudioSink>, TrainerError> {
    Ok(Box::new(DeviceSink::open()?))
}

#[cfg(not(feature = "sound"))]
fn open_device_sink() -> Result<Box<dyn AudioSink>, TrainerError> {
    Err(TrainerError::AudioOutputUnavailable(
        "built without the `sound` feature".to_string(),
    ))
}
