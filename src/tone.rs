//! Tone synthesizer
//!
//! Renders a sine tone into signed 16-bit mono samples with a short linear
//! fade at each end. Switching a full-amplitude sine on or off in one sample
//! produces an audible click; a 5 ms ramp removes it without softening the
//! rhythm.

use std::f64::consts::TAU;

/// Sample rate used when no output device dictates one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Length of the fade-in and fade-out ramps.
pub const RAMP_SECONDS: f64 = 0.005;

/// Full-scale amplitude of a generated tone.
pub const PEAK_AMPLITUDE: f64 = 32767.0;

/// A freshly synthesized block of mono samples.
///
/// Buffers are never shared or cached: each tone is rendered, handed to the
/// audio sink, and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl ToneBuffer {
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playing time of the buffer in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Number of samples in a tone of `duration_s` seconds: `round(rate * duration)`.
pub fn sample_count(duration_s: f64, sample_rate_hz: u32) -> usize {
    let count = (sample_rate_hz as f64 * duration_s).round();
    if count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Length of each ramp in samples: 5 ms, at least one sample, at most the whole buffer.
pub fn ramp_length(sample_rate_hz: u32, total_samples: usize) -> usize {
    let ramp = ((RAMP_SECONDS * sample_rate_hz as f64).round() as usize).max(1);
    ramp.min(total_samples)
}

/// Synthesize a ramped sine tone.
///
/// Frequency and sample rate must be positive; callers validate them before
/// getting here.
///
/// # Example
/// ```
/// use morse_trainer::tone::synthesize;
///
/// let tone = synthesize(600.0, 0.1, 8000);
/// assert_eq!(tone.len(), 800);
/// assert_eq!(tone.samples()[0], 0);
/// assert_eq!(tone.samples()[799], 0);
/// ```
pub fn synthesize(frequency_hz: f64, duration_s: f64, sample_rate_hz: u32) -> ToneBuffer {
    let total = sample_count(duration_s, sample_rate_hz);
    let rate = sample_rate_hz as f64;

    let mut wave: Vec<f64> = (0..total)
        .map(|i| {
            // Reduce the phase to one cycle before scaling so long tones keep precision.
            let cycles = (frequency_hz * i as f64 / rate).fract();
            (TAU * cycles).sin()
        })
        .collect();

    let ramp = ramp_length(sample_rate_hz, total);
    for i in 0..ramp {
        let gain = ramp_gain(i, ramp);
        wave[i] *= gain;
        wave[total - 1 - i] *= gain;
    }

    let samples = wave
        .into_iter()
        .map(|x| (x * PEAK_AMPLITUDE).round().clamp(-PEAK_AMPLITUDE, PEAK_AMPLITUDE) as i16)
        .collect();

    ToneBuffer {
        samples,
        sample_rate: sample_rate_hz,
    }
}

/// Linear gain for position `i` of a ramp `len` samples long, from 0.0 up to 1.0.
fn ramp_gain(i: usize, len: usize) -> f64 {
    if len > 1 {
        i as f64 / (len - 1) as f64
    } else {
        0.0
    }
}
