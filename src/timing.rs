//! # Timing Calculator
//!
//! Derives every Morse interval duration from three parameters:
//! character speed, effective (Farnsworth) speed, and a gap multiplier.
//!
//! ## Unit Time
//! One dot unit lasts `1.2 / character_wpm` seconds (the PARIS standard:
//! 50 units per word, so `wpm * 50` units per minute).
//!
//! ## Farnsworth Stretch
//! Characters are always sent at full character speed. Only the spacing
//! *between* characters and words is stretched, by
//! `scale = max(1, character_wpm / effective_wpm) * max(0.1, gap_multiplier)`.
//!
//! | Interval | Units |
//! |---|---|
//! | dot | 1 |
//! | dash | 3 |
//! | gap between elements | 1 (never scaled) |
//! | gap between characters | 3 × scale |
//! | gap between words | 7 × scale |

/// Floor applied to the effective speed so a zero or negative value cannot divide by zero.
const MIN_EFFECTIVE_WPM: f64 = 1e-6;

/// Floor applied to the gap multiplier; a zero multiplier would run characters together.
pub const MIN_GAP_MULTIPLIER: f64 = 0.1;

/// Speed parameters for one played unit.
///
/// Built from the current settings at the start of each character, word, or
/// text and never changed while that unit plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingProfile {
    /// Speed at which the elements of a character are sent.
    pub character_wpm: f64,
    /// Overall speed the listener experiences once spacing is stretched.
    pub effective_wpm: f64,
    /// Extra stretch applied on top of the Farnsworth scale.
    pub gap_multiplier: f64,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self {
            character_wpm: 25.0,
            effective_wpm: 5.0,
            gap_multiplier: 2.0,
        }
    }
}

/// Interval durations in seconds derived from a [`TimingProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub dot: f64,
    pub dash: f64,
    pub intra_element_gap: f64,
    pub inter_character_gap: f64,
    pub inter_word_gap: f64,
}

impl TimingProfile {
    pub fn new(character_wpm: f64, effective_wpm: f64, gap_multiplier: f64) -> Self {
        Self {
            character_wpm,
            effective_wpm,
            gap_multiplier,
        }
    }

    /// Profile without Farnsworth stretch: effective speed equals character
    /// speed and the multiplier is 1.
    pub fn standard(wpm: f64) -> Self {
        Self::new(wpm, wpm, 1.0)
    }

    /// Dot duration in seconds: `1.2 / character_wpm`.
    pub fn dot_seconds(&self) -> f64 {
        1.2 / self.character_wpm
    }

    /// Ratio between character speed and effective speed, never below 1.0.
    pub fn farnsworth_scale(&self) -> f64 {
        let effective = self.effective_wpm.max(MIN_EFFECTIVE_WPM);
        (self.character_wpm / effective).max(1.0)
    }

    /// Total stretch applied to character and word gaps.
    pub fn gap_scale(&self) -> f64 {
        self.farnsworth_scale() * self.gap_multiplier.max(MIN_GAP_MULTIPLIER)
    }

    /// Compute every interval duration for this profile.
    ///
    /// # Example
    /// ```
    /// use morse_trainer::TimingProfile;
    ///
    /// let timings = TimingProfile::standard(20.0).timings();
    /// assert!((timings.dot - 0.06).abs() < 1e-12);
    /// assert!((timings.inter_character_gap - 0.18).abs() < 1e-12);
    /// assert!((timings.inter_word_gap - 0.42).abs() < 1e-12);
    /// ```
    pub fn timings(&self) -> Timings {
        let dot = self.dot_seconds();
        let scale = self.gap_scale();
        Timings {
            dot,
            dash: dot * 3.0,
            intra_element_gap: dot,
            inter_character_gap: dot * 3.0 * scale,
            inter_word_gap: dot * 7.0 * scale,
        }
    }
}
