//! Playback engine
//!
//! Turns characters, words, and text into timed tone and gap intervals and
//! plays them through an audio sink, holding each interval with an
//! interruptible wait.

use tracing::{debug, warn};

use super::types::{Interval, IntervalKind, PlaybackConfig, PlaybackObserver};
use crate::audio::AudioSink;
use crate::code_table::{is_playable, lookup, symbols, Symbol};
use crate::timing::Timings;
use crate::tone::synthesize;
use crate::wait::{PlaybackSignal, Wait};

/// Dot units of silence before a character is revealed by voice.
pub const REVEAL_UNITS: f64 = 6.0;

/// Tone and intra-element gap intervals for one code string.
///
/// Gaps fall strictly between elements: never before the first or after the last.
///
/// # Example
/// ```rust
/// use morse_trainer::playback::{element_intervals, IntervalKind};
/// use morse_trainer::TimingProfile;
///
/// let timings = TimingProfile::standard(20.0).timings();
/// let kinds: Vec<_> = element_intervals(".-", &timings).iter().map(|i| i.kind).collect();
/// assert_eq!(kinds.len(), 3);
/// assert_eq!(kinds[1], IntervalKind::IntraGap);
/// ```
pub fn element_intervals(code: &str, timings: &Timings) -> Vec<Interval> {
    let elements = symbols(code);
    let mut intervals = Vec::with_capacity(elements.len() * 2);
    for (i, symbol) in elements.iter().enumerate() {
        if i > 0 {
            intervals.push(Interval::new(IntervalKind::IntraGap, timings.intra_element_gap));
        }
        let seconds = match symbol {
            Symbol::Dot => timings.dot,
            Symbol::Dash => timings.dash,
        };
        intervals.push(Interval::new(IntervalKind::Tone(*symbol), seconds));
    }
    intervals
}

/// Every interval one character contributes to a transmission.
///
/// - A space is a single inter-word gap.
/// - A coded character is its elements, then the reveal gap (with `voice_reveal`),
///   then the inter-character gap (when `closing_gap` is set).
/// - Anything else returns `None` and takes no time.
pub fn character_intervals(
    ch: char,
    timings: &Timings,
    voice_reveal: bool,
    closing_gap: bool,
) -> Option<Vec<Interval>> {
    if ch == ' ' {
        return Some(vec![Interval::new(IntervalKind::InterWordGap, timings.inter_word_gap)]);
    }

    let code = lookup(ch)?;
    let mut intervals = element_intervals(code, timings);
    if voice_reveal {
        intervals.push(Interval::new(IntervalKind::RevealGap, timings.dot * REVEAL_UNITS));
    }
    if closing_gap {
        intervals.push(Interval::new(IntervalKind::InterCharGap, timings.inter_character_gap));
    }
    Some(intervals)
}

/// Upper-case `text` and keep only characters that can be sent.
pub fn playable_units(text: &str) -> Vec<char> {
    text.chars()
        .flat_map(char::to_uppercase)
        .filter(|&c| is_playable(c))
        .collect()
}

/// Whether the unit at `index` gets its inter-character gap.
fn closing_gap_at(units: &[char], index: usize, trailing_gap: bool) -> bool {
    if trailing_gap {
        return true;
    }
    let last_coded = units.iter().rposition(|&c| c != ' ');
    Some(index) != last_coded
}

/// The full interval sequence for `text`, without playing it.
pub fn plan_text(text: &str, config: &PlaybackConfig) -> Vec<Interval> {
    let timings = config.timing.timings();
    let units = playable_units(text);
    units
        .iter()
        .enumerate()
        .filter_map(|(i, &ch)| {
            character_intervals(ch, &timings, config.voice_reveal, closing_gap_at(&units, i, config.trailing_gap))
        })
        .flatten()
        .collect()
}

/// How long sending `text` takes if nobody pauses it, in seconds.
pub fn transmission_seconds(text: &str, config: &PlaybackConfig) -> f64 {
    plan_text(text, config).iter().map(|i| i.seconds).sum()
}

/// Plays Morse through an audio sink, one interval at a time.
///
/// Every public `play_*` method reads the current [`PlaybackConfig`] once at
/// the start and uses it for the whole unit. A [`PlaybackSignal::Quit`] from
/// any wait stops the unit immediately and is returned to the caller.
///
/// # Example
/// ```rust
/// use morse_trainer::audio::NullSink;
/// use morse_trainer::playback::{PlaybackConfig, Transmitter};
/// use morse_trainer::wait::{InterruptibleWait, ManualClock, NoInterrupts, PlaybackSignal};
///
/// let clock = ManualClock::new();
/// let waiter = InterruptibleWait::new(clock.clone(), NoInterrupts);
/// let mut tx = Transmitter::new(PlaybackConfig::default(), NullSink::new(), waiter, ());
///
/// assert_eq!(tx.play_text("sos"), PlaybackSignal::Continue);
/// assert!(clock.elapsed().as_secs_f64() > 4.0);
/// ```
pub struct Transmitter<A, W, O> {
    config: PlaybackConfig,
    sink: A,
    waiter: W,
    observer: O,
    audio_failed: bool,
}

impl<A: AudioSink, W: Wait, O: PlaybackObserver> Transmitter<A, W, O> {
    pub fn new(config: PlaybackConfig, sink: A, waiter: W, observer: O) -> Self {
        Self {
            config,
            sink,
            waiter,
            observer,
            audio_failed: false,
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect from the next played unit.
    pub fn set_config(&mut self, config: PlaybackConfig) {
        self.config = config;
    }

    /// True once the sink has failed; tones are dropped but timing continues.
    pub fn audio_degraded(&self) -> bool {
        self.audio_failed
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn waiter(&self) -> &W {
        &self.waiter
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_parts(self) -> (A, W, O) {
        (self.sink, self.waiter, self.observer)
    }

    /// Play only the elements of `ch`, with no gap after the last one.
    pub fn play_elements(&mut self, ch: char) -> PlaybackSignal {
        let Some(code) = lookup(ch) else {
            return PlaybackSignal::Continue;
        };
        let timings = self.config.timing.timings();
        self.observer.character_started(ch.to_ascii_uppercase(), code);
        self.play_intervals(&element_intervals(code, &timings), ch)
    }

    /// Play one character followed by exactly one inter-character gap.
    ///
    /// A space plays only the inter-word gap. Characters without a code are skipped.
    pub fn play_character(&mut self, ch: char) -> PlaybackSignal {
        let timings = self.config.timing.timings();
        self.play_unit(ch, &timings, true)
    }

    /// Play each character of `word` in turn.
    pub fn play_word(&mut self, word: &str) -> PlaybackSignal {
        let timings = self.config.timing.timings();
        for ch in word.chars() {
            if self.play_unit(ch, &timings, true).is_quit() {
                return PlaybackSignal::Quit;
            }
        }
        PlaybackSignal::Continue
    }

    /// Play arbitrary text: upper-cased, unknown characters skipped, spaces as word gaps.
    pub fn play_text(&mut self, text: &str) -> PlaybackSignal {
        let timings = self.config.timing.timings();
        let units = playable_units(text);
        debug!(text, units = units.len(), "sending text");

        for (i, &ch) in units.iter().enumerate() {
            let closing_gap = closing_gap_at(&units, i, self.config.trailing_gap);
            if self.play_unit(ch, &timings, closing_gap).is_quit() {
                debug!(sent = i, "text interrupted");
                return PlaybackSignal::Quit;
            }
        }
        PlaybackSignal::Continue
    }

    fn play_unit(&mut self, ch: char, timings: &Timings, closing_gap: bool) -> PlaybackSignal {
        let Some(intervals) = character_intervals(ch, timings, self.config.voice_reveal, closing_gap) else {
            debug!(?ch, "skipping character without a code");
            return PlaybackSignal::Continue;
        };

        if let Some(code) = lookup(ch) {
            self.observer.character_started(ch.to_ascii_uppercase(), code);
        }
        self.play_intervals(&intervals, ch)
    }

    fn play_intervals(&mut self, intervals: &[Interval], ch: char) -> PlaybackSignal {
        for interval in intervals {
            if self.play_interval(interval).is_quit() {
                return PlaybackSignal::Quit;
            }
            if interval.kind == IntervalKind::RevealGap {
                self.observer.reveal(ch.to_ascii_uppercase());
            }
        }
        PlaybackSignal::Continue
    }

    fn play_interval(&mut self, interval: &Interval) -> PlaybackSignal {
        if interval.is_tone() {
            self.sound(interval.seconds);
        }
        self.observer.interval(interval);
        self.waiter.wait(interval.seconds)
    }

    /// Start a tone. Failures switch the session to silent timing.
    fn sound(&mut self, seconds: f64) {
        if self.audio_failed {
            return;
        }
        let buffer = synthesize(self.config.frequency_hz, seconds, self.sink.sample_rate());
        if let Err(err) = self.sink.play(buffer) {
            warn!(error = %err, "audio output failed, continuing without sound");
            self.observer.audio_failed(&err);
            self.audio_failed = true;
        }
    }
}
