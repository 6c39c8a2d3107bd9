use std::time::Duration;

use super::*;
use crate::audio::AudioSink;
use crate::code_table::Symbol;
use crate::error::TrainerError;
use crate::timing::TimingProfile;
use crate::tone::ToneBuffer;
use crate::wait::{InterruptibleWait, ManualClock, PlaybackSignal, ScriptedSource, UserRequest, Wait};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < EPSILON, "expected {}, got {}", expected, actual);
}

#[derive(Default)]
struct Recorder {
    intervals: Vec<Interval>,
    characters: Vec<(char, String)>,
    reveals: Vec<char>,
    audio_failures: usize,
}

impl PlaybackObserver for Recorder {
    fn character_started(&mut self, ch: char, code: &str) {
        self.characters.push((ch, code.to_string()));
    }

    fn interval(&mut self, interval: &Interval) {
        self.intervals.push(*interval);
    }

    fn reveal(&mut self, ch: char) {
        self.reveals.push(ch);
    }

    fn audio_failed(&mut self, _error: &TrainerError) {
        self.audio_failures += 1;
    }
}

/// Returns instantly; reports Quit or Resumed on chosen calls (1-indexed).
#[derive(Default)]
struct ScriptedWait {
    calls: Vec<f64>,
    quit_at: Option<usize>,
    resume_at: Option<usize>,
}

impl Wait for ScriptedWait {
    fn wait(&mut self, duration_s: f64) -> PlaybackSignal {
        self.calls.push(duration_s);
        let n = self.calls.len();
        if Some(n) == self.quit_at {
            PlaybackSignal::Quit
        } else if Some(n) == self.resume_at {
            PlaybackSignal::Resumed
        } else {
            PlaybackSignal::Continue
        }
    }
}

struct RecordingSink {
    buffers: Vec<ToneBuffer>,
}

impl AudioSink for RecordingSink {
    fn sample_rate(&self) -> u32 {
        8000
    }

    fn play(&mut self, buffer: ToneBuffer) -> Result<(), TrainerError> {
        self.buffers.push(buffer);
        Ok(())
    }
}

#[derive(Default)]
struct FailingSink {
    attempts: usize,
}

impl AudioSink for FailingSink {
    fn sample_rate(&self) -> u32 {
        8000
    }

    fn play(&mut self, _buffer: ToneBuffer) -> Result<(), TrainerError> {
        self.attempts += 1;
        Err(TrainerError::AudioOutputUnavailable("device unplugged".to_string()))
    }
}

fn transmitter(config: PlaybackConfig, wait: ScriptedWait) -> Transmitter<RecordingSink, ScriptedWait, Recorder> {
    Transmitter::new(config, RecordingSink { buffers: Vec::new() }, wait, Recorder::default())
}

fn kinds(intervals: &[Interval]) -> Vec<IntervalKind> {
    intervals.iter().map(|i| i.kind).collect()
}

fn count(intervals: &[Interval], kind: IntervalKind) -> usize {
    intervals.iter().filter(|i| i.kind == kind).count()
}

#[test]
fn test_character_a_intervals() {
    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    let result = tx.play_character('A');
    assert_eq!(result, PlaybackSignal::Continue);

    let intervals = &tx.observer().intervals;
    assert_eq!(
        kinds(intervals),
        vec![
            IntervalKind::Tone(Symbol::Dot),
            IntervalKind::IntraGap,
            IntervalKind::Tone(Symbol::Dash),
            IntervalKind::InterCharGap,
        ]
    );

    // 25 WPM characters at 5 WPM effective with a 2x multiplier
    assert_close(intervals[0].seconds, 0.048);
    assert_close(intervals[1].seconds, 0.048);
    assert_close(intervals[2].seconds, 0.144);
    assert_close(intervals[3].seconds, 1.44);

    assert_eq!(tx.observer().characters, vec![('A', ".-".to_string())]);
}

#[test]
fn test_single_element_characters_have_no_intra_gap() {
    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    tx.play_character('E');
    tx.play_character('T');
    assert_eq!(
        kinds(&tx.observer().intervals),
        vec![
            IntervalKind::Tone(Symbol::Dot),
            IntervalKind::InterCharGap,
            IntervalKind::Tone(Symbol::Dash),
            IntervalKind::InterCharGap,
        ]
    );
}

#[test]
fn test_play_elements_has_no_closing_gap() {
    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    tx.play_elements('N');
    assert_eq!(
        kinds(&tx.observer().intervals),
        vec![IntervalKind::Tone(Symbol::Dash), IntervalKind::IntraGap, IntervalKind::Tone(Symbol::Dot)]
    );
}

#[test]
fn test_sos_keeps_trailing_gap_by_default() {
    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    assert_eq!(tx.play_text("SOS"), PlaybackSignal::Continue);

    let intervals = &tx.observer().intervals;
    assert_eq!(intervals.iter().filter(|i| i.is_tone()).count(), 9);
    assert_eq!(count(intervals, IntervalKind::IntraGap), 6);
    assert_eq!(count(intervals, IntervalKind::InterCharGap), 3);
    assert_eq!(intervals.last().map(|i| i.kind), Some(IntervalKind::InterCharGap));
}

#[test]
fn test_sos_without_trailing_gap() {
    let config = PlaybackConfig {
        trailing_gap: false,
        ..Default::default()
    };
    let mut tx = transmitter(config, ScriptedWait::default());
    tx.play_text("SOS");

    let intervals = &tx.observer().intervals;
    assert_eq!(intervals.iter().filter(|i| i.is_tone()).count(), 9);
    assert_eq!(count(intervals, IntervalKind::IntraGap), 6);
    assert_eq!(count(intervals, IntervalKind::InterCharGap), 2);
    assert_eq!(intervals.last().map(|i| i.kind), Some(IntervalKind::Tone(Symbol::Dot)));
}

#[test]
fn test_space_plays_only_word_gap() {
    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    tx.play_text("E E");
    assert_eq!(
        kinds(&tx.observer().intervals),
        vec![
            IntervalKind::Tone(Symbol::Dot),
            IntervalKind::InterCharGap,
            IntervalKind::InterWordGap,
            IntervalKind::Tone(Symbol::Dot),
            IntervalKind::InterCharGap,
        ]
    );

    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    tx.play_character(' ');
    assert_eq!(kinds(&tx.observer().intervals), vec![IntervalKind::InterWordGap]);
    assert_close(tx.observer().intervals[0].seconds, 3.36);
    assert!(tx.observer().characters.is_empty());
}

#[test]
fn test_trailing_gap_suppression_skips_trailing_spaces() {
    let config = PlaybackConfig {
        trailing_gap: false,
        ..Default::default()
    };
    let plan = plan_text("E ", &config);
    assert_eq!(kinds(&plan), vec![IntervalKind::Tone(Symbol::Dot), IntervalKind::InterWordGap]);
}

#[test]
fn test_unknown_characters_are_skipped() {
    let mut with_unknown = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    with_unknown.play_text("A#B");
    let mut plain = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    plain.play_text("AB");
    assert_eq!(with_unknown.observer().intervals, plain.observer().intervals);

    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    assert_eq!(tx.play_text("#@!"), PlaybackSignal::Continue);
    assert_eq!(tx.play_character('~'), PlaybackSignal::Continue);
    assert!(tx.waiter().calls.is_empty());
    assert!(tx.sink().buffers.is_empty());
}

#[test]
fn test_text_is_upper_cased() {
    let config = PlaybackConfig::default();
    assert_eq!(plan_text("cq de w4zx", &config), plan_text("CQ DE W4ZX", &config));

    let mut tx = transmitter(config, ScriptedWait::default());
    tx.play_text("k");
    assert_eq!(tx.observer().characters, vec![('K', "-.-".to_string())]);
}

#[test]
fn test_quit_mid_character_stops_everything() {
    let wait = ScriptedWait {
        quit_at: Some(3),
        ..Default::default()
    };
    let mut tx = transmitter(PlaybackConfig::default(), wait);
    assert_eq!(tx.play_text("SOS"), PlaybackSignal::Quit);

    // dot, gap, dot (interrupted) and nothing after
    assert_eq!(
        kinds(&tx.observer().intervals),
        vec![IntervalKind::Tone(Symbol::Dot), IntervalKind::IntraGap, IntervalKind::Tone(Symbol::Dot)]
    );
    assert_eq!(tx.waiter().calls.len(), 3);
    assert_eq!(tx.sink().buffers.len(), 2);
}

#[test]
fn test_quit_during_character_gap() {
    // S is five intervals; the sixth is its inter-character gap
    let wait = ScriptedWait {
        quit_at: Some(6),
        ..Default::default()
    };
    let mut tx = transmitter(PlaybackConfig::default(), wait);
    assert_eq!(tx.play_text("SOS"), PlaybackSignal::Quit);
    assert_eq!(tx.observer().intervals.len(), 6);
    assert_eq!(tx.observer().characters.len(), 1);
}

#[test]
fn test_quit_propagates_from_word_and_character() {
    let wait = ScriptedWait {
        quit_at: Some(2),
        ..Default::default()
    };
    let mut tx = transmitter(PlaybackConfig::default(), wait);
    assert_eq!(tx.play_word("PARIS"), PlaybackSignal::Quit);
    assert_eq!(tx.observer().intervals.len(), 2);

    let wait = ScriptedWait {
        quit_at: Some(1),
        ..Default::default()
    };
    let mut tx = transmitter(PlaybackConfig::default(), wait);
    assert_eq!(tx.play_character('A'), PlaybackSignal::Quit);
    assert_eq!(tx.observer().intervals.len(), 1);
}

#[test]
fn test_resume_continues_transmission() {
    let wait = ScriptedWait {
        resume_at: Some(2),
        ..Default::default()
    };
    let mut tx = transmitter(PlaybackConfig::default(), wait);
    assert_eq!(tx.play_text("SOS"), PlaybackSignal::Continue);
    assert_eq!(tx.observer().intervals.len(), 18);
}

#[test]
fn test_audio_failure_keeps_timing() {
    let mut tx = Transmitter::new(
        PlaybackConfig::default(),
        FailingSink::default(),
        ScriptedWait::default(),
        Recorder::default(),
    );
    assert_eq!(tx.play_text("SOS"), PlaybackSignal::Continue);

    // One failed attempt, reported once, then tones are dropped
    assert_eq!(tx.sink().attempts, 1);
    assert_eq!(tx.observer().audio_failures, 1);
    assert!(tx.audio_degraded());

    // Every interval was still waited out
    assert_eq!(tx.waiter().calls.len(), 18);
    assert_close(tx.waiter().calls.iter().sum(), transmission_seconds("SOS", tx.config()));
}

#[test]
fn test_tone_buffers_match_interval_lengths() {
    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    tx.play_character('A');
    let lengths: Vec<usize> = tx.sink().buffers.iter().map(|b| b.len()).collect();
    // round(8000 * 0.048) and round(8000 * 0.144)
    assert_eq!(lengths, vec![384, 1152]);
    assert!(tx.sink().buffers.iter().all(|b| b.sample_rate() == 8000));
}

#[test]
fn test_voice_reveal_pause() {
    let config = PlaybackConfig {
        voice_reveal: true,
        ..Default::default()
    };
    let mut tx = transmitter(config, ScriptedWait::default());
    tx.play_character('K');

    let intervals = &tx.observer().intervals;
    assert_eq!(
        kinds(intervals),
        vec![
            IntervalKind::Tone(Symbol::Dash),
            IntervalKind::IntraGap,
            IntervalKind::Tone(Symbol::Dot),
            IntervalKind::IntraGap,
            IntervalKind::Tone(Symbol::Dash),
            IntervalKind::RevealGap,
            IntervalKind::InterCharGap,
        ]
    );
    assert_close(intervals[5].seconds, 0.048 * 6.0);
    assert_eq!(tx.observer().reveals, vec!['K']);
}

#[test]
fn test_config_changes_apply_to_next_unit() {
    let mut tx = transmitter(PlaybackConfig::default(), ScriptedWait::default());
    tx.play_character('E');
    tx.set_config(PlaybackConfig {
        timing: TimingProfile::standard(20.0),
        ..Default::default()
    });
    tx.play_character('E');

    let intervals = &tx.observer().intervals;
    assert_close(intervals[0].seconds, 0.048);
    assert_close(intervals[2].seconds, 0.06);
    assert_close(intervals[3].seconds, 0.18);
}

#[test]
fn test_plan_matches_playback() {
    let config = PlaybackConfig::default();
    let mut tx = transmitter(config, ScriptedWait::default());
    tx.play_text("CQ DE W4ZX/QRP?");
    assert_eq!(tx.observer().intervals, plan_text("CQ DE W4ZX/QRP?", &config));
}

#[test]
fn test_paris_takes_fifty_units() {
    // PARIS plus a word space is the 50-unit reference word
    let config = PlaybackConfig {
        timing: TimingProfile::standard(20.0),
        trailing_gap: false,
        ..Default::default()
    };
    let dot = 0.06;
    assert_close(transmission_seconds("PARIS", &config), 43.0 * dot);
    assert_close(transmission_seconds("PARIS", &config) + 7.0 * dot, 50.0 * dot);
}

#[test]
fn test_virtual_clock_matches_planned_duration() {
    let clock = ManualClock::new();
    let waiter = InterruptibleWait::new(clock.clone(), ScriptedSource::new(clock.clone()));
    let config = PlaybackConfig::default();
    let mut tx = Transmitter::new(config, RecordingSink { buffers: Vec::new() }, waiter, ());

    assert_eq!(tx.play_text("MAN TEN"), PlaybackSignal::Continue);
    let expected = transmission_seconds("MAN TEN", &config);
    assert!((clock.elapsed().as_secs_f64() - expected).abs() < 1e-6);
}

#[test]
fn test_quit_from_user_interrupts_transmission() {
    let clock = ManualClock::new();
    // Intervals: dot [0, 48ms), gap [48, 96), dot [96, 144): quit lands in the third
    let source = ScriptedSource::new(clock.clone()).request_at(Duration::from_millis(100), UserRequest::Quit);
    let waiter = InterruptibleWait::new(clock.clone(), source);
    let mut tx = Transmitter::new(
        PlaybackConfig::default(),
        RecordingSink { buffers: Vec::new() },
        waiter,
        Recorder::default(),
    );

    assert_eq!(tx.play_text("SOS"), PlaybackSignal::Quit);
    assert_eq!(tx.observer().intervals.len(), 3);
    assert_eq!(clock.elapsed(), Duration::from_millis(100));
}

#[test]
fn test_zero_gap_multiplier_never_runs_characters_together() {
    let config = PlaybackConfig {
        timing: TimingProfile::new(25.0, 25.0, 0.0),
        ..Default::default()
    };
    let plan = plan_text("HI THERE", &config);
    for interval in plan.iter().filter(|i| !i.is_tone()) {
        assert!(interval.seconds > 0.0, "{:?} has zero length", interval.kind);
    }
}
