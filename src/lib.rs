pub mod audio;
pub mod code_table;
pub mod display;
pub mod drills;
pub mod error;
pub mod playback;
pub mod settings;
pub mod text;
pub mod timing;
pub mod tone;
pub mod wait;

pub use audio::{open_default_sink, AudioSink, NullSink};
pub use code_table::{lookup, Symbol};
pub use error::*;
pub use playback::{plan_text, transmission_seconds, Interval, IntervalKind, PlaybackConfig, PlaybackObserver, Transmitter};
pub use settings::{Settings, SettingsChange};
pub use timing::{TimingProfile, Timings};
pub use wait::{InterruptibleWait, PlaybackSignal, SystemClock};

/// Send `text` once through `sink` in real time, with no pause or quit.
/// This is the simplest entry point for the library.
pub fn send_text<A: AudioSink>(text: &str, config: PlaybackConfig, sink: A) -> PlaybackSignal {
    let waiter = InterruptibleWait::uninterruptible(SystemClock::new(), wait::NoInterrupts);
    Transmitter::new(config, sink, waiter, ()).play_text(text)
}
