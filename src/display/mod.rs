//! Console output while sending.

pub mod glyphs;

use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::TrainerError;
use crate::playback::PlaybackObserver;
use crate::wait::PlaybackSignal;

pub const PAUSE_PROMPT: &str = "PAUSED - Press Enter to continue, or type 'q' to quit...";
pub const RESUME_MESSAGE: &str = "RESUMED";
pub const CONTROLS_HINT: &str = "Press [Enter] to Pause. Press [q] then [Enter] to Stop.";

/// Prints each character as it is sent and speaks it on reveal.
///
/// In flash-card mode the character is drawn as a block letter instead of
/// the `Sending:` line, and its code is never shown.
pub struct ConsoleDisplay<W = io::Stdout> {
    out: W,
    show_morse: bool,
    flash_cards: bool,
    speak: bool,
}

impl ConsoleDisplay {
    pub fn stdout(show_morse: bool, speak: bool) -> Self {
        Self::new(io::stdout(), show_morse, speak)
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, show_morse: bool, speak: bool) -> Self {
        Self {
            out,
            show_morse,
            flash_cards: false,
            speak,
        }
    }

    pub fn with_flash_cards(mut self, on: bool) -> Self {
        self.flash_cards = on;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // A closed stdout is not worth stopping a transmission for
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

impl<W: Write> PlaybackObserver for ConsoleDisplay<W> {
    fn character_started(&mut self, ch: char, code: &str) {
        if self.flash_cards {
            if let Some(card) = glyphs::render(ch) {
                self.line("\n\n");
                self.line(&card);
                return;
            }
        }
        let text = if self.show_morse {
            format!("Sending: {} ({})", ch, code)
        } else {
            format!("Sending: {}", ch)
        };
        self.line(&text);
    }

    fn reveal(&mut self, ch: char) {
        if self.speak {
            speak(ch);
        }
    }

    fn audio_failed(&mut self, error: &TrainerError) {
        self.line(&format!("{} - continuing without sound", error));
    }
}

/// Print the pause prompt and the resume notice.
pub fn print_pause_state(signal: PlaybackSignal) {
    match signal {
        PlaybackSignal::Paused => println!("\n{}", PAUSE_PROMPT),
        PlaybackSignal::Resumed => println!("{}", RESUME_MESSAGE),
        PlaybackSignal::Continue | PlaybackSignal::Quit => {}
    }
}

/// Say a character aloud with the platform speech command, if there is one.
pub fn speak(ch: char) {
    let text = ch.to_lowercase().to_string();
    let program = if cfg!(target_os = "macos") { "say" } else { "espeak" };
    let status = Command::new(program)
        .arg(&text)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(err) = status {
        debug!(program, error = %err, "speech unavailable");
    }
}
