//! morse-trainer - Morse code audio trainer
//!
//! Sends practice text as audible Morse with Farnsworth spacing. Press Enter
//! while sending to pause or resume, or type `q` and Enter to stop.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use morse_trainer::audio::{open_default_sink, AudioSink, NullSink};
use morse_trainer::display::{print_pause_state, ConsoleDisplay, CONTROLS_HINT};
use morse_trainer::drills::{self, SentenceSet, WordSet, CALL_SIGNS};
use morse_trainer::playback::{transmission_seconds, PlaybackConfig, Transmitter};
use morse_trainer::settings::{Settings, SettingsChange, DEFAULT_SETTINGS_FILE};
use morse_trainer::text::{load_text_file, normalize_whitespace, resolve_path};
use morse_trainer::wait::{InterruptSource, InterruptibleWait, NoInterrupts, PlaybackSignal, StdinSource, SystemClock};
use morse_trainer::TrainerError;

#[derive(Parser)]
#[command(name = "morse-trainer")]
#[command(about = "Morse code audio trainer with Farnsworth timing")]
#[command(version)]
struct Cli {
    /// Settings file (created with defaults if missing)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Keep time without playing any sound
    #[arg(long, global = true)]
    silent: bool,

    /// Do not read pause/quit requests from stdin
    #[arg(long, global = true)]
    no_interrupts: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send custom text
    Send {
        /// Text to send
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Send the contents of a text file
    File {
        /// Path to the file (~ and $VARS are expanded)
        path: String,
    },

    /// Random letters from one week's lesson, in groups of five
    Letters {
        /// Lesson week (1-9)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=9))]
        week: u8,

        /// Stop after this many letters
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Random digits
    Numbers {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Random punctuation
    Punctuation {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Random words from a word list
    Words {
        /// Word list by lesson weeks
        #[arg(value_enum)]
        set: WordSet,

        /// Number of distinct words to send
        #[arg(short, long, default_value_t = 3)]
        count: usize,
    },

    /// One random sentence
    Sentence {
        /// Sentence list by lesson weeks
        #[arg(value_enum)]
        set: SentenceSet,
    },

    /// One random call sign
    Callsign,

    /// Show or change settings
    Settings {
        /// Tone frequency in Hz (400-1000)
        #[arg(long)]
        frequency: Option<u32>,

        /// Character speed in WPM (5-60)
        #[arg(long)]
        wpm: Option<u32>,

        /// Effective Farnsworth speed in WPM (2-40)
        #[arg(long)]
        farnsworth: Option<f64>,

        /// Extra stretch of character and word gaps (0.5-5.0)
        #[arg(long)]
        gap_mult: Option<f64>,

        /// Print the code next to each character
        #[arg(long)]
        show_morse: Option<bool>,

        /// Print each character as a large block letter (turns the code display off)
        #[arg(long)]
        flash_card: Option<bool>,

        /// Speak each character after sending it
        #[arg(long)]
        voice: Option<bool>,
    },

    /// Print the interval durations for the current settings
    Timing,
}

type Waiter = InterruptibleWait<SystemClock, Box<dyn InterruptSource>>;
type Session = Transmitter<Box<dyn AudioSink>, Waiter, ConsoleDisplay>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), TrainerError> {
    // Editing must not replace a file it could not read
    if let Commands::Settings {
        frequency,
        wpm,
        farnsworth,
        gap_mult,
        show_morse,
        flash_card,
        voice,
    } = &cli.command
    {
        let change = SettingsChange {
            frequency: *frequency,
            character_wpm: *wpm,
            farnsworth_wpm: *farnsworth,
            gap_multiplier: *gap_mult,
            show_morse: *show_morse,
            flash_card: *flash_card,
            voice_enabled: *voice,
        };
        let settings = Settings::edit(&cli.settings, &change)?;
        println!("{}", settings.summary());
        return Ok(());
    }

    let settings = match Settings::load(&cli.settings) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(error = %err, path = %cli.settings.display(), "ignoring settings file, using defaults");
            Settings::default()
        }
    };

    let mut rng = rand::thread_rng();

    let text = match &cli.command {
        // Edited above
        Commands::Settings { .. } => return Ok(()),
        Commands::Timing => {
            print_timing(&settings.playback_config());
            return Ok(());
        }
        Commands::Letters { week, limit } => {
            let letters = drills::week_letters(*week)?;
            let mut session = open_session(&cli, &settings);
            let signal = drills::run_letter_drill(&mut session, letters, &mut rng, *limit);
            finish(signal);
            return Ok(());
        }
        Commands::Numbers { limit } => {
            let mut session = open_session(&cli, &settings);
            let letters = drills::week_letters(drills::NUMBERS_WEEK)?;
            finish(drills::run_letter_drill(&mut session, letters, &mut rng, *limit));
            return Ok(());
        }
        Commands::Punctuation { limit } => {
            let mut session = open_session(&cli, &settings);
            let letters = drills::week_letters(drills::PUNCTUATION_WEEK)?;
            finish(drills::run_letter_drill(&mut session, letters, &mut rng, *limit));
            return Ok(());
        }
        Commands::Send { text } => text.join(" "),
        Commands::File { path } => {
            let path = resolve_path(path)?;
            let content = load_text_file(&path)?;
            println!("\nSending file: {}\n", path.display());
            normalize_whitespace(&content)
        }
        Commands::Words { set, count } => drills::pick_text(&set.words(), *count, &mut rng),
        Commands::Sentence { set } => drills::pick_text(set.sentences(), 1, &mut rng),
        Commands::Callsign => drills::pick_text(CALL_SIGNS, 1, &mut rng),
    };

    let mut session = open_session(&cli, &settings);
    finish(session.play_text(&text));
    Ok(())
}

/// Wire up the sink, the interrupt source, and the console for one session.
fn open_session(cli: &Cli, settings: &Settings) -> Session {
    let sink: Box<dyn AudioSink> = if cli.silent {
        Box::new(NullSink::new())
    } else {
        open_default_sink()
    };

    let no_source = || -> Waiter {
        let source: Box<dyn InterruptSource> = Box::new(NoInterrupts);
        InterruptibleWait::uninterruptible(SystemClock::new(), source)
    };
    let waiter: Waiter = if cli.no_interrupts {
        no_source()
    } else {
        match StdinSource::spawn() {
            Ok(source) => {
                let source: Box<dyn InterruptSource> = Box::new(source);
                InterruptibleWait::new(SystemClock::new(), source)
            }
            Err(err) => {
                warn!(error = %err, "cannot read stdin, pause and quit are unavailable");
                no_source()
            }
        }
    };

    if !cli.no_interrupts {
        println!("{}", CONTROLS_HINT);
    }
    println!("{}\n", settings.summary());

    let waiter = waiter.with_listener(print_pause_state);
    let display =
        ConsoleDisplay::stdout(settings.show_morse, settings.voice_enabled).with_flash_cards(settings.flash_card);
    Transmitter::new(settings.playback_config(), sink, waiter, display)
}

fn finish(signal: PlaybackSignal) {
    if signal.is_quit() {
        println!("Stopped.");
    }
}

fn print_timing(config: &PlaybackConfig) {
    let profile = config.timing;
    let timings = profile.timings();
    let ms = |seconds: f64| seconds * 1000.0;

    println!(
        "Character speed: {} WPM | Effective: {} WPM | Gap multiplier: {:.2}",
        profile.character_wpm, profile.effective_wpm, profile.gap_multiplier
    );
    println!("Gap scale: {:.3}", profile.gap_scale());
    println!("Dot:                  {:8.1} ms", ms(timings.dot));
    println!("Dash:                 {:8.1} ms", ms(timings.dash));
    println!("Gap between elements: {:8.1} ms", ms(timings.intra_element_gap));
    println!("Gap between letters:  {:8.1} ms", ms(timings.inter_character_gap));
    println!("Gap between words:    {:8.1} ms", ms(timings.inter_word_gap));
    println!("\"PARIS \" takes {:.2} s", transmission_seconds("PARIS ", config));
}
