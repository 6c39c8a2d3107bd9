//! # Error Types
//!
//! This module defines all error types for the Morse trainer.
//!
//! None of these errors stop a transmission in progress. The playback engine
//! degrades instead of failing: a broken audio device turns tones into silent
//! timing, and a broken interrupt source turns interruptible waits into plain
//! sleeps. Errors surface to callers only where a caller can act on them
//! (bad settings, unreadable files, device start-up).
//!
//! ## Error Types
//! - `InvalidParameter` - A speed, frequency, or sample rate outside its allowed range
//! - `AudioOutputUnavailable` - The output device could not be opened or stopped working
//! - `InterruptSourceUnavailable` - Pause/quit requests can no longer be read
//! - `SettingsError` - The settings file could not be parsed or written
//! - `FileError` - A text file could not be read
//!
//! ## Usage
//! ```rust
//! use morse_trainer::{Settings, TrainerError};
//!
//! let mut settings = Settings::default();
//! match settings.set_frequency(1200) {
//!     Ok(()) => println!("Frequency updated"),
//!     Err(TrainerError::InvalidParameter(message)) => eprintln!("{}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    /// A parameter outside its allowed range.
    ///
    /// # Example
    /// ```
    /// # use morse_trainer::TrainerError;
    /// let err = TrainerError::InvalidParameter("frequency must be 400-1000 Hz, got 1200".to_string());
    /// assert_eq!(err.to_string(), "Invalid parameter: frequency must be 400-1000 Hz, got 1200");
    /// ```
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The audio output device is missing or has failed.
    ///
    /// Playback continues without sound when this occurs.
    #[error("Audio output unavailable: {0}")]
    AudioOutputUnavailable(String),

    /// Pause/quit requests can no longer be read.
    ///
    /// Waits fall back to uninterruptible sleeps when this occurs.
    #[error("Interrupt source unavailable: {0}")]
    InterruptSourceUnavailable(String),

    /// The settings file could not be parsed or written.
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// A text file could not be read.
    ///
    /// # Example
    /// ```
    /// # use morse_trainer::TrainerError;
    /// let err = TrainerError::FileError {
    ///     path: "/tmp/qso.txt".to_string(),
    ///     message: "No such file or directory".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "File error for '/tmp/qso.txt': No such file or directory");
    /// ```
    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },
}
