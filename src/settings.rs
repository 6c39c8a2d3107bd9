//! Trainer settings (morse_settings.yaml)
//!
//! Handles loading, saving, validating, and providing defaults for the
//! user-adjustable settings. Settings are stored as YAML with kebab-case keys.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TrainerError;
use crate::playback::PlaybackConfig;
use crate::timing::TimingProfile;

/// Default settings file name, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "morse_settings.yaml";

pub const FREQUENCY_RANGE: (u32, u32) = (400, 1000);
pub const CHARACTER_WPM_RANGE: (u32, u32) = (5, 60);
pub const FARNSWORTH_WPM_RANGE: (f64, f64) = (2.0, 40.0);
pub const GAP_MULTIPLIER_RANGE: (f64, f64) = (0.5, 5.0);

/// User settings.
///
/// Missing keys in a settings file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Tone pitch in Hz (default: 500, range: 400-1000)
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    /// Character (dot) speed (default: 25, range: 5-60)
    #[serde(default = "default_character_wpm")]
    pub character_wpm: u32,
    /// Effective speed set through spacing (default: 5.0, range: 2-40)
    #[serde(default = "default_farnsworth_wpm")]
    pub farnsworth_wpm: f64,
    /// Extra stretch of character and word gaps (default: 2.0, range: 0.5-5.0)
    #[serde(default = "default_gap_multiplier")]
    pub gap_multiplier: f64,
    /// Print the code next to each character sent
    #[serde(default)]
    pub show_morse: bool,
    /// Print each character as a large block glyph (default: on)
    #[serde(default = "default_true")]
    pub flash_card: bool,
    /// Speak each character after it is sent
    #[serde(default)]
    pub voice_enabled: bool,
}

fn default_frequency() -> u32 {
    500
}
fn default_character_wpm() -> u32 {
    25
}
fn default_farnsworth_wpm() -> f64 {
    5.0
}
fn default_gap_multiplier() -> f64 {
    2.0
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            character_wpm: default_character_wpm(),
            farnsworth_wpm: default_farnsworth_wpm(),
            gap_multiplier: default_gap_multiplier(),
            show_morse: false,
            flash_card: default_true(),
            voice_enabled: false,
        }
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(name: &str, value: T, (min, max): (T, T)) -> Result<(), TrainerError> {
    // NaN fails both comparisons and is rejected
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(TrainerError::InvalidParameter(format!(
            "{} must be {}-{}, got {}",
            name, min, max, value
        )))
    }
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing or empty file yields the defaults. After loading, the full
    /// settings are written back so the file always lists every key; a failed
    /// write-back is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// `SettingsError` if the file cannot be read or parsed, `InvalidParameter`
    /// if it holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self, TrainerError> {
        let settings = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| TrainerError::SettingsError(format!("{}: {}", path.display(), e)))?;
            Self::from_yaml(&content)?
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Self::default()
        };

        if let Err(err) = settings.save(path) {
            warn!(error = %err, "could not write settings back");
        }
        Ok(settings)
    }

    /// Parse and validate settings from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, TrainerError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings =
            serde_yaml::from_str(content).map_err(|e| TrainerError::SettingsError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write the settings to `path` as YAML.
    pub fn save(&self, path: &Path) -> Result<(), TrainerError> {
        let content = serde_yaml::to_string(self).map_err(|e| TrainerError::SettingsError(e.to_string()))?;
        fs::write(path, content).map_err(|e| TrainerError::SettingsError(format!("{}: {}", path.display(), e)))
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), TrainerError> {
        check_range("frequency", self.frequency, FREQUENCY_RANGE)?;
        check_range("character WPM", self.character_wpm, CHARACTER_WPM_RANGE)?;
        check_range("Farnsworth WPM", self.farnsworth_wpm, FARNSWORTH_WPM_RANGE)?;
        check_range("gap multiplier", self.gap_multiplier, GAP_MULTIPLIER_RANGE)
    }

    pub fn set_frequency(&mut self, hz: u32) -> Result<(), TrainerError> {
        check_range("frequency", hz, FREQUENCY_RANGE)?;
        self.frequency = hz;
        Ok(())
    }

    pub fn set_character_wpm(&mut self, wpm: u32) -> Result<(), TrainerError> {
        check_range("character WPM", wpm, CHARACTER_WPM_RANGE)?;
        self.character_wpm = wpm;
        Ok(())
    }

    pub fn set_farnsworth_wpm(&mut self, wpm: f64) -> Result<(), TrainerError> {
        check_range("Farnsworth WPM", wpm, FARNSWORTH_WPM_RANGE)?;
        self.farnsworth_wpm = wpm;
        Ok(())
    }

    pub fn set_gap_multiplier(&mut self, multiplier: f64) -> Result<(), TrainerError> {
        check_range("gap multiplier", multiplier, GAP_MULTIPLIER_RANGE)?;
        self.gap_multiplier = multiplier;
        Ok(())
    }

    /// Flash cards replace the code display, so turning them on hides the code.
    pub fn set_flash_card(&mut self, on: bool) {
        self.flash_card = on;
        if on {
            self.show_morse = false;
        }
    }

    /// Load the file at `path`, apply `change`, and save the result.
    ///
    /// A file that fails to load is left untouched and the error returned,
    /// so valid keys are never replaced by defaults. Nothing is written if
    /// any requested value is out of range.
    pub fn edit(path: &Path, change: &SettingsChange) -> Result<Self, TrainerError> {
        let mut settings = Self::load(path)?;
        change.apply(&mut settings)?;
        settings.save(path)?;
        Ok(settings)
    }

    pub fn timing_profile(&self) -> TimingProfile {
        TimingProfile::new(self.character_wpm as f64, self.farnsworth_wpm, self.gap_multiplier)
    }

    /// The configuration the transmitter reads at the start of each unit.
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            timing: self.timing_profile(),
            frequency_hz: self.frequency as f64,
            trailing_gap: true,
            voice_reveal: self.voice_enabled,
        }
    }

    /// One-line summary for the status display.
    pub fn summary(&self) -> String {
        format!(
            "Display: {} | Flash: {} | Voice: {} | WPM: {} | Farnsworth: {} | GapMult: {:.2} | Frequency: {}Hz",
            on_off(self.show_morse),
            on_off(self.flash_card),
            on_off(self.voice_enabled),
            self.character_wpm,
            self.farnsworth_wpm,
            self.gap_multiplier,
            self.frequency
        )
    }
}

/// Requested changes to the settings; `None` leaves a value as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsChange {
    pub frequency: Option<u32>,
    pub character_wpm: Option<u32>,
    pub farnsworth_wpm: Option<f64>,
    pub gap_multiplier: Option<f64>,
    pub show_morse: Option<bool>,
    pub flash_card: Option<bool>,
    pub voice_enabled: Option<bool>,
}

impl SettingsChange {
    /// Apply every requested change, stopping at the first invalid value.
    ///
    /// Flash cards are applied after the code display, so asking for both
    /// leaves flash cards on and the code hidden.
    pub fn apply(&self, settings: &mut Settings) -> Result<(), TrainerError> {
        if let Some(hz) = self.frequency {
            settings.set_frequency(hz)?;
        }
        if let Some(wpm) = self.character_wpm {
            settings.set_character_wpm(wpm)?;
        }
        if let Some(wpm) = self.farnsworth_wpm {
            settings.set_farnsworth_wpm(wpm)?;
        }
        if let Some(multiplier) = self.gap_multiplier {
            settings.set_gap_multiplier(multiplier)?;
        }
        if let Some(flag) = self.show_morse {
            settings.show_morse = flag;
        }
        if let Some(flag) = self.flash_card {
            settings.set_flash_card(flag);
        }
        if let Some(flag) = self.voice_enabled {
            settings.voice_enabled = flag;
        }
        Ok(())
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}
