//! Lesson content and practice drills.
//!
//! Letters are introduced a few at a time over the weeks of a course; the
//! word and sentence lists only use letters learned so far.

use std::fmt;

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::audio::AudioSink;
use crate::error::TrainerError;
use crate::playback::{PlaybackObserver, Transmitter};
use crate::wait::{PlaybackSignal, Wait};

/// Letters sent between inter-word spaces in a letter drill.
pub const GROUP_SIZE: usize = 5;

/// Characters practised in each week.
pub fn week_letters(week: u8) -> Result<&'static str, TrainerError> {
    let letters = match week {
        1 => "ETIANM",
        2 => "SURWDK",
        3 => "GOHVFL",
        4 => "PJBXC",
        5 => "YZQ1234567890",
        6 => ".,?/",
        7 => "ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890.,?/",
        8 => "0123456789",
        9 => ".,?/",
        _ => {
            return Err(TrainerError::InvalidParameter(format!(
                "week must be 1-9, got {}",
                week
            )))
        }
    };
    Ok(letters)
}

pub const NUMBERS_WEEK: u8 = 8;
pub const PUNCTUATION_WEEK: u8 = 9;

const WEEK1_WORDS: &[&str] = &["MAN", "TEN", "TAME", "MEAT", "TEAM", "MINE", "AMEN", "ANTI", "ITEM"];
const WEEK12_WORDS: &[&str] = &[
    "WIND", "MASK", "TANK", "STRAW", "MURDER", "WARM", "SAND", "DARK", "UNDER", "SWIM",
];
const WEEK123_WORDS: &[&str] = &[
    "FARM", "GLOVE", "WOLF", "SHADOW", "GHOST", "DISH", "NORTH", "LADDER", "FLASH", "FORK",
];
const WEEK1234_WORDS: &[&str] = &[
    "BLOCK", "JUMP", "CAMP", "PACK", "BRICK", "JAW", "SCRUB", "DUMP", "BACKUP", "SCARF",
];

const WEEK1_SENTENCES: &[&str] = &["A MAN MET ME", "AN ANT ATE ME", "I AM IN A TENT"];
const WEEK12_SENTENCES: &[&str] = &["I SAW A DARK WIND", "WE MUST STAND", "MARK WENT UNDER"];
const WEEK123_SENTENCES: &[&str] = &["GO HUNT FOR A SHADOW", "THE WOLF MOVES FAST", "HIS FARM HAD A LADDER"];
const WEEK1234_SENTENCES: &[&str] = &[
    "PACK A BACKUP FOR CAMP",
    "THE BRICK WALL WAS SCRUBBED",
    "JUMP INTO THE DARK CAMP",
];
const WEEK7_SENTENCES: &[&str] = &[
    "THE QUICK BROWN FOX JUMPS OVER LAZY DOG.",
    "PACK MY BOX WITH FIVE DOZEN LIQUOR JUGS.",
];

pub const CALL_SIGNS: &[&str] = &[
    "WA7SPY/QRP", "KB1FJZ", "N8FIT", "KA2UTL", "W4ZX", "N3BKQ", "WA5PRY/M", "N6OQN", "W8GSH",
];

/// Word lists, by the weeks whose letters they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WordSet {
    #[value(name = "1")]
    Week1,
    #[value(name = "1-2")]
    Weeks1To2,
    #[value(name = "1-3")]
    Weeks1To3,
    #[value(name = "1-4")]
    Weeks1To4,
    #[value(name = "all")]
    All,
}

impl WordSet {
    pub fn words(self) -> Vec<&'static str> {
        match self {
            WordSet::Week1 => WEEK1_WORDS.to_vec(),
            WordSet::Weeks1To2 => WEEK12_WORDS.to_vec(),
            WordSet::Weeks1To3 => WEEK123_WORDS.to_vec(),
            WordSet::Weeks1To4 => WEEK1234_WORDS.to_vec(),
            WordSet::All => [WEEK1_WORDS, WEEK12_WORDS, WEEK123_WORDS, WEEK1234_WORDS].concat(),
        }
    }
}

impl fmt::Display for WordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WordSet::Week1 => "Week 1 Words",
            WordSet::Weeks1To2 => "Weeks 1+2 Words",
            WordSet::Weeks1To3 => "Weeks 1-3 Words",
            WordSet::Weeks1To4 => "Weeks 1-4 Words",
            WordSet::All => "All Words",
        };
        write!(f, "{}", name)
    }
}

/// Sentence lists, by the weeks whose letters they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SentenceSet {
    #[value(name = "1")]
    Week1,
    #[value(name = "1-2")]
    Weeks1To2,
    #[value(name = "1-3")]
    Weeks1To3,
    #[value(name = "1-4")]
    Weeks1To4,
    #[value(name = "7")]
    Week7,
}

impl SentenceSet {
    pub fn sentences(self) -> &'static [&'static str] {
        match self {
            SentenceSet::Week1 => WEEK1_SENTENCES,
            SentenceSet::Weeks1To2 => WEEK12_SENTENCES,
            SentenceSet::Weeks1To3 => WEEK123_SENTENCES,
            SentenceSet::Weeks1To4 => WEEK1234_SENTENCES,
            SentenceSet::Week7 => WEEK7_SENTENCES,
        }
    }
}

impl fmt::Display for SentenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentenceSet::Week1 => "Week 1 Sentences",
            SentenceSet::Weeks1To2 => "Weeks 1+2 Sentences",
            SentenceSet::Weeks1To3 => "Weeks 1-3 Sentences",
            SentenceSet::Weeks1To4 => "Weeks 1-4 Sentences",
            SentenceSet::Week7 => "Week 7 Sentences",
        };
        write!(f, "{}", name)
    }
}

/// Pick random text from `list`.
///
/// With `count` above one, that many distinct entries (or the whole list if
/// shorter) are joined with spaces; otherwise a single entry is returned.
/// An empty list gives an empty string.
pub fn pick_text<R: Rng + ?Sized>(list: &[&str], count: usize, rng: &mut R) -> String {
    if count > 1 {
        list.choose_multiple(rng, count.min(list.len()))
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        list.choose(rng).map(|s| s.to_string()).unwrap_or_default()
    }
}

/// Send random characters from `letters` until the user quits.
///
/// An inter-word space is sent before every group after the first. With a
/// `limit`, the drill also ends after that many letters. Returns how the
/// drill ended.
pub fn run_letter_drill<A, W, O, R>(
    tx: &mut Transmitter<A, W, O>,
    letters: &str,
    rng: &mut R,
    limit: Option<usize>,
) -> PlaybackSignal
where
    A: AudioSink,
    W: Wait,
    O: PlaybackObserver,
    R: Rng + ?Sized,
{
    let pool: Vec<char> = letters.chars().filter(|&c| c != ' ').collect();
    if pool.is_empty() {
        return PlaybackSignal::Continue;
    }

    let mut sent = 0;
    let mut in_group = 0;
    while limit.map_or(true, |max| sent < max) {
        let Some(&letter) = pool.choose(rng) else {
            break;
        };

        if in_group >= GROUP_SIZE {
            if tx.play_character(' ').is_quit() {
                return PlaybackSignal::Quit;
            }
            in_group = 0;
        }

        if tx.play_character(letter).is_quit() {
            debug!(sent, "letter drill stopped");
            return PlaybackSignal::Quit;
        }
        sent += 1;
        in_group += 1;
    }
    PlaybackSignal::Continue
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::audio::NullSink;
    use crate::code_table::lookup;
    use crate::playback::{Interval, IntervalKind, PlaybackConfig};

    #[derive(Default)]
    struct Letters {
        sent: Vec<char>,
        word_gaps: usize,
    }

    impl PlaybackObserver for Letters {
        fn character_started(&mut self, ch: char, _code: &str) {
            self.sent.push(ch);
        }

        fn interval(&mut self, interval: &Interval) {
            if interval.kind == IntervalKind::InterWordGap {
                self.word_gaps += 1;
            }
        }
    }

    /// Continues for `quit_after` waits, then quits.
    struct CountingWait {
        waits: usize,
        quit_after: usize,
    }

    impl Wait for CountingWait {
        fn wait(&mut self, _duration_s: f64) -> PlaybackSignal {
            self.waits += 1;
            if self.waits > self.quit_after {
                PlaybackSignal::Quit
            } else {
                PlaybackSignal::Continue
            }
        }
    }

    fn drill_transmitter(quit_after: usize) -> Transmitter<NullSink, CountingWait, Letters> {
        Transmitter::new(
            PlaybackConfig::default(),
            NullSink::new(),
            CountingWait { waits: 0, quit_after },
            Letters::default(),
        )
    }

    #[test]
    fn test_week_letters_are_all_sendable() {
        for week in 1..=9 {
            let letters = week_letters(week).unwrap();
            assert!(!letters.is_empty());
            assert!(letters.chars().all(|c| lookup(c).is_some()), "week {}", week);
        }
        assert_eq!(week_letters(1).unwrap(), "ETIANM");
        assert_eq!(week_letters(NUMBERS_WEEK).unwrap(), "0123456789");
    }

    #[test]
    fn test_week_out_of_range() {
        assert!(matches!(week_letters(0), Err(TrainerError::InvalidParameter(_))));
        assert!(matches!(week_letters(10), Err(TrainerError::InvalidParameter(_))));
    }

    #[test]
    fn test_lesson_text_is_sendable() {
        let sets = [WordSet::Week1, WordSet::Weeks1To2, WordSet::Weeks1To3, WordSet::Weeks1To4, WordSet::All];
        let words = sets.iter().flat_map(|s| s.words());
        let sentences = [
            SentenceSet::Week1,
            SentenceSet::Weeks1To2,
            SentenceSet::Weeks1To3,
            SentenceSet::Weeks1To4,
            SentenceSet::Week7,
        ]
        .into_iter()
        .flat_map(|s| s.sentences().iter().copied());

        for text in words.chain(sentences).chain(CALL_SIGNS.iter().copied()) {
            assert!(
                text.chars().all(|c| c == ' ' || lookup(c).is_some()),
                "unsendable text: {}",
                text
            );
        }
        assert_eq!(WordSet::All.words().len(), 39);
    }

    #[test]
    fn test_pick_text_distinct_entries() {
        let mut rng = StdRng::seed_from_u64(7);
        let text = pick_text(WEEK1_WORDS, 3, &mut rng);
        let picked: Vec<&str> = text.split(' ').collect();

        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|w| WEEK1_WORDS.contains(w)));
        let mut unique = picked.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_pick_text_count_larger_than_list() {
        let mut rng = StdRng::seed_from_u64(1);
        let text = pick_text(&["AB", "CD"], 5, &mut rng);
        assert_eq!(text.split(' ').count(), 2);
    }

    #[test]
    fn test_pick_text_single_and_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let sign = pick_text(CALL_SIGNS, 1, &mut rng);
        assert!(CALL_SIGNS.contains(&sign.as_str()));
        assert_eq!(pick_text(&[], 1, &mut rng), "");
        assert_eq!(pick_text(&[], 4, &mut rng), "");
    }

    #[test]
    fn test_letter_drill_groups_of_five() {
        let mut tx = drill_transmitter(usize::MAX);
        let mut rng = StdRng::seed_from_u64(42);
        let letters = week_letters(1).unwrap();

        let result = run_letter_drill(&mut tx, letters, &mut rng, Some(12));
        assert_eq!(result, PlaybackSignal::Continue);

        let observer = tx.observer();
        assert_eq!(observer.sent.len(), 12);
        assert!(observer.sent.iter().all(|&c| letters.contains(c)));
        // Spaces before letters 6 and 11
        assert_eq!(observer.word_gaps, 2);
    }

    #[test]
    fn test_letter_drill_runs_until_quit() {
        let mut tx = drill_transmitter(50);
        let mut rng = StdRng::seed_from_u64(9);

        let result = run_letter_drill(&mut tx, week_letters(7).unwrap(), &mut rng, None);
        assert_eq!(result, PlaybackSignal::Quit);
        assert_eq!(tx.waiter().waits, 51);
    }

    #[test]
    fn test_letter_drill_empty_pool() {
        let mut tx = drill_transmitter(usize::MAX);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(run_letter_drill(&mut tx, "   ", &mut rng, None), PlaybackSignal::Continue);
        assert!(tx.observer().sent.is_empty());
    }
}
