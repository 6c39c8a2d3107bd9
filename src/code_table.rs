//! International Morse code table
//!
//! Maps characters to their dot/dash code strings. The table is fixed for the
//! lifetime of the process: letters, digits, and the four punctuation marks
//! taught by the trainer (`. , ? /`).

/// A single element of a Morse character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// One dot unit of tone (`.`)
    Dot,
    /// Three dot units of tone (`-`)
    Dash,
}

impl Symbol {
    /// Tone length of this element in dot units.
    pub fn units(self) -> f64 {
        match self {
            Symbol::Dot => 1.0,
            Symbol::Dash => 3.0,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }
}

/// Every character the table knows, in teaching order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890.,?/";

/// Look up the code string for a character.
///
/// Lookup is case-insensitive. Returns `None` for characters outside the
/// table, including the space character (spaces are word gaps, not codes).
///
/// # Examples
/// ```
/// use morse_trainer::code_table::lookup;
///
/// assert_eq!(lookup('A'), Some(".-"));
/// assert_eq!(lookup('s'), Some("..."));
/// assert_eq!(lookup('/'), Some("-..-."));
/// assert_eq!(lookup(' '), None);
/// assert_eq!(lookup('#'), None);
/// ```
pub fn lookup(ch: char) -> Option<&'static str> {
    let code = match ch.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '0' => "-----",
        '.' => ".-.-.-",
        ',' => "--..--",
        '?' => "..--..",
        '/' => "-..-.",
        _ => return None,
    };
    Some(code)
}

/// Whether the character can be sent (it has a code or is a word space).
pub fn is_playable(ch: char) -> bool {
    ch == ' ' || lookup(ch).is_some()
}

/// Parse a code string into its elements, skipping anything that is not `.` or `-`.
pub fn symbols(code: &str) -> Vec<Symbol> {
    code.chars().filter_map(Symbol::from_char).collect()
}
