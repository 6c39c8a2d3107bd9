//! Control-plane values exchanged between the user, the wait, and the player.

/// Outcome of a wait, propagated upward through character, word, and text playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSignal {
    /// The interval elapsed normally.
    Continue,
    /// The wait has been suspended by the user (reported to listeners only).
    Paused,
    /// The wait was suspended and the user resumed.
    Resumed,
    /// The user asked to stop; nothing further may play.
    Quit,
}

impl PlaybackSignal {
    pub fn is_quit(self) -> bool {
        self == PlaybackSignal::Quit
    }
}

/// A request read from the user while something is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRequest {
    /// Pause if playing, resume if paused (Enter).
    TogglePause,
    /// Stop the current transmission (`q` then Enter).
    Quit,
}

impl UserRequest {
    /// Interpret one line of user input.
    ///
    /// An empty line toggles pause, `q` or `quit` quits, anything else is ignored.
    pub fn from_line(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => Some(UserRequest::TogglePause),
            "q" | "quit" => Some(UserRequest::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_line() {
        assert_eq!(UserRequest::from_line(""), Some(UserRequest::TogglePause));
        assert_eq!(UserRequest::from_line("  \r"), Some(UserRequest::TogglePause));
        assert_eq!(UserRequest::from_line("q"), Some(UserRequest::Quit));
        assert_eq!(UserRequest::from_line(" Q "), Some(UserRequest::Quit));
        assert_eq!(UserRequest::from_line("quit"), Some(UserRequest::Quit));
        assert_eq!(UserRequest::from_line("hello"), None);
    }
}
