//! Game phase state machine.

use std::fmt;

/// Maximum number of participants holding a role at the same time.
pub const MAX_PARTICIPANTS: usize = 2;

/// The phase of a room's game.
///
/// Transitions only ever move forward:
///
/// ```text
/// WaitingWord → Playing → Finished
/// ```
///
/// - **WaitingWord**: no secret word yet. The setter's first message
///   (once both players are present) becomes the secret.
/// - **Playing**: the guesser submits guesses, each one scored.
/// - **Finished**: a guess matched. Terminal; further input is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingWord,
    Playing,
    Finished,
}

impl Phase {
    /// Returns the phase that follows this one, or `None` when terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::WaitingWord => Some(Self::Playing),
            Self::Playing => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if moving to `target` is a legal transition.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Returns `true` once a secret word has been set.
    pub fn has_secret(self) -> bool {
        matches!(self, Self::Playing | Self::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingWord => write!(f, "WaitingWord"),
            Self::Playing => write!(f, "Playing"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_next_follows_strict_order() {
        assert_eq!(Phase::WaitingWord.next(), Some(Phase::Playing));
        assert_eq!(Phase::Playing.next(), Some(Phase::Finished));
        assert_eq!(Phase::Finished.next(), None);
    }

    #[test]
    fn test_phase_can_transition_to() {
        assert!(Phase::WaitingWord.can_transition_to(Phase::Playing));
        assert!(!Phase::WaitingWord.can_transition_to(Phase::Finished));
        assert!(!Phase::Finished.can_transition_to(Phase::WaitingWord));
    }

    #[test]
    fn test_phase_has_secret() {
        assert!(!Phase::WaitingWord.has_secret());
        assert!(Phase::Playing.has_secret());
        assert!(Phase::Finished.has_secret());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::WaitingWord.to_string(), "WaitingWord");
        assert_eq!(Phase::Finished.to_string(), "Finished");
    }
}
