//! Scoring a guess against the secret word.
//!
//! `cows` counts exact positional matches. `bulls` counts every guess
//! character that can be paired with some not-yet-used character of the
//! secret, scanning the guess left to right, so a positional match is
//! counted in both and `bulls >= cows` always holds.

/// Match statistics for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Guess characters consumable from the secret's multiset of characters.
    pub bulls: usize,
    /// Positions where guess and secret hold the same character.
    pub cows: usize,
}

/// Why a guess could not be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    /// Guess and secret differ in length (counted in characters).
    #[error("expected {expected} letters, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Scores `guess` against `secret`. Both are lowercased first.
///
/// # Errors
/// Returns [`ScoreError::LengthMismatch`] when the character counts differ.
pub fn score(secret: &str, guess: &str) -> Result<Score, ScoreError> {
    let secret: Vec<char> = secret.to_lowercase().chars().collect();
    let guess: Vec<char> = guess.to_lowercase().chars().collect();

    if secret.len() != guess.len() {
        return Err(ScoreError::LengthMismatch {
            expected: secret.len(),
            actual: guess.len(),
        });
    }

    let cows = secret.iter().zip(&guess).filter(|(s, g)| s == g).count();

    let mut remaining = secret.clone();
    let mut bulls = 0;
    for ch in &guess {
        if let Some(pos) = remaining.iter().position(|c| c == ch) {
            remaining.remove(pos);
            bulls += 1;
        }
    }

    Ok(Score { bulls, cows })
}
