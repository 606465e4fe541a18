use crate::{Guess, GuessError, Lock};
use std::fmt;

/// How close a guess came to the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    /// Positions where the guess matches the lock
    pub matched: usize,
    /// Total number of pins in the lock
    pub total: usize,
}

impl Feedback {
    /// Every pin is set
    pub fn is_solved(&self) -> bool {
        self.matched == self.total
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} out of {} pins are correct", self.matched, self.total)
    }
}

/// Count the positions where `guess` agrees with `lock`.
pub fn score(lock: &Lock, guess: &Guess) -> Result<Feedback, GuessError> {
    if guess.len() != lock.len() {
        return Err(GuessError::Length {
            expected: lock.len(),
            actual: guess.len(),
        });
    }

    let matched = lock
        .pins()
        .iter()
        .zip(guess.pins())
        .filter(|(l, g)| l == g)
        .count();

    Ok(Feedback {
        matched,
        total: lock.len(),
    })
}
