//! Lock-picking game engine.
//!
//! A lock is a short sequence of pin values. The player first has to find the
//! binding pin, the one position the lock reports on in isolation, and only
//! then gets full "n out of m pins are correct" feedback for each guess.

mod error;
mod feedback;
mod generator;
mod lock;
mod session;
mod stats;

pub use error::{GuessError, StoreError};
pub use feedback::{score, Feedback};
pub use generator::LockFactory;
pub use lock::{Guess, Lock, PinCount, PIN_MAX};
pub use session::{Completion, GameSession, SessionState, Turn};
pub use stats::{MemoryStatsStore, SaveData, StatsRecord, StatsStore};
