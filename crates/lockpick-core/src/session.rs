use crate::{
    score, Feedback, Guess, GuessError, Lock, LockFactory, PinCount, SaveData, StatsStore,
    StoreError,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Where the player is in picking the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Only the binding pin is checked
    FindingBindingPin,
    /// Full feedback is given for every guess
    Solving,
    /// The lock is open
    Solved,
}

/// Outcome of one accepted guess
#[derive(Debug)]
pub enum Turn {
    /// The binding pin was hit; `position` is 1-based
    BindingPinFound { position: usize },
    /// The binding pin was missed. Nothing else is revealed.
    BindingPinMissed,
    /// Feedback for a guess that did not open the lock
    Feedback(Feedback),
    /// The lock is open
    Unlocked(Completion),
}

/// Result of picking the lock
#[derive(Debug)]
pub struct Completion {
    pub pin_count: PinCount,
    pub feedback: Feedback,
    pub elapsed: Duration,
    /// The elapsed time beat the stored fastest time for this size
    pub new_best: bool,
    /// Set if the stats could not be saved; the result still stands
    pub save_error: Option<StoreError>,
}

/// A single round: one lock, played until it opens
pub struct GameSession<S: StatsStore> {
    lock: Lock,
    binding_pin: usize,
    state: SessionState,
    start_time: Instant,
    elapsed: Option<Duration>,
    guesses: usize,
    store: S,
    stats: SaveData,
}

impl<S: StatsStore> GameSession<S> {
    /// Start a round with a freshly generated lock.
    ///
    /// Stats are loaded from `store` once, here.
    pub fn new(pin_count: PinCount, factory: &mut LockFactory, store: S) -> Self {
        let lock = factory.generate_lock(pin_count);
        let binding_pin = factory.select_binding_pin(&lock);
        Self::start(lock, binding_pin, store)
    }

    /// Start a round with a known lock and binding pin.
    ///
    /// Returns `None` if `binding_pin` is out of range for the lock.
    pub fn with_lock(lock: Lock, binding_pin: usize, store: S) -> Option<Self> {
        (binding_pin < lock.len()).then(|| Self::start(lock, binding_pin, store))
    }

    fn start(lock: Lock, binding_pin: usize, store: S) -> Self {
        let stats = store.load();
        info!(pin_count = %lock.size(), "starting session");
        Self {
            lock,
            binding_pin,
            state: SessionState::FindingBindingPin,
            start_time: Instant::now(),
            elapsed: None,
            guesses: 0,
            store,
            stats,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pin_count(&self) -> PinCount {
        self.lock.size()
    }

    /// 0-based index of the binding pin
    pub fn binding_pin(&self) -> usize {
        self.binding_pin
    }

    pub fn lock(&self) -> &Lock {
        &self.lock
    }

    /// Number of accepted guesses so far
    pub fn guesses(&self) -> usize {
        self.guesses
    }

    /// Time since the round started, frozen once the lock opens
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start_time.elapsed())
    }

    /// Stats as loaded at start, plus this round's completion if any
    pub fn stats(&self) -> &SaveData {
        &self.stats
    }

    /// Parse a line of input and submit it as a guess
    pub fn submit_line(&mut self, line: &str) -> Result<Turn, GuessError> {
        let guess = Guess::parse(line)?;
        self.submit(&guess)
    }

    /// Submit a guess.
    ///
    /// Rejected guesses leave the session exactly as it was.
    #[instrument(skip(self, guess), fields(state = ?self.state))]
    pub fn submit(&mut self, guess: &Guess) -> Result<Turn, GuessError> {
        if self.state == SessionState::Solved {
            return Err(GuessError::Finished);
        }
        if guess.len() != self.lock.len() {
            debug!(actual = guess.len(), "rejected guess with wrong length");
            return Err(GuessError::Length {
                expected: self.lock.len(),
                actual: guess.len(),
            });
        }

        self.guesses += 1;

        match self.state {
            SessionState::FindingBindingPin => Ok(self.check_binding_pin(guess)),
            SessionState::Solving => self.check_full(guess),
            SessionState::Solved => Err(GuessError::Finished),
        }
    }

    fn check_binding_pin(&mut self, guess: &Guess) -> Turn {
        let index = self.binding_pin;
        if guess.pins()[index] == self.lock.pins()[index] {
            debug!(guesses = self.guesses, "binding pin found");
            self.state = SessionState::Solving;
            Turn::BindingPinFound { position: index + 1 }
        } else {
            Turn::BindingPinMissed
        }
    }

    fn check_full(&mut self, guess: &Guess) -> Result<Turn, GuessError> {
        let feedback = score(&self.lock, guess)?;
        if !feedback.is_solved() {
            return Ok(Turn::Feedback(feedback));
        }

        let elapsed = self.start_time.elapsed();
        self.elapsed = Some(elapsed);
        self.state = SessionState::Solved;

        let pin_count = self.lock.size();
        let new_best = self
            .stats
            .record_completion(pin_count, elapsed.as_secs_f64());
        info!(
            %pin_count,
            secs = elapsed.as_secs_f64(),
            guesses = self.guesses,
            new_best,
            "lock picked"
        );

        let save_error = self.store.save(&self.stats).err();
        if let Some(err) = &save_error {
            warn!(error = %err, "failed to save stats");
        }

        Ok(Turn::Unlocked(Completion {
            pin_count,
            feedback,
            elapsed,
            new_best,
            save_error,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStatsStore;

    fn session(store: &mut MemoryStatsStore) -> GameSession<&mut MemoryStatsStore> {
        let lock = Lock::new(vec![3, 1, 4, 1, 5]).unwrap();
        GameSession::with_lock(lock, 2, store).unwrap()
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl StatsStore for ReadOnlyStore {
        fn load(&self) -> SaveData {
            SaveData::default()
        }

        fn save(&mut self, _data: &SaveData) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_full_round() {
        let mut store = MemoryStatsStore::new();
        let mut game = session(&mut store);
        assert_eq!(game.state(), SessionState::FindingBindingPin);

        match game.submit_line("0 0 4 0 0").unwrap() {
            Turn::BindingPinFound { position } => assert_eq!(position, 3),
            other => panic!("unexpected turn: {:?}", other),
        }
        assert_eq!(game.state(), SessionState::Solving);

        match game.submit_line("3 1 4 1 5").unwrap() {
            Turn::Unlocked(completion) => {
                assert_eq!(completion.feedback.to_string(), "5 out of 5 pins are correct");
                assert_eq!(completion.pin_count, PinCount::Five);
                assert!(completion.new_best);
                assert!(completion.save_error.is_none());
            }
            other => panic!("unexpected turn: {:?}", other),
        }
        assert_eq!(game.state(), SessionState::Solved);
        assert_eq!(game.guesses(), 2);

        drop(game);
        assert_eq!(store.saves(), 1);
        let record = store.data().record(PinCount::Five).unwrap();
        assert_eq!(record.attempts, 1);
        assert!(record.fastest_time.is_some());
    }

    #[test]
    fn test_binding_phase_reveals_nothing_else() {
        let mut store = MemoryStatsStore::new();
        let mut game = session(&mut store);

        // Every other pin right, binding pin wrong
        for _ in 0..5 {
            let turn = game.submit_line("3 1 0 1 5").unwrap();
            assert!(matches!(turn, Turn::BindingPinMissed));
            assert_eq!(game.state(), SessionState::FindingBindingPin);
        }

        assert!(matches!(
            game.submit_line("9 9 4 9 9").unwrap(),
            Turn::BindingPinFound { position: 3 }
        ));

        // A second binding hit is scored normally, not reported again
        match game.submit_line("9 9 4 9 9").unwrap() {
            Turn::Feedback(feedback) => assert_eq!(feedback, Feedback { matched: 1, total: 5 }),
            other => panic!("unexpected turn: {:?}", other),
        }
        assert_eq!(game.state(), SessionState::Solving);
    }

    #[test]
    fn test_solving_gives_feedback_each_turn() {
        let mut store = MemoryStatsStore::new();
        let mut game = session(&mut store);
        game.submit_line("0 0 4 0 0").unwrap();

        for (line, expected) in [("0 0 0 0 0", 0), ("3 0 0 0 0", 1), ("3 1 4 1 0", 4)] {
            match game.submit_line(line).unwrap() {
                Turn::Feedback(feedback) => {
                    assert_eq!(feedback.matched, expected);
                    assert_eq!(feedback.total, 5);
                }
                other => panic!("unexpected turn: {:?}", other),
            }
        }
        assert_eq!(game.state(), SessionState::Solving);
        drop(game);
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_wrong_length_changes_nothing() {
        let mut store = MemoryStatsStore::new();
        let mut game = session(&mut store);
        let lock_before = game.lock().clone();

        for line in ["3 1 4", "", "3 1 4 1 5 9"] {
            assert!(matches!(
                game.submit_line(line),
                Err(GuessError::Length { expected: 5, .. })
            ));
        }
        assert_eq!(
            game.submit_line("0 0 4").unwrap_err(),
            GuessError::Length {
                expected: 5,
                actual: 3
            }
        );

        assert_eq!(game.state(), SessionState::FindingBindingPin);
        assert_eq!(game.lock(), &lock_before);
        assert_eq!(game.binding_pin(), 2);
        assert_eq!(game.guesses(), 0);
        drop(game);
        assert_eq!(store.saves(), 0);
        assert_eq!(store.data(), &SaveData::default());
    }

    #[test]
    fn test_bad_tokens_rejected() {
        let mut store = MemoryStatsStore::new();
        let mut game = session(&mut store);

        let err = game.submit_line("0 0 four 0 0").unwrap_err();
        assert_eq!(err, GuessError::Format { token: "four".to_string() });
        let err = game.submit_line("0 0 4 0 12").unwrap_err();
        assert_eq!(err, GuessError::Format { token: "12".to_string() });

        assert_eq!(game.state(), SessionState::FindingBindingPin);
        assert_eq!(game.guesses(), 0);
    }

    #[test]
    fn test_solved_is_terminal() {
        let mut store = MemoryStatsStore::new();
        let mut game = session(&mut store);
        game.submit_line("0 0 4 0 0").unwrap();
        game.submit_line("3 1 4 1 5").unwrap();

        let elapsed = game.elapsed();
        assert_eq!(game.submit_line("3 1 4 1 5").unwrap_err(), GuessError::Finished);
        assert_eq!(game.submit_line("1").unwrap_err(), GuessError::Finished);
        assert_eq!(game.elapsed(), elapsed);

        drop(game);
        assert_eq!(store.saves(), 1);
        assert_eq!(store.data().record(PinCount::Five).unwrap().attempts, 1);
    }

    #[test]
    fn test_completion_adds_to_existing_stats() {
        let mut data = SaveData::default();
        data.record_completion(PinCount::Five, 0.0);
        data.record_completion(PinCount::Four, 7.0);
        let mut store = MemoryStatsStore::with_data(data);

        let mut game = session(&mut store);
        game.submit_line("0 0 4 0 0").unwrap();
        match game.submit_line("3 1 4 1 5").unwrap() {
            Turn::Unlocked(completion) => assert!(!completion.new_best),
            other => panic!("unexpected turn: {:?}", other),
        }

        drop(game);
        let five = store.data().record(PinCount::Five).unwrap();
        assert_eq!(five.attempts, 2);
        assert_eq!(five.fastest_time, Some(0.0));
        assert_eq!(store.data().record(PinCount::Four).unwrap().attempts, 1);
    }

    #[test]
    fn test_save_failure_keeps_result() {
        let lock = Lock::new(vec![0, 0, 0, 0]).unwrap();
        let mut game = GameSession::with_lock(lock, 0, ReadOnlyStore).unwrap();
        game.submit_line("0 1 1 1").unwrap();

        match game.submit_line("0 0 0 0").unwrap() {
            Turn::Unlocked(completion) => {
                assert!(completion.feedback.is_solved());
                assert!(completion.save_error.is_some());
            }
            other => panic!("unexpected turn: {:?}", other),
        }
        assert_eq!(game.state(), SessionState::Solved);
        assert_eq!(game.stats().record(PinCount::Four).unwrap().attempts, 1);
    }

    #[test]
    fn test_with_lock_rejects_bad_binding_pin() {
        let lock = Lock::new(vec![1, 2, 3, 4]).unwrap();
        assert!(GameSession::with_lock(lock.clone(), 4, MemoryStatsStore::new()).is_none());
        assert!(GameSession::with_lock(lock, 3, MemoryStatsStore::new()).is_some());
    }

    #[test]
    fn test_generated_session() {
        let mut factory = LockFactory::with_seed(99);
        let game = GameSession::new(PinCount::Six, &mut factory, MemoryStatsStore::new());

        assert_eq!(game.pin_count(), PinCount::Six);
        assert_eq!(game.lock().len(), 6);
        assert!(game.binding_pin() < 6);
        assert_eq!(game.state(), SessionState::FindingBindingPin);
    }
}
