use crate::GuessError;
use std::fmt;

/// Highest value a single pin can hold
pub const PIN_MAX: u8 = 9;

/// Supported lock sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PinCount {
    Four,
    #[default]
    Five,
    Six,
}

impl PinCount {
    /// Number of pins in a lock of this size
    pub fn count(&self) -> usize {
        match self {
            PinCount::Four => 4,
            PinCount::Five => 5,
            PinCount::Six => 6,
        }
    }

    /// Build from a pin count, if that size is supported
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            4 => Some(PinCount::Four),
            5 => Some(PinCount::Five),
            6 => Some(PinCount::Six),
            _ => None,
        }
    }

    /// Map a lock menu entry to a size.
    ///
    /// The menu lists the default lock first, so "1" is the 5-pin lock.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(PinCount::Five),
            "2" => Some(PinCount::Four),
            "3" => Some(PinCount::Six),
            _ => None,
        }
    }

    /// Key used for this size in the stats file, e.g. `"5-pin"`
    pub fn stats_key(&self) -> String {
        format!("{}-pin", self.count())
    }

    /// All sizes in menu order
    pub fn all() -> &'static [PinCount] {
        &[PinCount::Five, PinCount::Four, PinCount::Six]
    }
}

impl fmt::Display for PinCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-pin", self.count())
    }
}

/// The hidden pin sequence the player is trying to match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lock {
    pins: Vec<u8>,
    size: PinCount,
}

impl Lock {
    /// Create a lock from explicit pin values.
    ///
    /// Returns `None` if the length is not a supported size or any value is
    /// above [`PIN_MAX`].
    pub fn new(pins: Vec<u8>) -> Option<Self> {
        let size = PinCount::from_len(pins.len())?;
        if pins.iter().any(|&p| p > PIN_MAX) {
            return None;
        }
        Some(Self { pins, size })
    }

    pub(crate) fn from_generated(pins: Vec<u8>, size: PinCount) -> Self {
        debug_assert_eq!(pins.len(), size.count());
        Self { pins, size }
    }

    pub fn pins(&self) -> &[u8] {
        &self.pins
    }

    pub fn size(&self) -> PinCount {
        self.size
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn pin(&self, index: usize) -> Option<u8> {
        self.pins.get(index).copied()
    }
}

/// One guess at the full pin sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess(Vec<u8>);

impl Guess {
    pub fn new(pins: Vec<u8>) -> Self {
        Self(pins)
    }

    /// Parse a whitespace-separated line of pin values.
    ///
    /// Only the token format is checked here; length is checked against the
    /// lock when the guess is submitted.
    pub fn parse(line: &str) -> Result<Self, GuessError> {
        line.split_whitespace()
            .map(|token| match token.parse::<u8>() {
                Ok(value) if value <= PIN_MAX => Ok(value),
                _ => Err(GuessError::Format {
                    token: token.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn pins(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
