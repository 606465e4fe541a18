use crate::{PinCount, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Best results for one lock size
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Number of locks of this size picked
    pub attempts: u64,
    /// Fastest completion in seconds
    pub fastest_time: Option<f64>,
}

/// Everything that is persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Stats keyed by lock size, e.g. `"5-pin"`
    #[serde(default)]
    pub user_data: BTreeMap<String, StatsRecord>,
    /// Reserved for custom locks; carried through untouched
    #[serde(default)]
    pub locks: BTreeMap<String, serde_json::Value>,
}

impl SaveData {
    /// Record a picked lock.
    ///
    /// Returns `true` if `elapsed_secs` is a new fastest time for this size.
    pub fn record_completion(&mut self, pin_count: PinCount, elapsed_secs: f64) -> bool {
        let record = self.user_data.entry(pin_count.stats_key()).or_default();
        record.attempts += 1;

        match record.fastest_time {
            Some(best) if best <= elapsed_secs => false,
            _ => {
                record.fastest_time = Some(elapsed_secs);
                true
            }
        }
    }

    pub fn record(&self, pin_count: PinCount) -> Option<&StatsRecord> {
        self.user_data.get(&pin_count.stats_key())
    }
}

/// Whole-state persistence for [`SaveData`].
///
/// Loading never fails: a missing or unreadable store yields empty data.
pub trait StatsStore {
    fn load(&self) -> SaveData;

    fn save(&mut self, data: &SaveData) -> Result<(), StoreError>;
}

/// Store that keeps everything in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    data: SaveData,
    saves: usize,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: SaveData) -> Self {
        Self { data, saves: 0 }
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    /// How many times [`StatsStore::save`] has been called
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> SaveData {
        self.data.clone()
    }

    fn save(&mut self, data: &SaveData) -> Result<(), StoreError> {
        self.data = data.clone();
        self.saves += 1;
        Ok(())
    }
}

impl<S: StatsStore + ?Sized> StatsStore for &mut S {
    fn load(&self) -> SaveData {
        (**self).load()
    }

    fn save(&mut self, data: &SaveData) -> Result<(), StoreError> {
        (**self).save(data)
    }
}
