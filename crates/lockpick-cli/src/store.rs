use lockpick_core::{SaveData, StatsStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// File name used in the data directory
pub const STATS_FILE_NAME: &str = "lockpick_stats.json";

/// Stats kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the user's local data directory
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Get the default save file path
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(STATS_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonStatsStore {
    /// Load stats from file, falling back to empty stats
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> SaveData {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no stats file yet");
                return SaveData::default();
            }
            Err(e) => {
                warn!(error = %e, "could not read stats file, starting fresh");
                return SaveData::default();
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(error = %e, "stats file is corrupt, starting fresh");
            SaveData::default()
        })
    }

    /// Save stats to file
    #[instrument(skip(self, data), fields(path = %self.path.display()))]
    fn save(&mut self, data: &SaveData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        debug!("stats saved");
        Ok(())
    }
}
