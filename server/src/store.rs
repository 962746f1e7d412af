use std::path::PathBuf;

use anyhow::Context;
use connect4::{PlayerStats, StatsStore};

/// Keeps the player's record as a JSON document on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatsStore for JsonFileStore {
    type Error = anyhow::Error;

    fn load(&self) -> anyhow::Result<Option<PlayerStats>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let stats = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(stats))
    }

    fn save(&self, stats: &PlayerStats) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(stats)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect4::load_or_default;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("connect4-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_file_loads_nothing() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_stats_load_back() {
        let path = temp_path("roundtrip");
        let store = JsonFileStore::new(&path);
        let mut stats = PlayerStats::named("Mo");
        stats.record_win(12);
        store.save(&stats).unwrap();
        assert_eq!(load_or_default(&store), stats);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let path = temp_path("garbage");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(load_or_default(&store), PlayerStats::default());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn unreadable_path_is_an_error_not_missing() {
        let path = temp_path("dir");
        std::fs::create_dir_all(&path).unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
        assert!(store.save(&PlayerStats::default()).is_err());
        std::fs::remove_dir(path).unwrap();
    }
}
