use std::path::PathBuf;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STATIC_DIR: &str = "web/dist";
const DEFAULT_STATS_PATH: &str = "connect4-stats.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub static_dir: PathBuf,
    pub stats_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            stats_path: PathBuf::from(DEFAULT_STATS_PATH),
        }
    }
}

impl ServerConfig {
    /// Reads `CONNECT4_ADDR`, `CONNECT4_STATIC_DIR` and `CONNECT4_STATS_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            addr: var("CONNECT4_ADDR").unwrap_or(defaults.addr),
            static_dir: var("CONNECT4_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            stats_path: var("CONNECT4_STATS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.stats_path),
        }
    }
}
