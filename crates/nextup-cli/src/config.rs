use figment::{Figment, providers::{Format, Toml, Env, Serialized}};
use nextup_core::planner::DEFAULT_LIST_LIMIT;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "nextup.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database_path: String,
    /// Maximum number of tasks shown by `list`
    pub list_limit: u32,
    /// `tracing` filter directive, e.g. `warn` or `nextup_core=debug`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "./data/scheduler.db".to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment(CONFIG_FILE).extract()
    }

    fn figment(file: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("NEXTUP_"))
    }
}
