//! Simulation configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Where to find content and which scenario to play.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub scenario: PathBuf,
    pub turns: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("crates/game/content/data"),
            scenario: PathBuf::from("crates/sim/scenarios/skirmish.ron"),
            turns: 6,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_DATA_DIR` - Content directory (default: `crates/game/content/data`)
    /// - `TACTICS_SCENARIO` - Scenario RON file (default: `crates/sim/scenarios/skirmish.ron`)
    /// - `TACTICS_TURNS` - Turns to simulate (default: 6)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("TACTICS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(path) = env::var("TACTICS_SCENARIO") {
            config.scenario = PathBuf::from(path);
        }
        if let Some(turns) = read_env::<u32>("TACTICS_TURNS") {
            config.turns = turns.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
