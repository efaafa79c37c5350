//! Combat configuration loader.

use std::path::Path;

use tactics_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields the file omits keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e)
        })?;

        if config.hit_table.min > config.hit_table.max {
            anyhow::bail!(
                "Invalid hit table in {}: min {} exceeds max {}",
                path.display(),
                config.hit_table.min,
                config.hit_table.max
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_overrides_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "graze_window_percent = 20\n\n[hit_table]\nbase = 70\n"
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.graze_window_percent, 20);
        assert_eq!(config.hit_table.base, 70);
        assert_eq!(config.hit_table.max, 95);
        assert_eq!(
            config.default_crit_multiplier_percent,
            CombatConfig::DEFAULT_CRIT_MULTIPLIER_PERCENT
        );
    }

    #[test]
    fn inverted_hit_table_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[hit_table]\nmin = 90\nmax = 40\n").unwrap();

        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid hit table"));
    }
}
