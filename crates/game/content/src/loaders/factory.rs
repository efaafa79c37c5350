//! Content factory for building the catalog registry from data files.

use std::path::{Path, PathBuf};

use tactics_core::CombatConfig;

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};
use crate::registry::ContentRegistry;

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── skills.ron
/// ├── statuses.ron
/// ├── units.ron
/// └── tile_effects.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("combat.toml"))
    }

    /// Load every catalog and validate cross references.
    ///
    /// Statuses, tile effects and units are registered before skills so
    /// validation sees the complete picture.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let mut registry = ContentRegistry::new();

        let path = self.data_dir.join("statuses.ron");
        for status in CatalogLoader::load_statuses(&path)? {
            registry
                .add_status(status)
                .map_err(|e| anyhow::anyhow!("{} in {}", e, path.display()))?;
        }

        let path = self.data_dir.join("tile_effects.ron");
        for tile_effect in CatalogLoader::load_tile_effects(&path)? {
            registry
                .add_tile_effect(tile_effect)
                .map_err(|e| anyhow::anyhow!("{} in {}", e, path.display()))?;
        }

        let path = self.data_dir.join("units.ron");
        for unit in CatalogLoader::load_units(&path)? {
            registry
                .add_unit(unit)
                .map_err(|e| anyhow::anyhow!("{} in {}", e, path.display()))?;
        }

        let path = self.data_dir.join("skills.ron");
        for skill in CatalogLoader::load_skills(&path)? {
            registry
                .add_skill(skill)
                .map_err(|e| anyhow::anyhow!("{} in {}", e, path.display()))?;
        }

        registry.validate().map_err(|e| {
            anyhow::anyhow!("Invalid content in {}: {}", self.data_dir.display(), e)
        })?;

        tracing::info!(
            target: "content::loader",
            data_dir = %self.data_dir.display(),
            skills = registry.skills().count(),
            statuses = registry.statuses().count(),
            units = registry.units().count(),
            tile_effects = registry.tile_effects().count(),
            "content loaded"
        );
        Ok(registry)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{CatalogOracle, SkillId, StatusId, UnitId};

    use super::*;

    const STATUSES: &str = r#"[
        (id: StatusId(1), name: "burning", max_stacks: 2, default_duration: 3),
    ]"#;

    fn write_dir(skills: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("statuses.ron"), STATUSES).unwrap();
        std::fs::write(dir.path().join("tile_effects.ron"), "[]").unwrap();
        std::fs::write(
            dir.path().join("units.ron"),
            r#"[ (id: UnitId(1), name: "turret", hp: 10, skills: [SkillId(1)]) ]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("skills.ron"), skills).unwrap();
        std::fs::write(dir.path().join("combat.toml"), "max_suppression = 80\n").unwrap();
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_and_validates_a_directory() {
        let dir = write_dir(
            r#"[
                (
                    id: SkillId(1),
                    name: "incendiary",
                    targeting: (max_range: 4),
                    effects: [(kind: ApplyStatus((status: StatusId(1))))],
                ),
            ]"#,
        );
        let factory = ContentFactory::new(dir.path());

        let registry = factory.load_registry().unwrap();
        assert!(registry.skill(SkillId(1)).is_some());
        assert!(registry.status(StatusId(1)).is_some());
        assert_eq!(registry.unit(UnitId(1)).map(|u| u.hp), Some(10));
        assert_eq!(factory.load_config().unwrap().max_suppression, 80);
    }

    #[test]
    fn dangling_reference_fails_the_load() {
        let dir = write_dir(
            r#"[
                (
                    id: SkillId(1),
                    name: "toxin",
                    targeting: (max_range: 4),
                    effects: [(kind: ApplyStatus((status: StatusId(5))))],
                ),
            ]"#,
        );

        let err = ContentFactory::new(dir.path()).load_registry().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid content"), "{message}");
        assert!(message.contains("toxin"), "{message}");
    }

    #[test]
    fn bundled_content_is_valid() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let registry = factory.load_registry().unwrap();
        assert!(registry.skills().count() >= 5);
        factory.load_config().unwrap();
    }
}
