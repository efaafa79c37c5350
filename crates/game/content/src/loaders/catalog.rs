//! Template catalog loaders.

use std::path::Path;

use serde::de::DeserializeOwned;
use tactics_core::{SkillTemplate, StatusTemplate, TileEffectTemplate, UnitTemplate};

use crate::loaders::{LoadResult, read_file};

/// Loader for the RON template catalogs.
///
/// Each catalog file is a RON list of core template values:
///
/// ```ron
/// [
///     (id: StatusId(1), name: "bleeding", max_stacks: 3, default_duration: 2),
/// ]
/// ```
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load_skills(path: &Path) -> LoadResult<Vec<SkillTemplate>> {
        load_list(path, "skill")
    }

    pub fn load_statuses(path: &Path) -> LoadResult<Vec<StatusTemplate>> {
        load_list(path, "status")
    }

    pub fn load_units(path: &Path) -> LoadResult<Vec<UnitTemplate>> {
        load_list(path, "unit")
    }

    pub fn load_tile_effects(path: &Path) -> LoadResult<Vec<TileEffectTemplate>> {
        load_list(path, "tile effect")
    }
}

fn load_list<T: DeserializeOwned>(path: &Path, kind: &str) -> LoadResult<Vec<T>> {
    let content = read_file(path)?;
    let entries: Vec<T> = ron::from_str(&content).map_err(|e| {
        anyhow::anyhow!("Failed to parse {} catalog RON {}: {}", kind, path.display(), e)
    })?;

    tracing::debug!(
        target: "content::loader",
        path = %path.display(),
        kind,
        count = entries.len(),
        "catalog loaded"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tactics_core::{
        AreaShape, EffectKind, EffectTarget, FactionFilter, Magnitude, SkillId, StackPolicy,
        StatusId,
    };

    use super::*;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn skill_catalog_uses_field_defaults() {
        let file = write(
            r#"[
                (
                    id: SkillId(7),
                    name: "frag grenade",
                    targeting: (max_range: 6),
                    area: (shape: Square, radius: 1),
                    costs: (action_points: 2, ammo: 1),
                    cooldown: 2,
                    effects: [
                        (kind: Damage((value: Flat(8), damage_type: Explosive, can_crit: true)), target: Area),
                        (kind: ApplyStatus((status: StatusId(1), chance: 40)), target: EnemiesInArea, delay: 1),
                    ],
                ),
            ]"#,
        );

        let skills = CatalogLoader::load_skills(file.path()).unwrap();
        let grenade = &skills[0];
        assert_eq!(grenade.id, SkillId(7));
        assert_eq!(grenade.area.shape, AreaShape::Square);
        assert_eq!(grenade.area.filter, FactionFilter::Any);
        assert_eq!(grenade.targeting.min_range, 0);
        assert!(!grenade.always_hits);

        let EffectKind::Damage(damage) = &grenade.effects[0].kind else {
            panic!("expected damage, got {:?}", grenade.effects[0].kind);
        };
        assert_eq!(damage.value, Magnitude::Flat(8));
        assert_eq!(grenade.effects[0].duration, -1);

        let status = &grenade.effects[1];
        assert_eq!(status.target, EffectTarget::EnemiesInArea);
        assert_eq!(status.delay, 1);
        let EffectKind::ApplyStatus(apply) = &status.kind else {
            panic!("expected status, got {:?}", status.kind);
        };
        assert_eq!((apply.chance, apply.stacks, apply.resistible), (40, 1, false));
    }

    #[test]
    fn status_catalog_parses() {
        let file = write(
            r#"[
                (id: StatusId(1), name: "bleeding", max_stacks: 3, default_duration: 2),
                (id: StatusId(2), name: "stunned", max_stacks: 1, default_duration: 1, stacking: Refresh, blocks_skills: true),
            ]"#,
        );

        let statuses = CatalogLoader::load_statuses(file.path()).unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].stacking, StackPolicy::Stack);
        assert_eq!(statuses[1].id, StatusId(2));
        assert!(statuses[1].blocks_skills);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let file = write("[ (id: StatusId(1), name: ) ]");
        let err = CatalogLoader::load_statuses(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("status catalog"));
        assert!(message.contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogLoader::load_units(&dir.path().join("units.ron")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file"));
    }
}
