use std::path::{Path, PathBuf};

use tactics_content::ContentFactory;
use tactics_core::{EntityId, StatusId, Tile, TileEffectId};
use tactics_sim::{Scenario, run};

fn content() -> ContentFactory {
    ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("../game/content/data"))
}

fn scenario_file(ron: &str) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), ron).unwrap();
    file
}

const MARK_TWICE: &str = r#"(
    name: "mark twice",
    width: 8,
    height: 4,
    units: [
        (unit: UnitId(5), faction: Player, tile: (x: 1, y: 1)),
        (unit: UnitId(1), faction: Enemy, tile: (x: 5, y: 1)),
    ],
    script: [
        (turn: 0, actor: EntityId(1), skill: SkillId(8), target: (x: 5, y: 1)),
        (turn: 1, actor: EntityId(1), skill: SkillId(8), target: (x: 5, y: 1)),
    ],
)"#;

#[test]
fn delayed_strike_lands_and_cooldown_rejects_reuse() {
    let factory = content();
    let registry = factory.load_registry().unwrap();
    let config = factory.load_config().unwrap();
    let file = scenario_file(MARK_TWICE);
    let scenario = Scenario::load(file.path()).unwrap();

    let report = run(&scenario, &registry, &config, 3).unwrap();
    assert_eq!(report.uses, 1);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.pending, 0);

    let enemy = report.battlefield.entity(EntityId(2)).unwrap();
    assert_eq!(enemy.hp.current, 14 - 9);
    assert!(enemy.statuses.has(StatusId(3)));
    assert!(
        report
            .battlefield
            .tile_effects
            .has(Tile::new(5, 1), TileEffectId(2))
    );
}

#[test]
fn replays_produce_identical_digests() {
    let factory = content();
    let registry = factory.load_registry().unwrap();
    let config = factory.load_config().unwrap();
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/skirmish.ron");
    let scenario = Scenario::load(&path).unwrap();

    let first = run(&scenario, &registry, &config, 6).unwrap();
    let second = run(&scenario, &registry, &config, 6).unwrap();
    assert_eq!(hex::encode(first.digest), hex::encode(second.digest));
    assert_eq!(first.uses, second.uses);
    assert!(first.uses > 0);
}

#[test]
fn unknown_unit_in_scenario_is_an_error() {
    let registry = content().load_registry().unwrap();
    let file = scenario_file(
        r#"(name: "broken", width: 4, height: 4,
            units: [(unit: UnitId(42), faction: Enemy, tile: (x: 0, y: 0))],
            script: [])"#,
    );
    let scenario = Scenario::load(file.path()).unwrap();

    let err = scenario.battlefield(&registry).unwrap_err();
    assert!(err.to_string().contains("unit:42"), "{err}");
}
