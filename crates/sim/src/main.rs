//! Tactics battle simulator binary.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=combat=debug cargo run -p tactics-sim
//! TACTICS_SCENARIO=my_battle.ron TACTICS_TURNS=10 cargo run -p tactics-sim
//! ```

use anyhow::Result;
use tactics_content::ContentFactory;
use tactics_sim::{Scenario, SimConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        scenario = %config.scenario.display(),
        turns = config.turns,
        "starting simulation"
    );

    let factory = ContentFactory::new(&config.data_dir);
    let combat = factory.load_config()?;
    let registry = factory.load_registry()?;
    let scenario = Scenario::load(&config.scenario)?;

    let report = tactics_sim::run(&scenario, &registry, &combat, config.turns)?;

    for entity in report.battlefield.entities() {
        tracing::info!(
            entity = %entity.id,
            name = %entity.name,
            faction = ?entity.faction,
            tile = %entity.tile,
            hp = entity.hp.current,
            suppression = entity.suppression,
            statuses = entity.statuses.len(),
            "final state"
        );
    }
    tracing::info!(
        scenario = %scenario.name,
        turns = report.turns,
        uses = report.uses,
        rejected = report.rejected,
        kills = report.kills,
        pending = report.pending,
        digest = %hex::encode(report.digest),
        "simulation finished"
    );

    Ok(())
}
