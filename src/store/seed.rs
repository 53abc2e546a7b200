use log::info;

use super::{courts, teams, Store};
use crate::config::seed::{get_courts, get_teams};
use crate::errors::RotationResult;

/// Populate an empty store with the default courts and teams
///
/// Seeding is not an event of the day, so nothing is written to the log.
pub fn apply_defaults(store: &mut Store) -> RotationResult<()> {
    let court_seeds = get_courts();
    for seed in &court_seeds {
        courts::create(store, seed.name, seed.kind, seed.net_color)?;
    }

    let team_seeds = get_teams();
    for seed in &team_seeds {
        let players = seed.players.iter().map(|p| p.to_string()).collect();
        teams::insert(store, seed.name, players)?;
    }

    info!(
        "Seeded {} courts and {} teams",
        court_seeds.len(),
        team_seeds.len()
    );
    Ok(())
}
