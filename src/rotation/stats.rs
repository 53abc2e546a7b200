use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{EventKind, TeamId};
use crate::errors::{RotationError, RotationResult};
use crate::store::{events, teams, Store};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team_id: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
    pub win_rate: f64,
}

impl TeamStats {
    fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Self::default()
        }
    }

    fn finish(mut self) -> Self {
        self.games_played = self.wins + self.losses;
        self.win_rate = if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub rank: usize,
    pub name: String,
    #[serde(flatten)]
    pub stats: TeamStats,
}

/// Wins and losses of one team, counted from the retained game reports
pub fn team_stats(store: &Store, team_id: TeamId) -> RotationResult<TeamStats> {
    if teams::find_by_id(store, team_id).is_none() {
        return Err(RotationError::TeamNotFound(team_id));
    }
    let tally = tally_results(store);
    Ok(tally
        .get(&team_id)
        .copied()
        .unwrap_or_else(|| TeamStats::new(team_id))
        .finish())
}

/// Every registered team, most wins first
pub fn standings(store: &Store) -> Vec<TeamStanding> {
    let tally = tally_results(store);
    let mut rows: Vec<(String, TeamStats)> = teams::list_all(store)
        .into_iter()
        .map(|team| {
            let stats = tally
                .get(&team.id)
                .copied()
                .unwrap_or_else(|| TeamStats::new(team.id))
                .finish();
            (team.name, stats)
        })
        .collect();

    rows.sort_by(|(name_a, a), (name_b, b)| {
        b.wins
            .cmp(&a.wins)
            .then(a.losses.cmp(&b.losses))
            .then_with(|| name_a.cmp(name_b))
    });

    rows.into_iter()
        .enumerate()
        .map(|(idx, (name, stats))| TeamStanding {
            rank: idx + 1,
            name,
            stats,
        })
        .collect()
}

fn tally_results(store: &Store) -> HashMap<TeamId, TeamStats> {
    let mut tally: HashMap<TeamId, TeamStats> = HashMap::new();
    for event in events::iter(store).filter(|e| e.kind == EventKind::GameReported) {
        if let Some(winner) = event.winner_id {
            tally.entry(winner).or_insert_with(|| TeamStats::new(winner)).wins += 1;
        }
        if let Some(loser) = event.loser_id {
            tally.entry(loser).or_insert_with(|| TeamStats::new(loser)).losses += 1;
        }
    }
    tally
}
