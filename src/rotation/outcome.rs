//! Game outcome rules
//!
//! Challenger courts send the winner to the Kings Court queue and empty the
//! court. On Kings Court the winner stays and keeps a streak, until the
//! streak hits the configured limit and the court is emptied. Losers are
//! never re-queued automatically.

use log::info;
use serde::Serialize;

use super::assignment::vacate;
use super::location::{self, Destination};
use crate::domain::{Court, CourtId, CourtKind, CourtView, EventKind, GameEvent, NewEvent, QueueKind, Slot, TeamId};
use crate::errors::{RotationError, RotationResult};
use crate::store::{courts, events, teams, Store};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub court: CourtView,
    pub event: GameEvent,
    pub winner_name: String,
    pub loser_name: String,
}

/// What happens to the court after a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// Challenger winner moves to the Kings Court queue
    Advance,
    /// Kings Court winner keeps the court with this many straight wins
    Stay { wins: u32 },
    /// Kings Court winner reached the streak limit
    Evict { wins: u32 },
}

struct Matchup {
    winner_slot: Slot,
    winner_id: TeamId,
    loser_id: TeamId,
    winner_name: String,
    loser_name: String,
}

/// Apply a reported score to a court
///
/// Nothing changes unless the whole report is valid: scores must differ
/// and the court must hold two teams.
pub fn report_game(store: &mut Store, court_id: CourtId, team1_score: u32, team2_score: u32) -> RotationResult<GameReport> {
    if team1_score == team2_score {
        return Err(RotationError::TiedScore);
    }
    let court = courts::find_by_id(store, court_id)
        .cloned()
        .ok_or(RotationError::CourtNotFound(court_id))?;
    let matchup = resolve_matchup(store, &court, team1_score, team2_score)?;
    let verdict = decide(&court, matchup.winner_slot, store.config().rotation.kings_streak_limit);
    let score = format!("{team1_score}-{team2_score}");

    apply(store, &court, &matchup, verdict, &score)?;

    let description = describe(verdict, &matchup);
    let updated = courts::find_by_id(store, court_id)
        .cloned()
        .ok_or(RotationError::CourtNotFound(court_id))?;
    let event = events::append(
        store,
        NewEvent::new(EventKind::GameReported, description)
            .with_court(&updated)
            .with_teams(vec![matchup.winner_id, matchup.loser_id])
            .with_result(score, court.net_color.clone(), matchup.winner_id, matchup.loser_id),
    );
    info!("{}: {}", court.name, event.description);

    Ok(GameReport {
        court: courts::view(store, court_id).ok_or(RotationError::CourtNotFound(court_id))?,
        event,
        winner_name: matchup.winner_name,
        loser_name: matchup.loser_name,
    })
}

fn resolve_matchup(store: &Store, court: &Court, team1_score: u32, team2_score: u32) -> RotationResult<Matchup> {
    if !court.is_full() {
        return Err(RotationError::CourtNotReady);
    }

    let winner_slot = if team1_score > team2_score { Slot::One } else { Slot::Two };
    let winner_id = seated(court, winner_slot)?;
    let loser_id = seated(court, winner_slot.other())?;

    Ok(Matchup {
        winner_slot,
        winner_id,
        loser_id,
        winner_name: team_name(store, winner_id)?,
        loser_name: team_name(store, loser_id)?,
    })
}

fn decide(court: &Court, winner_slot: Slot, streak_limit: u32) -> Verdict {
    match court.kind {
        CourtKind::Challenger => Verdict::Advance,
        CourtKind::Kings => {
            let wins = court.wins(winner_slot) + 1;
            if wins >= streak_limit {
                Verdict::Evict { wins }
            } else {
                Verdict::Stay { wins }
            }
        }
    }
}

fn apply(store: &mut Store, court: &Court, matchup: &Matchup, verdict: Verdict, score: &str) -> RotationResult<()> {
    match verdict {
        Verdict::Advance => {
            vacate(store, court.id)?;
            if let Err(e) = location::relocate(store, matchup.winner_id, Destination::QueueTail(QueueKind::KingsCourt)) {
                restore(store, court);
                return Err(e);
            }
        }
        Verdict::Evict { .. } => {
            vacate(store, court.id)?;
        }
        Verdict::Stay { wins } => {
            let loser_slot = matchup.winner_slot.other();
            let live = courts::find_by_id_mut(store, court.id).ok_or(RotationError::CourtNotFound(court.id))?;
            live.set_wins(matchup.winner_slot, wins);
            live.set_wins(loser_slot, 0);
            live.set_team(loser_slot, None);
            live.score = score.to_string();
            live.touch();
        }
    }
    Ok(())
}

/// Put a court back the way it was before a failed report
fn restore(store: &mut Store, snapshot: &Court) {
    if let Some(live) = courts::find_by_id_mut(store, snapshot.id) {
        *live = snapshot.clone();
    }
}

fn describe(verdict: Verdict, matchup: &Matchup) -> String {
    let winner = &matchup.winner_name;
    let loser_note = format!("{} removed from court and must re-queue manually.", matchup.loser_name);
    match verdict {
        Verdict::Advance => format!("{winner} wins and advances to Kings Court queue. {loser_note}"),
        Verdict::Stay { .. } => format!("{winner} wins and stays on the court for another game. {loser_note}"),
        Verdict::Evict { wins } => format!(
            "{winner} wins their {} consecutive game and must leave Kings Court. {loser_note}",
            ordinal(wins)
        ),
    }
}

fn ordinal(n: u32) -> String {
    match n {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        4 => "fourth".to_string(),
        5 => "fifth".to_string(),
        n => format!("{n}th"),
    }
}

fn seated(court: &Court, slot: Slot) -> RotationResult<TeamId> {
    court.team(slot).ok_or(RotationError::CourtNotReady)
}

fn team_name(store: &Store, team_id: TeamId) -> RotationResult<String> {
    teams::find_by_id(store, team_id)
        .map(|team| team.name.clone())
        .ok_or_else(|| RotationError::Internal(format!("team {team_id} is seated but does not exist")))
}
