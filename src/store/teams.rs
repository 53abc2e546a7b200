use chrono::Utc;
use log::info;

use super::{courts, events, queue, Store};
use crate::config::settings::TeamSettings;
use crate::domain::{EventKind, NewEvent, Team, TeamId};
use crate::errors::{RotationError, RotationResult};

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub players: Option<Vec<String>>,
}

/// Register a new team and log a `team_added` event
pub fn create(store: &mut Store, name: &str, players: Vec<String>) -> RotationResult<Team> {
    let team = insert(store, name, players)?;
    events::append(
        store,
        NewEvent::new(EventKind::TeamAdded, format!("{} joined the event", team.name))
            .with_teams(vec![team.id]),
    );
    info!("Created team {} ({})", team.name, team.id);
    Ok(team)
}

/// Validate and store a team without recording an event
pub(super) fn insert(store: &mut Store, name: &str, players: Vec<String>) -> RotationResult<Team> {
    let name = normalize_name(name, &store.config.teams)?;
    let players = normalize_players(players, &store.config.teams)?;
    ensure_name_free(store, &name, None)?;

    let now = Utc::now();
    let team = Team {
        id: store.next_team_id(),
        name,
        players,
        created_at: now,
        updated_at: now,
    };
    store.teams.insert(team.id, team.clone());
    Ok(team)
}

pub fn find_by_id(store: &Store, id: TeamId) -> Option<&Team> {
    store.teams.get(&id)
}

/// Exact, case-sensitive name match
pub fn find_by_name<'a>(store: &'a Store, name: &str) -> Option<&'a Team> {
    store.teams.values().find(|team| team.name == name)
}

/// All teams in registration order
pub fn list_all(store: &Store) -> Vec<Team> {
    let mut teams: Vec<Team> = store.teams.values().cloned().collect();
    teams.sort_by_key(|team| team.id);
    teams
}

/// Teams that are neither on a court nor waiting in a queue
pub fn list_available(store: &Store) -> Vec<Team> {
    list_all(store)
        .into_iter()
        .filter(|team| !is_on_court(store, team.id) && !is_in_queue(store, team.id))
        .collect()
}

pub fn update(store: &mut Store, id: TeamId, patch: TeamPatch) -> RotationResult<Team> {
    if !store.teams.contains_key(&id) {
        return Err(RotationError::TeamNotFound(id));
    }

    let name = match patch.name {
        Some(name) => {
            let name = normalize_name(&name, &store.config.teams)?;
            ensure_name_free(store, &name, Some(id))?;
            Some(name)
        }
        None => None,
    };
    let players = match patch.players {
        Some(players) => Some(normalize_players(players, &store.config.teams)?),
        None => None,
    };

    let team = store
        .teams
        .get_mut(&id)
        .ok_or(RotationError::TeamNotFound(id))?;
    if let Some(name) = name {
        team.name = name;
    }
    if let Some(players) = players {
        team.players = players;
    }
    team.updated_at = Utc::now();
    Ok(team.clone())
}

/// Remove a team and its queue entry
///
/// Returns `Ok(false)` when no such team exists. A team that is currently
/// playing has to be cleared off its court first.
pub fn delete(store: &mut Store, id: TeamId) -> RotationResult<bool> {
    if !store.teams.contains_key(&id) {
        return Ok(false);
    }
    if is_on_court(store, id) {
        return Err(RotationError::TeamOnCourt(id));
    }

    if let Some(entry_id) = queue::find_by_team(store, id).map(|entry| entry.id) {
        queue::remove(store, entry_id);
    }
    let Some(team) = store.teams.remove(&id) else {
        return Ok(false);
    };

    events::append(
        store,
        NewEvent::new(EventKind::TeamDeleted, format!("{} was removed from the event", team.name))
            .with_teams(vec![team.id]),
    );
    info!("Deleted team {} ({})", team.name, team.id);
    Ok(true)
}

pub fn is_on_court(store: &Store, id: TeamId) -> bool {
    courts::find_team_seat(store, id).is_some()
}

pub fn is_in_queue(store: &Store, id: TeamId) -> bool {
    queue::find_by_team(store, id).is_some()
}

fn normalize_name(name: &str, settings: &TeamSettings) -> RotationResult<String> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > settings.max_name_len {
        return Err(RotationError::InvalidTeamName {
            max: settings.max_name_len,
        });
    }
    Ok(name.to_string())
}

fn normalize_players(players: Vec<String>, settings: &TeamSettings) -> RotationResult<Vec<String>> {
    let players: Vec<String> = players
        .into_iter()
        .map(|player| player.trim().to_string())
        .filter(|player| !player.is_empty())
        .collect();

    if players.len() > settings.max_players {
        return Err(RotationError::TooManyPlayers {
            max: settings.max_players,
        });
    }
    Ok(players)
}

fn ensure_name_free(store: &Store, name: &str, except: Option<TeamId>) -> RotationResult<()> {
    match find_by_name(store, name) {
        Some(existing) if Some(existing.id) != except => {
            Err(RotationError::DuplicateTeamName(name.to_string()))
        }
        _ => Ok(()),
    }
}
