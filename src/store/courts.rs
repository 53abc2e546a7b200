use chrono::Utc;
use log::info;

use super::{teams, Store};
use crate::domain::{Court, CourtId, CourtKind, CourtStatus, CourtView, Slot, TeamId};
use crate::errors::{RotationError, RotationResult};

const MAX_COURT_NAME_LEN: usize = 50;

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct CourtPatch {
    pub name: Option<String>,
    pub net_color: Option<String>,
    pub status: Option<CourtStatus>,
    pub score: Option<String>,
}

pub fn create(store: &mut Store, name: &str, kind: CourtKind, net_color: &str) -> RotationResult<Court> {
    let name = normalize_name(name)?;
    let court = Court::new(store.next_court_id(), &name, kind, net_color.trim());
    store.courts.insert(court.id, court.clone());
    info!("Created {:?} court {} ({})", court.kind, court.name, court.id);
    Ok(court)
}

pub fn find_by_id(store: &Store, id: CourtId) -> Option<&Court> {
    store.courts.get(&id)
}

pub(crate) fn find_by_id_mut(store: &mut Store, id: CourtId) -> Option<&mut Court> {
    store.courts.get_mut(&id)
}

pub fn list_all(store: &Store) -> Vec<Court> {
    let mut courts: Vec<Court> = store.courts.values().cloned().collect();
    courts.sort_by_key(|court| court.id);
    courts
}

/// Court with its teams resolved
pub fn view(store: &Store, id: CourtId) -> Option<CourtView> {
    find_by_id(store, id).map(|court| build_view(store, court))
}

pub fn list_views(store: &Store) -> Vec<CourtView> {
    list_all(store)
        .iter()
        .map(|court| build_view(store, court))
        .collect()
}

pub fn update(store: &mut Store, id: CourtId, patch: CourtPatch) -> RotationResult<Court> {
    let name = patch.name.as_deref().map(normalize_name).transpose()?;
    let court = find_by_id_mut(store, id).ok_or(RotationError::CourtNotFound(id))?;

    if let Some(name) = name {
        court.name = name;
    }
    if let Some(net_color) = patch.net_color {
        court.net_color = net_color.trim().to_string();
    }
    if let Some(status) = patch.status {
        court.status = status;
    }
    if let Some(score) = patch.score {
        court.score = score;
    }
    court.updated_at = Utc::now();
    Ok(court.clone())
}

/// Court and slot a team is playing in, if any
pub fn find_team_seat(store: &Store, team_id: TeamId) -> Option<(CourtId, Slot)> {
    store
        .courts
        .values()
        .find_map(|court| court.slot_of(team_id).map(|slot| (court.id, slot)))
}

/// Raw slot write; does not check where the team currently is
pub(crate) fn seat(store: &mut Store, court_id: CourtId, slot: Slot, team_id: Option<TeamId>) -> RotationResult<()> {
    let court = find_by_id_mut(store, court_id).ok_or(RotationError::CourtNotFound(court_id))?;
    court.set_team(slot, team_id);
    court.touch();
    Ok(())
}

fn build_view(store: &Store, court: &Court) -> CourtView {
    let resolve = |slot| {
        court
            .team(slot)
            .and_then(|team_id| teams::find_by_id(store, team_id))
            .cloned()
    };
    CourtView {
        court: court.clone(),
        team1: resolve(Slot::One),
        team2: resolve(Slot::Two),
    }
}

fn normalize_name(name: &str) -> RotationResult<String> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_COURT_NAME_LEN {
        return Err(RotationError::InvalidCourtName {
            max: MAX_COURT_NAME_LEN,
        });
    }
    Ok(name.to_string())
}
