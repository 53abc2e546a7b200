use log::info;
use serde::Serialize;

use super::location::{self, Destination};
use super::queue::team_names;
use crate::domain::{Court, CourtId, CourtKind, CourtStatus, CourtView, EventKind, NewEvent, QueueEntry, QueueKind, Slot, TeamId};
use crate::errors::{RotationError, RotationResult};
use crate::store::{courts, events, queue, Store};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillOutcome {
    pub court: CourtView,
    pub added_team_ids: Vec<TeamId>,
}

/// Put two teams on a court, replacing whoever was there
///
/// Both teams leave any queue they were in. Streaks and score start over.
/// Displaced occupants are logged with a `court_cleared` event first.
pub fn assign(store: &mut Store, court_id: CourtId, team1: TeamId, team2: TeamId) -> RotationResult<CourtView> {
    if courts::find_by_id(store, court_id).is_none() {
        return Err(RotationError::CourtNotFound(court_id));
    }
    location::ensure_off_court(store, team1)?;
    location::ensure_off_court(store, team2)?;
    if team1 == team2 {
        return Err(RotationError::SameTeam);
    }

    let displaced = vacate(store, court_id)?;
    if !displaced.is_empty() {
        let court = courts::find_by_id(store, court_id)
            .cloned()
            .ok_or(RotationError::CourtNotFound(court_id))?;
        record_cleared(store, &court, displaced);
    }
    location::relocate(store, team1, Destination::Slot { court_id, slot: Slot::One })?;
    location::relocate(store, team2, Destination::Slot { court_id, slot: Slot::Two })?;
    let court = mark_playing(store, court_id)?;

    let description = format!("{} assigned to {}", team_names(store, &[team1, team2]), court.name);
    events::append(
        store,
        NewEvent::new(EventKind::TeamsAdded, description)
            .with_court(&court)
            .with_teams(vec![team1, team2]),
    );
    info!("Assigned teams {} and {} to {}", team1, team2, court.name);
    view(store, court_id)
}

/// Empty a court and log who was on it
pub fn clear(store: &mut Store, court_id: CourtId) -> RotationResult<CourtView> {
    let previous = vacate(store, court_id)?;
    let court = courts::find_by_id(store, court_id)
        .cloned()
        .ok_or(RotationError::CourtNotFound(court_id))?;

    record_cleared(store, &court, previous);
    info!("Cleared {}", court.name);
    view(store, court_id)
}

fn record_cleared(store: &mut Store, court: &Court, previous: Vec<TeamId>) {
    let description = if previous.is_empty() {
        format!("{} cleared", court.name)
    } else {
        format!("{} cleared, {} left the court", court.name, team_names(store, &previous))
    };
    events::append(
        store,
        NewEvent::new(EventKind::CourtCleared, description)
            .with_court(court)
            .with_teams(previous),
    );
}

/// Pull waiting teams into the empty slots of a court
pub fn fill_from_queue(store: &mut Store, court_id: CourtId) -> RotationResult<FillOutcome> {
    let court = courts::find_by_id(store, court_id).ok_or(RotationError::CourtNotFound(court_id))?;
    let empty_slots = court.empty_slots();
    if empty_slots.is_empty() {
        return Err(RotationError::CourtFull);
    }

    let picks = pick_entries(store, court.kind, empty_slots.len())?;
    let mut added = Vec::with_capacity(picks.len());
    for (slot, entry) in empty_slots.into_iter().zip(picks) {
        location::relocate(store, entry.team_id, Destination::Slot { court_id, slot })?;
        if let Some(court) = courts::find_by_id_mut(store, court_id) {
            court.set_wins(slot, 0);
        }
        added.push(entry.team_id);
    }
    let court = mark_playing(store, court_id)?;

    let description = format!("{} joined {} from the queue", team_names(store, &added), court.name);
    events::append(
        store,
        NewEvent::new(EventKind::TeamsAdded, description)
            .with_court(&court)
            .with_teams(added.clone()),
    );
    info!("Filled {} with {} team(s) from the queue", court.name, added.len());

    Ok(FillOutcome {
        court: view(store, court_id)?,
        added_team_ids: added,
    })
}

/// Choose which queue entries fill `needed` slots
///
/// Challenger courts only draw from the general queue and never fill
/// partially. Kings Court prefers its own queue: two from kings_court,
/// then one from each, then two from general.
fn pick_entries(store: &Store, kind: CourtKind, needed: usize) -> RotationResult<Vec<QueueEntry>> {
    let general = queue::entries(store, QueueKind::General);
    let kings = queue::entries(store, QueueKind::KingsCourt);

    let picks: Vec<QueueEntry> = match (kind, needed) {
        (CourtKind::Challenger, _) => general.into_iter().take(needed).collect(),
        (CourtKind::Kings, 1) => kings.into_iter().chain(general).take(1).collect(),
        (CourtKind::Kings, _) => {
            if kings.len() >= 2 {
                kings.into_iter().take(2).collect()
            } else if kings.len() == 1 && !general.is_empty() {
                kings.into_iter().chain(general).take(2).collect()
            } else {
                general.into_iter().take(2).collect()
            }
        }
    };

    if picks.len() < needed {
        return Err(RotationError::NotEnoughTeams);
    }
    Ok(picks)
}

/// Empty both slots without logging; returns the previous occupants
pub(crate) fn vacate(store: &mut Store, court_id: CourtId) -> RotationResult<Vec<TeamId>> {
    let court = courts::find_by_id_mut(store, court_id).ok_or(RotationError::CourtNotFound(court_id))?;
    let previous = court.team_ids();
    court.reset();
    Ok(previous)
}

fn mark_playing(store: &mut Store, court_id: CourtId) -> RotationResult<Court> {
    let court = courts::find_by_id_mut(store, court_id).ok_or(RotationError::CourtNotFound(court_id))?;
    if court.is_full() {
        court.status = CourtStatus::Playing;
    }
    court.touch();
    Ok(court.clone())
}

fn view(store: &Store, court_id: CourtId) -> RotationResult<CourtView> {
    courts::view(store, court_id).ok_or(RotationError::CourtNotFound(court_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::rotation::queue::{enqueue, list};
    use crate::store::teams;

    struct Fixture {
        store: Store,
        kings: CourtId,
        challenger: CourtId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut store = Store::new(AppConfig::new());
            let kings = courts::create(&mut store, "Kings Court", CourtKind::Kings, "gold").unwrap().id;
            let challenger = courts::create(&mut store, "Court 2", CourtKind::Challenger, "blue").unwrap().id;
            Self { store, kings, challenger }
        }

        fn team(&mut self, name: &str) -> TeamId {
            teams::create(&mut self.store, name, vec![]).unwrap().id
        }

        fn queued(&mut self, name: &str, kind: QueueKind) -> TeamId {
            let id = self.team(name);
            enqueue(&mut self.store, id, kind).unwrap();
            id
        }

        fn queue_names(&self, kind: QueueKind) -> Vec<String> {
            list(&self.store, kind).into_iter().map(|v| v.team.name).collect()
        }
    }

    #[test]
    fn test_assign_pulls_teams_out_of_queues() {
        let mut fx = Fixture::new();
        let a = fx.queued("A", QueueKind::General);
        let b = fx.queued("B", QueueKind::KingsCourt);
        fx.queued("C", QueueKind::General);

        let view = assign(&mut fx.store, fx.challenger, a, b).unwrap();

        assert_eq!((view.court.slot1, view.court.slot2), (Some(a), Some(b)));
        assert_eq!(view.court.status, CourtStatus::Playing);
        assert_eq!((view.court.slot1_wins, view.court.slot2_wins), (0, 0));
        assert_eq!(fx.queue_names(QueueKind::General), vec!["C"]);
        assert!(fx.queue_names(QueueKind::KingsCourt).is_empty());
        assert_eq!(events::recent(&fx.store, Some(1))[0].kind, EventKind::TeamsAdded);
    }

    #[test]
    fn test_assign_rejections_change_nothing() {
        let mut fx = Fixture::new();
        let a = fx.team("A");
        let b = fx.team("B");
        let c = fx.queued("C", QueueKind::General);
        assign(&mut fx.store, fx.challenger, a, b).unwrap();
        let before = courts::find_by_id(&fx.store, fx.kings).cloned();

        assert_eq!(assign(&mut fx.store, 99, c, a), Err(RotationError::CourtNotFound(99)));
        assert_eq!(assign(&mut fx.store, fx.kings, c, a), Err(RotationError::TeamOnCourt(a)));
        assert_eq!(assign(&mut fx.store, fx.kings, c, 404), Err(RotationError::TeamNotFound(404)));
        assert_eq!(assign(&mut fx.store, fx.kings, c, c), Err(RotationError::SameTeam));

        assert_eq!(courts::find_by_id(&fx.store, fx.kings).cloned(), before);
        assert_eq!(fx.queue_names(QueueKind::General), vec!["C"]);
    }

    #[test]
    fn test_assign_to_occupied_court_logs_displaced_teams() {
        let mut fx = Fixture::new();
        let a = fx.team("A");
        let b = fx.team("B");
        let c = fx.team("C");
        let d = fx.queued("D", QueueKind::General);
        assign(&mut fx.store, fx.kings, a, b).unwrap();

        let view = assign(&mut fx.store, fx.kings, c, d).unwrap();

        assert_eq!((view.court.slot1, view.court.slot2), (Some(c), Some(d)));
        let recent = events::recent(&fx.store, Some(2));
        assert_eq!(recent[0].kind, EventKind::TeamsAdded);
        assert_eq!(recent[0].team_ids, Some(vec![c, d]));
        assert_eq!(recent[1].kind, EventKind::CourtCleared);
        assert_eq!(recent[1].team_ids, Some(vec![a, b]));
        assert!(!teams::is_on_court(&fx.store, a));
        assert!(!teams::is_on_court(&fx.store, b));
    }

    #[test]
    fn test_assign_to_empty_court_logs_one_event() {
        let mut fx = Fixture::new();
        let a = fx.team("A");
        let b = fx.team("B");

        assign(&mut fx.store, fx.challenger, a, b).unwrap();

        assert_eq!(events::count(&fx.store), 3);
        assert_eq!(events::recent(&fx.store, Some(1))[0].kind, EventKind::TeamsAdded);
    }

    #[test]
    fn test_clear_records_previous_teams() {
        let mut fx = Fixture::new();
        let a = fx.team("A");
        let b = fx.team("B");
        assign(&mut fx.store, fx.kings, a, b).unwrap();
        if let Some(court) = courts::find_by_id_mut(&mut fx.store, fx.kings) {
            court.slot1_wins = 1;
            court.score = "21-19".into();
        }

        let view = clear(&mut fx.store, fx.kings).unwrap();

        assert_eq!(view.court.team_ids(), Vec::<TeamId>::new());
        assert_eq!(view.court.status, CourtStatus::Empty);
        assert_eq!((view.court.slot1_wins, view.court.score.as_str()), (0, ""));
        let event = &events::recent(&fx.store, Some(1))[0];
        assert_eq!(event.kind, EventKind::CourtCleared);
        assert_eq!(event.team_ids, Some(vec![a, b]));
        assert_eq!(clear(&mut fx.store, 42).unwrap_err(), RotationError::CourtNotFound(42));
    }

    #[test]
    fn test_challenger_fill_uses_general_queue_only() {
        let mut fx = Fixture::new();
        fx.queued("K", QueueKind::KingsCourt);
        fx.queued("G1", QueueKind::General);

        assert_eq!(
            fill_from_queue(&mut fx.store, fx.challenger).unwrap_err(),
            RotationError::NotEnoughTeams
        );
        assert_eq!(fx.queue_names(QueueKind::General), vec!["G1"]);

        let g2 = fx.queued("G2", QueueKind::General);
        let outcome = fill_from_queue(&mut fx.store, fx.challenger).unwrap();
        assert_eq!(outcome.added_team_ids.len(), 2);
        assert_eq!(outcome.court.court.slot2, Some(g2));
        assert_eq!(outcome.court.court.status, CourtStatus::Playing);
        assert_eq!(fx.queue_names(QueueKind::KingsCourt), vec!["K"]);
    }

    #[test]
    fn test_challenger_fill_single_slot_keeps_occupant() {
        let mut fx = Fixture::new();
        let stay = fx.team("Stay");
        courts::seat(&mut fx.store, fx.challenger, Slot::Two, Some(stay)).unwrap();
        let g = fx.queued("G", QueueKind::General);

        let outcome = fill_from_queue(&mut fx.store, fx.challenger).unwrap();

        assert_eq!(outcome.added_team_ids, vec![g]);
        assert_eq!((outcome.court.court.slot1, outcome.court.court.slot2), (Some(g), Some(stay)));
    }

    #[test]
    fn test_kings_fill_prefers_two_from_kings_queue() {
        let mut fx = Fixture::new();
        let k1 = fx.queued("K1", QueueKind::KingsCourt);
        let k2 = fx.queued("K2", QueueKind::KingsCourt);
        fx.queued("G1", QueueKind::General);

        let outcome = fill_from_queue(&mut fx.store, fx.kings).unwrap();

        assert_eq!(outcome.added_team_ids, vec![k1, k2]);
        assert_eq!(fx.queue_names(QueueKind::General), vec!["G1"]);
    }

    #[test]
    fn test_kings_fill_mixes_one_kings_and_one_general() {
        let mut fx = Fixture::new();
        let p = fx.queued("TeamP", QueueKind::KingsCourt);
        let q = fx.queued("TeamQ", QueueKind::General);
        fx.queued("TeamR", QueueKind::General);

        let outcome = fill_from_queue(&mut fx.store, fx.kings).unwrap();

        assert_eq!((outcome.court.court.slot1, outcome.court.court.slot2), (Some(p), Some(q)));
        assert!(fx.queue_names(QueueKind::KingsCourt).is_empty());
        assert_eq!(fx.queue_names(QueueKind::General), vec!["TeamR"]);
        assert_eq!(
            events::recent(&fx.store, Some(1))[0].description,
            "TeamP and TeamQ joined Kings Court from the queue"
        );
    }

    #[test]
    fn test_kings_fill_falls_back_to_general() {
        let mut fx = Fixture::new();
        let g1 = fx.queued("G1", QueueKind::General);
        let g2 = fx.queued("G2", QueueKind::General);

        let outcome = fill_from_queue(&mut fx.store, fx.kings).unwrap();
        assert_eq!(outcome.added_team_ids, vec![g1, g2]);
    }

    #[test]
    fn test_kings_fill_with_single_kings_team_and_no_general_fails() {
        let mut fx = Fixture::new();
        fx.queued("K1", QueueKind::KingsCourt);

        assert_eq!(fill_from_queue(&mut fx.store, fx.kings).unwrap_err(), RotationError::NotEnoughTeams);
        assert_eq!(fx.queue_names(QueueKind::KingsCourt), vec!["K1"]);
    }

    #[test]
    fn test_kings_fill_one_slot_prefers_kings_then_general() {
        let mut fx = Fixture::new();
        let king = fx.team("King");
        courts::seat(&mut fx.store, fx.kings, Slot::One, Some(king)).unwrap();
        fx.queued("G1", QueueKind::General);
        let k1 = fx.queued("K1", QueueKind::KingsCourt);

        let outcome = fill_from_queue(&mut fx.store, fx.kings).unwrap();
        assert_eq!(outcome.added_team_ids, vec![k1]);
        assert_eq!(outcome.court.court.slot1, Some(king));

        // Second round: only a general team is waiting
        courts::seat(&mut fx.store, fx.kings, Slot::Two, None).unwrap();
        let outcome = fill_from_queue(&mut fx.store, fx.kings).unwrap();
        assert_eq!(outcome.added_team_ids.len(), 1);
        assert!(fx.queue_names(QueueKind::General).is_empty());
    }

    #[test]
    fn test_fill_full_court_is_rejected() {
        let mut fx = Fixture::new();
        let a = fx.team("A");
        let b = fx.team("B");
        fx.queued("C", QueueKind::General);
        assign(&mut fx.store, fx.challenger, a, b).unwrap();

        assert_eq!(fill_from_queue(&mut fx.store, fx.challenger).unwrap_err(), RotationError::CourtFull);
        assert_eq!(fill_from_queue(&mut fx.store, 77).unwrap_err(), RotationError::CourtNotFound(77));
    }
}
