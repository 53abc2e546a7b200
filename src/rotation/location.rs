//! The one-team-one-location rule
//!
//! A team is either free, seated in exactly one court slot, or waiting in
//! exactly one queue. Every operation that moves a team goes through
//! [`relocate`] so the rule is checked in one place.

use log::debug;

use crate::domain::{CourtId, QueueEntry, QueueEntryId, QueueKind, Slot, TeamId};
use crate::errors::{RotationError, RotationResult};
use crate::store::{courts, queue, teams, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamLocation {
    Court { court_id: CourtId, slot: Slot },
    Queue { entry_id: QueueEntryId, kind: QueueKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Slot { court_id: CourtId, slot: Slot },
    QueueTail(QueueKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Seated { court_id: CourtId, slot: Slot },
    Queued(QueueEntry),
}

/// Where a team currently is, `None` when it is free
pub fn locate(store: &Store, team_id: TeamId) -> Option<TeamLocation> {
    if let Some((court_id, slot)) = courts::find_team_seat(store, team_id) {
        return Some(TeamLocation::Court { court_id, slot });
    }
    queue::find_by_team(store, team_id).map(|entry| TeamLocation::Queue {
        entry_id: entry.id,
        kind: entry.queue_type,
    })
}

/// The team exists and is not playing. Returns its queue location, if any.
pub fn ensure_off_court(store: &Store, team_id: TeamId) -> RotationResult<Option<TeamLocation>> {
    if teams::find_by_id(store, team_id).is_none() {
        return Err(RotationError::TeamNotFound(team_id));
    }
    match locate(store, team_id) {
        Some(TeamLocation::Court { .. }) => Err(RotationError::TeamOnCourt(team_id)),
        location => Ok(location),
    }
}

/// Check that `relocate` would succeed, without changing anything
pub fn check(store: &Store, team_id: TeamId, destination: Destination) -> RotationResult<()> {
    let current = ensure_off_court(store, team_id)?;
    match destination {
        Destination::QueueTail(_) => {
            if let Some(TeamLocation::Queue { kind, .. }) = current {
                return Err(RotationError::TeamAlreadyQueued {
                    team_id,
                    queue: kind,
                });
            }
        }
        Destination::Slot { court_id, slot } => {
            let court = courts::find_by_id(store, court_id).ok_or(RotationError::CourtNotFound(court_id))?;
            if court.team(slot).is_some() {
                return Err(RotationError::CourtFull);
            }
        }
    }
    Ok(())
}

/// Move a team to a court slot or the tail of a queue
///
/// A queued team leaves its queue when it is seated. Teams already on a
/// court are refused, as are moves from one queue into another.
pub fn relocate(store: &mut Store, team_id: TeamId, destination: Destination) -> RotationResult<Placement> {
    check(store, team_id, destination)?;

    match destination {
        Destination::QueueTail(kind) => {
            let entry = queue::push_back(store, team_id, kind);
            debug!("Team {} queued in {} at {}", team_id, kind, entry.position);
            Ok(Placement::Queued(entry))
        }
        Destination::Slot { court_id, slot } => {
            if let Some(TeamLocation::Queue { entry_id, .. }) = locate(store, team_id) {
                queue::remove(store, entry_id);
            }
            courts::seat(store, court_id, slot, Some(team_id))?;
            debug!("Team {} seated on court {} ({:?})", team_id, court_id, slot);
            Ok(Placement::Seated { court_id, slot })
        }
    }
}
