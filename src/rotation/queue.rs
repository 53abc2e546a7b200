use log::info;
use serde::Serialize;

use super::location::{self, Destination, Placement};
use crate::domain::{EventKind, NewEvent, QueueEntry, QueueEntryId, QueueEntryView, QueueKind, TeamId};
use crate::errors::{RotationError, RotationResult};
use crate::store::{events, queue, teams, Store};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFailure {
    pub team_id: TeamId,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEnqueueOutcome {
    pub added: Vec<QueueEntry>,
    pub failed: Vec<BulkFailure>,
}

/// Append a team to the tail of a queue
pub fn enqueue(store: &mut Store, team_id: TeamId, kind: QueueKind) -> RotationResult<QueueEntry> {
    let entry = place(store, team_id, kind)?;
    record_queued(store, &[entry.team_id], kind);
    Ok(entry)
}

/// Remove an entry; `false` when it does not exist
pub fn dequeue(store: &mut Store, entry_id: QueueEntryId) -> bool {
    match queue::remove(store, entry_id) {
        Some(entry) => {
            info!("Team {} left the {} queue", entry.team_id, entry.queue_type);
            true
        }
        None => false,
    }
}

/// Put an entry at position 1; everyone ahead of it moves back one place
pub fn move_to_front(store: &mut Store, entry_id: QueueEntryId) -> RotationResult<QueueEntry> {
    let entry = queue::move_to_front(store, entry_id).ok_or(RotationError::QueueEntryNotFound(entry_id))?;
    info!("Team {} moved to the front of the {} queue", entry.team_id, entry.queue_type);
    Ok(entry)
}

/// Queue entries joined with their teams, by position
pub fn list(store: &Store, kind: QueueKind) -> Vec<QueueEntryView> {
    queue::entries(store, kind)
        .into_iter()
        .filter_map(|entry| {
            let team = teams::find_by_id(store, entry.team_id)?.clone();
            Some(QueueEntryView { entry, team })
        })
        .collect()
}

/// Enqueue each team independently; one failure never stops the batch
pub fn bulk_enqueue(store: &mut Store, team_ids: &[TeamId], kind: QueueKind) -> BulkEnqueueOutcome {
    let mut outcome = BulkEnqueueOutcome::default();
    for &team_id in team_ids {
        match place(store, team_id, kind) {
            Ok(entry) => outcome.added.push(entry),
            Err(e) => outcome.failed.push(BulkFailure {
                team_id,
                reason: e.to_string(),
            }),
        }
    }

    if !outcome.added.is_empty() {
        let added: Vec<TeamId> = outcome.added.iter().map(|entry| entry.team_id).collect();
        record_queued(store, &added, kind);
    }
    info!(
        "Bulk enqueue into {}: {} added, {} failed",
        kind,
        outcome.added.len(),
        outcome.failed.len()
    );
    outcome
}

pub fn clear(store: &mut Store, kind: QueueKind) -> usize {
    let removed = queue::clear(store, kind);
    info!("Cleared {} entries from the {} queue", removed, kind);
    removed
}

fn place(store: &mut Store, team_id: TeamId, kind: QueueKind) -> RotationResult<QueueEntry> {
    match location::relocate(store, team_id, Destination::QueueTail(kind))? {
        Placement::Queued(entry) => Ok(entry),
        Placement::Seated { .. } => Err(RotationError::Internal(format!(
            "team {team_id} was seated instead of queued"
        ))),
    }
}

fn record_queued(store: &mut Store, team_ids: &[TeamId], kind: QueueKind) {
    let names = team_names(store, team_ids);
    let description = format!("{} added to the {} queue", names, queue_label(kind));
    events::append(
        store,
        NewEvent::new(EventKind::TeamsQueued, description).with_teams(team_ids.to_vec()),
    );
}

fn queue_label(kind: QueueKind) -> &'static str {
    match kind {
        QueueKind::General => "general",
        QueueKind::KingsCourt => "Kings Court",
    }
}

/// "A", "A and B", "A, B and C"
pub(crate) fn team_names(store: &Store, team_ids: &[TeamId]) -> String {
    let names: Vec<String> = team_ids
        .iter()
        .map(|id| {
            teams::find_by_id(store, *id)
                .map(|team| team.name.clone())
                .unwrap_or_else(|| format!("Team {id}"))
        })
        .collect();

    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
