use chrono::Utc;

use super::Store;
use crate::domain::{QueueEntry, QueueEntryId, QueueKind, TeamId};

pub fn find_by_id(store: &Store, entry_id: QueueEntryId) -> Option<&QueueEntry> {
    store.queue_entries.get(&entry_id)
}

pub fn find_by_team(store: &Store, team_id: TeamId) -> Option<&QueueEntry> {
    store
        .queue_entries
        .values()
        .find(|entry| entry.team_id == team_id)
}

/// Entries of one queue, ordered by position
pub fn entries(store: &Store, kind: QueueKind) -> Vec<QueueEntry> {
    let mut entries: Vec<QueueEntry> = store
        .queue_entries
        .values()
        .filter(|entry| entry.queue_type == kind)
        .cloned()
        .collect();
    entries.sort_by_key(|entry| entry.position);
    entries
}

pub fn len(store: &Store, kind: QueueKind) -> usize {
    store
        .queue_entries
        .values()
        .filter(|entry| entry.queue_type == kind)
        .count()
}

/// Append at the tail. Callers are responsible for the one-location rule.
pub fn push_back(store: &mut Store, team_id: TeamId, kind: QueueKind) -> QueueEntry {
    let position = len(store, kind) + 1;
    insert_entry(store, team_id, kind, position)
}

/// Insert at position 1 and shift everyone else back by one
pub fn push_front(store: &mut Store, team_id: TeamId, kind: QueueKind) -> QueueEntry {
    shift_back(store, kind);
    insert_entry(store, team_id, kind, 1)
}

/// Remove an entry and close the gap it leaves
pub fn remove(store: &mut Store, entry_id: QueueEntryId) -> Option<QueueEntry> {
    let entry = store.queue_entries.remove(&entry_id)?;
    renumber(store, entry.queue_type);
    Some(entry)
}

/// Give an existing entry position 1, keeping the relative order of the rest
pub fn move_to_front(store: &mut Store, entry_id: QueueEntryId) -> Option<QueueEntry> {
    let kind = find_by_id(store, entry_id)?.queue_type;
    if let Some(entry) = store.queue_entries.get_mut(&entry_id) {
        entry.position = 0;
    }
    renumber(store, kind);
    find_by_id(store, entry_id).cloned()
}

pub fn clear(store: &mut Store, kind: QueueKind) -> usize {
    let before = store.queue_entries.len();
    store.queue_entries.retain(|_, entry| entry.queue_type != kind);
    before - store.queue_entries.len()
}

fn insert_entry(store: &mut Store, team_id: TeamId, kind: QueueKind, position: usize) -> QueueEntry {
    let entry = QueueEntry {
        id: store.next_queue_entry_id(),
        team_id,
        queue_type: kind,
        position,
        created_at: Utc::now(),
    };
    store.queue_entries.insert(entry.id, entry.clone());
    entry
}

fn shift_back(store: &mut Store, kind: QueueKind) {
    for entry in store.queue_entries.values_mut() {
        if entry.queue_type == kind {
            entry.position += 1;
        }
    }
}

/// Reassign positions 1..N in the current order
fn renumber(store: &mut Store, kind: QueueKind) {
    let ordered: Vec<QueueEntryId> = entries(store, kind).iter().map(|entry| entry.id).collect();
    for (idx, entry_id) in ordered.into_iter().enumerate() {
        if let Some(entry) = store.queue_entries.get_mut(&entry_id) {
            entry.position = idx + 1;
        }
    }
}
