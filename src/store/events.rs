use chrono::Utc;
use log::debug;

use super::Store;
use crate::domain::{CourtId, GameEvent, NewEvent};

/// Record an event at the head of the log, dropping the oldest entries
/// beyond the configured capacity
pub fn append(store: &mut Store, event: NewEvent) -> GameEvent {
    let id = store.next_event_id();
    let event = event.into_event(id, Utc::now());
    debug!("Event {} ({:?}): {}", event.id, event.kind, event.description);

    store.events.push_front(event.clone());
    store.events.truncate(store.config.events.capacity);
    event
}

/// Newest-first view of the log, optionally limited
pub fn recent(store: &Store, limit: Option<usize>) -> Vec<GameEvent> {
    let limit = limit.unwrap_or(store.events.len());
    store.events.iter().take(limit).cloned().collect()
}

pub fn for_court(store: &Store, court_id: CourtId) -> Vec<GameEvent> {
    store
        .events
        .iter()
        .filter(|event| event.court_id == Some(court_id))
        .cloned()
        .collect()
}

pub fn iter(store: &Store) -> impl Iterator<Item = &GameEvent> {
    store.events.iter()
}

pub fn count(store: &Store) -> usize {
    store.events.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{Court, CourtKind, EventKind};

    fn small_store(capacity: usize) -> Store {
        let mut config = AppConfig::new();
        config.events.capacity = capacity;
        Store::new(config)
    }

    #[test]
    fn test_log_is_newest_first_and_capped() {
        let mut store = small_store(3);
        for i in 0..5 {
            append(&mut store, NewEvent::new(EventKind::TeamAdded, format!("event {i}")));
        }

        let events = recent(&store, None);
        let descriptions: Vec<&str> = events.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["event 4", "event 3", "event 2"]);
        assert_eq!(count(&store), 3);
    }

    #[test]
    fn test_recent_limit_and_court_filter() {
        let mut store = small_store(10);
        let court = Court::new(9, "Court 3", CourtKind::Challenger, "green");
        append(&mut store, NewEvent::new(EventKind::TeamAdded, "unrelated"));
        append(&mut store, NewEvent::new(EventKind::CourtCleared, "cleared").with_court(&court));

        assert_eq!(recent(&store, Some(1)).len(), 1);
        let court_events = for_court(&store, 9);
        assert_eq!(court_events.len(), 1);
        assert_eq!(court_events[0].court_name.as_deref(), Some("Court 3"));
    }
}
