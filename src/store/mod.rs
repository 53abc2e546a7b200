//! In-memory entity store
//!
//! Holds every team, court, queue entry and event of the running event.
//! Nothing is persisted: a restart builds a fresh store from the seed data.
//! The functions in the submodules take the store explicitly, the same way
//! the rest of the crate passes it around.

pub mod courts;
pub mod events;
pub mod queue;
pub mod seed;
pub mod teams;

use std::collections::{HashMap, VecDeque};

use crate::config::AppConfig;
use crate::domain::{Court, CourtId, EventId, GameEvent, QueueEntry, QueueEntryId, Team, TeamId};
use crate::errors::RotationResult;

#[derive(Debug, Default)]
struct IdCounters {
    team: u64,
    court: u64,
    queue_entry: u64,
    event: u64,
}

impl IdCounters {
    fn bump(counter: &mut u64) -> u64 {
        *counter += 1;
        *counter
    }
}

#[derive(Debug)]
pub struct Store {
    config: AppConfig,
    teams: HashMap<TeamId, Team>,
    courts: HashMap<CourtId, Court>,
    queue_entries: HashMap<QueueEntryId, QueueEntry>,
    /// Newest first
    events: VecDeque<GameEvent>,
    ids: IdCounters,
}

impl Store {
    /// Create an empty store
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            teams: HashMap::new(),
            courts: HashMap::new(),
            queue_entries: HashMap::new(),
            events: VecDeque::new(),
            ids: IdCounters::default(),
        }
    }

    /// Create a store populated with the default courts and teams
    pub fn seeded(config: AppConfig) -> RotationResult<Self> {
        let mut store = Self::new(config);
        seed::apply_defaults(&mut store)?;
        Ok(store)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn next_team_id(&mut self) -> TeamId {
        IdCounters::bump(&mut self.ids.team)
    }

    fn next_court_id(&mut self) -> CourtId {
        IdCounters::bump(&mut self.ids.court)
    }

    fn next_queue_entry_id(&mut self) -> QueueEntryId {
        IdCounters::bump(&mut self.ids.queue_entry)
    }

    fn next_event_id(&mut self) -> EventId {
        IdCounters::bump(&mut self.ids.event)
    }
}
