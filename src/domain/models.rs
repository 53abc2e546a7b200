use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type TeamId = u64;
pub type CourtId = u64;
pub type QueueEntryId = u64;
pub type EventId = u64;

/// Which outcome rules a court follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtKind {
    Challenger,
    Kings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtStatus {
    Empty,
    Playing,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    General,
    KingsCourt,
}

impl QueueKind {
    pub const ALL: [QueueKind; 2] = [QueueKind::General, QueueKind::KingsCourt];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueKind::General => "general",
            QueueKind::KingsCourt => "kings_court",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(QueueKind::General),
            "kings_court" => Ok(QueueKind::KingsCourt),
            other => Err(format!("unknown queue type '{other}'")),
        }
    }
}

/// One of the two team positions on a court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::One, Slot::Two];

    pub fn other(self) -> Slot {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    pub kind: CourtKind,
    pub slot1: Option<TeamId>,
    pub slot2: Option<TeamId>,
    pub status: CourtStatus,
    pub score: String,
    pub net_color: String,
    pub slot1_wins: u32,
    pub slot2_wins: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Court {
    pub fn new(id: CourtId, name: &str, kind: CourtKind, net_color: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.to_string(),
            kind,
            slot1: None,
            slot2: None,
            status: CourtStatus::Empty,
            score: String::new(),
            net_color: net_color.to_string(),
            slot1_wins: 0,
            slot2_wins: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn team(&self, slot: Slot) -> Option<TeamId> {
        match slot {
            Slot::One => self.slot1,
            Slot::Two => self.slot2,
        }
    }

    pub fn set_team(&mut self, slot: Slot, team_id: Option<TeamId>) {
        match slot {
            Slot::One => self.slot1 = team_id,
            Slot::Two => self.slot2 = team_id,
        }
    }

    pub fn wins(&self, slot: Slot) -> u32 {
        match slot {
            Slot::One => self.slot1_wins,
            Slot::Two => self.slot2_wins,
        }
    }

    pub fn set_wins(&mut self, slot: Slot, wins: u32) {
        match slot {
            Slot::One => self.slot1_wins = wins,
            Slot::Two => self.slot2_wins = wins,
        }
    }

    pub fn slot_of(&self, team_id: TeamId) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.team(*slot) == Some(team_id))
    }

    pub fn empty_slots(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.team(*slot).is_none())
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.slot1.is_some() && self.slot2.is_some()
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        [self.slot1, self.slot2].into_iter().flatten().collect()
    }

    /// Empty both slots and forget the streaks and score
    pub fn reset(&mut self) {
        self.slot1 = None;
        self.slot2 = None;
        self.slot1_wins = 0;
        self.slot2_wins = 0;
        self.score.clear();
        self.status = CourtStatus::Empty;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: QueueEntryId,
    pub team_id: TeamId,
    pub queue_type: QueueKind,
    /// 1-based, dense within one queue kind
    pub position: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CourtCleared,
    TeamsAdded,
    GameReported,
    TeamDeleted,
    TeamAdded,
    TeamsQueued,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub description: String,
    pub court_id: Option<CourtId>,
    pub court_name: Option<String>,
    pub team_ids: Option<Vec<TeamId>>,
    pub score: Option<String>,
    pub net_color: Option<String>,
    pub winner_id: Option<TeamId>,
    pub loser_id: Option<TeamId>,
    pub timestamp: DateTime<Utc>,
}

/// Event contents before the log assigns an id and timestamp
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub kind: EventKind,
    pub description: String,
    pub court_id: Option<CourtId>,
    pub court_name: Option<String>,
    pub team_ids: Option<Vec<TeamId>>,
    pub score: Option<String>,
    pub net_color: Option<String>,
    pub winner_id: Option<TeamId>,
    pub loser_id: Option<TeamId>,
}

impl NewEvent {
    pub fn new(kind: EventKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            court_id: None,
            court_name: None,
            team_ids: None,
            score: None,
            net_color: None,
            winner_id: None,
            loser_id: None,
        }
    }

    pub fn with_court(mut self, court: &Court) -> Self {
        self.court_id = Some(court.id);
        self.court_name = Some(court.name.clone());
        self
    }

    pub fn with_teams(mut self, team_ids: Vec<TeamId>) -> Self {
        self.team_ids = Some(team_ids);
        self
    }

    pub fn with_result(mut self, score: String, net_color: String, winner_id: TeamId, loser_id: TeamId) -> Self {
        self.score = Some(score);
        self.net_color = Some(net_color);
        self.winner_id = Some(winner_id);
        self.loser_id = Some(loser_id);
        self
    }

    pub fn into_event(self, id: EventId, timestamp: DateTime<Utc>) -> GameEvent {
        GameEvent {
            id,
            kind: self.kind,
            description: self.description,
            court_id: self.court_id,
            court_name: self.court_name,
            team_ids: self.team_ids,
            score: self.score,
            net_color: self.net_color,
            winner_id: self.winner_id,
            loser_id: self.loser_id,
            timestamp,
        }
    }
}

// --- Read models ---

/// Court with its occupying teams resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtView {
    #[serde(flatten)]
    pub court: Court,
    pub team1: Option<Team>,
    pub team2: Option<Team>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntryView {
    #[serde(flatten)]
    pub entry: QueueEntry,
    pub team: Team,
}
