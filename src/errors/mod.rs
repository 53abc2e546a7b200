use thiserror::Error;

use crate::domain::{CourtId, QueueEntryId, QueueKind, TeamId};

/// Broad failure classes, used by the HTTP layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    InvariantViolation,
    InsufficientResources,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    #[error("Team {0} not found")]
    TeamNotFound(TeamId),

    #[error("Court {0} not found")]
    CourtNotFound(CourtId),

    #[error("Queue entry {0} not found")]
    QueueEntryNotFound(QueueEntryId),

    #[error("Team name must be between 1 and {max} characters")]
    InvalidTeamName { max: usize },

    #[error("Court name must be between 1 and {max} characters")]
    InvalidCourtName { max: usize },

    #[error("A team can have at most {max} players")]
    TooManyPlayers { max: usize },

    #[error("Team name '{0}' is already taken")]
    DuplicateTeamName(String),

    #[error("Team {0} is already on a court")]
    TeamOnCourt(TeamId),

    #[error("Team {team_id} is already in the {queue} queue")]
    TeamAlreadyQueued { team_id: TeamId, queue: QueueKind },

    #[error("A team cannot play against itself")]
    SameTeam,

    #[error("Court already has two teams")]
    CourtFull,

    #[error("Court must have two teams to report a game")]
    CourtNotReady,

    #[error("Scores cannot be tied")]
    TiedScore,

    #[error("Not enough teams in queue to fill the court")]
    NotEnoughTeams,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RotationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RotationError::TeamNotFound(_)
            | RotationError::CourtNotFound(_)
            | RotationError::QueueEntryNotFound(_) => ErrorCategory::NotFound,
            RotationError::NotEnoughTeams => ErrorCategory::InsufficientResources,
            RotationError::Internal(_) => ErrorCategory::Internal,
            _ => ErrorCategory::InvariantViolation,
        }
    }
}

pub type RotationResult<T> = Result<T, RotationError>;
