pub mod assignment;
pub mod location;
pub mod outcome;
pub mod queue;
pub mod stats;

pub use assignment::{assign, clear, fill_from_queue, FillOutcome};
pub use location::{locate, relocate, Destination, Placement, TeamLocation};
pub use outcome::{report_game, GameReport};
pub use queue::{BulkEnqueueOutcome, BulkFailure};
pub use stats::{standings, team_stats, TeamStanding, TeamStats};
