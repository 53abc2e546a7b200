#[derive(Debug, Clone)]
pub struct EventLogSettings {
    pub capacity: usize,
}

impl Default for EventLogSettings {
    fn default() -> Self {
        Self { capacity: 1000 }
    }
}

#[derive(Debug, Clone)]
pub struct TeamSettings {
    pub max_name_len: usize,
    pub max_players: usize,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            max_name_len: 50,
            max_players: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RotationSettings {
    /// Consecutive Kings Court wins after which the winner has to leave
    pub kings_streak_limit: u32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            kings_streak_limit: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub events: EventLogSettings,
    pub teams: TeamSettings,
    pub rotation: RotationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            events: EventLogSettings::default(),
            teams: TeamSettings::default(),
            rotation: RotationSettings::default(),
        }
    }
}

// Config is handed to the store explicitly when it is built, there is no
// global instance to reach for.
