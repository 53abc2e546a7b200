use crate::domain::CourtKind;

/// Court created on every startup
///
/// Courts are never deleted while the process runs, so this list is the
/// full layout of the event unless someone adds courts through the API.
#[derive(Debug, Clone)]
pub struct CourtSeed {
    pub name: &'static str,
    pub kind: CourtKind,
    pub net_color: &'static str,
}

impl CourtSeed {
    pub fn new(name: &'static str, kind: CourtKind, net_color: &'static str) -> Self {
        Self {
            name,
            kind,
            net_color,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamSeed {
    pub name: &'static str,
    pub players: &'static [&'static str],
}

impl TeamSeed {
    pub fn new(name: &'static str, players: &'static [&'static str]) -> Self {
        Self { name, players }
    }
}

/// Get the default court layout
pub fn get_courts() -> Vec<CourtSeed> {
    vec![
        CourtSeed::new("Kings Court", CourtKind::Kings, "gold"),
        CourtSeed::new("Court 2", CourtKind::Challenger, "blue"),
        CourtSeed::new("Court 3", CourtKind::Challenger, "green"),
        CourtSeed::new("Court 4", CourtKind::Challenger, "red"),
    ]
}

/// Get the teams registered before doors open
pub fn get_teams() -> Vec<TeamSeed> {
    vec![
        TeamSeed::new("Sand Storm", &["Maya", "Jonah", "Priya", "Leo"]),
        TeamSeed::new("Net Ninjas", &["Ava", "Sam", "Kai"]),
        TeamSeed::new("Block Party", &["Noor", "Eli", "Rosa", "Finn"]),
        TeamSeed::new("Dig Deep", &["Tess", "Omar"]),
        TeamSeed::new("Spike Force", &["Lena", "Marco", "Zoe", "Ian"]),
        TeamSeed::new("Ace Ventura", &[]),
    ]
}
