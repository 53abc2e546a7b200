use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use crate::config::settings::AppConfig;
use crate::domain::{CourtKind, CourtView, QueueKind};
use crate::rotation::queue as queue_manager;
use crate::store::{courts, teams, Store};

/// Prints the state a fresh server would start with
pub struct OverviewService {
    config: AppConfig,
    as_json: bool,
}

impl OverviewService {
    pub fn new(config: AppConfig, as_json: bool) -> Self {
        Self { config, as_json }
    }

    pub fn run(&self) -> Result<()> {
        let store = Store::seeded(self.config.clone()).context("Failed to seed default courts and teams")?;
        if self.as_json {
            self.print_json(&store)
        } else {
            self.print_summary(&store);
            Ok(())
        }
    }

    fn print_json(&self, store: &Store) -> Result<()> {
        let snapshot = json!({
            "courts": courts::list_views(store),
            "teams": teams::list_all(store),
            "queues": {
                "general": queue_manager::list(store, QueueKind::General),
                "kingsCourt": queue_manager::list(store, QueueKind::KingsCourt),
            },
        });
        let text = serde_json::to_string_pretty(&snapshot).context("Failed to serialize overview")?;
        println!("{text}");
        Ok(())
    }

    fn print_summary(&self, store: &Store) {
        println!("{}", "Courts".bold());
        for view in courts::list_views(store) {
            println!("  {}", format_court(&view));
        }

        println!("{}", "Queues".bold());
        for kind in QueueKind::ALL {
            let names: Vec<String> = queue_manager::list(store, kind)
                .into_iter()
                .map(|v| format!("{}. {}", v.entry.position, v.team.name))
                .collect();
            let listing = if names.is_empty() { "(empty)".dimmed().to_string() } else { names.join(", ") };
            println!("  {:<12} {}", kind.as_str(), listing);
        }

        println!("{}", "Teams".bold());
        for team in teams::list_all(store) {
            let players = if team.players.is_empty() { "no players listed".to_string() } else { team.players.join(", ") };
            println!("  {:>3}  {}  {}", team.id, team.name.cyan(), players.dimmed());
        }
    }
}

fn format_court(view: &CourtView) -> String {
    let name = match view.court.kind {
        CourtKind::Kings => view.court.name.yellow().bold(),
        CourtKind::Challenger => view.court.name.normal(),
    };
    let slot = |team: &Option<crate::domain::Team>| {
        team.as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "{} [{}] {} vs {} ({:?})",
        name,
        view.court.net_color,
        slot(&view.team1),
        slot(&view.team2),
        view.court.status
    )
}
