use chilldown_core::stats::format_duration;
use chilldown_core::StateStore;
use chrono::Local;
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Totals and averages over every completed session
    Summary,
    /// Most recent completed sessions
    Recent {
        /// How many entries to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Full statistics log as JSON
    Show,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    let stats = store.load_stats().unwrap_or_default();

    match action {
        StatsAction::Summary => {
            #[derive(Serialize)]
            struct Summary {
                total_completed: u64,
                total_time: String,
                average_session: String,
                last_completed: Option<String>,
            }

            let summary = Summary {
                total_completed: stats.total_completed,
                total_time: format_duration(stats.total_time_secs),
                average_session: format_duration(stats.average_duration_secs()),
                last_completed: stats.last_completed.map(|at| at.to_rfc3339()),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Recent { limit } => {
            // completion times are stored UTC
            for entry in stats.sessions.iter().rev().take(limit) {
                println!(
                    "{}  {}",
                    entry.completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    format_duration(entry.duration_secs)
                );
            }
        }
        StatsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
