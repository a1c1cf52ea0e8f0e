//! Weekend Cup
//!
//! Schedules ten games over three days for a five-position roster, with a
//! few players missing a day. New bests are logged as the workers find
//! them; the final schedule and its score breakdown are printed at the end.
//!
//! Usage: `weekend-cup [roster.toml] [bans.toml] [seconds]`

use std::error::Error;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use matchforge::prelude::*;
use matchforge::{best_solution_channel, DiagnosticLevel};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_SECONDS: u64 = 30;

/// `bans.toml`: one table per day.
#[derive(Debug, Default, Deserialize)]
struct BanFile {
    #[serde(default)]
    days: Vec<DayBans>,
}

#[derive(Debug, Deserialize)]
struct DayBans {
    day: u32,
    players: Vec<String>,
}

impl BanFile {
    fn into_ban_list(self) -> BanList {
        let mut bans = BanList::new();
        for day in self.days {
            for name in day.players {
                bans.ban(day.day, name);
            }
        }
        bans
    }
}

fn demo_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(toml::from_str(&text)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let roster_path = args.next().map(PathBuf::from).unwrap_or_else(|| demo_file("roster.toml"));
    let bans_path = args.next().map(PathBuf::from).unwrap_or_else(|| demo_file("bans.toml"));
    let seconds = match args.next() {
        Some(s) => s.parse()?,
        None => DEFAULT_SECONDS,
    };

    let roster: RosterInput = read_toml(&roster_path)?;
    let bans = if bans_path.exists() {
        read_toml::<BanFile>(&bans_path)?.into_ban_list()
    } else {
        BanList::new()
    };

    let config = SolverConfig::load("matchforge.toml")
        .or_else(|_| SolverConfig::load(demo_file("matchforge.toml")))
        .unwrap_or_default();
    let solver = TournamentSolver::new(config);

    let (sender, mut receiver) = best_solution_channel();
    let progress = thread::spawn(move || {
        while let Some(event) = receiver.blocking_recv() {
            info!(
                worker = event.worker,
                elapsed_ms = event.elapsed.as_millis() as u64,
                "New best score {}",
                event.score
            );
        }
    });

    let request = SolveRequest::new(roster, Duration::from_secs(seconds)).with_bans(bans);
    let outcome = solver.solve_with_listener(request, sender)?;
    let _ = progress.join();

    for entry in outcome.diagnostics.entries() {
        if entry.level >= DiagnosticLevel::Skipped {
            println!("{}", entry);
        }
    }

    println!("\nStatus: {}", outcome.status);
    let Some(schedule) = &outcome.schedule else {
        return Ok(());
    };
    println!("\n{}", schedule);
    if let Some(analysis) = &outcome.constraints {
        println!("{}", analysis);
    }
    if let Some(objective) = &outcome.objective {
        println!(
            "Never enemies: {}, never allies: {}, lower bound: {}",
            objective.never_enemies, objective.never_allies, objective.lower_bound
        );
    }
    println!(
        "{} steps, {} moves evaluated ({:.0}/s)",
        outcome.statistics.total_step_count,
        outcome.statistics.total_moves_evaluated,
        outcome.statistics.moves_per_second()
    );
    Ok(())
}
