//! Deck simulator CLI - headless gesture sessions against the deck screen.
//!
//! Each session feeds synthetic touches into a `DeckScreen`, commits its
//! intents in process and checks the deck invariants every frame. One JSON
//! line per session is written to the report.

mod errors;
mod report;
mod seed;
mod simulator;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use deck::telemetry::init_tracing;
use deck::{DeckConfig, StaticCards};
use errors::SimulatorError;
use report::{ReportWriter, SessionReport};
use simulator::{showcase, Session, Step, StepGenerator};
use tracing::{error, info};
use types::Scenario;

#[derive(Parser)]
#[command(name = "deck-simulator")]
#[command(about = "Headless gesture simulator for the card deck")]
struct Args {
    /// Number of sessions to run
    #[arg(short, long, default_value = "1")]
    sessions: u32,

    /// Generated steps per random session
    #[arg(long, default_value = "200")]
    steps: u32,

    /// Base seed; session `n` uses `seed + n`. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value = "random")]
    scenario: Scenario,

    /// JSON file with `DeckConfig` overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of cards to seed the deck with
    #[arg(long)]
    cards: Option<PathBuf>,

    /// Report path; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include the final frame layout in each report line
    #[arg(long)]
    with_layout: bool,

    /// Include every step in each report line
    #[arg(long)]
    with_steps: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON
    #[arg(long)]
    json_log: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.json_log, if args.verbose { "debug" } else { "warn" });

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "simulation failed");
            eprintln!("deck-simulator: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimulatorError> {
    let config = load_config(args)?;
    let cards = match &args.cards {
        Some(path) => seed::cards_from_json(&std::fs::read_to_string(path)?)?,
        None => seed::initial_cards(),
    };
    info!(
        sessions = args.sessions,
        scenario = ?args.scenario,
        cards = cards.0.len(),
        "starting deck simulator"
    );

    let mut writer = ReportWriter::new(args.output.as_deref())?;
    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut failed = 0;
    let mut totals = Vec::new();

    for n in 0..args.sessions {
        let seed = base_seed.wrapping_add(u64::from(n));
        let report = run_session(args, n, seed, &config, &cards)?;
        if !report.violations.is_empty() {
            failed += 1;
            error!(
                session = n,
                seed,
                violations = report.violations.len(),
                "session broke invariants"
            );
        }
        writer.write_session(&report)?;
        totals.push(report.stats);
    }

    if let Some(path) = writer.finish()? {
        info!(path = %path.display(), "report written");
    }
    print_summary(&totals, failed, start.elapsed());

    if failed > 0 {
        return Err(SimulatorError::Violations { sessions: failed });
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<DeckConfig, SimulatorError> {
    let json: Option<serde_json::Value> = match &args.config {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let config = DeckConfig::from_json(json.as_ref())?.with_env_overrides()?;
    Ok(config)
}

fn run_session(
    args: &Args,
    n: u32,
    seed: u64,
    config: &DeckConfig,
    cards: &StaticCards,
) -> Result<SessionReport, SimulatorError> {
    let started = Instant::now();
    let mut session = Session::new(config.clone(), cards)?;
    let mut recorded = Vec::new();

    let mut play = |session: &mut Session, step: Step| {
        session.run(&step);
        if args.with_steps {
            recorded.push(step);
        }
    };

    match args.scenario {
        Scenario::Random => {
            let mut generator = StepGenerator::new(seed);
            for _ in 0..args.steps {
                let step = generator.next_step(&session);
                play(&mut session, step);
            }
        }
        Scenario::Showcase => {
            for step in showcase(&session) {
                play(&mut session, step);
            }
        }
    }
    // Let everything in flight settle before the final snapshot.
    play(&mut session, Step::Wait { frames: 120 });

    Ok(SessionReport {
        session: n,
        seed,
        scenario: args.scenario,
        duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        stats: session.stats().clone(),
        violations: session.violations().to_vec(),
        final_snapshot: session.snapshot(),
        layout: args.with_layout.then(|| session.layout()),
        steps: recorded,
    })
}

fn print_summary(
    totals: &[simulator::SessionStats],
    failed: usize,
    elapsed: std::time::Duration,
) {
    eprintln!("\n=== Simulation Summary ===");
    eprintln!("Sessions: {} ({} with violations)", totals.len(), failed);
    eprintln!("Total time: {:?}", elapsed);
    if totals.is_empty() {
        return;
    }
    let sum = |f: fn(&simulator::SessionStats) -> u64| totals.iter().map(f).sum::<u64>();
    eprintln!("Frames: {}", sum(|s| s.frames));
    eprintln!(
        "Filed: {}, deleted: {}, expanded: {}, collapsed: {}",
        sum(|s| s.filed.into()),
        sum(|s| s.deleted.into()),
        sum(|s| s.expanded.into()),
        sum(|s| s.collapsed.into()),
    );
    eprintln!(
        "Activated: {}, cleared: {}, refused intents: {}",
        sum(|s| s.activated.into()),
        sum(|s| s.cleared.into()),
        sum(|s| s.refused.into()),
    );
}
