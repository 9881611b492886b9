//! quarter-runner: headless driver for the boardroom engine.
//!
//! Usage:
//!   quarter-runner --seed 12345 --quarters 40
//!   quarter-runner --seed 12345 --quarters 40 --dump-state
//!
//! Plays a fixed baseline policy: up to two affordable cards per
//! quarter, the first affordable choice on any crisis. Useful for
//! balance sweeps and for eyeballing a full run's log.

use anyhow::Result;
use boardroom_core::{
    config::EngineConfig,
    content::Catalog,
    engine::{CrisisAction, Engine, PlayAction, PlayerInput},
    journal::LogEntry,
    state::{GameState, Phase, Terminal},
    QuarterRng,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let quarters = parse_arg(&args, "--quarters", 40u32);
    let dump_state = args.iter().any(|a| a == "--dump-state");

    println!("boardroom quarter-runner");
    println!("  seed:     {seed}");
    println!("  quarters: {quarters}");
    println!();

    let engine = Engine::new(Catalog::baseline(), EngineConfig::default());
    let mut rng = QuarterRng::seed_from(seed);
    let mut state = engine.new_game(&mut rng);
    let mut entries = 0usize;

    while state.quarter <= quarters && !state.is_terminal() {
        let quarter = state.quarter;
        let log = run_quarter(&engine, &mut state, &mut rng)?;
        entries += log.len();
        log::info!("quarter={quarter} completed, {} log entries", log.len());
    }

    print_summary(&state, entries);
    if dump_state {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}

/// Drive one full quarter under the baseline policy. Returns the
/// concatenated transition logs.
fn run_quarter(
    engine: &Engine,
    state: &mut GameState,
    rng: &mut QuarterRng,
) -> Result<Vec<LogEntry>> {
    let mut log = Vec::new();
    let starting_quarter = state.quarter;

    while !state.is_terminal() && state.quarter == starting_quarter {
        let input = pick_input(engine, state);
        let transition = engine.advance(state, &input, rng)?;
        log.extend(transition.log);
        *state = transition.state;
    }
    Ok(log)
}

fn pick_input(engine: &Engine, state: &GameState) -> PlayerInput {
    match state.phase {
        Phase::Demand | Phase::Resolution => PlayerInput::Advance,
        Phase::PlayCards => {
            if state.cards_played < 2 {
                if let Some(card) = state
                    .hand
                    .iter()
                    .find(|c| engine.can_play(state, c))
                    .cloned()
                {
                    return PlayerInput::Play(PlayAction::Card { card });
                }
            }
            PlayerInput::Play(PlayAction::End)
        }
        Phase::Crisis => match &state.pending_crisis {
            None => PlayerInput::Advance,
            Some(pending) => {
                let crisis = match &pending.origin {
                    Some(record) => engine
                        .catalog()
                        .situation(&record.situation)
                        .map(|def| &def.crisis),
                    None => engine.catalog().crisis(&pending.card),
                }
                .expect("pending crisis exists in catalog");

                let choice = crisis
                    .choices
                    .iter()
                    .find(|c| engine.can_afford(state, c.capital_cost) && c.intensity == 0)
                    .or_else(|| crisis.choices.first())
                    .expect("crisis has at least two choices");
                PlayerInput::Crisis(CrisisAction::Choose {
                    choice: choice.id.clone(),
                })
            }
        },
    }
}

fn print_summary(state: &GameState, log_entries: usize) {
    println!("── run summary ─────────────────────────");
    println!("  quarters survived: {}", state.tenure.quarters_survived);
    println!("  favorability:      {}", state.tenure.board_favorability);
    println!("  lifetime profit:   {}M", state.tenure.lifetime_profit);
    println!("  evil score:        {}", state.tenure.evil_score);
    println!("  capital:           {}", state.capital.balance());
    println!("  log entries:       {log_entries}");
    match &state.tenure.terminal {
        Some(Terminal::Ousted { parachute }) => {
            println!("  ending:            ousted (parachute {parachute}M)")
        }
        Some(Terminal::Retired { parachute }) => {
            println!("  ending:            retired (parachute {parachute}M)")
        }
        None => println!("  ending:            still employed"),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
