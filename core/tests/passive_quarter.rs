//! A quarter with zero cards played: the restraint bonus pays the full
//! 0-card rate and favorability cannot rise, whatever base operations
//! happen to earn.

use boardroom_core::{
    config::EngineConfig,
    content::Catalog,
    engine::{CrisisAction, Engine, PlayAction, PlayerInput},
    journal::{CapitalReason, LogEntry},
    state::{GameState, Phase},
    QuarterRng,
};

fn build_engine() -> Engine {
    Engine::new(Catalog::baseline(), EngineConfig::default())
}

fn passive_input(engine: &Engine, state: &GameState) -> PlayerInput {
    match state.phase {
        Phase::Demand | Phase::Resolution => PlayerInput::Advance,
        Phase::PlayCards => PlayerInput::Play(PlayAction::End),
        Phase::Crisis => match &state.pending_crisis {
            None => PlayerInput::Advance,
            Some(pending) => {
                let crisis = match &pending.origin {
                    Some(record) => &engine
                        .catalog()
                        .situation(&record.situation)
                        .expect("situation exists")
                        .crisis,
                    None => engine.catalog().crisis(&pending.card).expect("crisis exists"),
                };
                let choice = crisis
                    .choices
                    .iter()
                    .find(|c| c.capital_cost == 0 && c.intensity == 0)
                    .or_else(|| crisis.choices.first())
                    .expect("crisis has choices");
                PlayerInput::Crisis(CrisisAction::Choose {
                    choice: choice.id.clone(),
                })
            }
        },
    }
}

fn run_one_passive_quarter(seed: u64) -> Vec<LogEntry> {
    let engine = build_engine();
    let mut rng = QuarterRng::seed_from(seed);
    let mut state = engine.new_game(&mut rng);
    let mut log = Vec::new();

    while state.quarter == 1 && !state.is_terminal() {
        let input = passive_input(&engine, &state);
        let transition = engine.advance(&state, &input, &mut rng).expect("valid");
        log.extend(transition.log);
        state = transition.state;
    }
    log
}

#[test]
fn zero_cards_earns_the_full_restraint_bonus() {
    for seed in [1u64, 2, 3, 50, 77] {
        let log = run_one_passive_quarter(seed);
        let restraint = log.iter().find_map(|e| match e {
            LogEntry::CapitalChanged {
                delta,
                reason: CapitalReason::Restraint,
                ..
            } => Some(*delta),
            _ => None,
        });
        assert_eq!(
            restraint,
            Some(3),
            "seed {seed}: 0-card quarter must earn exactly the 0-card rate"
        );
    }
}

#[test]
fn zero_cards_blocks_favorability_gains() {
    for seed in [1u64, 2, 3, 50, 77] {
        let log = run_one_passive_quarter(seed);
        let delta = log
            .iter()
            .find_map(|e| match e {
                LogEntry::FavorabilityChanged { delta, .. } => Some(*delta),
                _ => None,
            })
            .expect("resolution always reports favorability");
        assert!(
            delta <= 0,
            "seed {seed}: passive quarter gained favorability ({delta})"
        );
    }
}
