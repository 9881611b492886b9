//! THE MOST IMPORTANT TEST IN THE PROJECT.
//!
//! Two runs, same seed, same scripted inputs.
//! They must produce byte-identical states and logs every quarter.
//! Any divergence is a blocker — do not merge until fixed.

use boardroom_core::{
    config::EngineConfig,
    content::Catalog,
    engine::{CrisisAction, Engine, PlayAction, PlayerInput},
    state::{GameState, Phase},
    QuarterRng,
};

fn build_engine() -> Engine {
    Engine::new(Catalog::baseline(), EngineConfig::default())
}

/// The fixed test policy: up to two playable cards per quarter, first
/// low-intensity affordable choice on any crisis.
fn scripted_input(engine: &Engine, state: &GameState) -> PlayerInput {
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
                    Some(record) => &engine
                        .catalog()
                        .situation(&record.situation)
                        .expect("situation in catalog")
                        .crisis,
                    None => engine
                        .catalog()
                        .crisis(&pending.card)
                        .expect("crisis in catalog"),
                };
                let choice = crisis
                    .choices
                    .iter()
                    .find(|c| engine.can_afford(state, c.capital_cost) && c.intensity == 0)
                    .or_else(|| crisis.choices.first())
                    .expect("crisis has choices");
                PlayerInput::Crisis(CrisisAction::Choose {
                    choice: choice.id.clone(),
                })
            }
        },
    }
}

/// Run the scripted policy for up to `quarters` quarters. Returns the
/// serialized log of every transition plus the final serialized state.
fn run_game(seed: u64, quarters: u32) -> (Vec<String>, String) {
    let engine = build_engine();
    let mut rng = QuarterRng::seed_from(seed);
    let mut state = engine.new_game(&mut rng);
    let mut log_lines = Vec::new();

    while state.quarter <= quarters && !state.is_terminal() {
        let input = scripted_input(&engine, &state);
        let transition = engine
            .advance(&state, &input, &mut rng)
            .expect("scripted input is always valid");
        for entry in &transition.log {
            log_lines.push(serde_json::to_string(entry).expect("log serializes"));
        }
        state = transition.state;
    }

    let final_state = serde_json::to_string(&state).expect("state serializes");
    (log_lines, final_state)
}

#[test]
fn same_seed_produces_identical_runs() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;
    const QUARTERS: u32 = 40;

    let (log_a, state_a) = run_game(SEED, QUARTERS);
    let (log_b, state_b) = run_game(SEED, QUARTERS);

    assert_eq!(
        log_a.len(),
        log_b.len(),
        "Log lengths differ: {} vs {}",
        log_a.len(),
        log_b.len()
    );
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "Log diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }
    assert_eq!(state_a, state_b, "Final states differ");
}

#[test]
fn different_seeds_produce_different_runs() {
    let (log_a, _) = run_game(42, 12);
    let (log_b, _) = run_game(99, 12);

    // With different seeds the deck order and outcome rolls should
    // diverge. This verifies the seed is actually observable.
    let any_different = log_a.len() != log_b.len()
        || log_a.iter().zip(log_b.iter()).any(|(a, b)| a != b);
    assert!(
        any_different,
        "Different seeds produced identical runs — seed is not being used"
    );
}

#[test]
fn state_round_trips_through_serde() {
    let engine = build_engine();
    let mut rng = QuarterRng::seed_from(7);
    let mut state = engine.new_game(&mut rng);

    // Advance a couple of quarters so the queues and history are
    // non-trivial before round-tripping.
    while state.quarter <= 3 && !state.is_terminal() {
        let input = scripted_input(&engine, &state);
        state = engine
            .advance(&state, &input, &mut rng)
            .expect("valid input")
            .state;
    }

    let json = serde_json::to_string(&state).expect("serialize");
    let restored: boardroom_core::GameState =
        serde_json::from_str(&json).expect("deserialize");
    assert_eq!(state, restored, "GameState did not round-trip losslessly");
}
