//! The phase cursor must cycle strictly:
//! Demand → PlayCards → Crisis → Resolution → Demand(quarter + 1).

use boardroom_core::{
    config::EngineConfig,
    content::Catalog,
    engine::{CrisisAction, Engine, PlayAction, PlayerInput},
    state::{GameState, Phase},
    EngineError, QuarterRng,
};

fn build_engine() -> Engine {
    Engine::new(Catalog::baseline(), EngineConfig::default())
}

fn phase_input(engine: &Engine, state: &GameState) -> PlayerInput {
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
                PlayerInput::Crisis(CrisisAction::Choose {
                    choice: crisis.choices[0].id.clone(),
                })
            }
        },
    }
}

#[test]
fn phases_cycle_in_strict_order() {
    let engine = build_engine();
    let mut rng = QuarterRng::seed_from(11);
    let mut state = engine.new_game(&mut rng);

    let mut prev = (state.quarter, state.phase);
    for _ in 0..120 {
        if state.is_terminal() {
            break;
        }
        let input = phase_input(&engine, &state);
        state = engine.advance(&state, &input, &mut rng).expect("valid").state;

        let (pq, pp) = prev;
        let (q, p) = (state.quarter, state.phase);
        match pp {
            Phase::Demand => assert_eq!((q, p), (pq, Phase::PlayCards)),
            Phase::PlayCards => assert_eq!((q, p), (pq, Phase::Crisis)),
            Phase::Crisis => assert_eq!((q, p), (pq, Phase::Resolution)),
            Phase::Resolution => {
                if !state.is_terminal() {
                    assert_eq!(p, Phase::Demand, "Resolution must hand off to Demand");
                    assert_eq!(q, pq + 1, "quarter must increment by exactly 1");
                }
            }
        }
        prev = (q, p);
    }
}

#[test]
fn quarter_number_never_decreases() {
    let engine = build_engine();
    let mut rng = QuarterRng::seed_from(23);
    let mut state = engine.new_game(&mut rng);

    let mut last_quarter = state.quarter;
    for _ in 0..120 {
        if state.is_terminal() {
            break;
        }
        let input = phase_input(&engine, &state);
        state = engine.advance(&state, &input, &mut rng).expect("valid").state;
        assert!(
            state.quarter >= last_quarter,
            "quarter went backwards: {} -> {}",
            last_quarter,
            state.quarter
        );
        last_quarter = state.quarter;
    }
}

#[test]
fn wrong_phase_input_is_rejected() {
    let engine = build_engine();
    let mut rng = QuarterRng::seed_from(5);
    let state = engine.new_game(&mut rng);

    // Fresh game is in Demand; card plays belong to PlayCards.
    let result = engine.advance(
        &state,
        &PlayerInput::Play(PlayAction::End),
        &mut rng,
    );
    assert!(
        matches!(result, Err(EngineError::WrongPhase { phase: Phase::Demand })),
        "expected WrongPhase, got {result:?}"
    );
}
