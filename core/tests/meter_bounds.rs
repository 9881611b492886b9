//! Invariant sweeps: meters stay in [0, 100] and capital stays in
//! [0, max] across long runs under several seeds.

use boardroom_core::{
    config::EngineConfig,
    content::Catalog,
    engine::{CrisisAction, Engine, PlayAction, PlayerInput},
    meters::Meter,
    state::{GameState, Phase},
    QuarterRng,
};

fn build_engine() -> Engine {
    Engine::new(Catalog::baseline(), EngineConfig::default())
}

/// An aggressive policy: play everything affordable, pick the nastiest
/// (highest-intensity) crisis choice. Stresses the clamps hardest.
fn aggressive_input(engine: &Engine, state: &GameState) -> PlayerInput {
    match state.phase {
        Phase::Demand | Phase::Resolution => PlayerInput::Advance,
        Phase::PlayCards => {
            if let Some(card) = state
                .hand
                .iter()
                .find(|c| engine.can_play(state, c))
                .cloned()
            {
                return PlayerInput::Play(PlayAction::Card { card });
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
                        .expect("situation exists")
                        .crisis,
                    None => engine.catalog().crisis(&pending.card).expect("crisis exists"),
                };
                let choice = crisis
                    .choices
                    .iter()
                    .filter(|c| engine.can_afford(state, c.capital_cost))
                    .max_by_key(|c| c.intensity)
                    .expect("at least one affordable choice");
                PlayerInput::Crisis(CrisisAction::Choose {
                    choice: choice.id.clone(),
                })
            }
        },
    }
}

#[test]
fn meters_stay_in_bounds_across_long_runs() {
    for seed in [1u64, 77, 400, 9001] {
        let engine = build_engine();
        let mut rng = QuarterRng::seed_from(seed);
        let mut state = engine.new_game(&mut rng);

        for _ in 0..400 {
            if state.is_terminal() {
                break;
            }
            let input = aggressive_input(&engine, &state);
            state = engine.advance(&state, &input, &mut rng).expect("valid").state;

            for meter in Meter::ALL {
                let value = state.meters.get(meter);
                assert!(
                    (0..=100).contains(&value),
                    "seed {seed}: meter {meter:?} out of bounds: {value}"
                );
            }
        }
    }
}

#[test]
fn capital_stays_in_bounds_across_long_runs() {
    let max = EngineConfig::default().capital.max;
    for seed in [3u64, 58, 1234] {
        let engine = build_engine();
        let mut rng = QuarterRng::seed_from(seed);
        let mut state = engine.new_game(&mut rng);

        for _ in 0..400 {
            if state.is_terminal() {
                break;
            }
            let input = aggressive_input(&engine, &state);
            state = engine.advance(&state, &input, &mut rng).expect("valid").state;
            assert!(
                state.capital.balance() <= max,
                "seed {seed}: capital above max: {}",
                state.capital.balance()
            );
        }
    }
}

#[test]
fn favorability_stays_in_bounds() {
    let engine = build_engine();
    let mut rng = QuarterRng::seed_from(15);
    let mut state = engine.new_game(&mut rng);

    for _ in 0..400 {
        if state.is_terminal() {
            break;
        }
        let input = aggressive_input(&engine, &state);
        state = engine.advance(&state, &input, &mut rng).expect("valid").state;
        let fav = state.tenure.board_favorability;
        assert!(
            (0..=100).contains(&fav),
            "favorability out of bounds: {fav}"
        );
    }
}
