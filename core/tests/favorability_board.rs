//! Favorability delta scenarios against the documented reward table,
//! plus survival-odds spot checks.

use boardroom_core::{
    config::BoardTuning,
    favorability::{self, QuarterAssessment},
};

fn default_assessment() -> QuarterAssessment {
    QuarterAssessment {
        last_profit: 0,
        current_profit: 0,
        directive_met: true,
        pressure: 1,
        evil_score: 0,
        weak_project_streak: 0,
        success_streak: 0,
        quarters_survived: 2,
        lowest_meter: 50,
        cards_played: 1,
    }
}

/// Directive met, profit flat, no penalties anywhere: the delta is the
/// partial-success rate — half the honeymoon reward of 10.
#[test]
fn base_partial_success_pays_the_documented_rate() {
    let t = BoardTuning::default();
    let a = default_assessment();
    assert_eq!(favorability::favorability_delta(&a, &t), 5);
}

/// Directive met and profit grew during the honeymoon: the full rate.
#[test]
fn full_success_pays_the_full_honeymoon_rate() {
    let t = BoardTuning::default();
    let a = QuarterAssessment {
        current_profit: 8,
        ..default_assessment()
    };
    assert_eq!(favorability::favorability_delta(&a, &t), 10);
}

/// A -15M quarter with the directive unmet at pressure 1 must cost at
/// least the negative-profit penalty alone: -(4 + 15/5) = -7. Guards
/// against penalty double-counting regressions in either direction.
#[test]
fn loss_quarter_penalty_dominates_the_loss_component() {
    let t = BoardTuning::default();
    let a = QuarterAssessment {
        current_profit: -15,
        directive_met: false,
        ..default_assessment()
    };
    let delta = favorability::favorability_delta(&a, &t);
    assert!(delta < 0, "loss quarter must cost favorability, got {delta}");
    assert!(
        delta <= -7,
        "delta {delta} smaller in magnitude than the loss penalty alone (-7)"
    );
    // Loss -7, directive -3, pressure -1 = -11, clamped by the
    // tenure-scaled floor of -10.
    assert_eq!(delta, -10);
}

/// Playing zero cards caps the gain at zero even on a profitable,
/// directive-meeting quarter.
#[test]
fn passive_quarter_earns_no_favorability() {
    let t = BoardTuning::default();
    let a = QuarterAssessment {
        current_profit: 20,
        cards_played: 0,
        ..default_assessment()
    };
    assert_eq!(favorability::favorability_delta(&a, &t), 0);

    // Same quarter in the red is still allowed to cost.
    let losing = QuarterAssessment {
        current_profit: -5,
        directive_met: false,
        cards_played: 0,
        ..default_assessment()
    };
    assert!(favorability::favorability_delta(&losing, &t) < 0);
}

/// The board normalizes sustained success: a long streak tightens the
/// gain cap.
#[test]
fn success_streak_tightens_the_gain_cap() {
    let t = BoardTuning::default();
    let base = QuarterAssessment {
        current_profit: 30,
        quarters_survived: 4,
        pressure: 2,
        ..default_assessment()
    };
    // Pressure 2 pays 7 — under every cap.
    assert_eq!(favorability::favorability_delta(&base, &t), 7);

    let long_streak = QuarterAssessment {
        success_streak: 6,
        ..base
    };
    assert_eq!(
        favorability::favorability_delta(&long_streak, &t),
        5,
        "streak >= 6 caps the gain at 5"
    );
}

/// A collapsing meter zeroes gains and adds the flat penalty.
#[test]
fn critical_meter_blocks_gains() {
    let t = BoardTuning::default();
    let soft = QuarterAssessment {
        current_profit: 10,
        lowest_meter: 20,
        ..default_assessment()
    };
    assert_eq!(favorability::favorability_delta(&soft, &t), 0);

    let hard = QuarterAssessment {
        lowest_meter: 5,
        ..soft
    };
    assert_eq!(favorability::favorability_delta(&hard, &t), -3);
}

/// High evil discounts success rewards.
#[test]
fn evil_score_discounts_success() {
    let t = BoardTuning::default();
    let a = QuarterAssessment {
        current_profit: 8,
        evil_score: 45,
        ..default_assessment()
    };
    assert_eq!(favorability::favorability_delta(&a, &t), 8); // 10 - 2

    let hard = QuarterAssessment {
        evil_score: 75,
        ..a
    };
    assert_eq!(favorability::favorability_delta(&hard, &t), 6); // 10 - 4
}

#[test]
fn ouster_chance_is_zero_when_favorability_is_safe() {
    let t = BoardTuning::default();
    let a = default_assessment();
    assert_eq!(favorability::ouster_chance(50, &a, 0, &t), 0);
    assert_eq!(favorability::ouster_chance(90, &a, 3, &t), 0);
}

#[test]
fn ouster_chance_scales_with_shortfall_and_pressure() {
    let t = BoardTuning::default();
    let a = QuarterAssessment {
        current_profit: 8,
        ..default_assessment()
    };
    // Shortfall (50-30)*2 = 40, pressure +3, growth relief -10.
    assert_eq!(favorability::ouster_chance(30, &a, 0, &t), 33);

    let worse = QuarterAssessment {
        current_profit: -3,
        directive_met: false,
        ..a
    };
    // Shortfall 40, miss +5, pressure +3, negative streak +16.
    assert_eq!(favorability::ouster_chance(30, &worse, 2, &t), 64);
}

#[test]
fn ouster_chance_clamps_at_the_cap() {
    let t = BoardTuning::default();
    let a = QuarterAssessment {
        current_profit: -40,
        directive_met: false,
        pressure: 8,
        evil_score: 80,
        ..default_assessment()
    };
    assert_eq!(favorability::ouster_chance(0, &a, 6, &t), t.ouster_cap);
}

#[test]
fn parachute_discounts_evil_and_floors_at_zero() {
    assert_eq!(favorability::parachute_payout(10, 30, 0), 50);
    assert_eq!(favorability::parachute_payout(10, 30, 40), 30);
    assert_eq!(favorability::parachute_payout(1, 0, 90), 0);
}
