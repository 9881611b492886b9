//! Outcome-tier resolution.
//!
//! One weighted roll turns a base Good/Expected/Bad profile plus the
//! quarter's situational modifiers into a tier. The resolver is pure
//! given its inputs and consumes exactly one draw per call.
//!
//! MODIFIER ORDER (fixed, documented, never reordered):
//!   1. honeymoon      2. meter affinity   3. momentum
//!   4. synergy        5. evil path        6. position risk
//! Each step saturates; final weights clamp to [0, weight_ceiling].
//! A zero weight sum degrades to Expected.

use serde::{Deserialize, Serialize};

use crate::config::OutcomeTuning;
use crate::content::ChoiceKind;
use crate::rng::QuarterRng;
use crate::types::Quarter;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTier {
    Good,
    Expected,
    Bad,
}

/// A Good/Expected/Bad weight triple. Weights are relative shares,
/// not percentages — the roll is uniform over their sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeWeights {
    pub good: i32,
    pub expected: i32,
    pub bad: i32,
}

impl OutcomeWeights {
    pub fn new(good: i32, expected: i32, bad: i32) -> Self {
        Self { good, expected, bad }
    }
}

/// Situational modifiers for a project-card roll, gathered by the
/// orchestrator from the current state.
#[derive(Debug, Clone, Copy)]
pub struct RollContext {
    /// 0-based position of this play within the quarter.
    pub position: u32,
    /// Current value of the card's affinity meter.
    pub affinity_value: i32,
    /// Consecutive successful quarters.
    pub success_streak: u32,
    /// A card with the same affinity was already played this quarter.
    pub synergy: bool,
    pub evil_score: u32,
    pub quarters_survived: Quarter,
}

/// General roll: project/card execution.
pub fn resolve(
    base: OutcomeWeights,
    ctx: &RollContext,
    tuning: &OutcomeTuning,
    rng: &mut QuarterRng,
) -> OutcomeTier {
    let mut good = base.good;
    let mut expected = base.expected;
    let mut bad = base.bad;

    // 1. Honeymoon: the first quarters forgive.
    if ctx.quarters_survived < tuning.honeymoon_quarters {
        good = good.saturating_add(tuning.honeymoon_good);
        bad = bad.saturating_sub(tuning.honeymoon_bad_relief);
    }

    // 2. Meter affinity: a healthy matching meter helps, a starved one hurts.
    if ctx.affinity_value >= tuning.affinity_high {
        good = good.saturating_add(tuning.affinity_shift);
    } else if ctx.affinity_value <= tuning.affinity_low {
        bad = bad.saturating_add(tuning.affinity_shift);
    }

    // 3. Momentum from consecutive successful quarters, capped.
    let streak = ctx.success_streak.min(tuning.momentum_streak_cap) as i32;
    good = good.saturating_add(streak * tuning.momentum_per_success);

    // 4. Matching-affinity synergy within the quarter.
    if ctx.synergy {
        good = good.saturating_add(tuning.synergy_good);
    }

    // 5. The evil path pays, once committed.
    if ctx.evil_score >= tuning.evil_threshold {
        good = good.saturating_add(tuning.evil_good);
    }

    // 6. Position risk: each later play this quarter is dicier.
    bad = bad.saturating_add(ctx.position as i32 * tuning.position_bad_step);

    draw(
        OutcomeWeights::new(good, expected, bad),
        tuning.weight_ceiling,
        rng,
    )
}

/// Specialized crisis-choice roll. Crisis choices use fixed baseline
/// tables per choice kind and no situational modifiers.
pub fn resolve_crisis_choice(
    kind: ChoiceKind,
    tuning: &OutcomeTuning,
    rng: &mut QuarterRng,
) -> OutcomeTier {
    draw(crisis_baseline(kind), tuning.weight_ceiling, rng)
}

/// Baseline crisis weights by choice kind: spending capital skews
/// heavily favorable, standard choices land Expected, corporate
/// (intensity) choices are high-variance.
pub fn crisis_baseline(kind: ChoiceKind) -> OutcomeWeights {
    match kind {
        ChoiceKind::CapitalSpend => OutcomeWeights::new(65, 30, 5),
        ChoiceKind::Standard     => OutcomeWeights::new(15, 70, 15),
        ChoiceKind::Corporate    => OutcomeWeights::new(45, 10, 45),
    }
}

/// The single weighted draw. Clamps each weight to [0, ceiling],
/// then rolls one integer over the sum.
fn draw(weights: OutcomeWeights, ceiling: i32, rng: &mut QuarterRng) -> OutcomeTier {
    let good = weights.good.clamp(0, ceiling) as u64;
    let expected = weights.expected.clamp(0, ceiling) as u64;
    let bad = weights.bad.clamp(0, ceiling) as u64;

    let sum = good + expected + bad;
    if sum == 0 {
        return OutcomeTier::Expected;
    }

    let roll = rng.next_u64_below(sum);
    if roll < good {
        OutcomeTier::Good
    } else if roll < good + expected {
        OutcomeTier::Expected
    } else {
        OutcomeTier::Bad
    }
}
