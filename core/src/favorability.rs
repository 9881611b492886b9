//! Board favorability and survival calculus.
//!
//! `favorability_delta` is a pure function of the quarter's results.
//! Adjustments are additive and applied in a fixed order:
//!   classification reward/penalties, evil penalty, weak-project
//!   penalty, gain cap, critical-meter check, low-activity check,
//!   loss clamp.
//! The survival roll itself lives with the orchestrator; this module
//! computes the ouster odds it draws against.

use crate::config::BoardTuning;
use crate::types::{Millions, Quarter};

/// Everything the board weighs at the end of a quarter.
#[derive(Debug, Clone, Copy)]
pub struct QuarterAssessment {
    pub last_profit: Millions,
    pub current_profit: Millions,
    pub directive_met: bool,
    pub pressure: u32,
    pub evil_score: u32,
    pub weak_project_streak: u32,
    pub success_streak: u32,
    pub quarters_survived: Quarter,
    pub lowest_meter: i32,
    pub cards_played: u32,
}

/// The favorability delta for one quarter, before the [0, 100] clamp
/// on the favorability meter itself.
pub fn favorability_delta(a: &QuarterAssessment, t: &BoardTuning) -> i32 {
    let mut delta = if a.directive_met {
        success_reward(a, t)
    } else {
        failure_penalty(a, t)
    };

    // Critical meters: a starved org caps gains, a collapsing one costs.
    if a.lowest_meter < t.meter_soft_threshold {
        delta = delta.min(0);
        if a.lowest_meter < t.meter_hard_threshold {
            delta -= t.meter_hard_penalty;
        }
    }

    // Low activity: a passive quarter earns nothing, and late-tenure
    // passivity is punished outright.
    if a.cards_played == 0 {
        delta = delta.min(0);
        if a.quarters_survived >= t.low_activity_quarter {
            delta -= t.low_activity_base + (a.pressure / 2) as i32;
        }
    }

    // Tenure-scaled floor on how much one quarter can cost.
    let max_loss = t.max_loss_base + (a.quarters_survived / t.max_loss_tenure_div) as i32;
    delta.max(-max_loss)
}

fn success_reward(a: &QuarterAssessment, t: &BoardTuning) -> i32 {
    let full = if a.quarters_survived < t.honeymoon_quarters {
        t.honeymoon_reward
    } else {
        t.full_reward_by_pressure[a.pressure.min(8) as usize]
    };

    // Full success needs growth; a flat or declining quarter that still
    // met the directive earns the partial rate.
    let mut reward = if a.current_profit > a.last_profit {
        full
    } else {
        (full / t.partial_divisor).max(t.partial_min)
    };

    if a.evil_score >= t.evil_hard_threshold {
        reward -= t.evil_hard_penalty;
    } else if a.evil_score >= t.evil_soft_threshold {
        reward -= t.evil_soft_penalty;
    }

    if a.weak_project_streak >= t.weak_streak_min {
        reward -= (a.weak_project_streak as i32).min(t.weak_streak_penalty_cap);
    }

    // The board normalizes sustained success: the cap tightens as the
    // streak grows.
    let cap = if a.success_streak >= 6 {
        t.max_gain_at_streak6
    } else if a.success_streak >= 3 {
        t.max_gain_at_streak3
    } else {
        t.max_gain
    };
    reward.min(cap)
}

fn failure_penalty(a: &QuarterAssessment, t: &BoardTuning) -> i32 {
    let mut penalty = 0;

    if a.current_profit < 0 {
        let scale = (a.current_profit.abs() / t.loss_penalty_div) as i32;
        penalty -= t.loss_penalty_base + scale.min(t.loss_penalty_scale_cap);
    } else if a.current_profit < a.last_profit {
        penalty -= t.decline_penalty;
    }

    penalty -= t.directive_penalty;
    penalty -= a.pressure as i32;

    // Evil under scrutiny: a poor quarter with a dirty record reads as
    // cause, not coincidence.
    if a.current_profit <= 0 {
        if a.evil_score >= t.evil_hard_threshold {
            penalty -= t.evil_scrutiny_hard_penalty;
        } else if a.evil_score >= t.evil_soft_threshold {
            penalty -= t.evil_scrutiny_penalty;
        }
    }

    penalty
}

/// Ouster odds in percent for the quarter's single survival draw.
pub fn ouster_chance(
    favorability: i32,
    a: &QuarterAssessment,
    negative_quarter_streak: u32,
    t: &BoardTuning,
) -> u32 {
    if favorability >= t.safe_favorability {
        return 0;
    }

    let mut chance = ((t.safe_favorability - favorability) * t.ouster_slope).max(0) as u32;
    chance += negative_quarter_streak * t.negative_streak_step;
    if !a.directive_met {
        chance += t.directive_miss_step;
    }
    chance += a.pressure * t.pressure_step;
    if a.evil_score >= t.evil_hard_threshold && a.current_profit <= 0 {
        chance += t.evil_ouster_step;
    }
    if a.current_profit > a.last_profit {
        chance = chance.saturating_sub(t.growth_relief);
    }

    chance.min(t.ouster_cap)
}

/// Terminal payout: tenure and banked bonus, discounted by the record.
pub fn parachute_payout(quarters_survived: Quarter, retirement_bonus: Millions, evil_score: u32) -> Millions {
    (Millions::from(quarters_survived) * 2 + retirement_bonus - Millions::from(evil_score) / 2).max(0)
}
