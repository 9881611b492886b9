//! Resolved engine tuning.
//!
//! RULE: no simulation code reads ambient configuration. Every value
//! that shapes a calculation lives here and is passed in explicitly,
//! so tests can run the engine under arbitrary tunings. Difficulty
//! tiers are an external concern — whoever loads them hands the engine
//! one resolved `EngineConfig`.

use serde::{Deserialize, Serialize};

use crate::types::{Millions, Quarter};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub quarter:    QuarterTuning,
    pub outcome:    OutcomeTuning,
    pub capital:    CapitalTuning,
    pub board:      BoardTuning,
    pub situations: SituationTuning,
}

/// Per-quarter structure: hand, play cap, crisis odds, base operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarterTuning {
    pub hand_size: usize,
    pub play_cap: u32,
    /// Extra capital cost by play position: the first card carries no
    /// surcharge, later plays get costlier.
    pub play_surcharge: Vec<u32>,
    /// Chance (percent) that Demand pre-selects a crisis for the quarter.
    pub crisis_chance_pct: u32,
    /// Base-operations profit floor in millions.
    pub ops_base: Millions,
    /// Symmetric noise bound on base operations, in millions.
    pub ops_noise: Millions,
    /// Meter-health modulation divisor: (avg - 50) / this.
    pub ops_meter_div: Millions,
    /// Organic growth divisor: quarter / this.
    pub ops_growth_div: Millions,
    /// Directive floor in millions.
    pub directive_floor: Millions,
    /// Growth the board expects on top of last quarter's profit.
    pub directive_growth: Millions,
}

impl QuarterTuning {
    /// Capital surcharge for the quarter's nth play (0-based). Positions
    /// past the configured table reuse its last entry.
    pub fn surcharge_at(&self, position: u32) -> u32 {
        self.play_surcharge
            .get(position as usize)
            .or_else(|| self.play_surcharge.last())
            .copied()
            .unwrap_or(0)
    }
}

impl Default for QuarterTuning {
    fn default() -> Self {
        Self {
            hand_size: 5,
            play_cap: 3,
            play_surcharge: vec![0, 1, 2],
            crisis_chance_pct: 60,
            ops_base: 10,
            ops_noise: 4,
            ops_meter_div: 10,
            ops_growth_div: 2,
            directive_floor: 5,
            directive_growth: 2,
        }
    }
}

/// Outcome-roll modifier tuning. Modifiers combine in the fixed order
/// documented in `outcome::resolve`; each weight is clamped to
/// [0, weight_ceiling] before the draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeTuning {
    pub honeymoon_quarters: Quarter,
    pub honeymoon_good: i32,
    pub honeymoon_bad_relief: i32,
    /// Affinity meter at or above this shifts weight toward Good.
    pub affinity_high: i32,
    /// Affinity meter at or below this shifts weight toward Bad.
    pub affinity_low: i32,
    pub affinity_shift: i32,
    pub momentum_per_success: i32,
    /// Success streak counted toward momentum is capped here.
    pub momentum_streak_cap: u32,
    pub synergy_good: i32,
    /// Evil score at or above this activates the evil-path bonus.
    pub evil_threshold: u32,
    pub evil_good: i32,
    /// Added Bad weight per later play position (0-based).
    pub position_bad_step: i32,
    pub weight_ceiling: i32,
}

impl Default for OutcomeTuning {
    fn default() -> Self {
        Self {
            honeymoon_quarters: 2,
            honeymoon_good: 10,
            honeymoon_bad_relief: 5,
            affinity_high: 65,
            affinity_low: 35,
            affinity_shift: 8,
            momentum_per_success: 4,
            momentum_streak_cap: 3,
            synergy_good: 6,
            evil_threshold: 25,
            evil_good: 8,
            position_bad_step: 7,
            weight_ceiling: 95,
        }
    }
}

/// Political-capital economy tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalTuning {
    pub max: u32,
    pub initial: u32,
    /// Balance above which 1 point decays per quarter.
    pub decay_threshold: u32,
    /// Decay only applies from this quarter on.
    pub decay_start_quarter: Quarter,
    pub governance_floor: i32,
    pub alignment_floor: i32,
    pub morale_floor: i32,
    /// Restraint bonus for 0 / 1 / 2 cards played; 3+ earns nothing.
    pub restraint: [u32; 3],
    /// A meter must stay at or above this after funding an exchange.
    pub exchange_meter_floor: i32,
    pub redemption_cost: u32,
    pub redemption_relief: u32,
}

impl Default for CapitalTuning {
    fn default() -> Self {
        Self {
            max: 10,
            initial: 3,
            decay_threshold: 7,
            decay_start_quarter: 4,
            governance_floor: 60,
            alignment_floor: 60,
            morale_floor: 30,
            restraint: [3, 2, 1],
            exchange_meter_floor: 20,
            redemption_cost: 2,
            redemption_relief: 10,
        }
    }
}

/// Board favorability and survival tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardTuning {
    /// Full-success reward indexed by pressure level 0..=8.
    pub full_reward_by_pressure: [i32; 9],
    /// Flat reward while quarters survived < honeymoon_quarters.
    pub honeymoon_reward: i32,
    pub honeymoon_quarters: Quarter,
    /// Partial success pays full / divisor, floored at partial_min.
    pub partial_divisor: i32,
    pub partial_min: i32,
    pub evil_soft_threshold: u32,
    pub evil_soft_penalty: i32,
    pub evil_hard_threshold: u32,
    pub evil_hard_penalty: i32,
    /// Weak-project streak starts costing at this length.
    pub weak_streak_min: u32,
    pub weak_streak_penalty_cap: i32,
    pub max_gain: i32,
    pub max_gain_at_streak3: i32,
    pub max_gain_at_streak6: i32,
    pub loss_penalty_base: i32,
    pub loss_penalty_div: Millions,
    pub loss_penalty_scale_cap: i32,
    pub decline_penalty: i32,
    pub directive_penalty: i32,
    pub evil_scrutiny_penalty: i32,
    pub evil_scrutiny_hard_penalty: i32,
    pub max_loss_base: i32,
    pub max_loss_tenure_div: u32,
    pub meter_hard_threshold: i32,
    pub meter_hard_penalty: i32,
    pub meter_soft_threshold: i32,
    /// Low-activity penalties start at this quarter.
    pub low_activity_quarter: Quarter,
    pub low_activity_base: i32,
    // Survival roll
    pub safe_favorability: i32,
    pub ouster_slope: i32,
    pub negative_streak_step: u32,
    pub directive_miss_step: u32,
    pub pressure_step: u32,
    pub evil_ouster_step: u32,
    pub growth_relief: u32,
    pub ouster_cap: u32,
    // Retirement
    pub retirement_threshold: Millions,
    pub retirement_met_bonus: Millions,
    pub retirement_profit_div: Millions,
}

impl Default for BoardTuning {
    fn default() -> Self {
        Self {
            full_reward_by_pressure: [10, 8, 7, 6, 5, 4, 4, 3, 3],
            honeymoon_reward: 10,
            honeymoon_quarters: 4,
            partial_divisor: 2,
            partial_min: 2,
            evil_soft_threshold: 40,
            evil_soft_penalty: 2,
            evil_hard_threshold: 70,
            evil_hard_penalty: 4,
            weak_streak_min: 2,
            weak_streak_penalty_cap: 4,
            max_gain: 12,
            max_gain_at_streak3: 8,
            max_gain_at_streak6: 5,
            loss_penalty_base: 4,
            loss_penalty_div: 5,
            loss_penalty_scale_cap: 6,
            decline_penalty: 2,
            directive_penalty: 3,
            evil_scrutiny_penalty: 3,
            evil_scrutiny_hard_penalty: 5,
            max_loss_base: 10,
            max_loss_tenure_div: 4,
            meter_hard_threshold: 10,
            meter_hard_penalty: 3,
            meter_soft_threshold: 25,
            low_activity_quarter: 8,
            low_activity_base: 2,
            safe_favorability: 50,
            ouster_slope: 2,
            negative_streak_step: 8,
            directive_miss_step: 5,
            pressure_step: 3,
            evil_ouster_step: 5,
            growth_relief: 10,
            ouster_cap: 95,
            retirement_threshold: 100,
            retirement_met_bonus: 2,
            retirement_profit_div: 4,
        }
    }
}

/// Deferred situation / follow-up queue tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SituationTuning {
    /// Deferred list capacity; overflow evicts the oldest entry back
    /// into the immediate pending queue.
    pub deferred_capacity: usize,
    /// Defer counter at which a situation can no longer be deferred.
    pub max_severity: u32,
    /// Follow-up trigger chance grows by this many percent per quarter
    /// elapsed since origin.
    pub trigger_step_pct: u32,
    pub trigger_cap_pct: u32,
    /// Follow-ups older than this many quarters are dropped.
    pub follow_up_expiry: Quarter,
}

impl Default for SituationTuning {
    fn default() -> Self {
        Self {
            deferred_capacity: 4,
            max_severity: 3,
            trigger_step_pct: 15,
            trigger_cap_pct: 60,
            follow_up_expiry: 6,
        }
    }
}
