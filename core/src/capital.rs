//! Political capital — the currency gating high-value actions.
//!
//! Spends are atomic: an insufficient balance fails the whole
//! operation and leaves the balance untouched. Earns clamp at max.

use serde::{Deserialize, Serialize};

use crate::config::CapitalTuning;
use crate::error::{EngineError, SimResult};
use crate::meters::{Meter, OrgMeters};
use crate::types::Quarter;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapitalState {
    balance: u32,
}

impl CapitalState {
    pub fn new(initial: u32, max: u32) -> Self {
        Self {
            balance: initial.min(max),
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.balance
    }

    /// Deduct `cost` or fail without mutating.
    pub fn spend(&mut self, cost: u32) -> SimResult<()> {
        if cost > self.balance {
            return Err(EngineError::InsufficientCapital {
                need: cost,
                have: self.balance,
            });
        }
        self.balance -= cost;
        Ok(())
    }

    /// Add `delta`, clamped at `max`. Returns the amount actually added.
    pub fn earn(&mut self, delta: u32, max: u32) -> u32 {
        let before = self.balance;
        self.balance = (self.balance + delta).min(max);
        self.balance - before
    }

    /// Apply a signed adjustment, clamped to [0, max]. Returns the
    /// applied delta.
    pub fn adjust(&mut self, delta: i32, max: u32) -> i32 {
        let before = self.balance as i32;
        let after = (before + delta).clamp(0, max as i32);
        self.balance = after as u32;
        after - before
    }
}

/// End-of-quarter adjustment: governance and alignment health earn,
/// low morale costs, and a high balance decays once decay has begun.
/// The parts are summed before clamping.
pub fn quarter_adjustment(
    meters: &OrgMeters,
    balance: u32,
    quarter: Quarter,
    tuning: &CapitalTuning,
) -> i32 {
    let mut delta = 0;
    if meters.get(Meter::Governance) >= tuning.governance_floor {
        delta += 1;
    }
    if meters.get(Meter::Alignment) >= tuning.alignment_floor {
        delta += 1;
    }
    if meters.get(Meter::Morale) < tuning.morale_floor {
        delta -= 1;
    }
    if quarter >= tuning.decay_start_quarter && balance > tuning.decay_threshold {
        delta -= 1;
    }
    delta
}

/// Anti-spam incentive: fewer cards played, more capital earned.
pub fn restraint_bonus(cards_played: u32, tuning: &CapitalTuning) -> u32 {
    match cards_played {
        0 => tuning.restraint[0],
        1 => tuning.restraint[1],
        2 => tuning.restraint[2],
        _ => 0,
    }
}

/// Meter points sacrificed for 1 capital. Cheaper meters are the ones
/// an executive can visibly burn.
pub fn exchange_cost(meter: Meter) -> i32 {
    match meter {
        Meter::Morale | Meter::Delivery       => 10,
        Meter::Alignment | Meter::Governance  => 15,
        Meter::Runway                         => 20,
    }
}
