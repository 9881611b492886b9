//! The closed effect set and its two-stage application pipeline.
//!
//! Meter effects hit the meter vector directly. Profit and fine
//! effects do NOT — they accumulate into the quarter ledger, which
//! only the Resolution-phase financial calculation consumes. Profit
//! must be aggregated across every applied effect before it feeds the
//! directive and favorability calculators, so folding it into the
//! per-effect transform would be wrong.
//!
//! Applying an effect never consumes randomness and never fails for
//! valid inputs; all RNG use happens earlier, during tier selection.

use serde::{Deserialize, Serialize};

use crate::journal::LogEntry;
use crate::meters::{Meter, OrgMeters};
use crate::types::{Millions, Quarter};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    MeterDelta { meter: Meter, delta: i32 },
    ProfitDelta { millions: Millions },
    /// Non-negative; deducted from the quarter's financial result.
    Fine { millions: Millions },
}

/// Per-quarter accumulator for the cross-cutting money effects.
/// Reset by Resolution after it folds these into the quarter total.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuarterLedger {
    pub project_profit: Millions,
    pub fines: Millions,
}

impl QuarterLedger {
    /// Net contribution to the quarter's financial result.
    pub fn net(&self) -> Millions {
        self.project_profit - self.fines
    }
}

/// Apply a batch of effects in order: meters mutate in place, money
/// lands in the ledger, and every change is journaled.
pub fn apply_all(
    effects: &[Effect],
    quarter: Quarter,
    meters: &mut OrgMeters,
    ledger: &mut QuarterLedger,
    log: &mut Vec<LogEntry>,
) {
    for effect in effects {
        match effect {
            Effect::MeterDelta { meter, delta } => {
                let new_value = meters.apply_delta(*meter, *delta);
                log.push(LogEntry::MeterChanged {
                    quarter,
                    meter: *meter,
                    delta: *delta,
                    new_value,
                });
            }
            Effect::ProfitDelta { millions } => {
                ledger.project_profit += millions;
                log.push(LogEntry::ProfitRecorded {
                    quarter,
                    millions: *millions,
                });
            }
            Effect::Fine { millions } => {
                ledger.fines += millions;
                log.push(LogEntry::FineLevied {
                    quarter,
                    millions: *millions,
                });
            }
        }
    }
}
