//! The transition log — everything a transition did, in order.
//!
//! RULE: the core never formats natural language. Each entry is pure
//! data; the presentation collaborator renders it. Variants are added
//! per feature — never removed or reordered.

use serde::{Deserialize, Serialize};

use crate::meters::Meter;
use crate::outcome::OutcomeTier;
use crate::situations::FollowUpKind;
use crate::state::Phase;
use crate::types::{CardId, Millions, Quarter, SituationId};

/// Every entry the engine can emit during one transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    // ── Quarter structure ──────────────────────────
    QuarterStarted {
        quarter: Quarter,
    },
    DirectiveSet {
        quarter: Quarter,
        target: Millions,
    },
    HandDrawn {
        quarter: Quarter,
        cards: Vec<CardId>,
    },
    PhaseEnded {
        quarter: Quarter,
        phase: Phase,
    },

    // ── Card and crisis play ───────────────────────
    CardPlayed {
        quarter: Quarter,
        card: CardId,
        position: u32,
        capital_spent: u32,
    },
    CrisisPresented {
        quarter: Quarter,
        card: CardId,
        escalated: bool,
    },
    OutcomeResolved {
        quarter: Quarter,
        source: OutcomeSource,
        tier: OutcomeTier,
    },

    // ── State deltas ───────────────────────────────
    MeterChanged {
        quarter: Quarter,
        meter: Meter,
        delta: i32,
        new_value: i32,
    },
    ProfitRecorded {
        quarter: Quarter,
        millions: Millions,
    },
    FineLevied {
        quarter: Quarter,
        millions: Millions,
    },
    EvilAccrued {
        quarter: Quarter,
        amount: u32,
        total: u32,
    },
    EvilRedeemed {
        quarter: Quarter,
        amount: u32,
        total: u32,
    },
    CapitalChanged {
        quarter: Quarter,
        delta: i32,
        balance: u32,
        reason: CapitalReason,
    },
    MeterExchanged {
        quarter: Quarter,
        meter: Meter,
        points: i32,
        balance: u32,
    },

    // ── Deferred situations and follow-ups ─────────
    SituationQueued {
        quarter: Quarter,
        situation: SituationId,
        due: Quarter,
    },
    SituationDeferred {
        quarter: Quarter,
        situation: SituationId,
        due: Quarter,
        defer_count: u32,
    },
    SituationEvicted {
        quarter: Quarter,
        situation: SituationId,
    },
    SituationExpired {
        quarter: Quarter,
        situation: SituationId,
    },
    FollowUpFired {
        quarter: Quarter,
        origin: CardId,
        kind: FollowUpKind,
    },
    FollowUpExpired {
        quarter: Quarter,
        origin: CardId,
    },

    // ── Resolution ─────────────────────────────────
    DirectiveEvaluated {
        quarter: Quarter,
        target: Millions,
        actual: Millions,
        met: bool,
    },
    FavorabilityChanged {
        quarter: Quarter,
        delta: i32,
        new_value: i32,
    },
    SurvivalRolled {
        quarter: Quarter,
        ouster_chance: u32,
        survived: bool,
    },
    RetirementAccrued {
        quarter: Quarter,
        gained: Millions,
        total: Millions,
    },
    Ousted {
        quarter: Quarter,
        parachute: Millions,
    },
    Retired {
        quarter: Quarter,
        parachute: Millions,
    },
    QuarterClosed {
        quarter: Quarter,
        operations: Millions,
        projects: Millions,
        fines: Millions,
        profit: Millions,
    },
}

/// What produced an outcome roll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeSource {
    Project { card: CardId },
    Crisis { card: CardId },
    FollowUp { origin: CardId },
}

/// Why the capital balance moved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CapitalReason {
    CardCost,
    ChoiceCost,
    QuarterAdjustment,
    Restraint,
    Exchange,
    Redemption,
}

/// Coarse rendering category for a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    MeterChange,
    Outcome,
    Event,
}

impl LogEntry {
    /// The category a presentation layer dispatches on.
    pub fn kind(&self) -> LogKind {
        match self {
            Self::MeterChanged { .. } => LogKind::MeterChange,
            Self::OutcomeResolved { .. } | Self::SurvivalRolled { .. } => LogKind::Outcome,
            Self::CrisisPresented { .. }
            | Self::SituationQueued { .. }
            | Self::SituationDeferred { .. }
            | Self::SituationEvicted { .. }
            | Self::SituationExpired { .. }
            | Self::FollowUpFired { .. }
            | Self::FollowUpExpired { .. }
            | Self::Ousted { .. }
            | Self::Retired { .. } => LogKind::Event,
            _ => LogKind::Info,
        }
    }

    /// Stable string tag, used as the entry-type key in serialized logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::QuarterStarted { .. }      => "quarter_started",
            Self::DirectiveSet { .. }        => "directive_set",
            Self::HandDrawn { .. }           => "hand_drawn",
            Self::PhaseEnded { .. }          => "phase_ended",
            Self::CardPlayed { .. }          => "card_played",
            Self::CrisisPresented { .. }     => "crisis_presented",
            Self::OutcomeResolved { .. }     => "outcome_resolved",
            Self::MeterChanged { .. }        => "meter_changed",
            Self::ProfitRecorded { .. }      => "profit_recorded",
            Self::FineLevied { .. }          => "fine_levied",
            Self::EvilAccrued { .. }         => "evil_accrued",
            Self::EvilRedeemed { .. }        => "evil_redeemed",
            Self::CapitalChanged { .. }      => "capital_changed",
            Self::MeterExchanged { .. }      => "meter_exchanged",
            Self::SituationQueued { .. }     => "situation_queued",
            Self::SituationDeferred { .. }   => "situation_deferred",
            Self::SituationEvicted { .. }    => "situation_evicted",
            Self::SituationExpired { .. }    => "situation_expired",
            Self::FollowUpFired { .. }       => "follow_up_fired",
            Self::FollowUpExpired { .. }     => "follow_up_expired",
            Self::DirectiveEvaluated { .. }  => "directive_evaluated",
            Self::FavorabilityChanged { .. } => "favorability_changed",
            Self::SurvivalRolled { .. }      => "survival_rolled",
            Self::RetirementAccrued { .. }   => "retirement_accrued",
            Self::Ousted { .. }              => "ousted",
            Self::Retired { .. }             => "retired",
            Self::QuarterClosed { .. }       => "quarter_closed",
        }
    }
}
