//! Deferred situations and follow-ups.
//!
//! Entry lifecycle: Queued → fires when due, or is deferred to the
//! next quarter (counter +1, barred at max severity), or expires and
//! drops with its base impact applied. The deferred list is bounded;
//! overflow evicts the oldest entry (by queued-at quarter) back into
//! the immediate pending queue, so nothing is deferred forever.
//!
//! Queues are plain ordered sequences with explicit with-X transforms
//! — no shared mutable deck references.

use serde::{Deserialize, Serialize};

use crate::config::SituationTuning;
use crate::outcome::OutcomeTier;
use crate::types::{CardId, Quarter, SituationId};

/// A queued situation instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SituationRecord {
    pub situation: SituationId,
    pub queued_at: Quarter,
    pub due: Quarter,
    pub defer_count: u32,
}

impl SituationRecord {
    pub fn new(situation: SituationId, queued_at: Quarter, due: Quarter) -> Self {
        Self {
            situation,
            queued_at,
            due,
            defer_count: 0,
        }
    }

    pub fn is_due(&self, quarter: Quarter) -> bool {
        self.due <= quarter
    }

    pub fn can_defer(&self, tuning: &SituationTuning) -> bool {
        self.defer_count < tuning.max_severity
    }

    /// The record as rescheduled one quarter out.
    pub fn deferred(&self, quarter: Quarter) -> Self {
        Self {
            situation: self.situation.clone(),
            queued_at: self.queued_at,
            due: quarter + 1,
            defer_count: self.defer_count + 1,
        }
    }
}

/// A pending consequence of a played card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowUpRecord {
    pub origin: CardId,
    pub queued_at: Quarter,
    pub tier: OutcomeTier,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpKind {
    Favorable,
    Neutral,
    Escalation,
}

/// Follow-up trigger chance in percent: grows linearly with quarters
/// elapsed since origin, clamped.
pub fn trigger_chance(elapsed: Quarter, tuning: &SituationTuning) -> u32 {
    (elapsed * tuning.trigger_step_pct).min(tuning.trigger_cap_pct)
}

/// Follow-up kind weights (favorable / neutral / escalation), shifted
/// by the originating action's outcome tier.
pub fn follow_up_kind_weights(tier: OutcomeTier) -> (u64, u64, u64) {
    match tier {
        OutcomeTier::Good     => (50, 40, 10),
        OutcomeTier::Expected => (20, 60, 20),
        OutcomeTier::Bad      => (10, 30, 60),
    }
}

/// Pick a follow-up kind from a single weighted draw value in
/// [0, weight sum).
pub fn follow_up_kind_from_roll(tier: OutcomeTier, roll: u64) -> FollowUpKind {
    let (favorable, neutral, _escalation) = follow_up_kind_weights(tier);
    if roll < favorable {
        FollowUpKind::Favorable
    } else if roll < favorable + neutral {
        FollowUpKind::Neutral
    } else {
        FollowUpKind::Escalation
    }
}

/// The two situation queues: immediate pending and bounded deferred.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SituationQueues {
    pub pending: Vec<SituationRecord>,
    pub deferred: Vec<SituationRecord>,
}

impl SituationQueues {
    /// Queues with a record added to the deferred list. If capacity is
    /// exceeded, the oldest deferred entry (by queued-at quarter) moves
    /// to the immediate pending queue; the evicted record is returned.
    pub fn with_deferred_entry(
        &self,
        record: SituationRecord,
        tuning: &SituationTuning,
    ) -> (Self, Option<SituationRecord>) {
        let mut next = self.clone();
        next.deferred.push(record);

        if next.deferred.len() <= tuning.deferred_capacity {
            return (next, None);
        }

        let oldest_idx = next
            .deferred
            .iter()
            .enumerate()
            .min_by_key(|(idx, r)| (r.queued_at, *idx))
            .map(|(idx, _)| idx)
            .expect("deferred list is non-empty");
        let evicted = next.deferred.remove(oldest_idx);
        next.pending.push(evicted.clone());
        (next, Some(evicted))
    }

    /// Queues with a record added to the immediate pending list.
    pub fn with_pending_entry(&self, record: SituationRecord) -> Self {
        let mut next = self.clone();
        next.pending.push(record);
        next
    }

    /// Queues with one record removed from whichever list holds it.
    pub fn with_removed(&self, record: &SituationRecord) -> Self {
        let mut next = self.clone();
        if let Some(idx) = next.pending.iter().position(|r| r == record) {
            next.pending.remove(idx);
        } else if let Some(idx) = next.deferred.iter().position(|r| r == record) {
            next.deferred.remove(idx);
        }
        next
    }

    /// Deferred entries that have come due, promoted into pending.
    /// Returns the promoted records in their original order.
    pub fn with_due_promoted(&self, quarter: Quarter) -> (Self, Vec<SituationRecord>) {
        let mut next = self.clone();
        let (due, kept): (Vec<_>, Vec<_>) = next
            .deferred
            .drain(..)
            .partition(|r| r.is_due(quarter));
        next.deferred = kept;
        next.pending.extend(due.iter().cloned());
        (next, due)
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.deferred.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.deferred.is_empty()
    }
}
