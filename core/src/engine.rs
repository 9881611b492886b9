//! The quarterly engine — the heart of the simulation.
//!
//! PHASE ORDER (fixed, documented, never reordered):
//!   Demand → PlayCards → Crisis → Resolution → Demand(quarter + 1)
//!
//! RULES:
//!   - `advance` is the sole entry point: (state, input, rng) in,
//!     (state', log) out. The input state is never mutated.
//!   - All randomness flows through the injected QuarterRng.
//!   - Every state change is recorded in the transition log.
//!   - Invalid inputs fail loudly with no partial application;
//!     callers pre-validate via the capability predicates.
//!
//! DEMAND STEP ORDER (fixed): follow-up processing, situation expiry,
//! due-situation promotion, hand refill, directive binding, crisis
//! pre-selection. Reordering any of these changes the draw sequence
//! and breaks replay compatibility.

use serde::{Deserialize, Serialize};

use crate::capital;
use crate::config::EngineConfig;
use crate::content::{Catalog, ChoiceOutcome, CrisisCard};
use crate::effect::apply_all;
use crate::error::{EngineError, SimResult};
use crate::favorability::{self, QuarterAssessment};
use crate::journal::{CapitalReason, LogEntry, OutcomeSource};
use crate::meters::Meter;
use crate::outcome::{self, OutcomeTier, RollContext};
use crate::rng::QuarterRng;
use crate::situations::{
    follow_up_kind_from_roll, follow_up_kind_weights, trigger_chance, FollowUpKind,
    FollowUpRecord, SituationRecord,
};
use crate::state::{GameState, PendingCrisis, Phase, Terminal};
use crate::types::{CardId, ChoiceId, Millions};

/// Phase-specific player input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum PlayerInput {
    /// Demand, Resolution, and a crisis-free Crisis phase.
    Advance,
    Play(PlayAction),
    Crisis(CrisisAction),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayAction {
    Card { card: CardId },
    /// Trade meter points for 1 capital.
    Exchange { meter: Meter },
    /// Spend capital to shed evil score.
    Redeem,
    End,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CrisisAction {
    Choose { choice: ChoiceId },
    Defer,
}

/// One completed transition: the successor state and what happened.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub log: Vec<LogEntry>,
}

pub struct Engine {
    catalog: Catalog,
    config: EngineConfig,
}

impl Engine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A fresh game state with the deck shuffled from the catalog.
    pub fn new_game(&self, rng: &mut QuarterRng) -> GameState {
        GameState::new_game(&self.catalog, &self.config, rng)
    }

    /// Advance one transition. The sole entry point.
    pub fn advance(
        &self,
        state: &GameState,
        input: &PlayerInput,
        rng: &mut QuarterRng,
    ) -> SimResult<Transition> {
        if state.is_terminal() {
            return Err(EngineError::GameOver);
        }

        match (state.phase, input) {
            (Phase::Demand, PlayerInput::Advance) => self.phase_demand(state, rng),
            (Phase::PlayCards, PlayerInput::Play(action)) => {
                self.phase_play(state, action, rng)
            }
            (Phase::Crisis, PlayerInput::Crisis(action)) => {
                self.phase_crisis(state, action, rng)
            }
            (Phase::Crisis, PlayerInput::Advance) if state.pending_crisis.is_none() => {
                self.phase_crisis_pass(state)
            }
            (Phase::Resolution, PlayerInput::Advance) => self.phase_resolution(state, rng),
            _ => Err(EngineError::WrongPhase { phase: state.phase }),
        }
    }

    // ── Capability predicates ──────────────────────────────────────

    pub fn can_afford(&self, state: &GameState, cost: u32) -> bool {
        state.capital.can_afford(cost)
    }

    pub fn can_play(&self, state: &GameState, card: &str) -> bool {
        if state.is_terminal()
            || state.phase != Phase::PlayCards
            || state.cards_played >= self.config.quarter.play_cap
            || !state.hand.iter().any(|c| c == card)
        {
            return false;
        }
        match self.catalog.project(card) {
            Ok(def) => state.capital.can_afford(
                def.capital_cost + self.config.quarter.surcharge_at(state.cards_played),
            ),
            Err(_) => false,
        }
    }

    pub fn can_exchange(&self, state: &GameState, meter: Meter) -> bool {
        state.phase == Phase::PlayCards
            && !state.is_terminal()
            && state.capital.balance() < self.config.capital.max
            && state.meters.get(meter) - capital::exchange_cost(meter)
                >= self.config.capital.exchange_meter_floor
    }

    pub fn can_redeem(&self, state: &GameState) -> bool {
        state.phase == Phase::PlayCards
            && !state.is_terminal()
            && state.tenure.evil_score > 0
            && state.capital.can_afford(self.config.capital.redemption_cost)
    }

    pub fn can_defer(&self, state: &GameState) -> bool {
        state.phase == Phase::Crisis
            && state
                .pending_crisis
                .as_ref()
                .and_then(|p| p.origin.as_ref())
                .map(|r| r.can_defer(&self.config.situations))
                .unwrap_or(false)
    }

    // ── Demand ─────────────────────────────────────────────────────

    fn phase_demand(&self, state: &GameState, rng: &mut QuarterRng) -> SimResult<Transition> {
        let mut s = state.clone();
        let quarter = s.quarter;
        let mut log = vec![LogEntry::QuarterStarted { quarter }];

        self.process_follow_ups(&mut s, &mut log, rng)?;
        self.expire_situations(&mut s, &mut log)?;

        // Deferred situations that have come due join the immediate queue.
        let (queues, _promoted) = s.queues.with_due_promoted(quarter);
        s.queues = queues;

        // Refill the hand.
        let need = self
            .config
            .quarter
            .hand_size
            .saturating_sub(s.hand.len());
        if need > 0 {
            let (deck, drawn) = s.deck.with_drawn(need, rng);
            s.deck = deck;
            if !drawn.is_empty() {
                s.hand.extend(drawn.iter().cloned());
                log.push(LogEntry::HandDrawn {
                    quarter,
                    cards: drawn,
                });
            }
        }

        // Bind the quarter's directive.
        let pressure = Millions::from(s.tenure.pressure());
        s.directive = (s.tenure.last_quarter_profit + self.config.quarter.directive_growth
            + pressure)
            .max(self.config.quarter.directive_floor);
        log.push(LogEntry::DirectiveSet {
            quarter,
            target: s.directive,
        });

        // Pre-select the quarter's crisis. Escalated situations take
        // precedence over a fresh board crisis.
        if s.pending_crisis.is_none() {
            if let Some(record) = s.queues.pending.first().cloned() {
                let def = self.catalog.situation(&record.situation)?;
                s.queues = s.queues.with_removed(&record);
                log.push(LogEntry::CrisisPresented {
                    quarter,
                    card: def.crisis.id.clone(),
                    escalated: true,
                });
                s.pending_crisis = Some(PendingCrisis {
                    card: def.crisis.id.clone(),
                    origin: Some(record),
                });
            } else if !self.catalog.crises().is_empty()
                && rng.percent(self.config.quarter.crisis_chance_pct)
            {
                let idx = rng.next_u64_below(self.catalog.crises().len() as u64) as usize;
                let card = self.catalog.crises()[idx].id.clone();
                log.push(LogEntry::CrisisPresented {
                    quarter,
                    card: card.clone(),
                    escalated: false,
                });
                s.pending_crisis = Some(PendingCrisis { card, origin: None });
            }
        }

        log::debug!(
            "quarter={quarter} demand: directive={} hand={} crisis={}",
            s.directive,
            s.hand.len(),
            s.pending_crisis.is_some()
        );

        s.phase = Phase::PlayCards;
        log.push(LogEntry::PhaseEnded {
            quarter,
            phase: Phase::Demand,
        });
        Ok(Transition { state: s, log })
    }

    /// Roll each outstanding follow-up: expired ones drop, triggered
    /// ones fire favorably, fizzle, or escalate into a situation.
    fn process_follow_ups(
        &self,
        s: &mut GameState,
        log: &mut Vec<LogEntry>,
        rng: &mut QuarterRng,
    ) -> SimResult<()> {
        let quarter = s.quarter;
        let tuning = &self.config.situations;
        let outstanding = std::mem::take(&mut s.follow_ups);

        for fu in outstanding {
            let elapsed = quarter.saturating_sub(fu.queued_at);
            if elapsed > tuning.follow_up_expiry {
                log.push(LogEntry::FollowUpExpired {
                    quarter,
                    origin: fu.origin.clone(),
                });
                continue;
            }

            if !rng.percent(trigger_chance(elapsed, tuning)) {
                s.follow_ups.push(fu);
                continue;
            }

            let (favorable, neutral, escalation) = follow_up_kind_weights(fu.tier);
            let roll = rng.next_u64_below(favorable + neutral + escalation);
            let kind = follow_up_kind_from_roll(fu.tier, roll);
            log.push(LogEntry::FollowUpFired {
                quarter,
                origin: fu.origin.clone(),
                kind,
            });

            let def = self.catalog.project(&fu.origin)?;
            let Some(follow_up) = &def.follow_up else {
                continue;
            };
            match kind {
                FollowUpKind::Favorable => {
                    apply_all(
                        &follow_up.favorable,
                        quarter,
                        &mut s.meters,
                        &mut s.ledger,
                        log,
                    );
                }
                FollowUpKind::Neutral => {}
                FollowUpKind::Escalation => {
                    let record =
                        SituationRecord::new(follow_up.situation.clone(), quarter, quarter);
                    log.push(LogEntry::SituationQueued {
                        quarter,
                        situation: record.situation.clone(),
                        due: record.due,
                    });
                    s.queues = s.queues.with_pending_entry(record);
                }
            }
        }
        Ok(())
    }

    /// Drop situations that outlived their definition's expiry, applying
    /// their base impact.
    fn expire_situations(&self, s: &mut GameState, log: &mut Vec<LogEntry>) -> SimResult<()> {
        let quarter = s.quarter;
        let all: Vec<SituationRecord> = s
            .queues
            .pending
            .iter()
            .chain(s.queues.deferred.iter())
            .cloned()
            .collect();

        for record in all {
            let def = self.catalog.situation(&record.situation)?;
            if quarter.saturating_sub(record.queued_at) > def.expires_after {
                s.queues = s.queues.with_removed(&record);
                log.push(LogEntry::SituationExpired {
                    quarter,
                    situation: record.situation.clone(),
                });
                apply_all(
                    &def.base_impact,
                    quarter,
                    &mut s.meters,
                    &mut s.ledger,
                    log,
                );
            }
        }
        Ok(())
    }

    // ── PlayCards ──────────────────────────────────────────────────

    fn phase_play(
        &self,
        state: &GameState,
        action: &PlayAction,
        rng: &mut QuarterRng,
    ) -> SimResult<Transition> {
        match action {
            PlayAction::Card { card } => self.play_card(state, card, rng),
            PlayAction::Exchange { meter } => self.exchange_meter(state, *meter),
            PlayAction::Redeem => self.redeem_evil(state),
            PlayAction::End => {
                let mut s = state.clone();
                let quarter = s.quarter;
                s.phase = Phase::Crisis;
                Ok(Transition {
                    state: s,
                    log: vec![LogEntry::PhaseEnded {
                        quarter,
                        phase: Phase::PlayCards,
                    }],
                })
            }
        }
    }

    fn play_card(
        &self,
        state: &GameState,
        card: &str,
        rng: &mut QuarterRng,
    ) -> SimResult<Transition> {
        let cap = self.config.quarter.play_cap;
        if state.cards_played >= cap {
            return Err(EngineError::PlayLimitReached { limit: cap });
        }
        let def = self.catalog.project(card)?;
        if !state.hand.iter().any(|c| c == card) {
            return Err(EngineError::CardNotInHand { card: card.into() });
        }

        let mut s = state.clone();
        let quarter = s.quarter;
        let mut log = Vec::new();

        // Atomic capital spend — card cost plus the position surcharge,
        // validated before anything else mutates.
        let position = s.cards_played;
        let cost = def.capital_cost + self.config.quarter.surcharge_at(position);
        s.capital.spend(cost)?;
        log.push(LogEntry::CardPlayed {
            quarter,
            card: card.into(),
            position,
            capital_spent: cost,
        });
        if cost > 0 {
            log.push(LogEntry::CapitalChanged {
                quarter,
                delta: -(cost as i32),
                balance: s.capital.balance(),
                reason: CapitalReason::CardCost,
            });
        }

        s.hand.retain(|c| c != card);
        s.deck = s.deck.with_discarded(card.into());

        let ctx = RollContext {
            position,
            affinity_value: s.meters.get(def.affinity),
            success_streak: s.tenure.success_streak,
            synergy: s.played_affinities.contains(&def.affinity),
            evil_score: s.tenure.evil_score,
            quarters_survived: s.tenure.quarters_survived,
        };
        let tier = outcome::resolve(def.profile.weights, &ctx, &self.config.outcome, rng);
        log.push(LogEntry::OutcomeResolved {
            quarter,
            source: OutcomeSource::Project { card: card.into() },
            tier,
        });
        apply_all(
            def.profile.effects_for(tier),
            quarter,
            &mut s.meters,
            &mut s.ledger,
            &mut log,
        );

        s.cards_played += 1;
        s.played_affinities.push(def.affinity);
        if tier == OutcomeTier::Good {
            s.good_projects += 1;
        }

        // A failed project can leave a situation behind.
        if tier == OutcomeTier::Bad {
            if let Some(sid) = &def.situation_on_bad {
                let record = SituationRecord::new(sid.clone(), quarter, quarter + 1);
                log.push(LogEntry::SituationQueued {
                    quarter,
                    situation: sid.clone(),
                    due: record.due,
                });
                let (queues, evicted) =
                    s.queues.with_deferred_entry(record, &self.config.situations);
                s.queues = queues;
                if let Some(evicted) = evicted {
                    log.push(LogEntry::SituationEvicted {
                        quarter,
                        situation: evicted.situation,
                    });
                }
            }
        }

        if def.follow_up.is_some() {
            s.follow_ups.push(FollowUpRecord {
                origin: card.into(),
                queued_at: quarter,
                tier,
            });
        }

        log::debug!(
            "quarter={quarter} play: card={card} position={position} tier={tier:?}"
        );

        // The phase closes itself once the cap is hit or the hand runs dry.
        if s.cards_played >= cap || s.hand.is_empty() {
            s.phase = Phase::Crisis;
            log.push(LogEntry::PhaseEnded {
                quarter,
                phase: Phase::PlayCards,
            });
        }
        Ok(Transition { state: s, log })
    }

    fn exchange_meter(&self, state: &GameState, meter: Meter) -> SimResult<Transition> {
        if !self.can_exchange(state, meter) {
            return Err(EngineError::ExchangeIneligible { meter });
        }
        let mut s = state.clone();
        let quarter = s.quarter;
        let cost = capital::exchange_cost(meter);
        let new_value = s.meters.apply_delta(meter, -cost);
        s.capital.earn(1, self.config.capital.max);
        let log = vec![
            LogEntry::MeterChanged {
                quarter,
                meter,
                delta: -cost,
                new_value,
            },
            LogEntry::MeterExchanged {
                quarter,
                meter,
                points: cost,
                balance: s.capital.balance(),
            },
        ];
        Ok(Transition { state: s, log })
    }

    fn redeem_evil(&self, state: &GameState) -> SimResult<Transition> {
        if !self.can_redeem(state) {
            return Err(EngineError::RedemptionIneligible);
        }
        let mut s = state.clone();
        let quarter = s.quarter;
        let tuning = &self.config.capital;
        s.capital.spend(tuning.redemption_cost)?;
        s.tenure.evil_score = s.tenure.evil_score.saturating_sub(tuning.redemption_relief);
        let log = vec![
            LogEntry::CapitalChanged {
                quarter,
                delta: -(tuning.redemption_cost as i32),
                balance: s.capital.balance(),
                reason: CapitalReason::Redemption,
            },
            LogEntry::EvilRedeemed {
                quarter,
                amount: tuning.redemption_relief,
                total: s.tenure.evil_score,
            },
        ];
        Ok(Transition { state: s, log })
    }

    // ── Crisis ─────────────────────────────────────────────────────

    fn phase_crisis_pass(&self, state: &GameState) -> SimResult<Transition> {
        let mut s = state.clone();
        let quarter = s.quarter;
        s.phase = Phase::Resolution;
        Ok(Transition {
            state: s,
            log: vec![LogEntry::PhaseEnded {
                quarter,
                phase: Phase::Crisis,
            }],
        })
    }

    fn phase_crisis(
        &self,
        state: &GameState,
        action: &CrisisAction,
        rng: &mut QuarterRng,
    ) -> SimResult<Transition> {
        let pending = state
            .pending_crisis
            .as_ref()
            .ok_or(EngineError::NoPendingCrisis)?;

        match action {
            CrisisAction::Choose { choice } => self.resolve_crisis(state, pending, choice, rng),
            CrisisAction::Defer => self.defer_crisis(state, pending),
        }
    }

    fn crisis_card_def<'a>(&'a self, pending: &PendingCrisis) -> SimResult<&'a CrisisCard> {
        match &pending.origin {
            Some(record) => Ok(&self.catalog.situation(&record.situation)?.crisis),
            None => self.catalog.crisis(&pending.card),
        }
    }

    fn resolve_crisis(
        &self,
        state: &GameState,
        pending: &PendingCrisis,
        choice_id: &str,
        rng: &mut QuarterRng,
    ) -> SimResult<Transition> {
        let crisis = self.crisis_card_def(pending)?;
        let choice = crisis
            .choices
            .iter()
            .find(|c| c.id == choice_id)
            .ok_or_else(|| EngineError::UnknownChoice {
                choice: choice_id.into(),
            })?;

        let mut s = state.clone();
        let quarter = s.quarter;
        let mut log = Vec::new();

        // Capital-cost choices deduct before resolving.
        s.capital.spend(choice.capital_cost)?;
        if choice.capital_cost > 0 {
            log.push(LogEntry::CapitalChanged {
                quarter,
                delta: -(choice.capital_cost as i32),
                balance: s.capital.balance(),
                reason: CapitalReason::ChoiceCost,
            });
        }

        // Intensity is paid in evil score, win or lose.
        if choice.intensity > 0 {
            s.tenure.evil_score += choice.intensity;
            log.push(LogEntry::EvilAccrued {
                quarter,
                amount: choice.intensity,
                total: s.tenure.evil_score,
            });
        }

        match &choice.outcome {
            ChoiceOutcome::Flat { effects } => {
                apply_all(effects, quarter, &mut s.meters, &mut s.ledger, &mut log);
            }
            ChoiceOutcome::Tiered { profile } => {
                let tier =
                    outcome::resolve_crisis_choice(choice.kind(), &self.config.outcome, rng);
                log.push(LogEntry::OutcomeResolved {
                    quarter,
                    source: OutcomeSource::Crisis {
                        card: crisis.id.clone(),
                    },
                    tier,
                });
                apply_all(
                    profile.effects_for(tier),
                    quarter,
                    &mut s.meters,
                    &mut s.ledger,
                    &mut log,
                );
            }
        }

        log::debug!(
            "quarter={quarter} crisis: card={} choice={choice_id}",
            crisis.id
        );

        s.pending_crisis = None;
        s.phase = Phase::Resolution;
        log.push(LogEntry::PhaseEnded {
            quarter,
            phase: Phase::Crisis,
        });
        Ok(Transition { state: s, log })
    }

    fn defer_crisis(&self, state: &GameState, pending: &PendingCrisis) -> SimResult<Transition> {
        let record = pending.origin.as_ref().ok_or(EngineError::DeferBarred)?;
        if !record.can_defer(&self.config.situations) {
            return Err(EngineError::DeferBarred);
        }

        let mut s = state.clone();
        let quarter = s.quarter;
        let mut log = Vec::new();

        let rescheduled = record.deferred(quarter);
        log.push(LogEntry::SituationDeferred {
            quarter,
            situation: rescheduled.situation.clone(),
            due: rescheduled.due,
            defer_count: rescheduled.defer_count,
        });
        let (queues, evicted) = s
            .queues
            .with_deferred_entry(rescheduled, &self.config.situations);
        s.queues = queues;
        if let Some(evicted) = evicted {
            log.push(LogEntry::SituationEvicted {
                quarter,
                situation: evicted.situation,
            });
        }

        s.pending_crisis = None;
        s.phase = Phase::Resolution;
        log.push(LogEntry::PhaseEnded {
            quarter,
            phase: Phase::Crisis,
        });
        Ok(Transition { state: s, log })
    }

    // ── Resolution ─────────────────────────────────────────────────

    fn phase_resolution(&self, state: &GameState, rng: &mut QuarterRng) -> SimResult<Transition> {
        let mut s = state.clone();
        let quarter = s.quarter;
        let q = &self.config.quarter;
        let board = &self.config.board;
        let mut log = Vec::new();

        // Base operations: a stochastic process lightly modulated by
        // meter health and organic growth.
        let noise = rng.roll_range(-q.ops_noise, q.ops_noise);
        let operations = q.ops_base
            + Millions::from(quarter) / q.ops_growth_div
            + Millions::from(s.meters.average() - 50) / q.ops_meter_div
            + noise;
        let projects = s.ledger.project_profit;
        let fines = s.ledger.fines;
        let profit = operations + projects - fines;

        let met = profit >= s.directive;
        log.push(LogEntry::DirectiveEvaluated {
            quarter,
            target: s.directive,
            actual: profit,
            met,
        });

        let assessment = QuarterAssessment {
            last_profit: s.tenure.last_quarter_profit,
            current_profit: profit,
            directive_met: met,
            pressure: s.tenure.pressure(),
            evil_score: s.tenure.evil_score,
            weak_project_streak: s.tenure.weak_project_streak,
            success_streak: s.tenure.success_streak,
            quarters_survived: s.tenure.quarters_survived,
            lowest_meter: s.meters.lowest(),
            cards_played: s.cards_played,
        };
        let delta = favorability::favorability_delta(&assessment, board);
        s.tenure.board_favorability = (s.tenure.board_favorability + delta).clamp(0, 100);
        log.push(LogEntry::FavorabilityChanged {
            quarter,
            delta,
            new_value: s.tenure.board_favorability,
        });

        // End-of-quarter economy adjustment, then the restraint bonus.
        let adjustment = capital::quarter_adjustment(
            &s.meters,
            s.capital.balance(),
            quarter,
            &self.config.capital,
        );
        let applied = s.capital.adjust(adjustment, self.config.capital.max);
        if applied != 0 {
            log.push(LogEntry::CapitalChanged {
                quarter,
                delta: applied,
                balance: s.capital.balance(),
                reason: CapitalReason::QuarterAdjustment,
            });
        }
        let bonus = capital::restraint_bonus(s.cards_played, &self.config.capital);
        let earned = s.capital.earn(bonus, self.config.capital.max);
        if earned > 0 {
            log.push(LogEntry::CapitalChanged {
                quarter,
                delta: earned as i32,
                balance: s.capital.balance(),
                reason: CapitalReason::Restraint,
            });
        }

        // The quarter's single survival draw — always taken, so the
        // draw sequence does not depend on the outcome.
        let negative_streak = if profit < 0 {
            s.tenure.negative_quarter_streak + 1
        } else {
            0
        };
        let chance = favorability::ouster_chance(
            s.tenure.board_favorability,
            &assessment,
            negative_streak,
            board,
        );
        let survived = rng.next_u64_below(100) >= u64::from(chance);
        log.push(LogEntry::SurvivalRolled {
            quarter,
            ouster_chance: chance,
            survived,
        });

        // Tenure bookkeeping.
        s.tenure.quarters_survived += 1;
        s.tenure.lifetime_profit += profit;
        s.tenure.record_profit(profit);
        s.tenure.last_quarter_profit = profit;
        s.tenure.success_streak = if met { s.tenure.success_streak + 1 } else { 0 };
        s.tenure.negative_quarter_streak = negative_streak;
        s.tenure.weak_project_streak = if s.good_projects == 0 {
            s.tenure.weak_project_streak + 1
        } else {
            0
        };

        if survived {
            let gained = (profit.max(0) / board.retirement_profit_div)
                + if met { board.retirement_met_bonus } else { 0 };
            if gained > 0 {
                s.tenure.retirement_bonus += gained;
                log.push(LogEntry::RetirementAccrued {
                    quarter,
                    gained,
                    total: s.tenure.retirement_bonus,
                });
            }
        }

        let parachute = favorability::parachute_payout(
            s.tenure.quarters_survived,
            s.tenure.retirement_bonus,
            s.tenure.evil_score,
        );
        if !survived {
            s.tenure.terminal = Some(Terminal::Ousted { parachute });
            log.push(LogEntry::Ousted { quarter, parachute });
            log::info!("quarter={quarter} resolution: ousted, parachute={parachute}");
        } else if s.tenure.retirement_bonus >= board.retirement_threshold {
            s.tenure.terminal = Some(Terminal::Retired { parachute });
            log.push(LogEntry::Retired { quarter, parachute });
            log::info!("quarter={quarter} resolution: retired, parachute={parachute}");
        }

        log.push(LogEntry::QuarterClosed {
            quarter,
            operations,
            projects,
            fines,
            profit,
        });
        log::debug!(
            "quarter={quarter} resolution: profit={profit} directive_met={met} favorability={}",
            s.tenure.board_favorability
        );

        // Reset per-quarter accumulators and hand the cursor to the
        // next quarter's Demand.
        s.ledger = Default::default();
        s.cards_played = 0;
        s.played_affinities.clear();
        s.good_projects = 0;
        log.push(LogEntry::PhaseEnded {
            quarter,
            phase: Phase::Resolution,
        });
        if !s.is_terminal() {
            s.quarter += 1;
            s.phase = Phase::Demand;
        }
        Ok(Transition { state: s, log })
    }
}
