//! The immutable value model — and the save format.
//!
//! RULE: `GameState` and everything it contains serializes losslessly;
//! persistence is a collaborator that round-trips this struct through
//! serde. The only derived quantity is the pressure level, which is
//! reconstructed as `min(quarters_survived / 2, 8)` and never stored.
//!
//! The engine is the sole mutator, and it only ever mutates a working
//! copy: `advance` clones, transforms, and returns.

use serde::{Deserialize, Serialize};

use crate::capital::CapitalState;
use crate::config::EngineConfig;
use crate::content::Catalog;
use crate::effect::QuarterLedger;
use crate::meters::{Meter, OrgMeters};
use crate::rng::QuarterRng;
use crate::situations::{FollowUpRecord, SituationQueues, SituationRecord};
use crate::types::{CardId, Millions, Quarter};

/// Quarters covered by the sliding profit window.
pub const PROFIT_WINDOW: usize = 8;

/// Highest pressure level the board reaches.
pub const PRESSURE_CAP: u32 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Demand,
    PlayCards,
    Crisis,
    Resolution,
}

impl Phase {
    /// The strict cycle. Demand after Resolution belongs to the next
    /// quarter; the orchestrator bumps the quarter number.
    pub fn next(self) -> Phase {
        match self {
            Phase::Demand     => Phase::PlayCards,
            Phase::PlayCards  => Phase::Crisis,
            Phase::Crisis     => Phase::Resolution,
            Phase::Resolution => Phase::Demand,
        }
    }
}

/// How the game ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "ending", rename_all = "snake_case")]
pub enum Terminal {
    Ousted { parachute: Millions },
    Retired { parachute: Millions },
}

/// Tenure, favorability, and the financial record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenureState {
    pub quarters_survived: Quarter,
    pub board_favorability: i32,
    pub lifetime_profit: Millions,
    pub evil_score: u32,
    pub last_quarter_profit: Millions,
    /// Most recent quarterly profits, oldest first, at most
    /// `PROFIT_WINDOW` entries.
    pub profit_history: Vec<Millions>,
    pub success_streak: u32,
    pub negative_quarter_streak: u32,
    pub weak_project_streak: u32,
    pub retirement_bonus: Millions,
    pub terminal: Option<Terminal>,
}

impl Default for TenureState {
    fn default() -> Self {
        Self {
            quarters_survived: 0,
            board_favorability: 50,
            lifetime_profit: 0,
            evil_score: 0,
            last_quarter_profit: 0,
            profit_history: Vec::new(),
            success_streak: 0,
            negative_quarter_streak: 0,
            weak_project_streak: 0,
            retirement_bonus: 0,
            terminal: None,
        }
    }
}

impl TenureState {
    /// Board pressure, derived from tenure: `min(quarters / 2, 8)`.
    pub fn pressure(&self) -> u32 {
        (self.quarters_survived / 2).min(PRESSURE_CAP)
    }

    /// Push a quarter's profit into the sliding window, evicting the
    /// oldest entry once full.
    pub fn record_profit(&mut self, profit: Millions) {
        self.profit_history.push(profit);
        if self.profit_history.len() > PROFIT_WINDOW {
            self.profit_history.remove(0);
        }
    }
}

/// Draw and discard piles, transformed copy-on-write.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    draw: Vec<CardId>,
    discard: Vec<CardId>,
}

impl Deck {
    pub fn from_cards(cards: Vec<CardId>) -> Self {
        Self {
            draw: cards,
            discard: Vec::new(),
        }
    }

    pub fn shuffled(mut self, rng: &mut QuarterRng) -> Self {
        rng.shuffle(&mut self.draw);
        self
    }

    pub fn remaining(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    /// Deck with up to `n` cards drawn from the top. The discard pile
    /// is shuffled back in when the draw pile runs dry.
    pub fn with_drawn(&self, n: usize, rng: &mut QuarterRng) -> (Self, Vec<CardId>) {
        let mut next = self.clone();
        let mut drawn = Vec::new();
        for _ in 0..n {
            if next.draw.is_empty() {
                if next.discard.is_empty() {
                    break;
                }
                next.draw = std::mem::take(&mut next.discard);
                rng.shuffle(&mut next.draw);
            }
            drawn.push(next.draw.remove(0));
        }
        (next, drawn)
    }

    pub fn with_discarded(&self, card: CardId) -> Self {
        let mut next = self.clone();
        next.discard.push(card);
        next
    }
}

/// The crisis awaiting a choice this quarter. Situation-origin crises
/// keep their queue record so a defer can reschedule it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingCrisis {
    pub card: CardId,
    pub origin: Option<SituationRecord>,
}

/// The complete game state between transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub quarter: Quarter,
    pub phase: Phase,
    pub meters: OrgMeters,
    pub tenure: TenureState,
    pub capital: CapitalState,
    /// The board's profit target for this quarter, bound at Demand.
    pub directive: Millions,
    pub deck: Deck,
    pub hand: Vec<CardId>,
    // Per-quarter accumulators, reset by Resolution.
    pub cards_played: u32,
    pub played_affinities: Vec<Meter>,
    pub good_projects: u32,
    pub ledger: QuarterLedger,
    pub pending_crisis: Option<PendingCrisis>,
    pub queues: SituationQueues,
    pub follow_ups: Vec<FollowUpRecord>,
}

impl GameState {
    /// A fresh game at quarter 1, Demand phase, deck shuffled from the
    /// catalog's project list.
    pub fn new_game(catalog: &Catalog, config: &EngineConfig, rng: &mut QuarterRng) -> Self {
        let cards = catalog.projects().iter().map(|c| c.id.clone()).collect();
        Self {
            quarter: 1,
            phase: Phase::Demand,
            meters: OrgMeters::default(),
            tenure: TenureState::default(),
            capital: CapitalState::new(config.capital.initial, config.capital.max),
            directive: 0,
            deck: Deck::from_cards(cards).shuffled(rng),
            hand: Vec::new(),
            cards_played: 0,
            played_affinities: Vec::new(),
            good_projects: 0,
            ledger: QuarterLedger::default(),
            pending_crisis: None,
            queues: SituationQueues::default(),
            follow_ups: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.tenure.terminal.is_some()
    }
}
