//! Error taxonomy.
//!
//! Every variant except `Content` and `Serialization` is a
//! programming-contract violation: the caller should have checked the
//! matching capability predicate before issuing the action. None of
//! these are recovered internally, and a returned error guarantees the
//! input state was not mutated.

use crate::meters::Meter;
use crate::state::Phase;
use crate::types::{CardId, ChoiceId, SituationId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Input not valid for phase {phase:?}")]
    WrongPhase { phase: Phase },

    #[error("Game has ended; no further transitions are possible")]
    GameOver,

    #[error("Card '{card}' is not in hand")]
    CardNotInHand { card: CardId },

    #[error("Card play limit reached: {limit} per quarter")]
    PlayLimitReached { limit: u32 },

    #[error("Unknown card '{card}'")]
    UnknownCard { card: CardId },

    #[error("Unknown choice '{choice}'")]
    UnknownChoice { choice: ChoiceId },

    #[error("Unknown situation '{situation}'")]
    UnknownSituation { situation: SituationId },

    #[error("No crisis is pending this quarter")]
    NoPendingCrisis,

    #[error("Insufficient political capital: need {need}, have {have}")]
    InsufficientCapital { need: u32, have: u32 },

    #[error("Meter {meter:?} cannot fund an exchange at its current level")]
    ExchangeIneligible { meter: Meter },

    #[error("Nothing to redeem or capital too low")]
    RedemptionIneligible,

    #[error("Situation cannot be deferred further")]
    DeferBarred,

    #[error("Invalid content: {0}")]
    Content(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, EngineError>;
