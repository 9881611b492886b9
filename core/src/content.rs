//! Content catalog — card, crisis, and situation definitions.
//!
//! RULE: the engine consumes these as opaque, pre-validated data and
//! never mutates them. Authoring errors (duplicate choice ids, choice
//! counts outside 2..=4, dangling situation references, negative
//! fines) fail at load time via `Catalog::new`, not at play time.
//!
//! The actual game content ships from an external collaborator; the
//! baseline set below exists for the runner and the test suite.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::error::{EngineError, SimResult};
use crate::meters::Meter;
use crate::outcome::OutcomeWeights;
use crate::types::{CardId, ChoiceId, Quarter, SituationId};

/// A tiered outcome profile: one weight triple, three effect lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeProfile {
    pub weights: OutcomeWeights,
    pub good: Vec<Effect>,
    pub expected: Vec<Effect>,
    pub bad: Vec<Effect>,
}

impl OutcomeProfile {
    pub fn effects_for(&self, tier: crate::outcome::OutcomeTier) -> &[Effect] {
        match tier {
            crate::outcome::OutcomeTier::Good     => &self.good,
            crate::outcome::OutcomeTier::Expected => &self.expected,
            crate::outcome::OutcomeTier::Bad      => &self.bad,
        }
    }
}

/// What a crisis choice resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum ChoiceOutcome {
    /// Applied as-is, no roll.
    Flat { effects: Vec<Effect> },
    /// Rolled on the crisis baseline table for the choice's kind.
    Tiered { profile: OutcomeProfile },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    /// Political capital deducted before the roll. 0 = free.
    #[serde(default)]
    pub capital_cost: u32,
    /// Moral cost paid into the evil score. 0 = none.
    #[serde(default)]
    pub intensity: u32,
    pub outcome: ChoiceOutcome,
}

/// Choice kind, derived from its costs. Drives the crisis baseline
/// weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    Standard,
    CapitalSpend,
    Corporate,
}

impl Choice {
    pub fn kind(&self) -> ChoiceKind {
        if self.intensity > 0 {
            ChoiceKind::Corporate
        } else if self.capital_cost > 0 {
            ChoiceKind::CapitalSpend
        } else {
            ChoiceKind::Standard
        }
    }
}

/// A playable project card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: CardId,
    /// The meter this project leans on; feeds the affinity modifier.
    pub affinity: Meter,
    #[serde(default)]
    pub capital_cost: u32,
    pub profile: OutcomeProfile,
    /// Situation queued when the project lands Bad.
    #[serde(default)]
    pub situation_on_bad: Option<SituationId>,
    /// Follow-up seeded by playing this card at all.
    #[serde(default)]
    pub follow_up: Option<FollowUpDef>,
}

/// Deferred consequence of playing a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpDef {
    /// Applied when the follow-up fires favorably.
    pub favorable: Vec<Effect>,
    /// Promoted to a pending situation when it escalates.
    pub situation: SituationId,
}

/// A board crisis presented during the Crisis phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisCard {
    pub id: CardId,
    pub choices: Vec<Choice>,
}

/// A deferred situation: fires as a crisis when due, or applies its
/// base impact if it expires unaddressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SituationDef {
    pub id: SituationId,
    pub crisis: CrisisCard,
    pub base_impact: Vec<Effect>,
    /// Dropped (base impact applied) this many quarters after queuing.
    pub expires_after: Quarter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    projects: Vec<ProjectCard>,
    crises: Vec<CrisisCard>,
    situations: Vec<SituationDef>,
}

impl Catalog {
    /// Build and validate a catalog. All content errors surface here.
    pub fn new(
        projects: Vec<ProjectCard>,
        crises: Vec<CrisisCard>,
        situations: Vec<SituationDef>,
    ) -> SimResult<Self> {
        let catalog = Self {
            projects,
            crises,
            situations,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn projects(&self) -> &[ProjectCard] {
        &self.projects
    }

    pub fn crises(&self) -> &[CrisisCard] {
        &self.crises
    }

    pub fn project(&self, id: &str) -> SimResult<&ProjectCard> {
        self.projects
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::UnknownCard { card: id.into() })
    }

    pub fn crisis(&self, id: &str) -> SimResult<&CrisisCard> {
        self.crises
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::UnknownCard { card: id.into() })
    }

    pub fn situation(&self, id: &str) -> SimResult<&SituationDef> {
        self.situations
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| EngineError::UnknownSituation {
                situation: id.into(),
            })
    }

    fn validate(&self) -> SimResult<()> {
        let mut seen = std::collections::HashSet::new();
        for card in &self.projects {
            if !seen.insert(card.id.clone()) {
                return Err(EngineError::Content(format!(
                    "duplicate project id '{}'",
                    card.id
                )));
            }
            validate_effects(&card.id, all_profile_effects(&card.profile))?;
            if let Some(sid) = &card.situation_on_bad {
                self.situation(sid).map_err(|_| {
                    EngineError::Content(format!(
                        "project '{}' references unknown situation '{sid}'",
                        card.id
                    ))
                })?;
            }
            if let Some(fu) = &card.follow_up {
                self.situation(&fu.situation).map_err(|_| {
                    EngineError::Content(format!(
                        "project '{}' follow-up references unknown situation '{}'",
                        card.id, fu.situation
                    ))
                })?;
            }
        }

        let mut crisis_ids = std::collections::HashSet::new();
        let situation_crises = self.situations.iter().map(|s| &s.crisis);
        for crisis in self.crises.iter().chain(situation_crises) {
            if !crisis_ids.insert(crisis.id.clone()) {
                return Err(EngineError::Content(format!(
                    "duplicate crisis id '{}'",
                    crisis.id
                )));
            }
            validate_choices(crisis)?;
        }

        let mut situation_ids = std::collections::HashSet::new();
        for situation in &self.situations {
            if !situation_ids.insert(situation.id.clone()) {
                return Err(EngineError::Content(format!(
                    "duplicate situation id '{}'",
                    situation.id
                )));
            }
            validate_effects(&situation.id, situation.base_impact.iter())?;
        }

        Ok(())
    }

    /// A small playable set used by the headless runner and the test
    /// suite. Real content arrives from the catalog collaborator.
    pub fn baseline() -> Self {
        let projects = vec![
            ProjectCard {
                id: "replatform".into(),
                affinity: Meter::Delivery,
                capital_cost: 0,
                profile: OutcomeProfile {
                    weights: OutcomeWeights::new(30, 50, 20),
                    good: vec![
                        Effect::MeterDelta { meter: Meter::Delivery, delta: 8 },
                        Effect::ProfitDelta { millions: 6 },
                    ],
                    expected: vec![
                        Effect::MeterDelta { meter: Meter::Delivery, delta: 3 },
                        Effect::ProfitDelta { millions: 2 },
                    ],
                    bad: vec![
                        Effect::MeterDelta { meter: Meter::Delivery, delta: -6 },
                        Effect::MeterDelta { meter: Meter::Morale, delta: -4 },
                        Effect::ProfitDelta { millions: -3 },
                    ],
                },
                situation_on_bad: Some("outage_fallout".into()),
                follow_up: None,
            },
            ProjectCard {
                id: "hiring_push".into(),
                affinity: Meter::Morale,
                capital_cost: 1,
                profile: OutcomeProfile {
                    weights: OutcomeWeights::new(35, 50, 15),
                    good: vec![
                        Effect::MeterDelta { meter: Meter::Morale, delta: 10 },
                        Effect::MeterDelta { meter: Meter::Delivery, delta: 4 },
                    ],
                    expected: vec![
                        Effect::MeterDelta { meter: Meter::Morale, delta: 4 },
                    ],
                    bad: vec![
                        Effect::MeterDelta { meter: Meter::Morale, delta: -5 },
                        Effect::MeterDelta { meter: Meter::Runway, delta: -6 },
                    ],
                },
                situation_on_bad: None,
                follow_up: None,
            },
            ProjectCard {
                id: "offshore_restructure".into(),
                affinity: Meter::Runway,
                capital_cost: 2,
                profile: OutcomeProfile {
                    weights: OutcomeWeights::new(40, 35, 25),
                    good: vec![
                        Effect::ProfitDelta { millions: 12 },
                        Effect::MeterDelta { meter: Meter::Runway, delta: 8 },
                        Effect::MeterDelta { meter: Meter::Morale, delta: -6 },
                    ],
                    expected: vec![
                        Effect::ProfitDelta { millions: 5 },
                        Effect::MeterDelta { meter: Meter::Morale, delta: -3 },
                    ],
                    bad: vec![
                        Effect::ProfitDelta { millions: -4 },
                        Effect::MeterDelta { meter: Meter::Morale, delta: -10 },
                        Effect::MeterDelta { meter: Meter::Governance, delta: -5 },
                    ],
                },
                situation_on_bad: Some("attrition_spiral".into()),
                follow_up: Some(FollowUpDef {
                    favorable: vec![Effect::ProfitDelta { millions: 4 }],
                    situation: "attrition_spiral".into(),
                }),
            },
            ProjectCard {
                id: "compliance_audit".into(),
                affinity: Meter::Governance,
                capital_cost: 0,
                profile: OutcomeProfile {
                    weights: OutcomeWeights::new(25, 65, 10),
                    good: vec![
                        Effect::MeterDelta { meter: Meter::Governance, delta: 10 },
                        Effect::MeterDelta { meter: Meter::Alignment, delta: 4 },
                    ],
                    expected: vec![
                        Effect::MeterDelta { meter: Meter::Governance, delta: 4 },
                    ],
                    bad: vec![
                        Effect::MeterDelta { meter: Meter::Governance, delta: -3 },
                        Effect::Fine { millions: 5 },
                    ],
                },
                situation_on_bad: None,
                follow_up: None,
            },
            ProjectCard {
                id: "moonshot_pivot".into(),
                affinity: Meter::Alignment,
                capital_cost: 3,
                profile: OutcomeProfile {
                    weights: OutcomeWeights::new(45, 20, 35),
                    good: vec![
                        Effect::ProfitDelta { millions: 18 },
                        Effect::MeterDelta { meter: Meter::Alignment, delta: 10 },
                    ],
                    expected: vec![
                        Effect::ProfitDelta { millions: 3 },
                    ],
                    bad: vec![
                        Effect::ProfitDelta { millions: -10 },
                        Effect::MeterDelta { meter: Meter::Alignment, delta: -8 },
                        Effect::MeterDelta { meter: Meter::Runway, delta: -8 },
                    ],
                },
                situation_on_bad: Some("investor_doubt".into()),
                follow_up: Some(FollowUpDef {
                    favorable: vec![
                        Effect::ProfitDelta { millions: 6 },
                        Effect::MeterDelta { meter: Meter::Alignment, delta: 4 },
                    ],
                    situation: "investor_doubt".into(),
                }),
            },
            ProjectCard {
                id: "quiet_layoffs".into(),
                affinity: Meter::Runway,
                capital_cost: 0,
                profile: OutcomeProfile {
                    weights: OutcomeWeights::new(35, 45, 20),
                    good: vec![
                        Effect::ProfitDelta { millions: 8 },
                        Effect::MeterDelta { meter: Meter::Runway, delta: 10 },
                        Effect::MeterDelta { meter: Meter::Morale, delta: -8 },
                    ],
                    expected: vec![
                        Effect::ProfitDelta { millions: 4 },
                        Effect::MeterDelta { meter: Meter::Morale, delta: -5 },
                    ],
                    bad: vec![
                        Effect::MeterDelta { meter: Meter::Morale, delta: -12 },
                        Effect::MeterDelta { meter: Meter::Delivery, delta: -6 },
                    ],
                },
                situation_on_bad: Some("attrition_spiral".into()),
                follow_up: None,
            },
        ];

        let crises = vec![
            CrisisCard {
                id: "data_breach".into(),
                choices: vec![
                    Choice {
                        id: "full_disclosure".into(),
                        capital_cost: 0,
                        intensity: 0,
                        outcome: ChoiceOutcome::Tiered {
                            profile: OutcomeProfile {
                                weights: OutcomeWeights::new(15, 70, 15),
                                good: vec![
                                    Effect::MeterDelta { meter: Meter::Governance, delta: 6 },
                                ],
                                expected: vec![
                                    Effect::MeterDelta { meter: Meter::Governance, delta: 2 },
                                    Effect::Fine { millions: 3 },
                                ],
                                bad: vec![
                                    Effect::Fine { millions: 8 },
                                    Effect::MeterDelta { meter: Meter::Alignment, delta: -5 },
                                ],
                            },
                        },
                    },
                    Choice {
                        id: "call_in_favors".into(),
                        capital_cost: 3,
                        intensity: 0,
                        outcome: ChoiceOutcome::Tiered {
                            profile: OutcomeProfile {
                                weights: OutcomeWeights::new(65, 30, 5),
                                good: vec![
                                    Effect::MeterDelta { meter: Meter::Governance, delta: 4 },
                                ],
                                expected: vec![
                                    Effect::Fine { millions: 2 },
                                ],
                                bad: vec![
                                    Effect::Fine { millions: 6 },
                                ],
                            },
                        },
                    },
                    Choice {
                        id: "bury_it".into(),
                        capital_cost: 0,
                        intensity: 12,
                        outcome: ChoiceOutcome::Tiered {
                            profile: OutcomeProfile {
                                weights: OutcomeWeights::new(45, 10, 45),
                                good: vec![
                                    Effect::ProfitDelta { millions: 5 },
                                ],
                                expected: vec![],
                                bad: vec![
                                    Effect::Fine { millions: 15 },
                                    Effect::MeterDelta { meter: Meter::Governance, delta: -12 },
                                ],
                            },
                        },
                    },
                ],
            },
            CrisisCard {
                id: "union_vote".into(),
                choices: vec![
                    Choice {
                        id: "negotiate".into(),
                        capital_cost: 0,
                        intensity: 0,
                        outcome: ChoiceOutcome::Flat {
                            effects: vec![
                                Effect::MeterDelta { meter: Meter::Morale, delta: 6 },
                                Effect::ProfitDelta { millions: -3 },
                            ],
                        },
                    },
                    Choice {
                        id: "lobby_board".into(),
                        capital_cost: 2,
                        intensity: 0,
                        outcome: ChoiceOutcome::Tiered {
                            profile: OutcomeProfile {
                                weights: OutcomeWeights::new(65, 30, 5),
                                good: vec![
                                    Effect::MeterDelta { meter: Meter::Alignment, delta: 6 },
                                ],
                                expected: vec![
                                    Effect::MeterDelta { meter: Meter::Morale, delta: -2 },
                                ],
                                bad: vec![
                                    Effect::MeterDelta { meter: Meter::Morale, delta: -8 },
                                ],
                            },
                        },
                    },
                    Choice {
                        id: "union_busting".into(),
                        capital_cost: 0,
                        intensity: 15,
                        outcome: ChoiceOutcome::Tiered {
                            profile: OutcomeProfile {
                                weights: OutcomeWeights::new(45, 10, 45),
                                good: vec![
                                    Effect::ProfitDelta { millions: 6 },
                                    Effect::MeterDelta { meter: Meter::Morale, delta: -5 },
                                ],
                                expected: vec![
                                    Effect::MeterDelta { meter: Meter::Morale, delta: -6 },
                                ],
                                bad: vec![
                                    Effect::MeterDelta { meter: Meter::Morale, delta: -15 },
                                    Effect::Fine { millions: 10 },
                                ],
                            },
                        },
                    },
                ],
            },
        ];

        let situations = vec![
            SituationDef {
                id: "outage_fallout".into(),
                crisis: CrisisCard {
                    id: "outage_postmortem".into(),
                    choices: vec![
                        Choice {
                            id: "own_it".into(),
                            capital_cost: 0,
                            intensity: 0,
                            outcome: ChoiceOutcome::Flat {
                                effects: vec![
                                    Effect::MeterDelta { meter: Meter::Delivery, delta: 4 },
                                    Effect::ProfitDelta { millions: -2 },
                                ],
                            },
                        },
                        Choice {
                            id: "blame_vendor".into(),
                            capital_cost: 0,
                            intensity: 8,
                            outcome: ChoiceOutcome::Tiered {
                                profile: OutcomeProfile {
                                    weights: OutcomeWeights::new(45, 10, 45),
                                    good: vec![],
                                    expected: vec![
                                        Effect::MeterDelta { meter: Meter::Alignment, delta: -2 },
                                    ],
                                    bad: vec![
                                        Effect::MeterDelta { meter: Meter::Alignment, delta: -8 },
                                        Effect::Fine { millions: 4 },
                                    ],
                                },
                            },
                        },
                    ],
                },
                base_impact: vec![
                    Effect::MeterDelta { meter: Meter::Delivery, delta: -8 },
                    Effect::Fine { millions: 4 },
                ],
                expires_after: 3,
            },
            SituationDef {
                id: "attrition_spiral".into(),
                crisis: CrisisCard {
                    id: "retention_emergency".into(),
                    choices: vec![
                        Choice {
                            id: "counter_offers".into(),
                            capital_cost: 0,
                            intensity: 0,
                            outcome: ChoiceOutcome::Flat {
                                effects: vec![
                                    Effect::MeterDelta { meter: Meter::Morale, delta: 5 },
                                    Effect::ProfitDelta { millions: -4 },
                                ],
                            },
                        },
                        Choice {
                            id: "board_intervention".into(),
                            capital_cost: 2,
                            intensity: 0,
                            outcome: ChoiceOutcome::Tiered {
                                profile: OutcomeProfile {
                                    weights: OutcomeWeights::new(65, 30, 5),
                                    good: vec![
                                        Effect::MeterDelta { meter: Meter::Morale, delta: 8 },
                                    ],
                                    expected: vec![
                                        Effect::MeterDelta { meter: Meter::Morale, delta: 3 },
                                    ],
                                    bad: vec![
                                        Effect::MeterDelta { meter: Meter::Alignment, delta: -4 },
                                    ],
                                },
                            },
                        },
                    ],
                },
                base_impact: vec![
                    Effect::MeterDelta { meter: Meter::Morale, delta: -10 },
                    Effect::MeterDelta { meter: Meter::Delivery, delta: -5 },
                ],
                expires_after: 3,
            },
            SituationDef {
                id: "investor_doubt".into(),
                crisis: CrisisCard {
                    id: "emergency_board_call".into(),
                    choices: vec![
                        Choice {
                            id: "transparent_numbers".into(),
                            capital_cost: 0,
                            intensity: 0,
                            outcome: ChoiceOutcome::Flat {
                                effects: vec![
                                    Effect::MeterDelta { meter: Meter::Alignment, delta: 4 },
                                ],
                            },
                        },
                        Choice {
                            id: "massage_projections".into(),
                            capital_cost: 0,
                            intensity: 10,
                            outcome: ChoiceOutcome::Tiered {
                                profile: OutcomeProfile {
                                    weights: OutcomeWeights::new(45, 10, 45),
                                    good: vec![
                                        Effect::MeterDelta { meter: Meter::Alignment, delta: 8 },
                                    ],
                                    expected: vec![],
                                    bad: vec![
                                        Effect::MeterDelta { meter: Meter::Alignment, delta: -10 },
                                        Effect::Fine { millions: 6 },
                                    ],
                                },
                            },
                        },
                        Choice {
                            id: "spend_goodwill".into(),
                            capital_cost: 2,
                            intensity: 0,
                            outcome: ChoiceOutcome::Tiered {
                                profile: OutcomeProfile {
                                    weights: OutcomeWeights::new(65, 30, 5),
                                    good: vec![
                                        Effect::MeterDelta { meter: Meter::Alignment, delta: 6 },
                                    ],
                                    expected: vec![
                                        Effect::MeterDelta { meter: Meter::Alignment, delta: 2 },
                                    ],
                                    bad: vec![],
                                },
                            },
                        },
                    ],
                },
                base_impact: vec![
                    Effect::MeterDelta { meter: Meter::Alignment, delta: -8 },
                ],
                expires_after: 2,
            },
        ];

        Self::new(projects, crises, situations).expect("baseline catalog is valid")
    }
}

fn validate_choices(crisis: &CrisisCard) -> SimResult<()> {
    if crisis.choices.len() < 2 || crisis.choices.len() > 4 {
        return Err(EngineError::Content(format!(
            "crisis '{}' has {} choices; 2..=4 required",
            crisis.id,
            crisis.choices.len()
        )));
    }
    let mut ids = std::collections::HashSet::new();
    for choice in &crisis.choices {
        if !ids.insert(choice.id.clone()) {
            return Err(EngineError::Content(format!(
                "crisis '{}' has duplicate choice id '{}'",
                crisis.id, choice.id
            )));
        }
        match &choice.outcome {
            ChoiceOutcome::Flat { effects } => {
                validate_effects(&crisis.id, effects.iter())?;
            }
            ChoiceOutcome::Tiered { profile } => {
                validate_effects(&crisis.id, all_profile_effects(profile))?;
            }
        }
    }
    Ok(())
}

fn all_profile_effects(profile: &OutcomeProfile) -> impl Iterator<Item = &Effect> {
    profile
        .good
        .iter()
        .chain(profile.expected.iter())
        .chain(profile.bad.iter())
}

fn validate_effects<'a>(
    owner: &str,
    effects: impl Iterator<Item = &'a Effect>,
) -> SimResult<()> {
    for effect in effects {
        if let Effect::Fine { millions } = effect {
            if *millions < 0 {
                return Err(EngineError::Content(format!(
                    "'{owner}' declares a negative fine ({millions})"
                )));
            }
        }
    }
    Ok(())
}
