//! The five organization health meters.
//!
//! RULE: a meter is never observed outside [0, 100]. Every mutation
//! goes through `apply_delta`, which clamps.

use serde::{Deserialize, Serialize};

pub const METER_MIN: i32 = 0;
pub const METER_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Meter {
    Delivery,
    Morale,
    Governance,
    Alignment,
    Runway,
}

impl Meter {
    pub const ALL: [Meter; 5] = [
        Meter::Delivery,
        Meter::Morale,
        Meter::Governance,
        Meter::Alignment,
        Meter::Runway,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Delivery   => "delivery",
            Self::Morale     => "morale",
            Self::Governance => "governance",
            Self::Alignment  => "alignment",
            Self::Runway     => "runway",
        }
    }
}

/// The organization meter vector. Fields are private so the clamp
/// invariant cannot be bypassed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrgMeters {
    delivery:   i32,
    morale:     i32,
    governance: i32,
    alignment:  i32,
    runway:     i32,
}

impl Default for OrgMeters {
    fn default() -> Self {
        Self {
            delivery:   50,
            morale:     50,
            governance: 50,
            alignment:  50,
            runway:     50,
        }
    }
}

impl OrgMeters {
    pub fn get(&self, meter: Meter) -> i32 {
        match meter {
            Meter::Delivery   => self.delivery,
            Meter::Morale     => self.morale,
            Meter::Governance => self.governance,
            Meter::Alignment  => self.alignment,
            Meter::Runway     => self.runway,
        }
    }

    /// Apply a delta to one meter, clamped to [0, 100].
    /// Returns the meter's new value.
    pub fn apply_delta(&mut self, meter: Meter, delta: i32) -> i32 {
        let slot = match meter {
            Meter::Delivery   => &mut self.delivery,
            Meter::Morale     => &mut self.morale,
            Meter::Governance => &mut self.governance,
            Meter::Alignment  => &mut self.alignment,
            Meter::Runway     => &mut self.runway,
        };
        *slot = (*slot + delta).clamp(METER_MIN, METER_MAX);
        *slot
    }

    /// Integer average across all five meters.
    pub fn average(&self) -> i32 {
        (self.delivery + self.morale + self.governance + self.alignment + self.runway) / 5
    }

    /// The lowest meter value. Drives the critical-meter checks.
    pub fn lowest(&self) -> i32 {
        Meter::ALL
            .iter()
            .map(|m| self.get(*m))
            .min()
            .unwrap_or(METER_MIN)
    }
}
