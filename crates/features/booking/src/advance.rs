use crate::period::ReservationPeriod;
use chrono::{Days, NaiveDate};
use resbook_domain::config::BookingConfig;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

const DEFAULT_ADVANCE_DAYS: u32 = 7;

/// Resources booked by time slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Equipment,
    Cage,
    Experiment,
}

impl ResourceKind {
    /// Endpoint listing the bookable time slots of this kind.
    #[must_use]
    pub const fn time_slots_path(self) -> &'static str {
        match self {
            Self::Equipment => "/h5/equipment-time-slots",
            Self::Cage => "/h5/cage-time-slots",
            Self::Experiment => "/h5/experiment-time-slots",
        }
    }

    /// Endpoint accepting new orders of this kind.
    #[must_use]
    pub const fn orders_path(self) -> &'static str {
        match self {
            Self::Equipment => "/h5/equipment-orders",
            Self::Cage => "/h5/cage-orders",
            Self::Experiment => "/h5/experiment-orders",
        }
    }
}

/// How far ahead each kind may be booked, as served by `/h5/advance-days`.
///
/// Missing or zero values fall back to 7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceDays {
    #[serde(rename = "equipment_advance_days", default = "default_days", deserialize_with = "days")]
    pub equipment: u32,
    #[serde(rename = "cage_advance_days", default = "default_days", deserialize_with = "days")]
    pub cage: u32,
    #[serde(
        rename = "experiment_advance_days",
        default = "default_days",
        deserialize_with = "days"
    )]
    pub experiment: u32,
}

const fn default_days() -> u32 {
    DEFAULT_ADVANCE_DAYS
}

fn days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<u32>::deserialize(deserializer)?;
    Ok(value.filter(|d| *d > 0).unwrap_or(DEFAULT_ADVANCE_DAYS))
}

impl Default for AdvanceDays {
    fn default() -> Self {
        Self {
            equipment: DEFAULT_ADVANCE_DAYS,
            cage: DEFAULT_ADVANCE_DAYS,
            experiment: DEFAULT_ADVANCE_DAYS,
        }
    }
}

impl From<&BookingConfig> for AdvanceDays {
    fn from(config: &BookingConfig) -> Self {
        let or_default = |d: u32| if d == 0 { DEFAULT_ADVANCE_DAYS } else { d };
        Self {
            equipment: or_default(config.equipment_advance_days),
            cage: or_default(config.cage_advance_days),
            experiment: or_default(config.experiment_advance_days),
        }
    }
}

impl AdvanceDays {
    #[must_use]
    pub const fn days(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Equipment => self.equipment,
            ResourceKind::Cage => self.cage,
            ResourceKind::Experiment => self.experiment,
        }
    }

    /// Dates a user may pick today: from `today` through `today + days`, inclusive.
    #[must_use]
    pub fn window(&self, kind: ResourceKind, today: NaiveDate) -> ReservationPeriod {
        let last = today
            .checked_add_days(Days::new(u64::from(self.days(kind))))
            .unwrap_or(NaiveDate::MAX);
        ReservationPeriod::new(today, Some(last))
            .unwrap_or_else(|_| ReservationPeriod::single_day(today))
    }
}
