use crate::period::ReservationPeriod;
use chrono::NaiveDate;
use serde::Serialize;
use typed_builder::TypedBuilder;

/// Parameters of a cage availability lookup.
///
/// `end_date` absent means a long-term check. Edit flows must set `exclude_reservation_id` so
/// the reservation being edited does not conflict with itself; use
/// [`AvailabilityQuery::for_edit`] there and [`AvailabilityQuery::for_new`] everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TypedBuilder)]
pub struct AvailabilityQuery {
    pub animal_type_id: i64,
    pub environment_id: i64,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    pub start_date: NaiveDate,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_reservation_id: Option<i64>,
}

impl AvailabilityQuery {
    /// Lookup for a reservation that does not exist yet.
    #[must_use]
    pub fn for_new(animal_type_id: i64, environment_id: i64, period: ReservationPeriod) -> Self {
        Self::builder()
            .animal_type_id(animal_type_id)
            .environment_id(environment_id)
            .start_date(period.start())
            .end_date(period.end())
            .build()
    }

    /// Lookup while editing `reservation_id`, which is excluded from the conflict check.
    #[must_use]
    pub fn for_edit(
        reservation_id: i64,
        animal_type_id: i64,
        environment_id: i64,
        period: ReservationPeriod,
    ) -> Self {
        Self::builder()
            .animal_type_id(animal_type_id)
            .environment_id(environment_id)
            .start_date(period.start())
            .end_date(period.end())
            .exclude_reservation_id(Some(reservation_id))
            .build()
    }

    /// Narrows the lookup to one room.
    #[must_use]
    pub const fn in_room(mut self, room_id: i64) -> Self {
        self.room_id = Some(room_id);
        self
    }

    #[must_use]
    pub const fn is_long_term(&self) -> bool {
        self.end_date.is_none()
    }

    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.exclude_reservation_id.is_some()
    }

    /// URL query pairs in declaration order; absent optionals are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("animal_type_id", self.animal_type_id.to_string()),
            ("environment_id", self.environment_id.to_string()),
        ];
        if let Some(room) = self.room_id {
            pairs.push(("room_id", room.to_string()));
        }
        pairs.push(("start_date", self.start_date.to_string()));
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.to_string()));
        }
        if let Some(id) = self.exclude_reservation_id {
            pairs.push(("exclude_reservation_id", id.to_string()));
        }
        pairs
    }
}
