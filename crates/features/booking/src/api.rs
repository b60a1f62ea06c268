use crate::advance::{AdvanceDays, ResourceKind};
use crate::availability::AvailabilityQuery;
use crate::codec;
use crate::error::{BookingError, BookingErrorExt};
use crate::period::ReservationPeriod;
use chrono::NaiveDate;
use resbook_domain::{Slot, SlotGroup};
use resbook_gateway::{ApiRequest, RequestGateway};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Answer of the cage availability lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CageAvailability {
    #[serde(default)]
    pub available: bool,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Body of a new order. The selected slots travel as sorted wire strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderDraft {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_slots: Vec<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl OrderDraft {
    /// Draft carrying the flattened selection.
    #[must_use]
    pub fn from_selection(selection: &SlotGroup) -> Self {
        Self { time_slots: codec::flatten(selection), fields: Map::new() }
    }

    /// Draft for period-based bookings (cages).
    #[must_use]
    pub fn from_period(period: ReservationPeriod) -> Self {
        let draft = Self::default().with("start_date", period.start().to_string());
        match period.end() {
            Some(end) => draft.with("end_date", end.to_string()),
            None => draft,
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Booking endpoints.
#[derive(Debug, Clone)]
pub struct BookingApi {
    gateway: RequestGateway,
}

impl BookingApi {
    #[must_use]
    pub const fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// Checks whether cages are free for the query's period.
    ///
    /// # Errors
    /// Returns [`BookingError::Gateway`] when the call fails.
    pub async fn cage_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<CageAvailability, BookingError> {
        let request = ApiRequest::get("/h5/cages/available-time-slots").query(query.query_pairs());
        let availability: CageAvailability =
            self.gateway.call(request).await.context("Checking cage availability")?;
        debug!(available = availability.available, edit = query.is_edit(), "Cage availability");
        Ok(availability)
    }

    /// Free slots of one piece of equipment on `date`, grouped by date.
    ///
    /// # Errors
    /// Returns [`BookingError::Gateway`] when the call fails.
    pub async fn equipment_slots(
        &self,
        equipment_id: i64,
        date: NaiveDate,
    ) -> Result<SlotGroup, BookingError> {
        let request = ApiRequest::get(format!("/h5/equipment/{equipment_id}/available-slots"))
            .query([("date", date.to_string())]);
        self.gateway.call(request).await.context("Loading equipment slots")
    }

    /// The catalog of bookable time ranges for `kind`.
    ///
    /// # Errors
    /// Returns [`BookingError::Gateway`] when the call fails.
    pub async fn time_slots(&self, kind: ResourceKind) -> Result<Vec<Slot>, BookingError> {
        self.gateway
            .call(ApiRequest::get(kind.time_slots_path()))
            .await
            .context(format!("Loading {kind} time slots"))
    }

    /// Advance-booking limits, or `fallback` when they cannot be loaded.
    pub async fn advance_days(&self, fallback: AdvanceDays) -> AdvanceDays {
        match self.gateway.call(ApiRequest::get("/h5/advance-days")).await {
            Ok(days) => days,
            Err(err) => {
                warn!(error = %err, "Advance days unavailable, using defaults");
                fallback
            },
        }
    }

    /// Submits an order and returns the created record as sent by the server.
    ///
    /// # Errors
    /// Returns [`BookingError::Gateway`] when the call fails.
    pub async fn create_order(
        &self,
        kind: ResourceKind,
        draft: &OrderDraft,
    ) -> Result<Value, BookingError> {
        let request = ApiRequest::post(kind.orders_path())
            .json(draft)
            .context("Encoding order")?;
        self.gateway.call(request).await.context(format!("Submitting {kind} order"))
    }
}
