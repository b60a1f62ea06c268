use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Label shown for a status code this client does not know.
pub const UNKNOWN_STATUS: &str = "未知状态";

/// Orders come in two families with slightly different wording for the first state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFamily {
    /// Time-based bookings: equipment, cages, experiment operation.
    #[default]
    Rental,
    /// Goods: animals, reagents and consumables.
    Purchase,
}

/// The kinds of order listed under "my orders"; also the `:type` segment of order routes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Equipment,
    Cage,
    Experiment,
    Animal,
    Reagent,
}

impl OrderType {
    #[must_use]
    pub const fn family(self) -> OrderFamily {
        match self {
            Self::Equipment | Self::Cage | Self::Experiment => OrderFamily::Rental,
            Self::Animal | Self::Reagent => OrderFamily::Purchase,
        }
    }
}

/// Text for an order status code.
#[must_use]
pub const fn status_label(status: i64, family: OrderFamily) -> &'static str {
    match (status, family) {
        (0, OrderFamily::Rental) => "待审核",
        (0, OrderFamily::Purchase) => "待处理",
        (1, _) => "进行中",
        (2, _) => "已拒绝",
        (3, _) => "已完成",
        (4, _) => "已取消",
        _ => UNKNOWN_STATUS,
    }
}
