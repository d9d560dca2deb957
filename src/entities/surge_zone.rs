use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{check_non_negative, has_id_format};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "very_high")]
    VeryHigh,
}

impl DemandLevel {
    pub const ALL: [DemandLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];
}

/// Surge statistics for one named zone. Zones carry no link to rides or
/// drivers; their counters are independent inputs.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "surge_pricing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub zone_id: String,
    pub zone_name: String,
    pub current_surge: f64,
    pub demand_level: DemandLevel,
    pub available_drivers: i32,
    pub active_requests: i32,
    pub timestamp: DateTimeUtc,
    pub avg_wait_time: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn validate(&self) -> Result<(), String> {
        if !has_id_format(&self.zone_id, "ZONE", 2) {
            return Err(format!("Invalid zone id: {}", self.zone_id));
        }
        if !self.current_surge.is_finite() || self.current_surge < 1.0 {
            return Err(format!("current_surge must be >= 1.0, got {}", self.current_surge));
        }
        if self.available_drivers < 0 || self.active_requests < 0 {
            return Err("zone counters must be non-negative".to_string());
        }
        check_non_negative(self.avg_wait_time as f64, "avg_wait_time")
    }
}
