use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::has_id_format;

pub const CAPACITIES: [i32; 3] = [4, 6, 8];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vehicle_id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub color: String,
    pub capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Plates are two uppercase letters followed by four digits, e.g. `KQ4821`.
pub fn is_valid_plate(plate: &str) -> bool {
    let bytes = plate.as_bytes();
    bytes.len() == 6
        && bytes[..2].iter().all(|b| b.is_ascii_uppercase())
        && bytes[2..].iter().all(|b| b.is_ascii_digit())
}

impl Model {
    pub fn validate(&self) -> Result<(), String> {
        if !has_id_format(&self.vehicle_id, "VEH", 3) {
            return Err(format!("Invalid vehicle id: {}", self.vehicle_id));
        }
        if !is_valid_plate(&self.license_plate) {
            return Err(format!("Invalid license plate: {}", self.license_plate));
        }
        if !CAPACITIES.contains(&self.capacity) {
            return Err(format!("Invalid vehicle capacity: {}", self.capacity));
        }
        Ok(())
    }
}
