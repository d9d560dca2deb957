use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_unit_range, has_id_format};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "Credit Card")]
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[sea_orm(string_value = "PayPal")]
    PayPal,
    #[sea_orm(string_value = "Apple Pay")]
    #[serde(rename = "Apple Pay")]
    ApplePay,
    #[sea_orm(string_value = "Google Pay")]
    #[serde(rename = "Google Pay")]
    GooglePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        Self::CreditCard,
        Self::PayPal,
        Self::ApplePay,
        Self::GooglePay,
    ];
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "riders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rider_id: String,
    pub name: String,
    pub phone: String,
    pub rating: f64,
    pub total_rides: i32,
    pub payment_method: PaymentMethod,
    pub wallet_balance: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn validate(&self) -> Result<(), String> {
        if !has_id_format(&self.rider_id, "RDR", 3) {
            return Err(format!("Invalid rider id: {}", self.rider_id));
        }
        check_unit_range(self.rating, 4.0, 5.0, "rider rating")?;
        if self.total_rides < 0 {
            return Err("total_rides must be non-negative".to_string());
        }
        check_non_negative(self.wallet_balance, "wallet_balance")
    }
}
