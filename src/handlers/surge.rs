use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::entities::surge_zone;
use crate::error::{AppError, AppResult};
use crate::services::metrics::{self, DemandSupplyPoint};
use crate::services::queries;
use crate::utils::fare::surge_alert;
use crate::AppState;

/// List all surge zones
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<Vec<surge_zone::Model>>> {
    Ok(Json(queries::all_surge_zones(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SurgeAlert {
    pub zone_id: String,
    pub zone_name: String,
    pub current_surge: f64,
    pub active_requests: i32,
    pub available_drivers: i32,
    pub message: String,
}

impl From<&surge_zone::Model> for SurgeAlert {
    fn from(z: &surge_zone::Model) -> Self {
        Self {
            zone_id: z.zone_id.clone(),
            zone_name: z.zone_name.clone(),
            current_surge: z.current_surge,
            active_requests: z.active_requests,
            available_drivers: z.available_drivers,
            message: format!(
                "{}: {}x | {} requests | {} drivers",
                z.zone_name, z.current_surge, z.active_requests, z.available_drivers
            ),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SurgeAlertsResponse {
    pub threshold: f64,
    pub count: usize,
    pub zones: Vec<SurgeAlert>,
}

/// Zones above the surge threshold, in zone order
pub async fn alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> AppResult<Json<SurgeAlertsResponse>> {
    let threshold = query.threshold.unwrap_or(state.config.surge_alert_threshold);
    if !threshold.is_finite() {
        return Err(AppError::Validation("Threshold must be a number".to_string()));
    }

    let zones = queries::all_surge_zones(&state.db).await?;
    let alerts: Vec<SurgeAlert> = surge_alert(&zones, threshold)
        .into_iter()
        .map(SurgeAlert::from)
        .collect();

    Ok(Json(SurgeAlertsResponse {
        threshold,
        count: alerts.len(),
        zones: alerts,
    }))
}

pub async fn demand_vs_supply(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DemandSupplyPoint>>> {
    let zones = queries::all_surge_zones(&state.db).await?;
    Ok(Json(metrics::demand_vs_supply(&zones)))
}
