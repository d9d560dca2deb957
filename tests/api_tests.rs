//! End-to-end checks through the axum router.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use ride_sharing_backend::entities::driver::DriverStatus;

#[tokio::test]
async fn test_health_reports_connected() {
    let state = common::setup().await;
    let app = common::app(&state);

    let (status, body) = common::send(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "connected");
}

#[tokio::test]
async fn test_metrics_on_empty_store_are_zero() {
    let state = common::setup().await;
    let app = common::app(&state);

    let (status, body) = common::send(&app, "GET", "/api/dashboard/metrics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_rides"], 0);
    assert_eq!(body["active_drivers"], 0);
    assert_eq!(body["total_revenue"], 0.0);
    assert_eq!(body["avg_rating"], 0.0);
}

#[tokio::test]
async fn test_empty_collections_list_as_empty_arrays() {
    let state = common::setup().await;
    let app = common::app(&state);

    for uri in ["/api/rides", "/api/drivers", "/api/riders", "/api/vehicles", "/api/surge"] {
        let (status, body) = common::send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}

#[tokio::test]
async fn test_seed_then_read_back() {
    let state = common::setup().await;
    let app = common::app(&state);

    let (status, summary) =
        common::send(&app, "POST", "/api/admin/seed?rng_seed=7&rides=20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["drivers"], 12);
    assert_eq!(summary["rides"], 20);

    let (_, rides) = common::send(&app, "GET", "/api/rides", None).await;
    let rides = rides.as_array().expect("ride list");
    assert_eq!(rides.len(), 20);
    assert!(rides[0]["pickup_location"]["address"].is_string());

    let (_, metrics) = common::send(&app, "GET", "/api/dashboard/metrics", None).await;
    assert_eq!(metrics["total_rides"], 20);

    let (_, top) = common::send(&app, "GET", "/api/drivers/top?limit=3", None).await;
    let top = top.as_array().expect("top drivers");
    assert_eq!(top.len(), 3);
    let earnings: Vec<f64> = top
        .iter()
        .map(|d| d["earnings_today"].as_f64().unwrap())
        .collect();
    assert!(earnings.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_surge_alerts_only_above_threshold() {
    let state = common::setup().await;
    let app = common::app(&state);
    common::send(&app, "POST", "/api/admin/seed?rng_seed=3&zones=40", None).await;

    let (status, body) = common::send(&app, "GET", "/api/surge/alerts", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["threshold"], 2.0);
    let zones = body["zones"].as_array().expect("alert zones");
    assert_eq!(body["count"], zones.len());
    for zone in zones {
        assert!(zone["current_surge"].as_f64().unwrap() > 2.0);
        assert!(zone["message"].as_str().unwrap().contains("x | "));
    }
}

#[tokio::test]
async fn test_unknown_status_filter_is_rejected() {
    let state = common::setup().await;
    let app = common::app(&state);

    let (status, body) = common::send(&app, "GET", "/api/rides?status=teleported", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_ride_endpoint() {
    let state = common::setup().await;
    let app = common::app(&state);
    common::send(&app, "POST", "/api/admin/seed?rng_seed=5", None).await;
    common::set_driver_status(&state.db, "DRV001", DriverStatus::Available).await;

    let payload = json!({
        "rider_id": "RDR001",
        "driver_id": "DRV001",
        "pickup_location": { "address": "123 Main St", "lat": 40.7128, "lng": -74.0060 },
        "dropoff_location": { "address": "456 Broadway", "lat": 40.7589, "lng": -73.9851 },
        "distance_km": 5.0
    });
    let (status, body) = common::send(&app, "POST", "/api/rides", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ride_id"], "RIDE0016");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment_status"], "pending");
    assert_eq!(body["surge_multiplier"], 1.0);
    assert_eq!(body["total_fare"], 10.5);
    assert!(body["start_time"].is_null());
    assert!(body["rating"].is_null());
}

#[tokio::test]
async fn test_create_ride_without_drivers_is_rejected() {
    let state = common::setup().await;
    let app = common::app(&state);

    let payload = json!({
        "rider_id": "RDR001",
        "driver_id": "DRV001",
        "pickup_location": { "address": "123 Main St", "lat": 40.7128, "lng": -74.0060 },
        "dropoff_location": { "address": "456 Broadway", "lat": 40.7589, "lng": -73.9851 },
        "distance_km": 5.0
    });
    let (status, body) = common::send(&app, "POST", "/api/rides", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
