use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, analytics, dashboard, drivers, health, rides, surge};
use crate::middleware::rate_limit::create_seed_governor;
use crate::AppState;

/// API routes. The seed route is rate-limited per peer IP, so requests to it
/// need `ConnectInfo<SocketAddr>`.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/seed", post(admin::seed))
        .layer(create_seed_governor());

    let dashboard_routes = Router::new()
        .route("/metrics", get(dashboard::metrics))
        .route("/overview", get(dashboard::overview));

    let ride_routes = Router::new()
        .route("/", get(rides::list_rides).post(rides::create_ride))
        .route("/locations", get(rides::ride_locations));

    let driver_routes = Router::new()
        .route("/", get(drivers::list_drivers))
        .route("/top", get(drivers::top_drivers))
        .route("/ratings", get(drivers::rating_histogram));

    let surge_routes = Router::new()
        .route("/", get(surge::list_zones))
        .route("/alerts", get(surge::alerts))
        .route("/demand", get(surge::demand_vs_supply));

    let analytics_routes = Router::new()
        .route("/trips", get(analytics::trip_efficiency))
        .route("/revenue", get(analytics::revenue_analysis))
        .route("/ratings", get(analytics::rating_analysis));

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/riders", get(drivers::list_riders))
        .route("/api/vehicles", get(drivers::list_vehicles))
        .nest("/api/admin", admin_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/rides", ride_routes)
        .nest("/api/drivers", driver_routes)
        .nest("/api/surge", surge_routes)
        .nest("/api/analytics", analytics_routes)
        .with_state(state)
}
