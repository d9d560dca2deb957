#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::Value;
use tower::ServiceExt;

use ride_sharing_backend::entities::driver::{self, DriverStatus};
use ride_sharing_backend::{db, routes, AppState, Config};

/// Fresh in-memory database with the schema applied.
pub async fn setup() -> AppState {
    let config = Config::for_database("sqlite::memory:");
    let db = db::connect(&config).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    AppState { db, config }
}

pub fn app(state: &AppState) -> Router {
    routes::create_router(state.clone())
}

pub async fn set_all_driver_status(db: &DatabaseConnection, status: DriverStatus) {
    driver::Entity::update_many()
        .col_expr(driver::Column::Status, Expr::value(status))
        .exec(db)
        .await
        .expect("update drivers");
}

pub async fn set_driver_status(db: &DatabaseConnection, driver_id: &str, status: DriverStatus) {
    driver::Entity::update_many()
        .col_expr(driver::Column::Status, Expr::value(status))
        .filter(driver::Column::DriverId.eq(driver_id))
        .exec(db)
        .await
        .expect("update driver");
}

/// Send one request through the router. Requests carry a peer address so
/// the per-IP governors can key them.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let mut request = builder.body(body).expect("build request");
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
