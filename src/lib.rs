pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Construir el router completo de la API con el estado dado
pub fn create_app(state: AppState) -> Router {
    // En producción el CORS se restringe a los orígenes configurados;
    // en desarrollo se permite todo
    let cors = if state.config.is_production() {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/cars", routes::car_routes::create_car_router())
        .nest("/api/bookings", routes::booking_routes::create_booking_router())
        .nest("/api/contracts", routes::contract_routes::create_contract_router())
        .nest("/api/payments", routes::payment_routes::create_payment_router())
        .layer(cors)
        .with_state(state)
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "car-rental-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
