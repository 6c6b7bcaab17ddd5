use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{CarFilters, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::common::ApiResponse;
use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// El catálogo es público; las mutaciones exigen el extractor `AuthUser`
/// (y rol admin, verificado en el controller).
pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", get(get_car).put(update_car).delete(delete_car))
}

async fn create_car(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateCarRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.create(user, request).await?;
    Ok(Json(response))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_cars(
    State(state): State<AppState>,
    Query(filters): Query<CarFilters>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn update_car(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.update(user, id, request).await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CarController::new(state.pool.clone());
    controller.delete(user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Car removed from fleet"
    })))
}
