use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::contract_controller::ContractController;
use crate::dto::common::ApiResponse;
use crate::dto::contract_dto::{ContractResponse, SignContractRequest};
use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contract_router() -> Router<AppState> {
    Router::new()
        .route("/booking/:booking_id", post(generate_contract))
        .route("/", get(list_contracts))
        .route("/:id", get(get_contract))
        .route("/:id/sign", post(sign_contract))
}

async fn generate_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.generate(user, booking_id).await?;
    Ok(Json(response))
}

async fn get_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractResponse>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.get_by_id(user, id).await?;
    Ok(Json(response))
}

async fn list_contracts(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ContractResponse>>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.list(user).await?;
    Ok(Json(response))
}

async fn sign_contract(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SignContractRequest>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.sign(user, id, request).await?;
    Ok(Json(response))
}
