use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::payment_controller::PaymentController;
use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{PaymentResponse, ProcessPaymentRequest};
use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(process_payment))
        .route("/history", get(payment_history))
}

async fn process_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, AppError> {
    let controller = PaymentController::new(state.pool.clone(), state.payment_gateway.clone());
    let response = controller.process(user, request).await?;
    Ok(Json(response))
}

async fn payment_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let controller = PaymentController::new(state.pool.clone(), state.payment_gateway.clone());
    let response = controller.history(user).await?;
    Ok(Json(response))
}
