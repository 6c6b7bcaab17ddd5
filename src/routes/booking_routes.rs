use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingResponse, CreateBookingRequest, QuoteRequest, QuoteResponse,
    UpdateBookingStatusRequest,
};
use crate::dto::common::ApiResponse;
use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// La cotización es pública (el cliente la muestra antes del login); todo lo
/// demás exige el extractor `AuthUser`.
pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking).get(list_bookings))
        .route("/quote", post(quote_booking))
        .route("/:id", get(get_booking))
        .route("/:id/cancel", post(cancel_booking))
        .route("/:id/status", put(update_booking_status))
}

async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(user, request).await?;
    Ok(Json(response))
}

async fn quote_booking(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.quote(request).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.get_by_id(user, id).await?;
    Ok(Json(response))
}

async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list(user).await?;
    Ok(Json(response))
}

async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.cancel(user, id).await?;
    Ok(Json(response))
}

async fn update_booking_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.update_status(user, id, request).await?;
    Ok(Json(response))
}
