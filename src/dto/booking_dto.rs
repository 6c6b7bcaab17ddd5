//! DTOs de reservas
//!
//! Las fechas llegan como strings ISO (`YYYY-MM-DD`) y las horas en formato
//! 24h (`HH:MM`); se convierten con los helpers de `utils::validation`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{Booking, BookingPaymentStatus, BookingStatus};
use crate::services::pricing::RentalQuote;

/// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub car_id: Uuid,

    #[validate(length(min = 10, max = 10))]
    pub start_date: String,

    #[validate(length(min = 10, max = 10))]
    pub end_date: String,

    #[validate(length(min = 2, max = 200))]
    pub pickup_location: String,

    #[validate(length(min = 2, max = 200))]
    pub dropoff_location: String,

    #[validate(length(min = 5, max = 5))]
    pub pickup_time: String,

    #[validate(length(min = 5, max = 5))]
    pub dropoff_time: String,

    #[validate(length(max = 1000))]
    pub special_requests: Option<String>,
}

/// Request para cotizar un rango de fechas sin crear la reserva
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    pub car_id: Uuid,

    #[validate(length(min = 10, max = 10))]
    pub start_date: String,

    #[validate(length(min = 10, max = 10))]
    pub end_date: String,
}

/// Request de admin para forzar el estado operativo de una reserva
/// (recogida → active, devolución → completed)
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// Desglose de precios devuelto por la cotización
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// Si el coche está libre para el rango pedido en este instante
    /// (informativo: la reserva vuelve a chequearlo de forma atómica)
    pub available: bool,
    pub total_days: i32,
    pub effective_daily_rate: Decimal,
    pub subtotal: Decimal,
    pub insurance_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl QuoteResponse {
    pub fn from_quote(quote: RentalQuote, available: bool) -> Self {
        Self {
            available,
            total_days: quote.total_days,
            effective_daily_rate: quote.effective_daily_rate,
            subtotal: quote.subtotal,
            insurance_fee: quote.insurance_fee,
            tax_amount: quote.tax_amount,
            total_amount: quote.total_amount,
        }
    }
}

/// Response de reserva para la API
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub car_id: String,
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: String,
    pub dropoff_time: String,
    pub total_days: i32,
    pub daily_rate: Decimal,
    pub subtotal: Decimal,
    pub insurance_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub payment_status: BookingPaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            car_id: booking.car_id.to_string(),
            user_id: booking.user_id.to_string(),
            start_date: booking.start_date.format("%Y-%m-%d").to_string(),
            end_date: booking.end_date.format("%Y-%m-%d").to_string(),
            pickup_location: booking.pickup_location,
            dropoff_location: booking.dropoff_location,
            pickup_time: booking.pickup_time.format("%H:%M").to_string(),
            dropoff_time: booking.dropoff_time.format("%H:%M").to_string(),
            total_days: booking.total_days,
            daily_rate: booking.daily_rate,
            subtotal: booking.subtotal,
            insurance_fee: booking.insurance_fee,
            tax_amount: booking.tax_amount,
            total_amount: booking.total_amount,
            special_requests: booking.special_requests,
            status: booking.status,
            payment_status: booking.payment_status,
            created_at: booking.created_at,
        }
    }
}
