//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking, sus enums de estado y los helpers
//! de la progresión lineal pending → confirmed → active → completed.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// `completed` y `cancelled` son terminales
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

/// Estado de pago de la reserva - mapea al ENUM booking_payment_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingPaymentStatus {
    Pending,
    Paid,
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: NaiveTime,
    pub dropoff_time: NaiveTime,
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

impl Booking {
    /// Instante de recogida (fecha de inicio + hora de recogida, en UTC)
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start_date.and_time(self.pickup_time).and_utc()
    }

    /// Regla de cancelación: `pending` siempre se puede cancelar;
    /// `confirmed` solo si faltan más de 24 horas para la recogida.
    pub fn is_cancellable_at(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            BookingStatus::Pending => true,
            BookingStatus::Confirmed => self.starts_at() - now > Duration::hours(24),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn booking_with(status: BookingStatus, starts_in: Duration) -> Booking {
        let now = Utc::now();
        let starts_at = now + starts_in;
        Booking {
            id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            start_date: starts_at.date_naive(),
            end_date: starts_at.date_naive() + Duration::days(3),
            pickup_location: "Accra".to_string(),
            dropoff_location: "Accra".to_string(),
            pickup_time: starts_at.time(),
            dropoff_time: starts_at.time(),
            total_days: 3,
            daily_rate: dec!(100),
            subtotal: dec!(300.00),
            insurance_fee: dec!(30.00),
            tax_amount: dec!(41.25),
            total_amount: dec!(371.25),
            special_requests: None,
            status,
            payment_status: BookingPaymentStatus::Pending,
            created_at: now,
        }
    }

    #[test]
    fn test_pending_booking_is_always_cancellable() {
        let booking = booking_with(BookingStatus::Pending, Duration::hours(2));
        assert!(booking.is_cancellable_at(Utc::now()));
    }

    #[test]
    fn test_confirmed_booking_inside_24h_window_is_not_cancellable() {
        let booking = booking_with(BookingStatus::Confirmed, Duration::hours(2));
        assert!(!booking.is_cancellable_at(Utc::now()));
    }

    #[test]
    fn test_confirmed_booking_outside_24h_window_is_cancellable() {
        let booking = booking_with(BookingStatus::Confirmed, Duration::hours(48));
        assert!(booking.is_cancellable_at(Utc::now()));
    }

    #[test]
    fn test_terminal_and_active_bookings_are_not_cancellable() {
        for status in [
            BookingStatus::Active,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let booking = booking_with(status, Duration::days(10));
            assert!(!booking.is_cancellable_at(Utc::now()), "{:?}", status);
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(!BookingStatus::Active.is_terminal());
    }
}
