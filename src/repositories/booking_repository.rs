//! Repositorio de reservas
//!
//! La disponibilidad se hace cumplir con una escritura condicional atómica:
//! el INSERT solo materializa la fila si no existe ningún solape con una
//! reserva en estado activo, en una única sentencia. La constraint de
//! exclusión del schema respalda el invariante frente a escritores
//! concurrentes; una violación se reporta como el mismo conflicto.

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingPaymentStatus, BookingStatus};
use crate::utils::errors::AppError;

/// Código SQLSTATE de exclusion_violation
const EXCLUSION_VIOLATION: &str = "23P01";

/// Campos de una reserva nueva, con el desglose de precios ya calculado
#[derive(Debug, Clone)]
pub struct NewBooking {
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
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar la reserva solo si el calendario del coche está libre.
    ///
    /// Devuelve `None` cuando existe un solape (chequeo inclusivo
    /// `existing.start <= new.end AND existing.end >= new.start` contra los
    /// estados pending/confirmed/active) o cuando un escritor concurrente
    /// dispara la constraint de exclusión.
    pub async fn insert_if_available(
        &self,
        new_booking: NewBooking,
    ) -> Result<Option<Booking>, AppError> {
        let result = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, car_id, user_id, start_date, end_date,
                                  pickup_location, dropoff_location, pickup_time, dropoff_time,
                                  total_days, daily_rate, subtotal, insurance_fee, tax_amount,
                                  total_amount, special_requests, status, payment_status, created_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                   'pending', 'pending', $17
            WHERE NOT EXISTS (
                SELECT 1 FROM bookings
                WHERE car_id = $2
                  AND status IN ('pending', 'confirmed', 'active')
                  AND start_date <= $5
                  AND end_date >= $4
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_booking.car_id)
        .bind(new_booking.user_id)
        .bind(new_booking.start_date)
        .bind(new_booking.end_date)
        .bind(new_booking.pickup_location)
        .bind(new_booking.dropoff_location)
        .bind(new_booking.pickup_time)
        .bind(new_booking.dropoff_time)
        .bind(new_booking.total_days)
        .bind(new_booking.daily_rate)
        .bind(new_booking.subtotal)
        .bind(new_booking.insurance_fee)
        .bind(new_booking.tax_amount)
        .bind(new_booking.total_amount)
        .bind(new_booking.special_requests)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(booking) => Ok(booking),
            Err(e) => {
                if is_exclusion_violation(&e) {
                    // Un escritor concurrente ganó la carrera por estas fechas
                    return Ok(None);
                }
                Err(e.into())
            }
        }
    }

    /// Reservas que solapan con el rango propuesto (chequeo inclusivo),
    /// limitadas a los estados que bloquean el calendario
    pub async fn find_overlapping(
        &self,
        car_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE car_id = $1
              AND status IN ('pending', 'confirmed', 'active')
              AND start_date <= $3
              AND end_date >= $2
            ORDER BY start_date
            "#,
        )
        .bind(car_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    /// Actualizar status y/o payment_status; los campos en `None` no se tocan
    pub async fn update_status(
        &self,
        id: Uuid,
        status: Option<BookingStatus>,
        payment_status: Option<BookingPaymentStatus>,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = COALESCE($2, status),
                payment_status = COALESCE($3, payment_status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        Ok(booking)
    }
}

fn is_exclusion_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == EXCLUSION_VIOLATION)
        .unwrap_or(false)
}
