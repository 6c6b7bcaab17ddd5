//! Repositorio de pagos
//!
//! Tabla append-only: cada intento (exitoso o fallido) queda registrado y
//! nunca se modifica. Una reserva puede acumular varios intentos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::payment::{Payment, PaymentMethod, PaymentRecordStatus};
use crate::utils::errors::AppError;

/// Campos de un intento de pago a registrar
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub provider: String,
    pub transaction_reference: String,
    pub status: PaymentRecordStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new_payment: NewPayment) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, booking_id, amount, method, provider,
                                  transaction_reference, status, paid_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_payment.booking_id)
        .bind(new_payment.amount)
        .bind(new_payment.method)
        .bind(new_payment.provider)
        .bind(new_payment.transaction_reference)
        .bind(new_payment.status)
        .bind(new_payment.paid_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Historial de pagos del usuario, vía sus reservas (más recientes primero)
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT p.* FROM payments p
            JOIN bookings b ON b.id = p.booking_id
            WHERE b.user_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn find_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_id = $1 ORDER BY created_at DESC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
