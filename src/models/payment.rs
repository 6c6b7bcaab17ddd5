//! Modelo de Payment
//!
//! Registro append-only de intentos de pago. El estado autoritativo
//! pagado/no-pagado vive en la reserva, no aquí.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Resultado de un intento de pago - mapea al ENUM payment_record_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_record_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentRecordStatus {
    Completed,
    Failed,
}

/// Método de pago - mapea al ENUM payment_method
///
/// `cash` se liquida en la recogida: la reserva queda confirmada pero
/// con payment_status pendiente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MobileMoney,
    BankTransfer,
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

/// Payment principal - mapea exactamente a la tabla payments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub provider: String,
    pub transaction_reference: String,
    pub status: PaymentRecordStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
