//! DTOs de pagos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::payment::{Payment, PaymentMethod, PaymentRecordStatus};

/// Request para procesar el pago de una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct ProcessPaymentRequest {
    pub booking_id: Uuid,

    /// Debe coincidir exactamente con el total_amount almacenado
    pub amount: Decimal,

    pub method: PaymentMethod,

    #[validate(length(min = 2, max = 50))]
    pub provider: String,

    #[validate(length(min = 5, max = 100))]
    pub transaction_reference: String,
}

/// Response de un intento de pago
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub booking_id: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub provider: String,
    pub transaction_reference: String,
    pub status: PaymentRecordStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            booking_id: payment.booking_id.to_string(),
            amount: payment.amount,
            method: payment.method,
            provider: payment.provider,
            transaction_reference: payment.transaction_reference,
            status: payment.status,
            paid_at: payment.paid_at,
            created_at: payment.created_at,
        }
    }
}
