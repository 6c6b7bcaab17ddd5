//! Controller de pagos
//!
//! Procesa intentos de pago contra el gateway (simulado) y mantiene el
//! estado autoritativo pagado/no-pagado en la reserva. Cada intento,
//! exitoso o fallido, queda en el log append-only de payments.

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{PaymentResponse, ProcessPaymentRequest};
use crate::models::auth::AuthUser;
use crate::models::booking::{Booking, BookingPaymentStatus, BookingStatus};
use crate::models::payment::PaymentRecordStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::payment_repository::{NewPayment, PaymentRepository};
use crate::services::payment_gateway::{ChargeOutcome, ChargeRequest, PaymentGateway};
use crate::utils::errors::{validation_error, AppError};

pub struct PaymentController {
    payments: PaymentRepository,
    bookings: BookingRepository,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentController {
    pub fn new(pool: PgPool, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
            gateway,
        }
    }

    pub async fn process(
        &self,
        user: AuthUser,
        request: ProcessPaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, AppError> {
        request.validate()?;

        let booking = self.owned_booking(user, request.booking_id).await?;

        if booking.payment_status == BookingPaymentStatus::Paid {
            return Err(AppError::Conflict("Payment already completed".to_string()));
        }

        // El monto reclamado debe coincidir exactamente con el total almacenado
        if request.amount != booking.total_amount {
            return Err(validation_error("amount", "Payment amount mismatch"));
        }

        let outcome = self
            .gateway
            .charge(&ChargeRequest {
                amount: request.amount,
                method: request.method,
                provider: request.provider.clone(),
                transaction_reference: request.transaction_reference.clone(),
            })
            .await;

        if outcome == ChargeOutcome::Declined {
            // El intento fallido también se registra: la pista de auditoría
            // es append-only y la reserva queda sin tocar
            self.payments
                .insert(NewPayment {
                    booking_id: booking.id,
                    amount: request.amount,
                    method: request.method,
                    provider: request.provider,
                    transaction_reference: request.transaction_reference,
                    status: PaymentRecordStatus::Failed,
                    paid_at: None,
                })
                .await?;

            return Err(AppError::PaymentDeclined(
                "Payment failed. Please try again.".to_string(),
            ));
        }

        let payment = self
            .payments
            .insert(NewPayment {
                booking_id: booking.id,
                amount: request.amount,
                method: request.method,
                provider: request.provider,
                transaction_reference: request.transaction_reference,
                status: PaymentRecordStatus::Completed,
                paid_at: Some(Utc::now()),
            })
            .await?;

        // La reserva se confirma siempre; `cash` se liquida en la recogida,
        // así que su payment_status sigue pendiente
        let payment_status = if request.method.is_cash() {
            None
        } else {
            Some(BookingPaymentStatus::Paid)
        };

        self.bookings
            .update_status(booking.id, Some(BookingStatus::Confirmed), payment_status)
            .await?;

        tracing::info!(
            "💰 Pago {} registrado para la reserva {} via {:?}",
            payment.id,
            booking.id,
            payment.method
        );

        Ok(ApiResponse::success_with_message(
            payment.into(),
            "Payment completed".to_string(),
        ))
    }

    /// Historial de pagos del solicitante (todos los intentos, también los
    /// fallidos)
    pub async fn history(&self, user: AuthUser) -> Result<Vec<PaymentResponse>, AppError> {
        let payments = self.payments.find_by_user(user.id).await?;
        Ok(payments.into_iter().map(PaymentResponse::from).collect())
    }

    async fn owned_booking(&self, user: AuthUser, booking_id: Uuid) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != user.id && !user.is_admin() {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        Ok(booking)
    }
}
