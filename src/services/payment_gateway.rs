//! Gateway de pagos simulado
//!
//! El procesador externo todavía no existe; este módulo lo simula detrás de
//! un trait para que el resultado aleatorio sea inyectable en tests y el
//! reemplazo por una integración real no toque a los controllers.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::models::payment::PaymentMethod;

/// Resultado de un cobro contra el proveedor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeOutcome {
    Approved,
    Declined,
}

/// Solicitud de cobro que el controller arma desde la reserva
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub provider: String,
    pub transaction_reference: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> ChargeOutcome;
}

/// Implementación simulada: demora fija y éxito con probabilidad 0.9.
///
/// La tasa de éxito replica el placeholder original
/// (`Math.random() > 0.1`); la demora es configurable para no penalizar
/// los entornos de desarrollo.
pub struct SimulatedGateway {
    delay: Duration,
    success_rate: f64,
}

impl SimulatedGateway {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            success_rate: 0.9,
        }
    }

    pub fn with_success_rate(mut self, success_rate: f64) -> Self {
        self.success_rate = success_rate.clamp(0.0, 1.0);
        self
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &ChargeRequest) -> ChargeOutcome {
        tokio::time::sleep(self.delay).await;

        let draw: f64 = rand::thread_rng().gen();
        let outcome = if draw < self.success_rate {
            ChargeOutcome::Approved
        } else {
            ChargeOutcome::Declined
        };

        tracing::info!(
            "💳 Cobro simulado {:?} por {} via {:?} ({})",
            outcome,
            request.amount,
            request.method,
            request.transaction_reference
        );

        outcome
    }
}

/// Gateway determinista para tests: siempre devuelve el resultado fijado
pub struct FixedGateway {
    outcome: ChargeOutcome,
}

impl FixedGateway {
    pub fn approving() -> Self {
        Self {
            outcome: ChargeOutcome::Approved,
        }
    }

    pub fn declining() -> Self {
        Self {
            outcome: ChargeOutcome::Declined,
        }
    }
}

#[async_trait]
impl PaymentGateway for FixedGateway {
    async fn charge(&self, _request: &ChargeRequest) -> ChargeOutcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> ChargeRequest {
        ChargeRequest {
            amount: dec!(371.25),
            method: PaymentMethod::MobileMoney,
            provider: "MTN".to_string(),
            transaction_reference: "TXN-0001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fixed_gateway_is_deterministic() {
        assert_eq!(
            FixedGateway::approving().charge(&request()).await,
            ChargeOutcome::Approved
        );
        assert_eq!(
            FixedGateway::declining().charge(&request()).await,
            ChargeOutcome::Declined
        );
    }

    #[tokio::test]
    async fn test_simulated_gateway_honors_delay() {
        let gateway = SimulatedGateway::new(10);
        let started = std::time::Instant::now();
        let _ = gateway.charge(&request()).await;
        assert!(started.elapsed() >= Duration::from_millis(10));
    }
}
