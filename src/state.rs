//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::payment_gateway::PaymentGateway;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub payment_gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        payment_gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            pool,
            config,
            payment_gateway,
        }
    }
}
