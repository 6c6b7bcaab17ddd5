//! Repositorio de contratos
//!
//! La relación contrato-reserva es 1:1 (UNIQUE sobre booking_id). La
//! generación es idempotente: `INSERT ... ON CONFLICT DO NOTHING` seguido
//! de re-select, de modo que dos generaciones concurrentes devuelven la
//! misma fila.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::contract::{Contract, ContractTerms};
use crate::utils::errors::AppError;

pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contract)
    }

    pub async fn find_by_booking(&self, booking_id: Uuid) -> Result<Option<Contract>, AppError> {
        let contract =
            sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE booking_id = $1")
                .bind(booking_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(contract)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Contract>, AppError> {
        let contracts = sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(contracts)
    }

    /// Crear el contrato de una reserva si aún no existe y devolverlo.
    ///
    /// Si ya existe (incluida la carrera entre dos generaciones
    /// concurrentes) devuelve el existente sin modificarlo: los términos se
    /// congelan en la primera generación.
    pub async fn get_or_create(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        terms: ContractTerms,
    ) -> Result<Contract, AppError> {
        sqlx::query(
            r#"
            INSERT INTO contracts (id, booking_id, user_id, terms, status, created_at)
            VALUES ($1, $2, $3, $4, 'pending', $5)
            ON CONFLICT (booking_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(user_id)
        .bind(sqlx::types::Json(terms))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.find_by_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::Internal("Contract vanished after upsert".to_string()))
    }

    /// Marcar el contrato como firmado. Solo transiciona desde `pending`;
    /// devuelve `None` si ya estaba firmado (la firma es irreversible).
    pub async fn sign(
        &self,
        id: Uuid,
        signature_data: String,
        signed_at: DateTime<Utc>,
    ) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts
            SET status = 'signed', signature_data = $2, signed_at = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(signature_data)
        .bind(signed_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }
}
