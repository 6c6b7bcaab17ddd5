//! Controller de contratos
//!
//! Generación idempotente (1:1 con la reserva) y firma irreversible con el
//! efecto lateral de confirmar la reserva padre.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::contract_dto::{ContractResponse, SignContractRequest};
use crate::models::auth::AuthUser;
use crate::models::booking::BookingStatus;
use crate::models::contract::{Contract, ContractStatus, ContractTerms};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::contract_repository::ContractRepository;
use crate::utils::errors::{validation_error, AppError};

pub struct ContractController {
    contracts: ContractRepository,
    bookings: BookingRepository,
}

impl ContractController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            contracts: ContractRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
        }
    }

    /// Generar el contrato de una reserva. Idempotente: si ya existe se
    /// devuelve sin cambios, con los términos congelados de la primera
    /// generación.
    pub async fn generate(
        &self,
        user: AuthUser,
        booking_id: Uuid,
    ) -> Result<ApiResponse<ContractResponse>, AppError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != user.id && !user.is_admin() {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        let terms = ContractTerms::from_booking(&booking);
        let contract = self
            .contracts
            .get_or_create(booking.id, booking.user_id, terms)
            .await?;

        Ok(ApiResponse::success(contract.into()))
    }

    pub async fn get_by_id(&self, user: AuthUser, id: Uuid) -> Result<ContractResponse, AppError> {
        let contract = self.owned_contract(user, id).await?;
        Ok(contract.into())
    }

    pub async fn list(&self, user: AuthUser) -> Result<Vec<ContractResponse>, AppError> {
        let contracts = self.contracts.find_by_user(user.id).await?;
        Ok(contracts.into_iter().map(ContractResponse::from).collect())
    }

    /// Firmar el contrato. La transición pending → signed es terminal; como
    /// efecto lateral la reserva padre pasa a `confirmed`.
    pub async fn sign(
        &self,
        user: AuthUser,
        id: Uuid,
        request: SignContractRequest,
    ) -> Result<ApiResponse<ContractResponse>, AppError> {
        request.validate()?;
        validate_signature_payload(&request.signature_data)?;

        let contract = self.owned_contract(user, id).await?;

        if contract.status == ContractStatus::Signed {
            return Err(AppError::Conflict("Contract is already signed".to_string()));
        }

        let signed = self
            .contracts
            .sign(contract.id, request.signature_data, Utc::now())
            .await?
            // Otro request firmó entre la lectura y el UPDATE condicional
            .ok_or_else(|| AppError::Conflict("Contract is already signed".to_string()))?;

        self.bookings
            .update_status(signed.booking_id, Some(BookingStatus::Confirmed), None)
            .await?;

        tracing::info!(
            "✍️  Contrato {} firmado; reserva {} confirmada",
            signed.id,
            signed.booking_id
        );

        Ok(ApiResponse::success_with_message(
            signed.into(),
            "Contract signed".to_string(),
        ))
    }

    async fn owned_contract(&self, user: AuthUser, id: Uuid) -> Result<Contract, AppError> {
        let contract = self
            .contracts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;

        if contract.user_id != user.id && !user.is_admin() {
            return Err(AppError::NotFound("Contract not found".to_string()));
        }

        Ok(contract)
    }
}

/// La firma llega como data-URL (`data:image/png;base64,...`) o base64 a
/// secas; nunca puede estar vacía y el payload debe decodificar.
fn validate_signature_payload(signature_data: &str) -> Result<(), AppError> {
    let trimmed = signature_data.trim();
    if trimmed.is_empty() {
        return Err(validation_error("signature_data", "Signature is required"));
    }

    let payload = trimmed
        .split_once("base64,")
        .map(|(_, payload)| payload)
        .unwrap_or(trimmed);

    BASE64
        .decode(payload)
        .map_err(|_| validation_error("signature_data", "Signature payload is not valid base64"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_payload_accepts_data_url() {
        let signature = format!("data:image/png;base64,{}", BASE64.encode(b"trazo"));
        assert!(validate_signature_payload(&signature).is_ok());
    }

    #[test]
    fn test_signature_payload_accepts_plain_base64() {
        assert!(validate_signature_payload(&BASE64.encode(b"trazo")).is_ok());
    }

    #[test]
    fn test_signature_payload_rejects_empty_and_garbage() {
        assert!(validate_signature_payload("").is_err());
        assert!(validate_signature_payload("   ").is_err());
        assert!(validate_signature_payload("data:image/png;base64,%%%%").is_err());
    }
}
