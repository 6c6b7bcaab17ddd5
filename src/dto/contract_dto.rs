//! DTOs de contratos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::contract::{Contract, ContractStatus, ContractTerms};

/// Request para firmar un contrato.
///
/// `signature_data` es la firma capturada en el cliente (data-URL base64);
/// nunca puede estar vacía.
#[derive(Debug, Deserialize, Validate)]
pub struct SignContractRequest {
    #[validate(length(min = 1))]
    pub signature_data: String,
}

/// Response de contrato para la API
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub id: String,
    pub booking_id: String,
    pub terms: ContractTerms,
    pub status: ContractStatus,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Contract> for ContractResponse {
    fn from(contract: Contract) -> Self {
        Self {
            id: contract.id.to_string(),
            booking_id: contract.booking_id.to_string(),
            terms: contract.terms.0,
            status: contract.status,
            signed_at: contract.signed_at,
            created_at: contract.created_at,
        }
    }
}
