//! Extracción de identidad
//!
//! Valida el JWT emitido por el proveedor de identidad externo y materializa
//! el `AuthUser` (id + rol) como extractor de axum: los handlers que lo
//! declaran exigen autenticación, los que no, son públicos.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::models::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token};

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.config)?;

        Ok(AuthUser {
            id: claims.user_id()?,
            role: claims.role,
        })
    }
}
