//! Identidad del solicitante
//!
//! La autenticación real (registro, login, sesiones) vive en el proveedor
//! de identidad externo; aquí solo modelamos lo que llega en el JWT.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rol del usuario autenticado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
}

/// Usuario autenticado, inyectado como extensión del request
/// por el middleware de autenticación.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
