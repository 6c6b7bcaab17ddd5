//! Modelo de Car
//!
//! Este módulo contiene el struct Car de la flota y su enum de estado.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del coche - mapea al ENUM car_status
///
/// El estado lo fija el administrador; no se deriva automáticamente de las
/// reservas activas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "car_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
}

/// Car principal - mapea exactamente a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub fuel_type: String,
    pub transmission: String,
    pub seats: i32,
    pub daily_rate: Decimal,
    pub weekly_rate: Option<Decimal>,
    pub monthly_rate: Option<Decimal>,
    pub location: String,
    pub status: CarStatus,
    pub features: Option<sqlx::types::Json<Vec<String>>>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Un coche solo es reservable mientras su estado sea `available`
    pub fn is_bookable(&self) -> bool {
        self.status == CarStatus::Available
    }
}
