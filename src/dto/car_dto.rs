//! DTOs de la flota

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::car::{Car, CarStatus};

/// Request para dar de alta un coche en la flota (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1990, max = 2030))]
    pub year: i32,

    #[validate(length(min = 2, max = 50))]
    pub color: String,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: String,

    #[validate(length(min = 2, max = 20))]
    pub transmission: String,

    #[validate(range(min = 2, max = 9))]
    pub seats: i32,

    pub daily_rate: Decimal,
    pub weekly_rate: Option<Decimal>,
    pub monthly_rate: Option<Decimal>,

    #[validate(length(min = 2, max = 100))]
    pub location: String,

    pub features: Option<Vec<String>>,
    pub image_url: Option<String>,
}

/// Request para actualizar un coche existente (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1990, max = 2030))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub transmission: Option<String>,

    #[validate(range(min = 2, max = 9))]
    pub seats: Option<i32>,

    pub daily_rate: Option<Decimal>,
    pub weekly_rate: Option<Decimal>,
    pub monthly_rate: Option<Decimal>,

    #[validate(length(min = 2, max = 100))]
    pub location: Option<String>,

    pub status: Option<CarStatus>,
    pub features: Option<Vec<String>>,
    pub image_url: Option<String>,
}

/// Filtros para el listado público de coches
#[derive(Debug, Default, Deserialize)]
pub struct CarFilters {
    pub location: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub seats: Option<i32>,
    pub min_daily_rate: Option<Decimal>,
    pub max_daily_rate: Option<Decimal>,
    pub status: Option<CarStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de coche para la API
#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub id: String,
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
    pub features: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id.to_string(),
            make: car.make,
            model: car.model,
            year: car.year,
            color: car.color,
            fuel_type: car.fuel_type,
            transmission: car.transmission,
            seats: car.seats,
            daily_rate: car.daily_rate,
            weekly_rate: car.weekly_rate,
            monthly_rate: car.monthly_rate,
            location: car.location,
            status: car.status,
            features: car.features.map(|f| f.0).unwrap_or_default(),
            image_url: car.image_url,
            created_at: car.created_at,
        }
    }
}
