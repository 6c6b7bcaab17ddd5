//! Repositorio de la flota

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::car_dto::{CarFilters, CreateCarRequest, UpdateCarRequest};
use crate::models::car::Car;
use crate::utils::errors::AppError;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateCarRequest) -> Result<Car, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, make, model, year, color, fuel_type, transmission, seats,
                              daily_rate, weekly_rate, monthly_rate, location, status,
                              features, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'available', $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.make)
        .bind(request.model)
        .bind(request.year)
        .bind(request.color)
        .bind(request.fuel_type)
        .bind(request.transmission)
        .bind(request.seats)
        .bind(request.daily_rate)
        .bind(request.weekly_rate)
        .bind(request.monthly_rate)
        .bind(request.location)
        .bind(sqlx::types::Json(request.features.unwrap_or_default()))
        .bind(request.image_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    /// Listado con filtros opcionales; cada filtro ausente se neutraliza
    /// con el patrón `$n IS NULL OR ...`
    pub async fn list(&self, filters: &CarFilters) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            r#"
            SELECT * FROM cars
            WHERE ($1::text IS NULL OR location ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR transmission = $2)
              AND ($3::text IS NULL OR fuel_type = $3)
              AND ($4::int IS NULL OR seats = $4)
              AND ($5::numeric IS NULL OR daily_rate >= $5)
              AND ($6::numeric IS NULL OR daily_rate <= $6)
              AND ($7::car_status IS NULL OR status = $7)
            ORDER BY created_at DESC
            LIMIT $8 OFFSET $9
            "#,
        )
        .bind(&filters.location)
        .bind(&filters.transmission)
        .bind(&filters.fuel_type)
        .bind(filters.seats)
        .bind(filters.min_daily_rate)
        .bind(filters.max_daily_rate)
        .bind(filters.status)
        .bind(filters.limit.unwrap_or(50))
        .bind(filters.offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn update(&self, id: Uuid, request: UpdateCarRequest) -> Result<Car, AppError> {
        // Obtener coche actual para rellenar los campos no enviados
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let features = match request.features {
            Some(f) => sqlx::types::Json(f),
            None => current.features.unwrap_or_else(|| sqlx::types::Json(vec![])),
        };

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET make = $2, model = $3, year = $4, color = $5, fuel_type = $6,
                transmission = $7, seats = $8, daily_rate = $9, weekly_rate = $10,
                monthly_rate = $11, location = $12, status = $13, features = $14,
                image_url = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.make.unwrap_or(current.make))
        .bind(request.model.unwrap_or(current.model))
        .bind(request.year.unwrap_or(current.year))
        .bind(request.color.unwrap_or(current.color))
        .bind(request.fuel_type.unwrap_or(current.fuel_type))
        .bind(request.transmission.unwrap_or(current.transmission))
        .bind(request.seats.unwrap_or(current.seats))
        .bind(request.daily_rate.unwrap_or(current.daily_rate))
        .bind(request.weekly_rate.or(current.weekly_rate))
        .bind(request.monthly_rate.or(current.monthly_rate))
        .bind(request.location.unwrap_or(current.location))
        .bind(request.status.unwrap_or(current.status))
        .bind(features)
        .bind(request.image_url.or(current.image_url))
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        Ok(())
    }
}
