//! Controller de la flota
//!
//! El catálogo es público; las mutaciones (alta, edición, baja, override de
//! estado) son exclusivas del administrador.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{CarFilters, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::common::ApiResponse;
use crate::models::auth::AuthUser;
use crate::repositories::car_repository::CarRepository;
use crate::utils::errors::AppError;

pub struct CarController {
    cars: CarRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: AuthUser,
        request: CreateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        require_admin(user)?;
        request.validate()?;

        let car = self.cars.create(request).await?;

        tracing::info!("🚗 Coche {} {} {} dado de alta", car.year, car.make, car.model);

        Ok(ApiResponse::success_with_message(
            car.into(),
            "Car added to fleet".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CarResponse, AppError> {
        let car = self
            .cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        Ok(car.into())
    }

    pub async fn list(&self, filters: CarFilters) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.cars.list(&filters).await?;
        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn update(
        &self,
        user: AuthUser,
        id: Uuid,
        request: UpdateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        require_admin(user)?;
        request.validate()?;

        let car = self.cars.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            car.into(),
            "Car updated".to_string(),
        ))
    }

    pub async fn delete(&self, user: AuthUser, id: Uuid) -> Result<(), AppError> {
        require_admin(user)?;
        self.cars.delete(id).await
    }
}

fn require_admin(user: AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can manage the fleet".to_string(),
        ));
    }
    Ok(())
}
