//! Controller de reservas
//!
//! Orquesta el chequeo de disponibilidad, el cálculo de precios y la
//! progresión de estados de la reserva.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    BookingResponse, CreateBookingRequest, QuoteRequest, QuoteResponse,
    UpdateBookingStatusRequest,
};
use crate::dto::common::ApiResponse;
use crate::models::auth::AuthUser;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::car::Car;
use crate::repositories::booking_repository::{BookingRepository, NewBooking};
use crate::repositories::car_repository::CarRepository;
use crate::services::availability::{self, BookedWindow};
use crate::services::pricing;
use crate::utils::errors::{field_validation_error, AppError};
use crate::utils::validation::{validate_date, validate_time};

pub struct BookingController {
    bookings: BookingRepository,
    cars: CarRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            cars: CarRepository::new(pool),
        }
    }

    /// Crear una reserva: validar el rango, verificar el coche, calcular el
    /// desglose de precios y hacer la escritura condicional atómica.
    pub async fn create(
        &self,
        user: AuthUser,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        let start_date = validate_date(&request.start_date)
            .map_err(|e| field_validation_error("start_date", e))?;
        let end_date = validate_date(&request.end_date)
            .map_err(|e| field_validation_error("end_date", e))?;
        let pickup_time = validate_time(&request.pickup_time)
            .map_err(|e| field_validation_error("pickup_time", e))?;
        let dropoff_time = validate_time(&request.dropoff_time)
            .map_err(|e| field_validation_error("dropoff_time", e))?;

        // El rango inválido se rechaza antes de cualquier chequeo de solape
        availability::validate_date_range(start_date, end_date)?;

        let car = self.bookable_car(request.car_id).await?;

        let quote = pricing::calculate_quote(
            start_date,
            end_date,
            car.daily_rate,
            car.weekly_rate,
            car.monthly_rate,
        )?;

        let inserted = self
            .bookings
            .insert_if_available(NewBooking {
                car_id: car.id,
                user_id: user.id,
                start_date,
                end_date,
                pickup_location: request.pickup_location,
                dropoff_location: request.dropoff_location,
                pickup_time,
                dropoff_time,
                total_days: quote.total_days,
                daily_rate: car.daily_rate,
                subtotal: quote.subtotal,
                insurance_fee: quote.insurance_fee,
                tax_amount: quote.tax_amount,
                total_amount: quote.total_amount,
                special_requests: request.special_requests,
            })
            .await?;

        let booking = inserted.ok_or_else(|| {
            AppError::Conflict("Car is not available for the selected dates".to_string())
        })?;

        tracing::info!(
            "📅 Reserva {} creada para el coche {} ({} → {})",
            booking.id,
            booking.car_id,
            booking.start_date,
            booking.end_date
        );

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Booking created successfully".to_string(),
        ))
    }

    /// Cotizar un rango sin crear la reserva (el desglose que el cliente
    /// muestra antes de confirmar)
    pub async fn quote(&self, request: QuoteRequest) -> Result<QuoteResponse, AppError> {
        request.validate()?;

        let start_date = validate_date(&request.start_date)
            .map_err(|e| field_validation_error("start_date", e))?;
        let end_date = validate_date(&request.end_date)
            .map_err(|e| field_validation_error("end_date", e))?;

        availability::validate_date_range(start_date, end_date)?;

        let car = self
            .cars
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let quote = pricing::calculate_quote(
            start_date,
            end_date,
            car.daily_rate,
            car.weekly_rate,
            car.monthly_rate,
        )?;

        let booked: Vec<BookedWindow> = self
            .bookings
            .find_overlapping(car.id, start_date, end_date)
            .await?
            .iter()
            .map(|b| BookedWindow {
                start_date: b.start_date,
                end_date: b.end_date,
            })
            .collect();

        let proposed = BookedWindow {
            start_date,
            end_date,
        };
        let available =
            car.is_bookable() && availability::find_conflict(&booked, proposed).is_none();

        Ok(QuoteResponse::from_quote(quote, available))
    }

    pub async fn get_by_id(&self, user: AuthUser, id: Uuid) -> Result<BookingResponse, AppError> {
        let booking = self.owned_booking(user, id).await?;
        Ok(booking.into())
    }

    /// Listado: los clientes ven sus reservas, el admin las ve todas
    pub async fn list(&self, user: AuthUser) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = if user.is_admin() {
            self.bookings.list_all().await?
        } else {
            self.bookings.find_by_user(user.id).await?
        };

        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// Cancelar una reserva aplicando la regla de las 24 horas
    pub async fn cancel(
        &self,
        user: AuthUser,
        id: Uuid,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self.owned_booking(user, id).await?;

        match booking.status {
            BookingStatus::Cancelled => {
                return Err(AppError::Conflict("Booking is already cancelled".to_string()))
            }
            BookingStatus::Completed => {
                return Err(AppError::Conflict(
                    "Cannot cancel a completed booking".to_string(),
                ))
            }
            BookingStatus::Active => {
                return Err(AppError::Conflict(
                    "Cannot cancel an active rental".to_string(),
                ))
            }
            BookingStatus::Pending | BookingStatus::Confirmed => {}
        }

        if !booking.is_cancellable_at(Utc::now()) {
            return Err(AppError::Conflict(
                "Confirmed bookings can only be cancelled more than 24 hours before pickup"
                    .to_string(),
            ));
        }

        let cancelled = self
            .bookings
            .update_status(id, Some(BookingStatus::Cancelled), None)
            .await?;

        Ok(ApiResponse::success_with_message(
            cancelled.into(),
            "Booking cancelled".to_string(),
        ))
    }

    /// Override operativo de admin: marca recogidas (`active`) y
    /// devoluciones (`completed`); no puede revivir estados terminales.
    pub async fn update_status(
        &self,
        user: AuthUser,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only administrators can override booking status".to_string(),
            ));
        }

        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Booking is already {:?}",
                booking.status
            )));
        }

        let updated = self
            .bookings
            .update_status(id, Some(request.status), None)
            .await?;

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Booking status updated".to_string(),
        ))
    }

    /// Buscar la reserva y verificar propiedad; para el solicitante ajeno la
    /// reserva simplemente no existe
    async fn owned_booking(&self, user: AuthUser, id: Uuid) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != user.id && !user.is_admin() {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        Ok(booking)
    }

    async fn bookable_car(&self, car_id: Uuid) -> Result<Car, AppError> {
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if !car.is_bookable() {
            return Err(AppError::Conflict(
                "Car is no longer available".to_string(),
            ));
        }

        Ok(car)
    }
}
