//! Modelo de Contract
//!
//! Contrato de alquiler 1:1 con su reserva. Los términos se calculan una
//! sola vez al generarlo y quedan congelados como jsonb.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::booking::Booking;
use crate::services::pricing::round_money;

/// Estado del contrato - mapea al ENUM contract_status
///
/// `signed` es terminal e irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contract_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Pending,
    Signed,
}

/// Términos del contrato, derivados de la reserva en el momento de generarlo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub rental_duration_days: i32,
    pub security_deposit: Decimal,
    pub late_fee_per_hour: Decimal,
    pub fuel_policy: String,
    pub mileage_limit_km_per_day: i32,
    pub excess_mileage_fee_per_km: Decimal,
}

impl ContractTerms {
    /// Depósito de seguridad: 30% del total de la reserva
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            rental_duration_days: booking.total_days,
            security_deposit: round_money(booking.total_amount * Decimal::new(3, 1)),
            late_fee_per_hour: Decimal::from(50),
            fuel_policy: "same_level".to_string(),
            mileage_limit_km_per_day: 200,
            excess_mileage_fee_per_km: Decimal::from(2),
        }
    }
}

/// Contract principal - mapea exactamente a la tabla contracts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub terms: sqlx::types::Json<ContractTerms>,
    pub status: ContractStatus,
    pub signature_data: Option<String>,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::{BookingPaymentStatus, BookingStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_booking(total_amount: Decimal, total_days: i32) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            pickup_location: "Accra".to_string(),
            dropoff_location: "Kumasi".to_string(),
            pickup_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            dropoff_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            total_days,
            daily_rate: dec!(100),
            subtotal: dec!(300.00),
            insurance_fee: dec!(30.00),
            tax_amount: dec!(41.25),
            total_amount,
            special_requests: None,
            status: BookingStatus::Pending,
            payment_status: BookingPaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_terms_derive_deposit_and_duration_from_booking() {
        let booking = sample_booking(dec!(371.25), 3);
        let terms = ContractTerms::from_booking(&booking);

        assert_eq!(terms.rental_duration_days, 3);
        // 30% de 371.25 = 111.375 → 111.38 redondeado a 2 decimales
        assert_eq!(terms.security_deposit, dec!(111.38));
        assert_eq!(terms.late_fee_per_hour, dec!(50));
        assert_eq!(terms.fuel_policy, "same_level");
        assert_eq!(terms.mileage_limit_km_per_day, 200);
        assert_eq!(terms.excess_mileage_fee_per_km, dec!(2));
    }

    #[test]
    fn test_terms_are_deterministic_for_the_same_booking() {
        let booking = sample_booking(dec!(1000.00), 10);
        assert_eq!(
            ContractTerms::from_booking(&booking),
            ContractTerms::from_booking(&booking)
        );
    }
}
