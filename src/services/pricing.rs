//! Cálculo de precios del alquiler
//!
//! Funciones puras de aritmética de precios - sin acceso a base de datos.
//! Todos los montos son `Decimal` (cedi ghanés) y se redondean a 2 decimales
//! en cada paso antes de persistirse, de modo que la suma de los componentes
//! mostrados coincide exactamente con el total mostrado.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::utils::errors::{validation_error, AppError};

/// 10% de seguro sobre el subtotal
const INSURANCE_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// 12.5% de IVA sobre subtotal + seguro
const TAX_RATE: Decimal = Decimal::from_parts(125, 0, 0, false, 3);

/// Desglose de precios de una reserva
#[derive(Debug, Clone, PartialEq)]
pub struct RentalQuote {
    pub total_days: i32,
    pub effective_daily_rate: Decimal,
    pub subtotal: Decimal,
    pub insurance_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// Redondear a 2 decimales, mitad lejos de cero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Tarifa diaria efectiva, mezclando tramos semanales/mensuales cuando aplican.
///
/// Con 30+ días y tarifa mensual: `floor(días/30)` meses a tarifa mensual más
/// el resto a tarifa diaria, dividido entre el total de días. El tramo
/// semanal es análogo a partir de 7 días.
fn effective_daily_rate(
    total_days: i32,
    daily_rate: Decimal,
    weekly_rate: Option<Decimal>,
    monthly_rate: Option<Decimal>,
) -> Decimal {
    let days = Decimal::from(total_days);

    if total_days >= 30 {
        if let Some(monthly) = monthly_rate {
            let months = Decimal::from(total_days / 30);
            let remaining = Decimal::from(total_days % 30);
            return (months * monthly + remaining * daily_rate) / days;
        }
    }

    if total_days >= 7 {
        if let Some(weekly) = weekly_rate {
            let weeks = Decimal::from(total_days / 7);
            let remaining = Decimal::from(total_days % 7);
            return (weeks * weekly + remaining * daily_rate) / days;
        }
    }

    daily_rate
}

/// Calcular el desglose completo de precios para un rango de fechas.
///
/// Rechaza rangos vacíos o invertidos (`end <= start`) con error de
/// validación antes de tocar cualquier aritmética.
pub fn calculate_quote(
    start_date: NaiveDate,
    end_date: NaiveDate,
    daily_rate: Decimal,
    weekly_rate: Option<Decimal>,
    monthly_rate: Option<Decimal>,
) -> Result<RentalQuote, AppError> {
    let total_days = (end_date - start_date).num_days();
    if total_days <= 0 {
        return Err(validation_error(
            "end_date",
            "End date must be after start date",
        ));
    }
    let total_days = total_days as i32;

    let effective = effective_daily_rate(total_days, daily_rate, weekly_rate, monthly_rate);

    let subtotal = round_money(Decimal::from(total_days) * effective);
    let insurance_fee = round_money(subtotal * INSURANCE_RATE);
    let tax_amount = round_money((subtotal + insurance_fee) * TAX_RATE);
    // Los tres componentes ya están a 2 decimales; el total es su suma exacta
    let total_amount = subtotal + insurance_fee + tax_amount;

    Ok(RentalQuote {
        total_days,
        effective_daily_rate: effective,
        subtotal,
        insurance_fee,
        tax_amount,
        total_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(41.255)), dec!(41.26));
        assert_eq!(round_money(dec!(41.254)), dec!(41.25));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(100)), dec!(100));
    }

    #[test]
    fn test_three_day_rental_flat_daily_rate() {
        // Escenario del formulario original: 100/día, 2024-01-01 → 2024-01-04
        let quote =
            calculate_quote(date(2024, 1, 1), date(2024, 1, 4), dec!(100), None, None).unwrap();

        assert_eq!(quote.total_days, 3);
        assert_eq!(quote.subtotal, dec!(300.00));
        assert_eq!(quote.insurance_fee, dec!(30.00));
        assert_eq!(quote.tax_amount, dec!(41.25));
        assert_eq!(quote.total_amount, dec!(371.25));
    }

    #[test]
    fn test_ten_day_rental_blends_weekly_rate() {
        // 1 semana a 600 + 3 días a 100 = 900 sobre 10 días → 90/día
        let quote = calculate_quote(
            date(2024, 3, 1),
            date(2024, 3, 11),
            dec!(100),
            Some(dec!(600)),
            None,
        )
        .unwrap();

        assert_eq!(quote.total_days, 10);
        assert_eq!(quote.effective_daily_rate, dec!(90));
        assert_eq!(quote.subtotal, dec!(900.00));
        assert_eq!(quote.insurance_fee, dec!(90.00));
        assert_eq!(quote.tax_amount, dec!(123.75));
        assert_eq!(quote.total_amount, dec!(1113.75));
    }

    #[test]
    fn test_thirty_five_day_rental_blends_monthly_rate() {
        // 1 mes a 2400 + 5 días a 100 = 2900 sobre 35 días
        let quote = calculate_quote(
            date(2024, 5, 1),
            date(2024, 6, 5),
            dec!(100),
            Some(dec!(600)),
            Some(dec!(2400)),
        )
        .unwrap();

        assert_eq!(quote.total_days, 35);
        assert_eq!(quote.subtotal, dec!(2900.00));
    }

    #[test]
    fn test_long_rental_without_monthly_rate_falls_back_to_weekly() {
        // 35 días sin tarifa mensual: 5 semanas a 600 = 3000
        let quote = calculate_quote(
            date(2024, 5, 1),
            date(2024, 6, 5),
            dec!(100),
            Some(dec!(600)),
            None,
        )
        .unwrap();

        assert_eq!(quote.subtotal, dec!(3000.00));
    }

    #[test]
    fn test_six_day_rental_ignores_weekly_rate() {
        let quote = calculate_quote(
            date(2024, 3, 1),
            date(2024, 3, 7),
            dec!(100),
            Some(dec!(600)),
            None,
        )
        .unwrap();

        assert_eq!(quote.total_days, 6);
        assert_eq!(quote.effective_daily_rate, dec!(100));
        assert_eq!(quote.subtotal, dec!(600.00));
    }

    #[test]
    fn test_empty_and_inverted_ranges_are_rejected() {
        let same_day =
            calculate_quote(date(2024, 1, 1), date(2024, 1, 1), dec!(100), None, None);
        assert!(matches!(same_day, Err(AppError::Validation(_))));

        let inverted =
            calculate_quote(date(2024, 1, 4), date(2024, 1, 1), dec!(100), None, None);
        assert!(matches!(inverted, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_components_always_sum_to_total() {
        // La propiedad de redondeo por paso: los componentes persistidos
        // suman el total exactamente, sin re-derivar de flotantes crudos
        let cases = [
            (dec!(99.99), None, None, 1),
            (dec!(123.45), Some(dec!(777.77)), None, 9),
            (dec!(87.65), Some(dec!(500.00)), Some(dec!(1999.99)), 33),
            (dec!(61.13), None, Some(dec!(1500.50)), 45),
        ];

        for (daily, weekly, monthly, days) in cases {
            let start = date(2024, 1, 1);
            let end = start + chrono::Duration::days(days);
            let quote = calculate_quote(start, end, daily, weekly, monthly).unwrap();
            assert_eq!(
                quote.subtotal + quote.insurance_fee + quote.tax_amount,
                quote.total_amount,
                "daily={} days={}",
                daily,
                days
            );
        }
    }
}
