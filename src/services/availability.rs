//! Chequeo de disponibilidad
//!
//! Funciones puras sobre rangos de fechas - sin acceso a base de datos.
//! La escritura atómica que hace cumplir el invariante vive en
//! `repositories::booking_repository`; aquí están el predicado de solape y
//! la validación de rangos que ambos lados comparten.

use chrono::NaiveDate;

use crate::utils::errors::{validation_error, AppError};

/// Ventana de fechas ya reservada en el calendario de un coche
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Comparación de solape con bordes inclusivos:
/// `existing.start <= proposed.end AND existing.end >= proposed.start`
pub fn ranges_overlap(existing: BookedWindow, proposed: BookedWindow) -> bool {
    existing.start_date <= proposed.end_date && existing.end_date >= proposed.start_date
}

/// Rechazar rangos vacíos o invertidos antes de cualquier chequeo de solape
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), AppError> {
    if end_date <= start_date {
        return Err(validation_error(
            "end_date",
            "End date must be after start date",
        ));
    }
    Ok(())
}

/// Buscar la primera ventana existente que solapa con el rango propuesto
pub fn find_conflict(
    existing: &[BookedWindow],
    proposed: BookedWindow,
) -> Option<BookedWindow> {
    existing
        .iter()
        .copied()
        .find(|window| ranges_overlap(*window, proposed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> BookedWindow {
        BookedWindow {
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let existing = window((2024, 1, 1), (2024, 1, 5));
        let proposed = window((2024, 1, 6), (2024, 1, 10));
        assert!(!ranges_overlap(existing, proposed));
        assert!(!ranges_overlap(proposed, existing));
    }

    #[test]
    fn test_touching_boundaries_overlap_inclusively() {
        // El día de devolución y el de recogida no pueden coincidir
        let existing = window((2024, 1, 1), (2024, 1, 5));
        let proposed = window((2024, 1, 5), (2024, 1, 10));
        assert!(ranges_overlap(existing, proposed));
        assert!(ranges_overlap(proposed, existing));
    }

    #[test]
    fn test_contained_range_overlaps() {
        let existing = window((2024, 1, 1), (2024, 1, 31));
        let proposed = window((2024, 1, 10), (2024, 1, 12));
        assert!(ranges_overlap(existing, proposed));
    }

    #[test]
    fn test_validate_date_range_rejects_empty_and_inverted() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(validate_date_range(day, day).is_err());
        assert!(validate_date_range(day + chrono::Duration::days(1), day).is_err());
        assert!(validate_date_range(day, day + chrono::Duration::days(1)).is_ok());
    }

    #[test]
    fn test_find_conflict_scans_all_windows() {
        let existing = vec![
            window((2024, 1, 1), (2024, 1, 5)),
            window((2024, 2, 1), (2024, 2, 5)),
        ];

        let clash = find_conflict(&existing, window((2024, 2, 3), (2024, 2, 8)));
        assert_eq!(clash, Some(existing[1]));

        let free = find_conflict(&existing, window((2024, 3, 1), (2024, 3, 8)));
        assert_eq!(free, None);
    }
}
