//! Contiguous daily date sequences.

use chrono::NaiveDate;

use crate::error::SeriesError;

/// Generates `n_days` consecutive calendar dates starting at `start`.
///
/// Month, year and leap-day boundaries follow the proleptic Gregorian
/// calendar.
///
/// # Errors
///
/// Returns [`SeriesError::DateOverflow`] if the sequence would run past the
/// last date `chrono` can represent.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use demand_series::daily_sequence;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let dates = daily_sequence(start, 3).unwrap();
/// assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// ```
pub fn daily_sequence(start: NaiveDate, n_days: usize) -> Result<Vec<NaiveDate>, SeriesError> {
    let mut dates = Vec::with_capacity(n_days);
    if n_days == 0 {
        return Ok(dates);
    }
    dates.push(start);
    let mut current = start;
    for _ in 1..n_days {
        current = current
            .succ_opt()
            .ok_or(SeriesError::DateOverflow { date: current })?;
        dates.push(current);
    }
    Ok(dates)
}

/// Generates the `n_days` dates immediately following `last`.
///
/// # Errors
///
/// Returns [`SeriesError::DateOverflow`] if `last` is the final representable
/// date or the sequence runs past it.
pub fn days_after(last: NaiveDate, n_days: usize) -> Result<Vec<NaiveDate>, SeriesError> {
    if n_days == 0 {
        return Ok(Vec::new());
    }
    let first = last
        .succ_opt()
        .ok_or(SeriesError::DateOverflow { date: last })?;
    daily_sequence(first, n_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty() {
        assert!(daily_sequence(date(2022, 1, 1), 0).unwrap().is_empty());
    }

    #[test]
    fn single() {
        let dates = daily_sequence(date(2022, 6, 15), 1).unwrap();
        assert_eq!(dates, vec![date(2022, 6, 15)]);
    }

    #[test]
    fn year_transition() {
        let dates = daily_sequence(date(2022, 12, 30), 4).unwrap();
        assert_eq!(
            dates,
            vec![
                date(2022, 12, 30),
                date(2022, 12, 31),
                date(2023, 1, 1),
                date(2023, 1, 2)
            ]
        );
    }

    #[test]
    fn leap_year_has_366_days() {
        let dates = daily_sequence(date(2024, 1, 1), 366).unwrap();
        assert_eq!(*dates.last().unwrap(), date(2024, 12, 31));
    }

    #[test]
    fn days_after_starts_next_day() {
        let dates = days_after(date(2022, 12, 31), 2).unwrap();
        assert_eq!(dates, vec![date(2023, 1, 1), date(2023, 1, 2)]);
    }

    #[test]
    fn days_after_zero() {
        assert!(days_after(date(2022, 12, 31), 0).unwrap().is_empty());
    }

    #[test]
    fn overflow_is_reported() {
        let err = days_after(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, SeriesError::DateOverflow { .. }));
    }
}
