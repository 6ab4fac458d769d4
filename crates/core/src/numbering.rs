//! Invoice number formatting and month bucketing.
//!
//! Invoice numbers are sequential within a (year, month) bucket, starting at
//! 001. The sequence itself is minted atomically by the record store; this
//! module owns the format and the bucket boundaries.

use chrono::{DateTime, Datelike, NaiveTime, Utc};

/// Format an invoice number: `INV/{year}/{month:02}/{sequence:03}`.
///
/// Sequences above 999 widen naturally rather than wrapping.
pub fn invoice_number(year: i32, month: u32, sequence: u32) -> String {
    format!("INV/{year}/{month:02}/{sequence:03}")
}

/// The (year, month) bucket an instant falls into.
pub fn month_bucket(at: DateTime<Utc>) -> (i32, u32) {
    (at.year(), at.month())
}

/// First instant (midnight UTC) of the month containing `at`.
pub fn first_instant_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    let first_day = at
        .date_naive()
        .with_day(1)
        .expect("day 1 exists in every month");
    first_day.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn format_zero_pads_month_and_sequence() {
        assert_eq!(invoice_number(2026, 3, 1), "INV/2026/03/001");
        assert_eq!(invoice_number(2026, 11, 42), "INV/2026/11/042");
        assert_eq!(invoice_number(2026, 12, 999), "INV/2026/12/999");
    }

    #[test]
    fn sequence_overflowing_three_digits_widens() {
        assert_eq!(invoice_number(2026, 1, 1000), "INV/2026/01/1000");
    }

    #[test]
    fn month_boundary_instants_land_in_different_buckets() {
        let last = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(month_bucket(last), (2026, 1));
        assert_eq!(month_bucket(next), (2026, 2));
    }

    #[test]
    fn first_instant_of_month_is_midnight_on_day_one() {
        let at = Utc.with_ymd_and_hms(2026, 7, 19, 15, 4, 33).unwrap();
        assert_eq!(
            first_instant_of_month(at),
            Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap()
        );
    }

    proptest! {
        #[test]
        fn format_always_has_four_slash_separated_parts(
            year in 2000i32..2100,
            month in 1u32..=12,
            seq in 1u32..=999,
        ) {
            let n = invoice_number(year, month, seq);
            let parts: Vec<&str> = n.split('/').collect();
            prop_assert_eq!(parts.len(), 4);
            prop_assert_eq!(parts[0], "INV");
            prop_assert_eq!(parts[1], year.to_string());
            prop_assert_eq!(parts[2].len(), 2);
            prop_assert_eq!(parts[3].len(), 3);
            prop_assert_eq!(parts[3].parse::<u32>().unwrap(), seq);
        }
    }
}
