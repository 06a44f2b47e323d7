//! Indonesian (`id-ID`) date formatting for catalog timestamps.

use chrono::{DateTime, Datelike, Utc};

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Format a timestamp as `DD <month> YYYY`, or `-` when absent.
pub fn format_date_id(date: Option<DateTime<Utc>>) -> String {
    match date {
        None => "-".to_string(),
        Some(d) => format!("{:02} {} {}", d.day(), MONTHS_ID[d.month0() as usize], d.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_date_renders_dash() {
        assert_eq!(format_date_id(None), "-");
    }

    #[test]
    fn pads_day_and_names_month() {
        let d = Utc.with_ymd_and_hms(2025, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(format_date_id(Some(d)), "05 Januari 2025");

        let d = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_date_id(Some(d)), "31 Desember 2024");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every valid date renders with a known month name.
            #[test]
            fn always_uses_indonesian_month(secs in 0i64..4_102_444_800) {
                let d = Utc.timestamp_opt(secs, 0).unwrap();
                let s = format_date_id(Some(d));
                prop_assert!(MONTHS_ID.iter().any(|m| s.contains(m)));
                prop_assert!(s.ends_with(&d.year().to_string()));
            }
        }
    }
}
