use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;

/// Format of the Eastern date component of a mastered event key.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Eastern civil date and time strings for a UTC instant.
///
/// Every venue is treated as Eastern; there is no per-venue zone lookup.
pub fn eastern_date_time(instant: DateTime<Utc>) -> (String, String) {
    let local = instant.with_timezone(&New_York);
    (
        local.format(DATE_FORMAT).to_string(),
        local.format(TIME_FORMAT).to_string(),
    )
}

/// UTC instant for an Eastern date (`YYYYMMDD`) and wall-clock time (`HHMM`).
/// Returns `None` for unreadable input or a wall-clock time skipped by DST.
pub fn utc_from_eastern(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M").ok()?;
    New_York
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_utc_evening_to_previous_eastern_day() {
        let utc = Utc.with_ymd_and_hms(2019, 10, 1, 0, 0, 0).unwrap();
        let (date, time) = eastern_date_time(utc);
        assert_eq!(date, "2019-09-30");
        assert_eq!(time, "20:00:00");
    }

    #[test]
    fn eastern_wall_clock_to_utc() {
        let utc = utc_from_eastern("20170201", "1930").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2017, 2, 2, 0, 30, 0).unwrap());
        assert!(utc_from_eastern("2017-02-01", "7pm").is_none());
    }
}
