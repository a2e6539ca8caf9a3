use std::path::Path;
use std::path::PathBuf;

use chrono::{Duration, NaiveDateTime};


pub fn str_to_absolute_path(path_str: &str, default_base_dir: &Path) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        return path;
    } else {
        return [default_base_dir, Path::new(&path)].iter().collect();
    }
}

/// Fractional minutes to a chrono duration, rounded to whole seconds.
pub fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::seconds((minutes * 60.0).round() as i64)
}

/// Signed span between two timestamps in fractional minutes.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 60.0
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_gets_base_dir() {
        let base = Path::new("/etc/nemt");
        assert_eq!(str_to_absolute_path("trips.csv", base), PathBuf::from("/etc/nemt/trips.csv"));
    }

    #[test]
    fn test_absolute_path_unchanged() {
        let base = Path::new("/etc/nemt");
        assert_eq!(str_to_absolute_path("/data/trips.csv", base), PathBuf::from("/data/trips.csv"));
    }

    #[test]
    fn test_minute_conversions() {
        use chrono::NaiveDate;

        assert_eq!(minutes_to_duration(1.5), Duration::seconds(90));
        assert_eq!(minutes_to_duration(0.0), Duration::seconds(0));

        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let start = day.and_hms_opt(8, 0, 0).unwrap();
        let end = day.and_hms_opt(8, 45, 30).unwrap();
        assert_eq!(minutes_between(start, end), 45.5);
        assert_eq!(minutes_between(end, start), -45.5);
    }
}
