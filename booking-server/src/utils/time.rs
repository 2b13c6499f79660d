//! 时间工具函数 — 业务时区转换
//!
//! 所有日期→时间戳转换统一在 handler/manager 层完成，
//! repository 层只接收 `i64` Unix millis 和 `YYYY-MM-DD` 字符串。

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::AppResult;
use shared::error::AppError;

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 + 整点小时 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn date_hour_to_millis(date: NaiveDate, hour: u32, tz: Tz) -> AppResult<i64> {
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| AppError::validation(format!("Invalid hour: {}", hour)))?;
    Ok(naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis()))
}

/// 预订窗口 → `[start_ms, end_ms)` 半开区间 (业务时区)
///
/// `start_hour + duration_hours` 允许等于 24 (营业到午夜)，不允许跨天。
pub fn booking_window_millis(
    date: NaiveDate,
    start_hour: u32,
    duration_hours: u32,
    tz: Tz,
) -> AppResult<(i64, i64)> {
    let end_hour = start_hour
        .checked_add(duration_hours)
        .ok_or_else(|| AppError::validation("Booking window out of range"))?;
    let start_ms = date_hour_to_millis(date, start_hour, tz)?;
    let end_ms = if end_hour == 24 {
        let next = date
            .succ_opt()
            .ok_or_else(|| AppError::validation("Date out of range"))?;
        date_hour_to_millis(next, 0, tz)?
    } else {
        date_hour_to_millis(date, end_hour, tz)?
    };
    Ok((start_ms, end_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::UTC;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-06-15").is_ok());
        assert!(parse_date("15/06/2025").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_booking_window_is_half_open() {
        let date = parse_date("2025-06-15").unwrap();
        let (start, end) = booking_window_millis(date, 14, 2, UTC).unwrap();
        assert_eq!(end - start, 2 * 3600 * 1000);

        // A window ending at 16:00 touches one starting at 16:00
        let (next_start, _) = booking_window_millis(date, 16, 1, UTC).unwrap();
        assert_eq!(end, next_start);
    }

    #[test]
    fn test_window_until_midnight() {
        let date = parse_date("2025-06-15").unwrap();
        let (start, end) = booking_window_millis(date, 22, 2, UTC).unwrap();
        assert_eq!(end - start, 2 * 3600 * 1000);
    }

    #[test]
    fn test_invalid_hour_rejected() {
        let date = parse_date("2025-06-15").unwrap();
        assert!(date_hour_to_millis(date, 24, UTC).is_err());
        assert!(date_hour_to_millis(date, 99, UTC).is_err());
    }

    #[test]
    fn test_overflowing_window_rejected() {
        let date = parse_date("2025-06-15").unwrap();
        assert!(booking_window_millis(date, u32::MAX, 1, UTC).is_err());
        assert!(booking_window_millis(date, 1, u32::MAX, UTC).is_err());
    }
}
