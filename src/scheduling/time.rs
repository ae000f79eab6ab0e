//! 12 小时制时间解析
//!
//! 前端选择器生成 "H:MM AM|PM" 形式的字符串（小时可不带前导零），
//! 这里统一转换为当天 0 点起的分钟数 [0, 1439]。

use once_cell::sync::Lazy;
use regex::Regex;

use super::ScheduleError;

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(1[0-2]|0?[1-9]):([0-5][0-9]) (AM|PM)$").expect("Invalid time regex"));

/// 将 "9:15 AM" 转换为分钟数
///
/// 规则：12 AM → 0，12 PM → 720，其余 PM 加 720。
/// 空字符串视为未选择时间，返回 `MissingField`；
/// 需要把未选择当作 0 哨兵的调用方必须在调用处自行处理。
pub fn time_to_minutes(time_str: &str) -> Result<u16, ScheduleError> {
    if time_str.is_empty() {
        return Err(ScheduleError::MissingField("time"));
    }

    let caps = TIME_RE
        .captures(time_str)
        .ok_or_else(|| ScheduleError::InvalidFormat(time_str.to_string()))?;

    // 正则已保证各段可解析
    let mut hours: u16 = caps[1].parse().expect("hour capture is numeric");
    let minutes: u16 = caps[2].parse().expect("minute capture is numeric");
    let period = &caps[3];

    if period == "PM" && hours != 12 {
        hours += 12;
    }
    if period == "AM" && hours == 12 {
        hours = 0;
    }

    Ok(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(time_to_minutes("12:00 AM").unwrap(), 0);
        assert_eq!(time_to_minutes("12:00 PM").unwrap(), 720);
        assert_eq!(time_to_minutes("12:30 AM").unwrap(), 30);
        assert_eq!(time_to_minutes("12:45 PM").unwrap(), 765);
    }

    #[test]
    fn test_am_pm_conversion() {
        assert_eq!(time_to_minutes("9:15 AM").unwrap(), 555);
        assert_eq!(time_to_minutes("9:15 PM").unwrap(), 1275);
        assert_eq!(time_to_minutes("1:00 PM").unwrap(), 780);
        assert_eq!(time_to_minutes("11:59 PM").unwrap(), 1439);
    }

    #[test]
    fn test_leading_zero_optional() {
        assert_eq!(time_to_minutes("09:15 AM").unwrap(), 555);
        assert_eq!(
            time_to_minutes("9:15 AM").unwrap(),
            time_to_minutes("09:15 AM").unwrap()
        );
    }

    #[test]
    fn test_empty_is_missing_field() {
        assert_eq!(
            time_to_minutes(""),
            Err(ScheduleError::MissingField("time"))
        );
    }

    #[test]
    fn test_malformed_inputs() {
        for bad in ["9:15", "13:00 PM", "9:75 AM", "9.15 AM", "9:15 am", "AM 9:15"] {
            assert!(
                matches!(time_to_minutes(bad), Err(ScheduleError::InvalidFormat(_))),
                "expected InvalidFormat for {bad:?}"
            );
        }
    }
}
