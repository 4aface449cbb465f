//! 时间工具模块
//! 提供时间处理相关的工具函数

use chrono::{DateTime, TimeZone, Utc};

/// 毫秒时间戳转 UTC 时间；超出范围返回 None
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// 日期展示格式：`Jan 5, 2024`
pub fn format_short_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// 24 小时制时间：`HH:MM:SS`
pub fn format_clock_time(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M:%S").to_string()
}
