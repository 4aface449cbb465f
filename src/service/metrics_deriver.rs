//! 展示指标计算
//!
//! 纯函数：相同的快照和常量总是得到相同的结果（扫描时间由调用方传入）

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{AccountSnapshot, AccountTier, DerivedMetrics};
use crate::utils::{
    format_clock_time, format_count, format_short_date, from_epoch_millis, group_thousands,
};

/// 1 TRX = 10^6 sun
pub const SUN_PER_TRX: u64 = 1_000_000;

/// 原生代币符号
pub const NATIVE_SYMBOL: &str = "TRX";

/// TRX/USD 固定汇率 0.12（不做实时汇率查询）
pub const TRX_USD_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// Whale 最低余额：> 1,000 TRX
pub const WHALE_MIN_SUN: u64 = 1_000_000_001;

/// Active 最低余额：> 10 TRX
pub const ACTIVE_MIN_SUN: u64 = 10_000_001;

/// 余额无法解析时的展示
const UNKNOWN: &str = "Unknown";

/// 余额格式化：`5000000` -> `5.00 TRX`，小数 2~6 位，整数部分千分位
pub fn format_balance(raw_units: u64) -> String {
    let whole = raw_units / SUN_PER_TRX;
    let frac = format!("{:06}", raw_units % SUN_PER_TRX);

    // 去掉末尾 0，但至少保留 2 位
    let significant = frac.trim_end_matches('0').len().max(2);

    format!(
        "{}.{} {}",
        group_thousands(&whole.to_string()),
        &frac[..significant],
        NATIVE_SYMBOL
    )
}

/// 法币估值（未格式化）
pub fn estimate_fiat_amount(raw_units: u64, rate: Decimal) -> Decimal {
    Decimal::from(raw_units) / Decimal::from(SUN_PER_TRX) * rate
}

/// 法币估值格式化：`$0.60`，固定 2 位小数，半数远离零舍入
pub fn estimate_fiat_value(raw_units: u64, rate: Decimal) -> String {
    format_usd(estimate_fiat_amount(raw_units, rate))
}

pub fn format_usd(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let text = rounded.abs().to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}${}.{}", sign, group_thousands(whole), frac)
}

/// 账户等级
pub fn classify_tier(raw_units: u64) -> AccountTier {
    if raw_units >= WHALE_MIN_SUN {
        AccountTier::Whale
    } else if raw_units >= ACTIVE_MIN_SUN {
        AccountTier::Active
    } else {
        AccountTier::Standard
    }
}

/// 最后活跃时间：缺失时为 `Unknown`
pub fn format_timestamp(epoch_millis: Option<i64>) -> String {
    epoch_millis
        .and_then(from_epoch_millis)
        .map(|dt| format_short_date(&dt))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// 扫描时间（24 小时制）
pub fn format_scan_time(now: &DateTime<Utc>) -> String {
    format_clock_time(now)
}

/// 由快照计算全部展示指标；`now` 为派生时刻
pub fn derive_metrics(snapshot: &AccountSnapshot, now: &DateTime<Utc>) -> DerivedMetrics {
    DerivedMetrics {
        balance: format_balance(snapshot.balance),
        usd_value: estimate_fiat_value(snapshot.balance, TRX_USD_RATE),
        tier: classify_tier(snapshot.balance),
        total_transactions: format_count(snapshot.transaction_count),
        last_active: format_timestamp(snapshot.last_active_ms),
        scan_time: format_scan_time(now),
        token_count: snapshot.tokens.len(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    /// 把格式化后的余额还原成 sun
    fn parse_balance(formatted: &str) -> u64 {
        let numeric = formatted
            .trim_end_matches(NATIVE_SYMBOL)
            .trim()
            .replace(',', "");
        let value: Decimal = numeric.parse().unwrap();
        (value * Decimal::from(SUN_PER_TRX)).trunc().to_string().parse().unwrap()
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(0), "0.00 TRX");
        assert_eq!(format_balance(5_000_000), "5.00 TRX");
        assert_eq!(format_balance(5_500_000), "5.50 TRX");
        assert_eq!(format_balance(1), "0.000001 TRX");
        assert_eq!(format_balance(1_234_567_890_123), "1,234,567.890123 TRX");
        assert_eq!(format_balance(1_000_000_120_000), "1,000,000.12 TRX");
    }

    #[test]
    fn test_format_balance_monotonic_and_idempotent() {
        let samples = [
            0u64,
            1,
            9,
            10,
            999_999,
            1_000_000,
            1_000_001,
            10_000_000,
            123_456_789,
            1_000_000_000,
            u64::MAX / 2,
            u64::MAX,
        ];
        let mut previous = 0u64;
        for raw in samples {
            let formatted = format_balance(raw);
            let parsed = parse_balance(&formatted);
            assert_eq!(parsed, raw, "round trip of {}", formatted);
            assert!(parsed >= previous);
            assert_eq!(format_balance(parsed), formatted);
            previous = parsed;
        }
    }

    #[test]
    fn test_estimate_fiat_value() {
        assert_eq!(estimate_fiat_value(5_000_000, TRX_USD_RATE), "$0.60");
        assert_eq!(estimate_fiat_value(0, TRX_USD_RATE), "$0.00");
        assert_eq!(estimate_fiat_value(1_234_500_000_000, TRX_USD_RATE), "$148,140.00");
        // 0.125 -> 0.13（半数远离零）
        assert_eq!(
            estimate_fiat_value(1_000_000, Decimal::new(125, 3)),
            "$0.13"
        );
        // 小于 1 分
        assert_eq!(estimate_fiat_value(1, TRX_USD_RATE), "$0.00");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(Decimal::new(-150_055, 2)), "-$1,500.55");
        assert_eq!(format_usd(Decimal::new(-1, 3)), "$0.00");
    }

    #[test]
    fn test_classify_tier_boundaries() {
        assert_eq!(classify_tier(WHALE_MIN_SUN), AccountTier::Whale);
        assert_eq!(classify_tier(WHALE_MIN_SUN - 1), AccountTier::Active);
        assert_eq!(classify_tier(ACTIVE_MIN_SUN), AccountTier::Active);
        assert_eq!(classify_tier(ACTIVE_MIN_SUN - 1), AccountTier::Standard);
        // 1,000 TRX 整数仍然是 Active
        assert_eq!(classify_tier(1_000_000_000), AccountTier::Active);
        assert_eq!(classify_tier(5_000_000), AccountTier::Standard);
        assert_eq!(classify_tier(0), AccountTier::Standard);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "Unknown");
        assert_eq!(format_timestamp(Some(1_704_456_000_000)), "Jan 5, 2024");
        assert_eq!(format_timestamp(Some(i64::MAX)), "Unknown");
    }

    #[test]
    fn test_derive_metrics_is_deterministic() {
        let snapshot = AccountSnapshot {
            address: "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".into(),
            balance: 2_500_000_000,
            transaction_count: 12_345,
            last_active_ms: Some(1_704_456_000_000),
            tokens: vec![],
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 6, 18, 30, 0).unwrap();

        let metrics = derive_metrics(&snapshot, &now);
        assert_eq!(metrics.balance, "2,500.00 TRX");
        assert_eq!(metrics.usd_value, "$300.00");
        assert_eq!(metrics.tier, AccountTier::Whale);
        assert_eq!(metrics.total_transactions, "12,345");
        assert_eq!(metrics.last_active, "Jan 5, 2024");
        assert_eq!(metrics.scan_time, "18:30:00");
        assert_eq!(metrics.token_count, 0);

        assert_eq!(derive_metrics(&snapshot, &now), metrics);
    }
}
