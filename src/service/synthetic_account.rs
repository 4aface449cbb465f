//! 占位账户数据
//!
//! 远端不可用时生成看起来合理的随机快照，结果必须标记为 `SourceKind::Synthetic`

use chrono::{DateTime, Utc};
use rand::Rng;

use super::metrics_deriver::SUN_PER_TRX;
use crate::domain::AccountSnapshot;

/// 随机余额上限：10,000 TRX
pub const SYNTHETIC_MAX_BALANCE_SUN: u64 = 10_000 * SUN_PER_TRX;

/// 随机交易笔数上限
pub const SYNTHETIC_MAX_TRANSACTIONS: u64 = 1_000;

/// 随机最后活跃时间的回溯范围：30 天
pub const SYNTHETIC_MAX_AGE_MS: i64 = 30 * 24 * 60 * 60 * 1000;

pub fn generate<R: Rng + ?Sized>(
    address: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> AccountSnapshot {
    let age_ms = rng.gen_range(0..SYNTHETIC_MAX_AGE_MS);

    AccountSnapshot {
        address: address.to_string(),
        balance: rng.gen_range(0..SYNTHETIC_MAX_BALANCE_SUN),
        transaction_count: rng.gen_range(0..SYNTHETIC_MAX_TRANSACTIONS),
        last_active_ms: Some(now.timestamp_millis() - age_ms),
        tokens: Vec::new(),
    }
}
