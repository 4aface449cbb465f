//! 账户数据模型
//!
//! 远端返回的数据一律视为不可信：字段缺失或类型不符时取默认值（0 / 缺省），不报错

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// 来自远端 API 的真实数据
    Live,
    /// 远端不可用时本地生成的占位数据
    Synthetic,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Live => "live",
            SourceKind::Synthetic => "synthetic",
        }
    }
}

/// 账户等级（按余额划分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountTier {
    Standard,
    Active,
    Whale,
}

impl AccountTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountTier::Standard => "Standard",
            AccountTier::Active => "Active",
            AccountTier::Whale => "Whale",
        }
    }
}

impl std::fmt::Display for AccountTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 账户接口返回的原始字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    /// 地址回显；缺失说明该账户在链上不存在
    pub address: Option<String>,
    pub balance: u64,
    pub transactions: u64,
    pub last_active_ms: Option<i64>,
}

impl AccountInfo {
    /// 宽松解析账户接口响应
    pub fn from_json(v: &Value) -> Self {
        let address = v
            .get("address")
            .and_then(|a| a.as_str())
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        // 与上游一致：0 视为缺失，继续取下一个候选字段
        let transactions = ["transactions", "totalTransactionCount"]
            .iter()
            .filter_map(|k| v.get(*k).and_then(value_as_u64))
            .find(|n| *n > 0)
            .unwrap_or(0);

        let last_active_ms = ["latestOperationTime", "dateCreated"]
            .iter()
            .filter_map(|k| v.get(*k).and_then(value_as_i64))
            .find(|ts| *ts > 0);

        Self {
            address,
            balance: v.get("balance").and_then(value_as_u64).unwrap_or(0),
            transactions,
            last_active_ms,
        }
    }
}

/// 代币持仓
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub token_id: String,
    pub name: String,
    pub abbr: String,
    /// 最小单位余额，保留原始字符串避免精度丢失
    pub balance: String,
    pub decimals: u32,
    pub token_type: String,
}

impl TokenHolding {
    pub fn from_json(v: &Value) -> Self {
        let text = |key: &str| v.get(key).map(value_as_text).unwrap_or_default();
        Self {
            token_id: text("tokenId"),
            name: text("tokenName"),
            abbr: text("tokenAbbr"),
            balance: v
                .get("balance")
                .map(value_as_text)
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| "0".to_string()),
            decimals: v
                .get("tokenDecimal")
                .and_then(value_as_u64)
                .and_then(|d| u32::try_from(d).ok())
                .unwrap_or(0),
            token_type: text("tokenType"),
        }
    }

    /// 解析代币列表响应的 `data` 数组；结构不符时返回空列表
    pub fn list_from_json(v: &Value) -> Vec<Self> {
        v.get("data")
            .and_then(|d| d.as_array())
            .map(|items| items.iter().map(Self::from_json).collect())
            .unwrap_or_default()
    }
}

/// 拉取器的合并结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAccountData {
    pub account_info: AccountInfo,
    pub token_list: Vec<TokenHolding>,
}

/// 标准化后的账户快照，单次查询独占
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub address: String,
    /// 余额（sun，1 TRX = 10^6 sun）
    pub balance: u64,
    pub transaction_count: u64,
    pub last_active_ms: Option<i64>,
    pub tokens: Vec<TokenHolding>,
}

impl AccountSnapshot {
    /// 账户对象没有地址字段时返回 None（账户不存在）
    pub fn from_raw(raw: RawAccountData) -> Option<Self> {
        let RawAccountData {
            account_info,
            token_list,
        } = raw;
        let address = account_info.address?;

        Some(Self {
            address,
            balance: account_info.balance,
            transaction_count: account_info.transactions,
            last_active_ms: account_info.last_active_ms,
            tokens: token_list,
        })
    }
}

fn value_as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn value_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn value_as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
