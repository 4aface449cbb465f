//! 查询结果模型
//!
//! `LookupOutcome` 是核心层与展示层之间唯一传递的对象，创建后不可变

use serde::{Deserialize, Serialize};

use super::account::{AccountTier, SourceKind, TokenHolding};
use crate::error::LookupError;

/// 网络展示名称
pub const NETWORK_LABEL: &str = "TRON (TRC20)";

/// 展示用指标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// 例如 `1,234.50 TRX`
    pub balance: String,
    /// 例如 `$148.14`
    pub usd_value: String,
    pub tier: AccountTier,
    pub total_transactions: String,
    pub last_active: String,
    pub scan_time: String,
    pub token_count: usize,
}

/// 安全状态（按分数由高到低）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityStatus {
    Secure,
    ModerateRisk,
    HighRisk,
}

impl SecurityStatus {
    /// 分数 -> 状态：>=80 安全，60..80 中风险，<60 高风险
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            SecurityStatus::Secure
        } else if score >= 60 {
            SecurityStatus::ModerateRisk
        } else {
            SecurityStatus::HighRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityStatus::Secure => "SECURE",
            SecurityStatus::ModerateRisk => "MODERATE_RISK",
            SecurityStatus::HighRisk => "HIGH_RISK",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            SecurityStatus::Secure => "SECURE",
            SecurityStatus::ModerateRisk => "MODERATE RISK",
            SecurityStatus::HighRisk => "HIGH RISK",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SecurityStatus::Secure => "#00ff00",
            SecurityStatus::ModerateRisk => "#ffa500",
            SecurityStatus::HighRisk => "#ff3333",
        }
    }
}

/// 单项检查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityCheck {
    pub name: String,
    pub passed: bool,
}

/// 安全评估（示意性启发式结果，不构成任何安全保证）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityAssessment {
    pub status: SecurityStatus,
    /// 0..=100
    pub score: u8,
    pub color: String,
    pub checks: Vec<SecurityCheck>,
}

/// 成功结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupReport {
    pub address: String,
    pub source: SourceKind,
    pub network: String,
    pub scan_status: String,
    pub checksum_valid: bool,
    pub metrics: DerivedMetrics,
    pub security: SecurityAssessment,
    pub tokens: Vec<TokenHolding>,
}

impl LookupReport {
    pub fn scan_status_for(source: SourceKind) -> &'static str {
        match source {
            SourceKind::Live => "SCAN COMPLETE",
            SourceKind::Synthetic => "SCAN COMPLETE (MOCK DATA)",
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == SourceKind::Synthetic
    }
}

/// 失败结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupFailure {
    pub error: LookupError,
    /// 简短原因，如 `bad format`
    pub reason: String,
    /// 面向用户的提示
    pub message: String,
}

impl From<LookupError> for LookupFailure {
    fn from(error: LookupError) -> Self {
        Self {
            error,
            reason: error.to_string(),
            message: error.user_message().to_string(),
        }
    }
}

/// 查询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum LookupOutcome {
    Success(Box<LookupReport>),
    Failure(LookupFailure),
}

impl LookupOutcome {
    pub fn failure(error: LookupError) -> Self {
        LookupOutcome::Failure(error.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success(_))
    }

    pub fn report(&self) -> Option<&LookupReport> {
        match self {
            LookupOutcome::Success(report) => Some(report.as_ref()),
            LookupOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<LookupError> {
        match self {
            LookupOutcome::Success(_) => None,
            LookupOutcome::Failure(f) => Some(f.error),
        }
    }

    /// 指标标签：live / synthetic / failure:<code>
    pub fn metric_label(&self) -> String {
        match self {
            LookupOutcome::Success(report) => report.source.as_str().to_string(),
            LookupOutcome::Failure(f) => format!("failure:{}", f.error.code()),
        }
    }
}
