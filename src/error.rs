//! 错误类型
//!
//! 查询流程的错误分类：输入错误、账户不存在、网络失败

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 远端拉取错误
///
/// 非 2xx 状态、传输层错误、超时、响应体无法解析都归为账户数据不可用
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("account data unavailable (status: {status:?}): {reason}")]
    AccountUnavailable { status: Option<u16>, reason: String },
}

impl FetchError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        FetchError::AccountUnavailable {
            status: None,
            reason: reason.into(),
        }
    }

    pub fn http_status(status: u16) -> Self {
        FetchError::AccountUnavailable {
            status: Some(status),
            reason: format!("API error: {}", status),
        }
    }

    /// reqwest 错误归类（超时与其他传输错误同等处理）
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_decode() {
            format!("malformed response body: {}", err)
        } else {
            format!("transport error: {}", err)
        };
        FetchError::AccountUnavailable {
            status: err.status().map(|s| s.as_u16()),
            reason,
        }
    }
}

/// 查询错误分类
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupError {
    #[error("empty input")]
    InputEmpty,
    #[error("bad format")]
    InputMalformed,
    #[error("address not found")]
    AccountNotFound,
    /// 不会作为 Failure 返回给调用方，会被转换为 Synthetic 结果
    #[error("network failure")]
    NetworkFailure,
}

impl LookupError {
    /// 稳定的错误码
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::InputEmpty => "input_empty",
            LookupError::InputMalformed => "input_malformed",
            LookupError::AccountNotFound => "account_not_found",
            LookupError::NetworkFailure => "network_failure",
        }
    }

    /// 面向终端用户的提示文案
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::InputEmpty => "Please enter a TRON wallet address",
            LookupError::InputMalformed => {
                "Invalid TRON address format. TRON addresses start with \"T\" and are 34 characters long."
            }
            LookupError::AccountNotFound => "Wallet address not found on TRON network",
            LookupError::NetworkFailure => "TRON network is temporarily unavailable, please retry",
        }
    }
}

impl From<FetchError> for LookupError {
    fn from(_: FetchError) -> Self {
        LookupError::NetworkFailure
    }
}
