//! 查询状态机
//!
//! ```text
//! Idle -> Validating -> Fetching -> Deriving -> Done
//!   |         |            |
//!   +---------+------------+---------------------> Done
//! ```
//! `Done` 为终态，每次查询使用一个新的状态机实例

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// 查询状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupState {
    Idle,
    Validating,
    Fetching,
    Deriving,
    Done,
}

impl LookupState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupState::Idle => "idle",
            LookupState::Validating => "validating",
            LookupState::Fetching => "fetching",
            LookupState::Deriving => "deriving",
            LookupState::Done => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LookupState::Done)
    }
}

/// 状态转换校验
pub struct LookupStateMachine;

impl LookupStateMachine {
    /// 验证状态转换是否合法
    ///
    /// - Idle -> Validating | Done（空输入）
    /// - Validating -> Fetching | Done（格式错误）
    /// - Fetching -> Deriving | Done（账户不存在 / 远端失败走占位数据）
    /// - Deriving -> Done
    pub fn validate_transition(from: LookupState, to: LookupState) -> Result<()> {
        let valid = match from {
            LookupState::Idle => matches!(to, LookupState::Validating | LookupState::Done),
            LookupState::Validating => matches!(to, LookupState::Fetching | LookupState::Done),
            LookupState::Fetching => matches!(to, LookupState::Deriving | LookupState::Done),
            LookupState::Deriving => matches!(to, LookupState::Done),
            LookupState::Done => false,
        };

        if valid {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Invalid lookup state transition: {} -> {}",
                from.as_str(),
                to.as_str()
            ))
        }
    }
}

/// 单次查询的状态轨迹
#[derive(Debug, Clone)]
pub struct LookupTrace {
    state: LookupState,
    history: Vec<LookupState>,
}

impl Default for LookupTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupTrace {
    pub fn new() -> Self {
        Self {
            state: LookupState::Idle,
            history: vec![LookupState::Idle],
        }
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    pub fn history(&self) -> &[LookupState] {
        &self.history
    }

    /// 执行状态转换，非法转换返回错误且状态不变
    pub fn advance(&mut self, to: LookupState) -> Result<()> {
        LookupStateMachine::validate_transition(self.state, to)?;
        tracing::trace!(from = self.state.as_str(), to = to.as_str(), "lookup state transition");
        self.state = to;
        self.history.push(to);
        Ok(())
    }
}
