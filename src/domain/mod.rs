//! Domain 模块
//!
//! 账户数据、查询结果与查询状态机

pub mod account;
pub mod lookup_state;
pub mod outcome;

// 重新导出常用类型
pub use account::{
    AccountInfo, AccountSnapshot, AccountTier, RawAccountData, SourceKind, TokenHolding,
};
pub use lookup_state::{LookupState, LookupStateMachine, LookupTrace};
pub use outcome::{
    DerivedMetrics, LookupFailure, LookupOutcome, LookupReport, SecurityAssessment, SecurityCheck,
    SecurityStatus, NETWORK_LABEL,
};
