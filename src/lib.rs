//! IronScan - TRON 钱包地址查询
//!
//! 地址校验 -> Tronscan 账户拉取 -> 展示指标与安全评分 -> `LookupOutcome`

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod metrics;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use error::{FetchError, LookupError};

pub mod prelude {
    pub use crate::{
        config::Config,
        domain::{LookupOutcome, LookupReport, SourceKind},
        error::{FetchError, LookupError},
        service::{AccountFetcher, LookupOrchestrator, TronscanClient},
    };
}
