//! 查询编排
//!
//! 流程：校验输入 -> 拉取账户 -> 计算指标 + 安全评分 -> 输出 `LookupOutcome`
//!
//! - 空输入 / 格式错误：直接失败，不发起网络请求
//! - 账户对象无地址字段：`address not found`
//! - 远端失败：不向上传播，生成占位数据并标记 `Synthetic`
//!
//! `submit` 为每次查询分配递增的代号；新的查询会取消旧查询尚未完成的拉取，
//! 且只有最新代号的结果能写入共享的“当前结果”槽位。

use std::{
    convert::Infallible,
    future::Future,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::watch;

use super::account_fetcher::AccountFetcher;
use super::metrics_deriver::derive_metrics;
use super::security_heuristic::SecurityHeuristic;
use super::synthetic_account;
use crate::domain::{
    AccountSnapshot, LookupOutcome, LookupReport, LookupState, LookupTrace, SourceKind,
    NETWORK_LABEL,
};
use crate::error::LookupError;
use crate::utils::{is_blank, mask_address, AddressValidator};

/// 共享结果槽位
pub type OutcomeSlot = Option<Arc<LookupOutcome>>;

/// `submit` 的结果
#[derive(Debug, Clone)]
pub enum SubmitResult {
    /// 结果已写入当前槽位
    Published(Arc<LookupOutcome>),
    /// 被更新的查询取代，结果被丢弃
    Superseded { generation: u64 },
}

impl SubmitResult {
    pub fn outcome(&self) -> Option<&LookupOutcome> {
        match self {
            SubmitResult::Published(outcome) => Some(outcome.as_ref()),
            SubmitResult::Superseded { .. } => None,
        }
    }
}

pub struct LookupOrchestrator {
    fetcher: Arc<dyn AccountFetcher>,
    heuristic: SecurityHeuristic,
    rng: Mutex<StdRng>,
    clock: fn() -> DateTime<Utc>,
    generation: watch::Sender<u64>,
    current: watch::Sender<OutcomeSlot>,
}

impl LookupOrchestrator {
    pub fn new(fetcher: Arc<dyn AccountFetcher>) -> Self {
        let (generation, _) = watch::channel(0);
        let (current, _) = watch::channel(None);

        Self {
            fetcher,
            heuristic: SecurityHeuristic::default(),
            rng: Mutex::new(StdRng::from_entropy()),
            clock: Utc::now,
            generation,
            current,
        }
    }

    /// 固定随机种子（测试用，评分与占位数据可复现）
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_heuristic(mut self, heuristic: SecurityHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// 单次查询，不写入共享槽位
    pub async fn perform_lookup(&self, input: &str) -> LookupOutcome {
        match self.execute(input, std::future::pending::<Infallible>()).await {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// 提交查询：取代所有进行中的旧查询，只有最新的查询能发布结果
    pub async fn submit(&self, input: &str) -> SubmitResult {
        let generation = self.next_generation();
        let mut generation_rx = self.generation.subscribe();

        let superseded = async move {
            let closed = generation_rx.wait_for(|g| *g != generation).await.is_err();
            if closed {
                // 发送端随编排器存活，这里只做兜底
                std::future::pending::<()>().await;
            }
        };

        let outcome = match self.execute(input, superseded).await {
            Ok(outcome) => Arc::new(outcome),
            Err(()) => return self.superseded(generation),
        };

        let published = self.current.send_if_modified(|slot| {
            if *self.generation.borrow() != generation {
                return false;
            }
            *slot = Some(outcome.clone());
            true
        });

        if published {
            SubmitResult::Published(outcome)
        } else {
            self.superseded(generation)
        }
    }

    /// 订阅当前结果（展示层只读）
    pub fn subscribe(&self) -> watch::Receiver<OutcomeSlot> {
        self.current.subscribe()
    }

    pub fn current_outcome(&self) -> OutcomeSlot {
        self.current.borrow().clone()
    }

    pub fn current_generation(&self) -> u64 {
        *self.generation.borrow()
    }

    fn next_generation(&self) -> u64 {
        let mut issued = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            issued = *g;
        });
        issued
    }

    fn superseded(&self, generation: u64) -> SubmitResult {
        tracing::debug!(generation, "Lookup superseded by a newer request, result dropped");
        crate::metrics::inc_lookup_superseded();
        SubmitResult::Superseded { generation }
    }

    /// 执行查询状态机；拉取期间 `cancel` 先完成则放弃本次查询
    async fn execute<C, X>(&self, input: &str, cancel: C) -> Result<LookupOutcome, X>
    where
        C: Future<Output = X>,
    {
        let mut trace = LookupTrace::new();
        if is_blank(input) {
            return Ok(self.fail(&mut trace, LookupError::InputEmpty));
        }
        let address = input.trim();

        advance(&mut trace, LookupState::Validating);
        let validated = match AddressValidator::parse(address) {
            Some(v) => v,
            None => return Ok(self.fail(&mut trace, LookupError::InputMalformed)),
        };

        advance(&mut trace, LookupState::Fetching);
        tokio::pin!(cancel);
        let fetched = tokio::select! {
            biased;
            reason = &mut cancel => return Err(reason),
            result = self.fetcher.fetch(&validated) => result,
        };

        let outcome = match fetched {
            Ok(raw) => match AccountSnapshot::from_raw(raw) {
                Some(snapshot) => {
                    advance(&mut trace, LookupState::Deriving);
                    self.build_report(snapshot, SourceKind::Live)
                }
                None => return Ok(self.fail(&mut trace, LookupError::AccountNotFound)),
            },
            Err(e) => {
                let error = LookupError::from(e.clone());
                tracing::warn!(
                    address = %mask_address(address),
                    error = %e,
                    code = error.code(),
                    "Explorer unavailable, falling back to synthetic data"
                );
                let now = (self.clock)();
                let snapshot =
                    self.with_rng(|rng| synthetic_account::generate(validated.as_str(), now, rng));
                self.build_report(snapshot, SourceKind::Synthetic)
            }
        };

        advance(&mut trace, LookupState::Done);
        Ok(self.finish(outcome, &trace))
    }

    fn build_report(&self, snapshot: AccountSnapshot, source: SourceKind) -> LookupOutcome {
        // 扫描时间取派生时刻
        let now = (self.clock)();
        let metrics = derive_metrics(&snapshot, &now);
        let security = self.with_rng(|rng| self.heuristic.assess(&snapshot.address, rng));
        let checksum_valid = AddressValidator::has_valid_checksum(&snapshot.address);

        LookupOutcome::Success(Box::new(LookupReport {
            address: snapshot.address,
            source,
            network: NETWORK_LABEL.to_string(),
            scan_status: LookupReport::scan_status_for(source).to_string(),
            checksum_valid,
            metrics,
            security,
            tokens: snapshot.tokens,
        }))
    }

    fn fail(&self, trace: &mut LookupTrace, error: LookupError) -> LookupOutcome {
        advance(trace, LookupState::Done);
        self.finish(LookupOutcome::failure(error), trace)
    }

    fn finish(&self, outcome: LookupOutcome, trace: &LookupTrace) -> LookupOutcome {
        let label = outcome.metric_label();
        crate::metrics::inc_lookup(&label);

        let path: Vec<&str> = trace.history().iter().map(|s| s.as_str()).collect();
        match &outcome {
            LookupOutcome::Success(report) => tracing::info!(
                address = %mask_address(&report.address),
                source = report.source.as_str(),
                tier = report.metrics.tier.as_str(),
                security = report.security.status.as_str(),
                path = ?path,
                "Lookup completed"
            ),
            LookupOutcome::Failure(failure) => tracing::info!(
                code = failure.error.code(),
                reason = %failure.reason,
                path = ?path,
                "Lookup failed"
            ),
        }

        outcome
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut rng)
    }
}

fn advance(trace: &mut LookupTrace, to: LookupState) {
    if let Err(e) = trace.advance(to) {
        tracing::error!(error = %e, "Lookup state machine violation");
    }
}
