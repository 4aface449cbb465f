pub mod account_fetcher;
pub mod lookup_orchestrator;
pub mod metrics_deriver;
pub mod security_heuristic;
pub mod synthetic_account; // 远端不可用时的占位数据

pub use account_fetcher::{AccountFetcher, TronscanClient};
pub use lookup_orchestrator::{LookupOrchestrator, OutcomeSlot, SubmitResult};
pub use security_heuristic::SecurityHeuristic;
