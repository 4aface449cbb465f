//! 测试辅助模块
//! 提供本地 Mock 浏览器 API 和桩拉取器

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, Once,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use ironscan::{
    config::ExplorerConfig,
    domain::{AccountInfo, RawAccountData},
    error::FetchError,
    service::{AccountFetcher, TronscanClient},
    utils::ValidatedAddress,
};
use serde_json::{json, Value};

/// 校验和有效的 TRON 地址（USDT 合约）
pub const VALID_ADDRESS: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

/// 第二个有效地址
pub const OTHER_ADDRESS: &str = "TLa2f6VPqDgRE67v1736s7bJ8Ray5wYjU7";

static LOGGING: Once = Once::new();

/// 测试日志只初始化一次
pub fn init_test_logging() {
    LOGGING.call_once(ironscan::infrastructure::logging::init_default_logging);
}

/// Mock 接口的固定响应
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Value,
    /// 响应前等待的时间，用于模拟卡住的上游
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            delay: None,
        }
    }

    pub fn error(status: u16) -> Self {
        Self {
            status,
            body: json!({ "message": "upstream error" }),
            delay: None,
        }
    }

    /// 等待 `delay` 后才返回 `body`
    pub fn stalled(delay: Duration, body: Value) -> Self {
        Self {
            delay: Some(delay),
            ..Self::ok(body)
        }
    }
}

struct MockState {
    account: MockResponse,
    tokens: MockResponse,
    account_hits: AtomicUsize,
    token_queries: Mutex<Vec<HashMap<String, String>>>,
}

/// 运行在 127.0.0.1 随机端口上的 Mock Tronscan
pub struct MockExplorer {
    pub base_url: String,
    state: Arc<MockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockExplorer {
    pub async fn spawn(account: MockResponse, tokens: MockResponse) -> Self {
        let state = Arc::new(MockState {
            account,
            tokens,
            account_hits: AtomicUsize::new(0),
            token_queries: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/account", get(account_handler))
            .route("/api/account/tokens", get(tokens_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock explorer");
        let addr = listener.local_addr().expect("Mock explorer has no address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn account_hits(&self) -> usize {
        self.state.account_hits.load(Ordering::SeqCst)
    }

    pub fn token_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.token_queries.lock().unwrap().clone()
    }

    pub fn client(&self) -> TronscanClient {
        TronscanClient::new(&explorer_config(&self.base_url)).expect("Failed to build client")
    }

    pub fn client_with_timeout(&self, timeout_ms: u64) -> TronscanClient {
        let config = ExplorerConfig {
            timeout_ms,
            ..explorer_config(&self.base_url)
        };
        TronscanClient::new(&config).expect("Failed to build client")
    }
}

impl Drop for MockExplorer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn explorer_config(base_url: &str) -> ExplorerConfig {
    ExplorerConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
        token_page_limit: 20,
        user_agent: "ironscan-test".to_string(),
    }
}

async fn account_handler(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    state.account_hits.fetch_add(1, Ordering::SeqCst);
    respond(&state.account).await
}

async fn tokens_handler(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.token_queries.lock().unwrap().push(query);
    respond(&state.tokens).await
}

async fn respond(response: &MockResponse) -> (StatusCode, Json<Value>) {
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body.clone()))
}

/// 返回固定结果并记录调用次数的拉取器
pub struct StubFetcher {
    result: Result<RawAccountData, FetchError>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn returning(account_info: AccountInfo) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(RawAccountData {
                account_info,
                token_list: Vec::new(),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: FetchError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountFetcher for StubFetcher {
    async fn fetch(&self, _address: &ValidatedAddress) -> Result<RawAccountData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
