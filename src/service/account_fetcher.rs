//! 账户数据拉取
//!
//! 每次查询两次只读请求：
//! 1. 账户信息：失败即整体失败（`FetchError::AccountUnavailable`），此处不做降级
//! 2. 代币列表（第一页）：失败不影响结果，返回空列表
//!
//! 不做重试、缓存和限流；请求超时由 HTTP 客户端统一设置，超时等同于账户不可用

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::config::ExplorerConfig;
use crate::domain::{AccountInfo, RawAccountData, TokenHolding};
use crate::error::FetchError;
use crate::utils::{mask_address, ValidatedAddress};

/// 账户数据源
#[async_trait]
pub trait AccountFetcher: Send + Sync {
    async fn fetch(&self, address: &ValidatedAddress) -> Result<RawAccountData, FetchError>;
}

/// Tronscan API 客户端
pub struct TronscanClient {
    http_client: reqwest::Client,
    base_url: String,
    token_page_limit: u32,
}

impl TronscanClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build explorer HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_page_limit: config.token_page_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let start = Instant::now();

        let response = match self.http_client.get(url).query(query).send().await {
            Ok(resp) => resp,
            Err(e) => {
                crate::metrics::observe_upstream_latency_ms(start.elapsed().as_millis(), false);
                return Err(FetchError::from_transport(&e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            crate::metrics::observe_upstream_latency_ms(start.elapsed().as_millis(), false);
            return Err(FetchError::http_status(status.as_u16()));
        }

        let body = response.json::<Value>().await;
        crate::metrics::observe_upstream_latency_ms(start.elapsed().as_millis(), body.is_ok());
        body.map_err(|e| FetchError::from_transport(&e))
    }

    async fn fetch_account_info(
        &self,
        address: &ValidatedAddress,
    ) -> Result<AccountInfo, FetchError> {
        let url = format!("{}/api/account", self.base_url);
        let body = self
            .get_json(&url, &[("address", address.to_string())])
            .await?;
        Ok(AccountInfo::from_json(&body))
    }

    /// 代币列表为尽力而为：任何失败都降级为空列表
    async fn fetch_token_list(&self, address: &ValidatedAddress) -> Vec<TokenHolding> {
        let url = format!("{}/api/account/tokens", self.base_url);
        let query = [
            ("address", address.to_string()),
            ("start", "0".to_string()),
            ("limit", self.token_page_limit.to_string()),
        ];

        match self.get_json(&url, &query).await {
            Ok(body) => TokenHolding::list_from_json(&body),
            Err(e) => {
                tracing::warn!(
                    address = %mask_address(address.as_str()),
                    error = %e,
                    "Token list unavailable, continuing with empty holdings"
                );
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl AccountFetcher for TronscanClient {
    async fn fetch(&self, address: &ValidatedAddress) -> Result<RawAccountData, FetchError> {
        tracing::debug!(
            address = %mask_address(address.as_str()),
            base_url = %self.base_url,
            "Fetching account data from explorer"
        );

        let account_info = self.fetch_account_info(address).await.map_err(|e| {
            tracing::warn!(
                address = %mask_address(address.as_str()),
                error = %e,
                "Account info request failed"
            );
            e
        })?;

        let token_list = self.fetch_token_list(address).await;

        tracing::debug!(
            address = %mask_address(address.as_str()),
            tokens = token_list.len(),
            "Account data fetched"
        );

        Ok(RawAccountData {
            account_info,
            token_list,
        })
    }
}
