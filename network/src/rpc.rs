//! JSON-RPC client for a Steem node
//!
//! Only the three `condenser_api` calls the estimator needs are exposed.

use crate::error::NetworkError;
use crate::http_client;
use async_trait::async_trait;
use payout_core::{ChainSource, Post, PostIdentifier, SourceError};
use payout_economics::{Asset, RewardFund};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_NODE: &str = "https://api.steemit.com";

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct MedianPrice {
    base: Asset,
}

pub struct SteemClient {
    endpoint: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl SteemClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, NetworkError> {
        let endpoint = endpoint.into();
        tracing::info!("📡 Steem node client initialized: {}", endpoint);

        Ok(Self {
            endpoint,
            client: http_client(timeout)?,
            next_id: AtomicU64::new(1),
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, NetworkError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("→ {} {}", method, self.endpoint);

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        if !response.status().is_success() {
            tracing::error!("❌ {} failed: {}", method, response.status());
            return Err(NetworkError::Http(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let envelope: RpcResponse = serde_json::from_slice(&body)?;

        match (envelope.result, envelope.error) {
            (_, Some(error)) => Err(NetworkError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(NetworkError::Decode(format!("{} returned no result", method))),
        }
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, NetworkError> {
        let result = self.call(method, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn get_reward_fund(&self, name: &str) -> Result<RewardFund, NetworkError> {
        self.call_as("condenser_api.get_reward_fund", json!([name]))
            .await
    }

    pub async fn get_current_median_history_price(&self) -> Result<Asset, NetworkError> {
        let price: MedianPrice = self
            .call_as("condenser_api.get_current_median_history_price", json!([]))
            .await?;
        Ok(price.base)
    }

    /// Nodes answer unknown posts with an empty record instead of an error
    pub async fn get_content(&self, id: &PostIdentifier) -> Result<Post, NetworkError> {
        let result = self
            .call("condenser_api.get_content", json!([id.author, id.permlink]))
            .await?;

        let exists = result
            .get("author")
            .and_then(Value::as_str)
            .is_some_and(|author| !author.is_empty());
        if !exists {
            return Err(NetworkError::PostNotFound(id.to_string()));
        }

        let post: Post = serde_json::from_value(result)?;
        tracing::debug!(
            post = %id,
            votes = post.active_votes.len(),
            "post fetched"
        );
        Ok(post)
    }
}

#[async_trait]
impl ChainSource for SteemClient {
    async fn reward_fund(&self) -> Result<RewardFund, SourceError> {
        Ok(self.get_reward_fund("post").await?)
    }

    async fn median_price(&self) -> Result<Asset, SourceError> {
        Ok(self.get_current_median_history_price().await?)
    }

    async fn post(&self, id: &PostIdentifier) -> Result<Post, SourceError> {
        Ok(self.get_content(id).await?)
    }
}
