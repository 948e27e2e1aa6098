//! Public USD ticker for SBD
//!
//! Expects the CoinMarketCap v1 shape: `[{"price_usd": "1.02", ...}]`.

use crate::error::NetworkError;
use crate::http_client;
use async_trait::async_trait;
use payout_core::{QuoteSource, SourceError};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TICKER_URL: &str = "https://api.coinmarketcap.com/v1/ticker/steem-dollars/";

pub struct TickerClient {
    url: String,
    client: reqwest::Client,
}

impl TickerClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NetworkError> {
        Ok(Self {
            url: url.into(),
            client: http_client(timeout)?,
        })
    }

    pub async fn fetch_usd_price(&self) -> Result<Decimal, NetworkError> {
        tracing::debug!("→ GET {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(NetworkError::Http(response.status().as_u16()));
        }

        let body: Value = serde_json::from_slice(&response.bytes().await?)?;
        parse_price_usd(&body)
    }
}

fn parse_price_usd(body: &Value) -> Result<Decimal, NetworkError> {
    let price = body
        .get(0)
        .and_then(|ticker| ticker.get("price_usd"))
        .ok_or_else(|| NetworkError::Decode("ticker has no price_usd".to_string()))?;

    let text = match price {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        other => return Err(NetworkError::Decode(format!("unexpected price_usd {}", other))),
    };

    Decimal::from_str(&text).map_err(|_| NetworkError::Decode(format!("invalid price_usd {}", text)))
}

#[async_trait]
impl QuoteSource for TickerClient {
    async fn usd_price(&self) -> Result<Decimal, SourceError> {
        Ok(self.fetch_usd_price().await?)
    }
}
