//! Batch JSON estimates

use crate::services::PostEstimate;
use crate::{ApiError, ApiResult, ApiState};
use axum::{
    extract::{Query, State},
    Form, Json,
};
use chrono::{DateTime, Utc};
use payout_core::post::chain_time;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LinksParams {
    /// Comma-separated post links
    pub links: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardEntry {
    pub link: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub curation: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub author: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub beneficiaries: Decimal,
    #[serde(with = "chain_time")]
    pub cashout_time: DateTime<Utc>,
    pub is_main_post: bool,
    pub title: String,
    pub elapsed_seconds: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub sbd_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sp_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub usd_amount: Decimal,
}

impl RewardEntry {
    fn new(estimate: PostEstimate, now: DateTime<Utc>) -> Self {
        let PostEstimate { link, post, payout } = estimate;

        Self {
            link,
            total: payout.total,
            curation: payout.curation,
            author: payout.author,
            beneficiaries: payout.beneficiaries,
            cashout_time: post.cashout_time,
            is_main_post: post.is_main_post(),
            elapsed_seconds: post.elapsed_seconds(now),
            title: post.title,
            sbd_amount: payout.sbd_amount,
            sp_amount: payout.sp_amount,
            usd_amount: payout.usd_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RewardsResponse {
    pub rewards: Vec<RewardEntry>,
}

/// GET /rewards.json?links=...
pub async fn rewards_from_query(
    State(state): State<ApiState>,
    Query(params): Query<LinksParams>,
) -> ApiResult<Json<RewardsResponse>> {
    rewards(&state, params).await
}

/// POST /rewards.json with form field `links`
pub async fn rewards_from_form(
    State(state): State<ApiState>,
    Form(params): Form<LinksParams>,
) -> ApiResult<Json<RewardsResponse>> {
    rewards(&state, params).await
}

fn split_links(links: Option<&str>) -> ApiResult<Vec<String>> {
    let links: Vec<String> = links
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_string)
        .collect();

    if links.is_empty() {
        return Err(ApiError::BadRequest("links parameter is required".to_string()));
    }
    Ok(links)
}

async fn rewards(state: &ApiState, params: LinksParams) -> ApiResult<Json<RewardsResponse>> {
    let links = split_links(params.links.as_deref())?;
    let estimates = state.rewards.estimate_links(&links).await?;

    let now = Utc::now();
    let mut rewards: Vec<RewardEntry> = estimates
        .into_iter()
        .map(|estimate| RewardEntry::new(estimate, now))
        .collect();
    rewards.sort_by_key(|entry| entry.elapsed_seconds);

    Ok(Json(RewardsResponse { rewards }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_links() {
        assert_eq!(
            split_links(Some("@a/b, @c/d,,")).unwrap(),
            vec!["@a/b".to_string(), "@c/d".to_string()]
        );
    }

    #[test]
    fn test_missing_links_rejected() {
        assert!(matches!(split_links(None), Err(ApiError::BadRequest(_))));
        assert!(matches!(split_links(Some(" , ")), Err(ApiError::BadRequest(_))));
    }
}
