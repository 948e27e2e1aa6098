//! Reward service - fetches posts and parameters, runs the calculator

use crate::ApiResult;
use payout_core::{ChainSource, ParameterCache, Post, PostIdentifier};
use payout_economics::{PayoutResult, RewardCalculator};
use std::sync::Arc;

/// A post together with its estimated payout
#[derive(Debug, Clone)]
pub struct PostEstimate {
    /// Link exactly as the caller supplied it
    pub link: String,
    pub post: Post,
    pub payout: PayoutResult,
}

#[derive(Clone)]
pub struct RewardService {
    chain: Arc<dyn ChainSource>,
    params: ParameterCache,
}

impl RewardService {
    pub fn new(chain: Arc<dyn ChainSource>, params: ParameterCache) -> Self {
        Self { chain, params }
    }

    pub async fn estimate_post(&self, id: &PostIdentifier) -> ApiResult<PostEstimate> {
        let post = self.chain.post(id).await?;
        let calculator = RewardCalculator::new(&self.params.snapshot().await?)?;
        let payout = calculator.calculate(&post.reward_input())?;

        tracing::info!(
            post = %id,
            total = %payout.total,
            curation = %payout.curation,
            author = %payout.author,
            "payout estimated"
        );

        Ok(PostEstimate {
            link: id.to_string(),
            post,
            payout,
        })
    }

    /// Estimates every link in order; the first failure aborts the batch.
    /// Global parameters are read once for the whole batch.
    pub async fn estimate_links(&self, links: &[String]) -> ApiResult<Vec<PostEstimate>> {
        let calculator = RewardCalculator::new(&self.params.snapshot().await?)?;

        let mut estimates = Vec::with_capacity(links.len());
        for link in links {
            let id = PostIdentifier::parse(link)?;
            let post = self.chain.post(&id).await?;
            let payout = calculator.calculate(&post.reward_input())?;

            estimates.push(PostEstimate {
                link: link.clone(),
                post,
                payout,
            });
        }

        tracing::info!("💰 Estimated {} post(s)", estimates.len());
        Ok(estimates)
    }
}
