//! API State Management
use crate::services::RewardService;
use payout_core::{ChainSource, ParameterCache};
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub rewards: RewardService,
    pub start_time: std::time::Instant,
}

impl ApiState {
    pub fn new(chain: Arc<dyn ChainSource>, params: ParameterCache) -> Self {
        Self {
            rewards: RewardService::new(chain, params),
            start_time: std::time::Instant::now(),
        }
    }
}
