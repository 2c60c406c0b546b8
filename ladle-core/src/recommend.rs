//! Bounded in-memory buffer of recommendable recipes.
//!
//! Sits in front of [`RecipeRepository::recommendations`] so the hot
//! recommendations endpoint usually serves pre-fetched rows. The buffer is
//! owned state behind a mutex with a single spawned refresher task, not a
//! process-wide global.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::database::ports::RecipeRepository;
use crate::error::Result;
use crate::types::Recipe;

/// How many recipes one recommendations response contains at most.
pub const RECOMMENDATION_SERVING: usize = 8;

/// Pre-fetched rows kept around between refreshes.
const BUFFER_CAPACITY: usize = 32;

pub struct RecommendationBuffer {
    recipes: Arc<dyn RecipeRepository>,
    buffer: Mutex<VecDeque<Recipe>>,
}

impl fmt::Debug for RecommendationBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecommendationBuffer")
            .finish_non_exhaustive()
    }
}

impl RecommendationBuffer {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self {
            recipes,
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Take up to `count` buffered recipes, refilling from the repository
    /// first when the buffer cannot cover the request.
    pub async fn take(&self, count: usize) -> Result<Vec<Recipe>> {
        {
            let mut guard = self.buffer.lock().await;
            if guard.len() >= count {
                return Ok(guard.drain(..count).collect());
            }
        }

        self.refill().await?;

        let mut guard = self.buffer.lock().await;
        let available = count.min(guard.len());
        Ok(guard.drain(..available).collect())
    }

    /// Replace the buffered rows with a fresh random batch.
    pub async fn refill(&self) -> Result<()> {
        let batch =
            self.recipes.recommendations(BUFFER_CAPACITY as i64).await?;
        debug!(count = batch.len(), "refilled recommendation buffer");
        let mut guard = self.buffer.lock().await;
        *guard = batch.into();
        Ok(())
    }

    /// Spawn the periodic refresher. The first tick fires immediately,
    /// giving the buffer its initial fill at startup.
    pub fn spawn_refresher(
        self: &Arc<Self>,
        period: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let buffer = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = buffer.refill().await {
                    warn!(error = %err, "recommendation refresh failed");
                }
            }
        })
    }
}
