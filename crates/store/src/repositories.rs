use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{MemeFilter, MemeRow, UserStatsRow};

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn fetch(&self, user_id: i64) -> Result<Option<UserStatsRow>>;

    /// Apply a point delta as an atomic increment. Implementations must
    /// not read-modify-write across calls; concurrent deltas for the same
    /// user may never be lost.
    async fn add_points(&self, user_id: i64, delta: i64) -> Result<()>;

    async fn leaderboard(&self, limit: usize) -> Result<Vec<UserStatsRow>>;
}

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn list_memes(&self, filter: MemeFilter) -> Result<Vec<MemeRow>>;
    async fn comments_count_for(&self, meme_id: i64) -> Result<i64>;
}

pub trait Stores: Send + Sync {
    fn stats(&self) -> &dyn StatsRepository;
    fn content(&self) -> &dyn ContentRepository;
}
