use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-request snapshot of a user's aggregated activity counters.
///
/// The engine treats a fetched row as immutable; counters other than
/// `points` can shrink when content is deleted, so derived state (badges,
/// achievement progress) is always recomputed from the current row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserStatsRow {
    pub user_id: i64,
    pub username: String,
    pub points: i64,
    pub memes_count: i64,
    pub total_likes: i64,
    pub comments_made: i64,
    pub created_at: DateTime<Utc>,
}

/// A meme as seen by the ranking engine. The engine never mutates it; the
/// trending score derived for feed ordering lives alongside, not on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemeRow {
    pub id: i64,
    pub user_id: i64,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MemeFilter {
    pub owner: Option<i64>,
    pub limit: Option<usize>,
}
