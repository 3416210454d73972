//! Engagement and progression engine: the deterministic rules that turn
//! raw activity counters into points, ranks, badges, achievement
//! progress, and the trending order of the feed.
//!
//! Everything except [`Awarder`] is a pure function over a supplied
//! snapshot: no shared state, no blocking, safe to call concurrently.
//! Derived state is recomputed from the current snapshot on every call
//! rather than persisted, so it tracks deletions faithfully.

pub mod achievements;
pub mod analytics;
pub mod award;
pub mod badges;
pub mod error;
pub mod progression;
pub mod ranking;
pub mod scoring;
pub mod stats;
pub mod tables;

use serde::Serialize;
use store::UserStatsRow;

pub use crate::achievements::{
    progress_all, progress_for, AchievementProgress, AchievementTrack, Metric, TRACKS,
};
pub use crate::analytics::{creator_summary, CreatorSummary, EngagementTrend};
pub use crate::award::{AwardOutcome, Awarder, MilestoneBonus};
pub use crate::badges::{completion_rate, earned_badges, Badge, BadgeRule, BADGES};
pub use crate::error::{EngineError, Result};
pub use crate::progression::{level_of, next_rank_info, rank_of, LevelInfo, NextRankInfo};
pub use crate::ranking::{featured, rank_feed, FeedOrder, RankedMeme};
pub use crate::scoring::{engagement_rate, trending_score};
pub use crate::tables::{ActionKind, MemeMilestone, RankTier, MEME_MILESTONES, RANK_TIERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressionSummary {
    pub rank: &'static str,
    pub next_rank: Option<NextRankInfo>,
    pub level: LevelInfo,
}

/// Current rank, distance to the next one, and level for a snapshot.
pub fn compute_progression(stats: &UserStatsRow) -> Result<ProgressionSummary> {
    stats::validate(stats)?;
    Ok(ProgressionSummary {
        rank: rank_of(stats.points).label,
        next_rank: next_rank_info(stats.points),
        level: level_of(stats.points),
    })
}

/// Badges currently earned by a snapshot, in stable display order.
pub fn compute_badges(stats: &UserStatsRow) -> Result<Vec<&'static Badge>> {
    stats::validate(stats)?;
    Ok(earned_badges(stats))
}

/// Progress on every achievement track for a snapshot.
pub fn compute_achievements(stats: &UserStatsRow) -> Result<Vec<AchievementProgress>> {
    stats::validate(stats)?;
    Ok(progress_all(stats))
}
