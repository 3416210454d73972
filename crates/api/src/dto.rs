use chrono::{DateTime, Utc};
use engine::{AchievementProgress, AwardOutcome, Badge, ProgressionSummary, RankedMeme};
use serde::Serialize;
use store::UserStatsRow;

#[derive(Debug, Serialize)]
pub struct UserStatsDto {
    pub user_id: i64,
    pub username: String,
    pub points: i64,
    pub memes_count: i64,
    pub total_likes: i64,
    pub comments_made: i64,
    pub created_at: DateTime<Utc>,
}

impl From<UserStatsRow> for UserStatsDto {
    fn from(row: UserStatsRow) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            points: row.points,
            memes_count: row.memes_count,
            total_likes: row.total_likes,
            comments_made: row.comments_made,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BadgeDto {
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

impl From<&'static Badge> for BadgeDto {
    fn from(badge: &'static Badge) -> Self {
        Self {
            name: badge.name,
            description: badge.description,
            emoji: badge.emoji,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MilestoneDto {
    pub name: &'static str,
    pub memes_count: i64,
    pub bonus_points: i64,
    pub applied: bool,
}

#[derive(Debug, Serialize)]
pub struct AwardResponse {
    pub action: &'static str,
    pub awarded_points: i64,
    pub new_rank: &'static str,
    pub newly_earned_badges: Vec<BadgeDto>,
    pub milestone: Option<MilestoneDto>,
}

impl From<AwardOutcome> for AwardResponse {
    fn from(outcome: AwardOutcome) -> Self {
        Self {
            action: outcome.action.as_str(),
            awarded_points: outcome.awarded_points,
            new_rank: outcome.new_rank,
            newly_earned_badges: outcome
                .newly_earned_badges
                .into_iter()
                .map(BadgeDto::from)
                .collect(),
            milestone: outcome.milestone.map(|m| MilestoneDto {
                name: m.name,
                memes_count: m.memes_count,
                bonus_points: m.bonus_points,
                applied: m.applied,
            }),
        }
    }
}

/// The full gamification panel for one user in a single response.
#[derive(Debug, Serialize)]
pub struct UserSummaryDto {
    pub stats: UserStatsDto,
    pub progression: ProgressionSummary,
    pub badges: Vec<BadgeDto>,
    pub badges_count: usize,
    pub completion_rate: f64,
    pub achievements: Vec<AchievementProgress>,
}

#[derive(Debug, Serialize)]
pub struct FeedMemeDto {
    pub id: i64,
    pub user_id: i64,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_score: Option<f64>,
}

impl From<RankedMeme> for FeedMemeDto {
    fn from(ranked: RankedMeme) -> Self {
        Self {
            id: ranked.meme.id,
            user_id: ranked.meme.user_id,
            likes_count: ranked.meme.likes_count,
            created_at: ranked.meme.created_at,
            trending_score: ranked.trending_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntryDto {
    pub user_id: i64,
    pub username: String,
    pub points: i64,
    pub rank: &'static str,
}

impl From<UserStatsRow> for LeaderboardEntryDto {
    fn from(row: UserStatsRow) -> Self {
        let rank = engine::rank_of(row.points).label;
        Self {
            user_id: row.user_id,
            username: row.username,
            points: row.points,
            rank,
        }
    }
}
