use std::collections::HashMap;

use serde::Serialize;
use store::MemeRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMeme {
    pub id: i64,
    pub likes_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorSummary {
    pub total_memes: usize,
    pub total_likes: i64,
    pub total_comments: i64,
    pub average_likes: f64,
    pub best_meme: Option<BestMeme>,
    pub trend: EngagementTrend,
}

/// Aggregate a creator's memes into display statistics. The trend
/// compares the average likes of the newer half against the older half,
/// with a ±20% band counted as stable; fewer than 3 memes is always
/// stable.
pub fn creator_summary(memes: &[MemeRow], comment_counts: &HashMap<i64, i64>) -> CreatorSummary {
    let total_memes = memes.len();
    let total_likes: i64 = memes.iter().map(|m| m.likes_count).sum();
    let total_comments: i64 = memes
        .iter()
        .map(|m| comment_counts.get(&m.id).copied().unwrap_or(0))
        .sum();
    let average_likes = if total_memes > 0 {
        total_likes as f64 / total_memes as f64
    } else {
        0.0
    };
    let best_meme = memes
        .iter()
        .max_by_key(|m| m.likes_count)
        .map(|m| BestMeme {
            id: m.id,
            likes_count: m.likes_count,
        });

    CreatorSummary {
        total_memes,
        total_likes,
        total_comments,
        average_likes,
        best_meme,
        trend: engagement_trend(memes),
    }
}

fn engagement_trend(memes: &[MemeRow]) -> EngagementTrend {
    if memes.len() < 3 {
        return EngagementTrend::Stable;
    }

    let mut newest_first: Vec<&MemeRow> = memes.iter().collect();
    newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let split = newest_first.len() / 2;
    let (recent, older) = newest_first.split_at(split);
    let recent_avg = recent.iter().map(|m| m.likes_count).sum::<i64>() as f64 / recent.len() as f64;
    let older_avg = older.iter().map(|m| m.likes_count).sum::<i64>() as f64 / older.len() as f64;

    if recent_avg > older_avg * 1.2 {
        EngagementTrend::Up
    } else if recent_avg < older_avg * 0.8 {
        EngagementTrend::Down
    } else {
        EngagementTrend::Stable
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;

    fn meme(id: i64, likes: i64, hours_ago: i64, now: DateTime<Utc>) -> MemeRow {
        MemeRow {
            id,
            user_id: 1,
            likes_count: likes,
            created_at: now - Duration::hours(hours_ago),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_creator_summarizes_to_zeroes() {
        let summary = creator_summary(&[], &HashMap::new());
        assert_eq!(summary.total_memes, 0);
        assert_eq!(summary.average_likes, 0.0);
        assert_eq!(summary.best_meme, None);
        assert_eq!(summary.trend, EngagementTrend::Stable);
    }

    #[test]
    fn totals_and_best_meme() {
        let now = now();
        let memes = vec![meme(1, 4, 3, now), meme(2, 10, 2, now), meme(3, 1, 1, now)];
        let mut counts = HashMap::new();
        counts.insert(1, 2);
        counts.insert(2, 5);

        let summary = creator_summary(&memes, &counts);
        assert_eq!(summary.total_memes, 3);
        assert_eq!(summary.total_likes, 15);
        assert_eq!(summary.total_comments, 7);
        assert_eq!(summary.average_likes, 5.0);
        assert_eq!(
            summary.best_meme,
            Some(BestMeme {
                id: 2,
                likes_count: 10
            })
        );
    }

    #[test]
    fn rising_likes_trend_up() {
        let now = now();
        let memes = vec![
            meme(1, 20, 1, now),
            meme(2, 18, 2, now),
            meme(3, 2, 50, now),
            meme(4, 1, 60, now),
        ];
        assert_eq!(creator_summary(&memes, &HashMap::new()).trend, EngagementTrend::Up);
    }

    #[test]
    fn falling_likes_trend_down() {
        let now = now();
        let memes = vec![
            meme(1, 1, 1, now),
            meme(2, 2, 2, now),
            meme(3, 20, 50, now),
            meme(4, 18, 60, now),
        ];
        assert_eq!(
            creator_summary(&memes, &HashMap::new()).trend,
            EngagementTrend::Down
        );
    }

    #[test]
    fn too_few_memes_are_stable() {
        let now = now();
        let memes = vec![meme(1, 100, 1, now), meme(2, 0, 50, now)];
        assert_eq!(
            creator_summary(&memes, &HashMap::new()).trend,
            EngagementTrend::Stable
        );
    }
}
