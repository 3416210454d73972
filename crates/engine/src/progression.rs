use serde::Serialize;

use crate::tables::{RankTier, RANK_TIERS};

pub const POINTS_PER_LEVEL: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextRankInfo {
    pub current_rank: &'static str,
    pub next_rank: &'static str,
    pub current_points: i64,
    pub points_needed: i64,
    pub current_min: i64,
    pub next_min: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub level: i64,
    pub points_in_level: i64,
    pub points_to_next: i64,
    pub progress_percent: i64,
}

/// Highest tier whose threshold is at or below `points`. Total over
/// non-negative inputs because the lowest tier starts at 0.
pub fn rank_of(points: i64) -> &'static RankTier {
    RANK_TIERS
        .iter()
        .rev()
        .find(|tier| points >= tier.min_points)
        .unwrap_or(&RANK_TIERS[0])
}

/// The tier immediately above the current one, or `None` at the top.
/// `points_needed` is at least 1: points exactly at a threshold already
/// belong to that tier.
pub fn next_rank_info(points: i64) -> Option<NextRankInfo> {
    let current = rank_of(points);
    let next = RANK_TIERS
        .iter()
        .find(|tier| tier.min_points > current.min_points)?;
    Some(NextRankInfo {
        current_rank: current.label,
        next_rank: next.label,
        current_points: points,
        points_needed: next.min_points - points,
        current_min: current.min_points,
        next_min: next.min_points,
    })
}

/// Fixed-width leveling: every 100 points is one level. A user sitting
/// exactly on a multiple of 100 shows 0% into the new level.
pub fn level_of(points: i64) -> LevelInfo {
    let points_in_level = points % POINTS_PER_LEVEL;
    LevelInfo {
        level: points / POINTS_PER_LEVEL + 1,
        points_in_level,
        points_to_next: POINTS_PER_LEVEL - points_in_level,
        progress_percent: points_in_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_total_and_monotonic() {
        let mut prev_min = i64::MIN;
        for points in 0..=1200 {
            let tier = rank_of(points);
            assert!(tier.min_points >= prev_min);
            prev_min = tier.min_points;
        }
    }

    #[test]
    fn thresholds_belong_to_the_new_tier() {
        assert_eq!(rank_of(0).label, "Newbie");
        assert_eq!(rank_of(49).label, "Newbie");
        assert_eq!(rank_of(50).label, "Rookie Memer");
        assert_eq!(rank_of(200).label, "Meme Enthusiast");
        assert_eq!(rank_of(999).label, "Pro Memer");
        assert_eq!(rank_of(5000).label, "Meme Legend");
    }

    #[test]
    fn next_rank_distance_is_positive() {
        let info = next_rank_info(50).unwrap();
        assert_eq!(info.current_rank, "Rookie Memer");
        assert_eq!(info.next_rank, "Meme Enthusiast");
        assert_eq!(info.points_needed, 150);
        assert!(info.points_needed >= 1);

        let info = next_rank_info(199).unwrap();
        assert_eq!(info.points_needed, 1);
    }

    #[test]
    fn top_tier_has_no_next_rank() {
        assert!(next_rank_info(1000).is_none());
        assert!(next_rank_info(123_456).is_none());
    }

    #[test]
    fn level_at_250_points() {
        let level = level_of(250);
        assert_eq!(level.level, 3);
        assert_eq!(level.points_in_level, 50);
        assert_eq!(level.points_to_next, 50);
        assert_eq!(level.progress_percent, 50);
    }

    #[test]
    fn exact_level_boundary_shows_zero_progress() {
        let level = level_of(300);
        assert_eq!(level.level, 4);
        assert_eq!(level.points_in_level, 0);
        assert_eq!(level.progress_percent, 0);
    }
}
