use serde::Serialize;
use store::UserStatsRow;

/// Which snapshot counter an achievement track reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MemesCreated,
    LikesReceived,
    CommentsMade,
}

impl Metric {
    pub fn value(self, stats: &UserStatsRow) -> i64 {
        match self {
            Self::MemesCreated => stats.memes_count,
            Self::LikesReceived => stats.total_likes,
            Self::CommentsMade => stats.comments_made,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementTrack {
    pub name: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    /// Strictly increasing; same length as `rewards`.
    pub milestones: &'static [i64],
    pub rewards: &'static [i64],
}

pub const TRACKS: &[AchievementTrack] = &[
    AchievementTrack {
        name: "Meme Creator",
        description: "Create memes",
        metric: Metric::MemesCreated,
        milestones: &[1, 5, 10, 25, 50, 100],
        rewards: &[10, 25, 50, 75, 100, 200],
    },
    AchievementTrack {
        name: "Popular Creator",
        description: "Get likes on your memes",
        metric: Metric::LikesReceived,
        milestones: &[1, 10, 50, 100, 500, 1000],
        rewards: &[5, 15, 30, 50, 100, 200],
    },
    AchievementTrack {
        name: "Community Member",
        description: "Make comments",
        metric: Metric::CommentsMade,
        milestones: &[1, 5, 10, 25, 50, 100],
        rewards: &[2, 10, 15, 25, 50, 75],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementProgress {
    pub name: &'static str,
    pub description: &'static str,
    pub current: i64,
    pub next_milestone: i64,
    pub next_reward: i64,
    pub progress_percent: f64,
}

/// Progress toward the first milestone strictly above the current value,
/// linear from the previous milestone (or 0 before the first). With every
/// milestone met the track reports its last milestone at 100%.
pub fn progress_for(stats: &UserStatsRow, track: &AchievementTrack) -> AchievementProgress {
    let current = track.metric.value(stats);

    let next = track
        .milestones
        .iter()
        .zip(track.rewards)
        .enumerate()
        .find(|(_, (milestone, _))| current < **milestone);

    let (next_milestone, next_reward, percent) = match next {
        Some((i, (&milestone, &reward))) => {
            let floor = if i > 0 { track.milestones[i - 1] } else { 0 };
            let span = (milestone - floor) as f64;
            let percent = (current - floor) as f64 / span * 100.0;
            (milestone, reward, percent)
        }
        None => {
            let last = track.milestones.len() - 1;
            (track.milestones[last], track.rewards[last], 100.0)
        }
    };

    AchievementProgress {
        name: track.name,
        description: track.description,
        current,
        next_milestone,
        next_reward,
        progress_percent: percent.clamp(0.0, 100.0),
    }
}

pub fn progress_all(stats: &UserStatsRow) -> Vec<AchievementProgress> {
    TRACKS.iter().map(|track| progress_for(stats, track)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const TEST_TRACK: AchievementTrack = AchievementTrack {
        name: "test",
        description: "test track",
        metric: Metric::MemesCreated,
        milestones: &[1, 5, 10],
        rewards: &[2, 10, 15],
    };

    fn stats_with_memes(memes: i64) -> UserStatsRow {
        UserStatsRow {
            user_id: 1,
            username: "tester".to_string(),
            points: 0,
            memes_count: memes,
            total_likes: 0,
            comments_made: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn tracks_are_well_formed() {
        for track in TRACKS {
            assert_eq!(track.milestones.len(), track.rewards.len());
            for pair in track.milestones.windows(2) {
                assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn midway_between_milestones() {
        let progress = progress_for(&stats_with_memes(7), &TEST_TRACK);
        assert_eq!(progress.next_milestone, 10);
        assert_eq!(progress.next_reward, 15);
        assert_eq!(progress.progress_percent, 40.0);
    }

    #[test]
    fn before_first_milestone_floor_is_zero() {
        let progress = progress_for(&stats_with_memes(0), &TEST_TRACK);
        assert_eq!(progress.next_milestone, 1);
        assert_eq!(progress.next_reward, 2);
        assert_eq!(progress.progress_percent, 0.0);
    }

    #[test]
    fn all_milestones_met_is_complete_not_an_error() {
        let progress = progress_for(&stats_with_memes(10), &TEST_TRACK);
        assert_eq!(progress.next_milestone, 10);
        assert_eq!(progress.next_reward, 15);
        assert_eq!(progress.progress_percent, 100.0);

        let far_past = progress_for(&stats_with_memes(999), &TEST_TRACK);
        assert_eq!(far_past.progress_percent, 100.0);
    }

    #[test]
    fn all_tracks_report_for_a_snapshot() {
        let all = progress_all(&stats_with_memes(3));
        assert_eq!(all.len(), TRACKS.len());
        assert_eq!(all[0].name, "Meme Creator");
        assert_eq!(all[0].next_milestone, 5);
    }
}
