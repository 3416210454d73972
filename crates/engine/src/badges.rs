use serde::Serialize;
use store::UserStatsRow;

/// One predicate representation for every badge. Badges whose nominal
/// criteria need streak or calendar data map to the proxy counter the
/// snapshot does carry, so evaluation has a single dispatch path and is
/// total over any snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "threshold")]
pub enum BadgeRule {
    MinMemes(i64),
    MinLikes(i64),
    MinComments(i64),
    MinPoints(i64),
    /// Average likes per meme; false while the user has no memes.
    MinLikeRatio(f64),
    /// User id at or below the cutoff ("one of the first N users").
    AmongFirstUsers(i64),
}

impl BadgeRule {
    pub fn is_met(&self, stats: &UserStatsRow) -> bool {
        match *self {
            Self::MinMemes(n) => stats.memes_count >= n,
            Self::MinLikes(n) => stats.total_likes >= n,
            Self::MinComments(n) => stats.comments_made >= n,
            Self::MinPoints(n) => stats.points >= n,
            Self::MinLikeRatio(ratio) => {
                stats.memes_count > 0
                    && stats.total_likes as f64 / stats.memes_count as f64 >= ratio
            }
            Self::AmongFirstUsers(cutoff) => stats.user_id <= cutoff,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Badge {
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    #[serde(skip)]
    pub rule: BadgeRule,
}

/// Declaration order is the stable display order. Badges are a pure
/// projection of the current snapshot: nothing here is persisted, and a
/// badge legitimately disappears when the counter behind it shrinks
/// (meme deletion). That is a design property, not a bug.
pub const BADGES: &[Badge] = &[
    // Creation
    Badge {
        name: "First Steps",
        description: "Created your first meme",
        emoji: "\u{1F476}",
        rule: BadgeRule::MinMemes(1),
    },
    Badge {
        name: "Getting Started",
        description: "Created 5 memes",
        emoji: "\u{1F3C1}",
        rule: BadgeRule::MinMemes(5),
    },
    Badge {
        name: "Meme Machine",
        description: "Created 25 memes",
        emoji: "\u{1F3ED}",
        rule: BadgeRule::MinMemes(25),
    },
    Badge {
        name: "Prolific Creator",
        description: "Created 50 memes",
        emoji: "\u{1F680}",
        rule: BadgeRule::MinMemes(50),
    },
    Badge {
        name: "Meme Master",
        description: "Created 100 memes",
        emoji: "\u{1F451}",
        rule: BadgeRule::MinMemes(100),
    },
    // Popularity
    Badge {
        name: "First Fan",
        description: "Received first like",
        emoji: "\u{2764}\u{FE0F}",
        rule: BadgeRule::MinLikes(1),
    },
    Badge {
        name: "Rising Star",
        description: "Received 25 likes",
        emoji: "\u{2B50}",
        rule: BadgeRule::MinLikes(25),
    },
    Badge {
        name: "Popular",
        description: "Received 100 likes",
        emoji: "\u{1F31F}",
        rule: BadgeRule::MinLikes(100),
    },
    Badge {
        name: "Viral Sensation",
        description: "Received 500 likes",
        emoji: "\u{1F4A5}",
        rule: BadgeRule::MinLikes(500),
    },
    Badge {
        name: "Internet Famous",
        description: "Received 1000 likes",
        emoji: "\u{1F3C6}",
        rule: BadgeRule::MinLikes(1000),
    },
    // Engagement
    Badge {
        name: "Commentator",
        description: "Made 10 comments",
        emoji: "\u{1F4AC}",
        rule: BadgeRule::MinComments(10),
    },
    Badge {
        name: "Social Butterfly",
        description: "Made 50 comments",
        emoji: "\u{1F98B}",
        rule: BadgeRule::MinComments(50),
    },
    Badge {
        name: "Community Helper",
        description: "Made 100 comments",
        emoji: "\u{1F91D}",
        rule: BadgeRule::MinComments(100),
    },
    // Proxy thresholds stand in for streak and calendar data the
    // snapshot does not carry.
    Badge {
        name: "Early Bird",
        description: "7-day login streak",
        emoji: "\u{1F305}",
        rule: BadgeRule::MinPoints(50),
    },
    Badge {
        name: "Night Owl",
        description: "Created meme after midnight",
        emoji: "\u{1F989}",
        rule: BadgeRule::MinMemes(5),
    },
    Badge {
        name: "Weekend Warrior",
        description: "Active on weekends",
        emoji: "\u{2694}\u{FE0F}",
        rule: BadgeRule::MinMemes(3),
    },
    Badge {
        name: "Trendsetter",
        description: "One of the first 100 users",
        emoji: "\u{1F3AF}",
        rule: BadgeRule::AmongFirstUsers(100),
    },
    // Achievement
    Badge {
        name: "Quality Creator",
        description: "High like-to-meme ratio",
        emoji: "\u{1F48E}",
        rule: BadgeRule::MinLikeRatio(10.0),
    },
    Badge {
        name: "Consistent Creator",
        description: "Created memes for 30 days",
        emoji: "\u{1F4C5}",
        rule: BadgeRule::MinMemes(30),
    },
    Badge {
        name: "Meme Archaeologist",
        description: "Used classic meme templates",
        emoji: "\u{1F3DB}\u{FE0F}",
        rule: BadgeRule::MinMemes(10),
    },
];

/// Every badge whose rule holds for the snapshot, in declaration order.
pub fn earned_badges(stats: &UserStatsRow) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|badge| badge.rule.is_met(stats))
        .collect()
}

/// Share of the badge table the user has earned, as a percentage.
pub fn completion_rate(stats: &UserStatsRow) -> f64 {
    earned_badges(stats).len() as f64 / BADGES.len() as f64 * 100.0
}
