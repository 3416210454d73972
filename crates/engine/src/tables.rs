use serde::{Deserialize, Serialize};

/// The fixed set of point-earning activities. Awards for anything else
/// are rejected before any store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateMeme,
    GetLike,
    Comment,
    DailyLogin,
    FirstMeme,
    ViralMeme,
    PopularCreator,
    ProlificCreator,
    SocialButterfly,
    Trendsetter,
}

impl ActionKind {
    pub fn parse(s: &str) -> Option<Self> {
        let kind = match s {
            "create_meme" => Self::CreateMeme,
            "get_like" => Self::GetLike,
            "comment" => Self::Comment,
            "daily_login" => Self::DailyLogin,
            "first_meme" => Self::FirstMeme,
            "viral_meme" => Self::ViralMeme,
            "popular_creator" => Self::PopularCreator,
            "prolific_creator" => Self::ProlificCreator,
            "social_butterfly" => Self::SocialButterfly,
            "trendsetter" => Self::Trendsetter,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateMeme => "create_meme",
            Self::GetLike => "get_like",
            Self::Comment => "comment",
            Self::DailyLogin => "daily_login",
            Self::FirstMeme => "first_meme",
            Self::ViralMeme => "viral_meme",
            Self::PopularCreator => "popular_creator",
            Self::ProlificCreator => "prolific_creator",
            Self::SocialButterfly => "social_butterfly",
            Self::Trendsetter => "trendsetter",
        }
    }

    /// Base point award before any event multiplier.
    pub fn base_award(self) -> i64 {
        match self {
            Self::CreateMeme => 10,
            Self::GetLike => 5,
            Self::Comment => 2,
            Self::DailyLogin => 1,
            Self::FirstMeme => 20,
            Self::ViralMeme => 50,
            Self::PopularCreator => 100,
            Self::ProlificCreator => 75,
            Self::SocialButterfly => 25,
            Self::Trendsetter => 30,
        }
    }
}

/// A named progression tier unlocked by a cumulative point threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankTier {
    pub label: &'static str,
    pub min_points: i64,
}

/// Strictly increasing by `min_points`; the 0 floor guarantees every
/// point total maps to exactly one tier.
pub const RANK_TIERS: &[RankTier] = &[
    RankTier {
        label: "Newbie",
        min_points: 0,
    },
    RankTier {
        label: "Rookie Memer",
        min_points: 50,
    },
    RankTier {
        label: "Meme Enthusiast",
        min_points: 200,
    },
    RankTier {
        label: "Pro Memer",
        min_points: 500,
    },
    RankTier {
        label: "Meme Legend",
        min_points: 1000,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemeMilestone {
    pub name: &'static str,
    pub memes_count: i64,
    pub bonus_points: i64,
}

/// One-time bonuses fired on an exact meme-count match. Exact equality is
/// deliberate: a count that skips past a milestone (bulk import, deletion
/// then re-creation) does not fire it retroactively.
pub const MEME_MILESTONES: &[MemeMilestone] = &[
    MemeMilestone {
        name: "first_five_memes",
        memes_count: 5,
        bonus_points: 25,
    },
    MemeMilestone {
        name: "first_ten_memes",
        memes_count: 10,
        bonus_points: 50,
    },
    MemeMilestone {
        name: "quarter_century",
        memes_count: 25,
        bonus_points: 75,
    },
    MemeMilestone {
        name: "half_century",
        memes_count: 50,
        bonus_points: 100,
    },
    MemeMilestone {
        name: "century_club",
        memes_count: 100,
        bonus_points: 200,
    },
];
