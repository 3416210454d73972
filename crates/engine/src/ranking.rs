use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use store::MemeRow;

use crate::scoring::trending_score;

/// Feed ordering modes. `Random` carries its seed so a shuffle is always
/// reproducible; there is no path through an unseeded global generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOrder {
    Latest,
    MostLiked,
    Trending,
    Random { seed: u64 },
}

impl FeedOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::MostLiked => "most_liked",
            Self::Trending => "trending",
            Self::Random { .. } => "random",
        }
    }
}

/// A meme paired with the transient trending score derived for display.
/// The input row itself is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMeme {
    #[serde(flatten)]
    pub meme: MemeRow,
    pub trending_score: Option<f64>,
}

/// Order a feed without touching the input. All sorts are stable (equal
/// keys keep their input order), so re-sorting sorted input is a no-op
/// and pagination stays reproducible. A meme missing from
/// `comment_counts` reads as having zero comments.
pub fn rank_feed(
    items: &[MemeRow],
    comment_counts: &HashMap<i64, i64>,
    order: FeedOrder,
    now: DateTime<Utc>,
) -> Vec<RankedMeme> {
    let mut ranked: Vec<RankedMeme> = items
        .iter()
        .map(|meme| RankedMeme {
            meme: meme.clone(),
            trending_score: None,
        })
        .collect();

    match order {
        FeedOrder::Latest => {
            ranked.sort_by(|a, b| b.meme.created_at.cmp(&a.meme.created_at));
        }
        FeedOrder::MostLiked => {
            ranked.sort_by(|a, b| b.meme.likes_count.cmp(&a.meme.likes_count));
        }
        FeedOrder::Trending => {
            for item in &mut ranked {
                let comments = comment_counts.get(&item.meme.id).copied().unwrap_or(0);
                let age_hours = (now - item.meme.created_at).num_seconds() as f64 / 3600.0;
                item.trending_score =
                    Some(trending_score(item.meme.likes_count, comments, age_hours));
            }
            ranked.sort_by(|a, b| {
                let a_score = a.trending_score.unwrap_or(0.0);
                let b_score = b.trending_score.unwrap_or(0.0);
                b_score.total_cmp(&a_score)
            });
        }
        FeedOrder::Random { seed } => {
            let mut rng = fastrand::Rng::with_seed(seed);
            rng.shuffle(&mut ranked);
        }
    }

    ranked
}

/// Featured picks: the trending order, preferring memes from owners not
/// yet featured until half the slots are filled.
pub fn featured(
    items: &[MemeRow],
    comment_counts: &HashMap<i64, i64>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<RankedMeme> {
    let trending = rank_feed(items, comment_counts, FeedOrder::Trending, now);

    let mut picks: Vec<RankedMeme> = Vec::with_capacity(limit);
    let mut seen_owners: HashSet<i64> = HashSet::new();
    for item in trending {
        if picks.len() >= limit {
            break;
        }
        if seen_owners.insert(item.meme.user_id) || picks.len() < limit / 2 {
            picks.push(item);
        }
    }
    picks
}
