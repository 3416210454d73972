use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use store::{Stores, UserStatsRow};
use tracing::{instrument, warn};

use crate::badges::{earned_badges, Badge};
use crate::error::{EngineError, Result};
use crate::progression::rank_of;
use crate::stats::validate;
use crate::tables::{ActionKind, MEME_MILESTONES};

/// A milestone bonus triggered by this award. `applied` is false when the
/// bonus point mutation failed; the base award's success still stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneBonus {
    pub name: &'static str,
    pub memes_count: i64,
    pub bonus_points: i64,
    pub applied: bool,
}

#[derive(Debug, Serialize)]
pub struct AwardOutcome {
    pub action: ActionKind,
    pub awarded_points: i64,
    pub new_rank: &'static str,
    pub newly_earned_badges: Vec<&'static Badge>,
    pub milestone: Option<MilestoneBonus>,
}

/// The only engine component with a side effect: it turns an activity
/// into a point mutation on the external store, then re-derives rank and
/// badges from the updated snapshot.
///
/// The base award and a milestone bonus are two independent store calls,
/// not a transaction. Serializing concurrent awards for one user is the
/// store's job (its `add_points` is an atomic increment); the engine
/// holds no locks.
pub struct Awarder {
    stores: Arc<dyn Stores>,
}

impl Awarder {
    pub fn new(stores: Arc<dyn Stores>) -> Self {
        Self { stores }
    }

    #[instrument(skip(self))]
    pub async fn award(&self, user_id: i64, kind: &str, multiplier: f64) -> Result<AwardOutcome> {
        // Resolve the action before touching the store; an unknown kind
        // must cause zero mutations.
        let action = ActionKind::parse(kind)
            .ok_or_else(|| EngineError::UnknownActionKind(kind.to_string()))?;
        let points = (action.base_award() as f64 * multiplier).floor() as i64;

        let before = self.fetch_validated(user_id).await?;
        let badges_before: HashSet<&str> =
            earned_badges(&before).iter().map(|b| b.name).collect();

        // Failure here aborts the award outright; badge and milestone
        // evaluation never run against state we did not commit.
        self.stores.stats().add_points(user_id, points).await?;

        let after = self.fetch_validated(user_id).await?;
        let new_rank = rank_of(after.points).label;
        let newly_earned_badges: Vec<&'static Badge> = earned_badges(&after)
            .into_iter()
            .filter(|badge| !badges_before.contains(badge.name))
            .collect();

        let milestone = self.apply_milestone(&after).await;

        Ok(AwardOutcome {
            action,
            awarded_points: points,
            new_rank,
            newly_earned_badges,
            milestone,
        })
    }

    /// Exact-equality milestone check on the post-award meme count. A
    /// count that jumped past a milestone does not fire it.
    async fn apply_milestone(&self, after: &UserStatsRow) -> Option<MilestoneBonus> {
        let milestone = MEME_MILESTONES
            .iter()
            .find(|m| m.memes_count == after.memes_count)?;

        let applied = match self
            .stores
            .stats()
            .add_points(after.user_id, milestone.bonus_points)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    user_id = after.user_id,
                    milestone = milestone.name,
                    error = %err,
                    "milestone bonus mutation failed; base award stands"
                );
                false
            }
        };

        Some(MilestoneBonus {
            name: milestone.name,
            memes_count: milestone.memes_count,
            bonus_points: milestone.bonus_points,
            applied,
        })
    }

    async fn fetch_validated(&self, user_id: i64) -> Result<UserStatsRow> {
        let stats = self
            .stores
            .stats()
            .fetch(user_id)
            .await?
            .ok_or(EngineError::UserNotFound(user_id))?;
        validate(&stats)?;
        Ok(stats)
    }
}
