use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::{Result, StoreError};
use crate::models::{MemeFilter, MemeRow, UserStatsRow};
use crate::repositories::{ContentRepository, StatsRepository, Stores};

/// In-memory store backend.
///
/// Serves as the test fixture and the demo backend for the API binary; a
/// real deployment would put a database behind the same traits. A single
/// write lock per mutation makes `add_points` an atomic increment.
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<i64, UserStatsRow>,
    memes: Vec<MemeRow>,
    comment_counts: HashMap<i64, i64>,
    likes: HashSet<(i64, i64)>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_user(&self, user: UserStatsRow) {
        let mut inner = self.inner.write().await;
        inner.users.insert(user.user_id, user);
    }

    /// Record a new meme and bump the owner's meme count.
    pub async fn record_meme(&self, meme: MemeRow) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.memes.iter().any(|m| m.id == meme.id) {
            return Err(StoreError::Unavailable("duplicate meme id".to_string()));
        }
        match inner.users.get_mut(&meme.user_id) {
            Some(user) => user.memes_count += 1,
            None => return Err(StoreError::NotFound),
        }
        inner.memes.push(meme);
        Ok(())
    }

    /// Remove a meme owned by `owner_id`, shrinking the denormalized
    /// counters. Returns false when no such meme exists.
    pub async fn remove_meme(&self, meme_id: i64, owner_id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner
            .memes
            .iter()
            .position(|m| m.id == meme_id && m.user_id == owner_id)
        else {
            return Ok(false);
        };
        let meme = inner.memes.remove(pos);
        inner.comment_counts.remove(&meme_id);
        inner.likes.retain(|(m, _)| *m != meme_id);
        if let Some(user) = inner.users.get_mut(&owner_id) {
            user.memes_count = (user.memes_count - 1).max(0);
            user.total_likes = (user.total_likes - meme.likes_count).max(0);
        }
        Ok(true)
    }

    /// Like a meme on behalf of `liker_id`. Duplicate likes are rejected;
    /// returns false without touching any counter.
    pub async fn record_like(&self, meme_id: i64, liker_id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;
        if !inner.likes.insert((meme_id, liker_id)) {
            return Ok(false);
        }
        let owner = match inner.memes.iter_mut().find(|m| m.id == meme_id) {
            Some(meme) => {
                meme.likes_count += 1;
                meme.user_id
            }
            None => return Err(StoreError::NotFound),
        };
        if let Some(user) = inner.users.get_mut(&owner) {
            user.total_likes += 1;
        }
        Ok(true)
    }

    /// Record a comment made by `author_id` on a meme.
    pub async fn record_comment(&self, meme_id: i64, author_id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.memes.iter().any(|m| m.id == meme_id) {
            return Err(StoreError::NotFound);
        }
        *inner.comment_counts.entry(meme_id).or_insert(0) += 1;
        if let Some(user) = inner.users.get_mut(&author_id) {
            user.comments_made += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for MemStore {
    async fn fetch(&self, user_id: i64) -> Result<Option<UserStatsRow>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&user_id).cloned())
    }

    async fn add_points(&self, user_id: i64, delta: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&user_id) {
            Some(user) => {
                user.points += delta;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<UserStatsRow>> {
        let inner = self.inner.read().await;
        let mut users: Vec<UserStatsRow> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| b.points.cmp(&a.points).then(a.user_id.cmp(&b.user_id)));
        users.truncate(limit);
        Ok(users)
    }
}

#[async_trait]
impl ContentRepository for MemStore {
    async fn list_memes(&self, filter: MemeFilter) -> Result<Vec<MemeRow>> {
        let inner = self.inner.read().await;
        let mut memes: Vec<MemeRow> = inner
            .memes
            .iter()
            .filter(|m| filter.owner.map_or(true, |owner| m.user_id == owner))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            memes.truncate(limit);
        }
        Ok(memes)
    }

    async fn comments_count_for(&self, meme_id: i64) -> Result<i64> {
        let inner = self.inner.read().await;
        Ok(inner.comment_counts.get(&meme_id).copied().unwrap_or(0))
    }
}

impl Stores for MemStore {
    fn stats(&self) -> &dyn StatsRepository {
        self
    }

    fn content(&self) -> &dyn ContentRepository {
        self
    }
}

pub fn user_row(user_id: i64, username: &str, created_at: DateTime<Utc>) -> UserStatsRow {
    UserStatsRow {
        user_id,
        username: username.to_string(),
        points: 0,
        memes_count: 0,
        total_likes: 0,
        comments_made: 0,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_user(user_id: i64) -> MemStore {
        let store = MemStore::new();
        store.seed_user(user_row(user_id, "tester", Utc::now())).await;
        store
    }

    #[tokio::test]
    async fn add_points_accumulates() {
        let store = MemStore::new();
        store.seed_user(user_row(1, "a", Utc::now())).await;
        store.add_points(1, 10).await.unwrap();
        store.add_points(1, 5).await.unwrap();
        let stats = store.fetch(1).await.unwrap().unwrap();
        assert_eq!(stats.points, 15);
    }

    #[tokio::test]
    async fn add_points_unknown_user_is_not_found() {
        let store = MemStore::new();
        let err = store.add_points(42, 10).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn duplicate_like_is_rejected() {
        let store = store_with_user(1).await;
        store
            .record_meme(MemeRow {
                id: 7,
                user_id: 1,
                likes_count: 0,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        assert!(store.record_like(7, 2).await.unwrap());
        assert!(!store.record_like(7, 2).await.unwrap());
        let stats = store.fetch(1).await.unwrap().unwrap();
        assert_eq!(stats.total_likes, 1);
    }

    #[tokio::test]
    async fn removing_meme_shrinks_counters() {
        let store = store_with_user(1).await;
        store
            .record_meme(MemeRow {
                id: 7,
                user_id: 1,
                likes_count: 0,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        store.record_like(7, 2).await.unwrap();
        assert!(store.remove_meme(7, 1).await.unwrap());
        let stats = store.fetch(1).await.unwrap().unwrap();
        assert_eq!(stats.memes_count, 0);
        assert_eq!(stats.total_likes, 0);
        assert!(store
            .list_memes(MemeFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn leaderboard_sorts_by_points() {
        let store = MemStore::new();
        for (id, points) in [(1, 30), (2, 90), (3, 60)] {
            let mut row = user_row(id, &format!("u{id}"), Utc::now());
            row.points = points;
            store.seed_user(row).await;
        }
        let top = store.leaderboard(2).await.unwrap();
        assert_eq!(
            top.iter().map(|u| u.user_id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }
}
