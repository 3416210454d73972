use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use engine::{Awarder, EngineError};
use store::{
    ContentRepository, MemeFilter, MemeRow, StatsRepository, StoreError, Stores, UserStatsRow,
};

// --- Counting test double for the store traits ---

#[derive(Default)]
struct TestStore {
    users: Mutex<HashMap<i64, UserStatsRow>>,
    fetch_calls: AtomicUsize,
    add_points_calls: AtomicUsize,
    // Calls with a zero-based index at or past this fail.
    fail_add_points_from: Option<usize>,
}

impl TestStore {
    fn with_user(user: UserStatsRow) -> Self {
        let store = Self::default();
        store.users.lock().unwrap().insert(user.user_id, user);
        store
    }

    fn add_points_count(&self) -> usize {
        self.add_points_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StatsRepository for TestStore {
    async fn fetch(&self, user_id: i64) -> store::errors::Result<Option<UserStatsRow>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn add_points(&self, user_id: i64, delta: i64) -> store::errors::Result<()> {
        let call = self.add_points_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_add_points_from.is_some_and(|from| call >= from) {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        user.points += delta;
        Ok(())
    }

    async fn leaderboard(&self, _limit: usize) -> store::errors::Result<Vec<UserStatsRow>> {
        panic!("unused")
    }
}

#[async_trait::async_trait]
impl ContentRepository for TestStore {
    async fn list_memes(&self, _filter: MemeFilter) -> store::errors::Result<Vec<MemeRow>> {
        panic!("unused")
    }

    async fn comments_count_for(&self, _meme_id: i64) -> store::errors::Result<i64> {
        panic!("unused")
    }
}

impl Stores for TestStore {
    fn stats(&self) -> &dyn StatsRepository {
        self
    }

    fn content(&self) -> &dyn ContentRepository {
        self
    }
}

fn user(points: i64, memes_count: i64) -> UserStatsRow {
    UserStatsRow {
        user_id: 7,
        username: "tester".to_string(),
        points,
        memes_count,
        total_likes: 0,
        comments_made: 0,
        created_at: Utc::now(),
    }
}

// --- Tests ---

#[tokio::test]
async fn unknown_kind_fails_before_any_store_call() {
    let store = Arc::new(TestStore::with_user(user(0, 0)));
    let awarder = Awarder::new(store.clone());

    let err = awarder.award(7, "nonexistent_kind", 1.0).await.unwrap_err();
    assert!(matches!(err, EngineError::UnknownActionKind(k) if k == "nonexistent_kind"));
    assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.add_points_count(), 0);
}

#[tokio::test]
async fn missing_user_fails_without_mutation() {
    let store = Arc::new(TestStore::default());
    let awarder = Awarder::new(store.clone());

    let err = awarder.award(99, "create_meme", 1.0).await.unwrap_err();
    assert!(matches!(err, EngineError::UserNotFound(99)));
    assert_eq!(store.add_points_count(), 0);
}

#[tokio::test]
async fn award_updates_rank_and_reports_new_badges() {
    // 40 + 10 crosses both the Rookie Memer threshold and the Early Bird
    // point proxy, so both must show up as newly unlocked.
    let store = Arc::new(TestStore::with_user(user(40, 1)));
    let awarder = Awarder::new(store.clone());

    let outcome = awarder.award(7, "create_meme", 1.0).await.unwrap();
    assert_eq!(outcome.awarded_points, 10);
    assert_eq!(outcome.new_rank, "Rookie Memer");
    let new_names: Vec<&str> = outcome.newly_earned_badges.iter().map(|b| b.name).collect();
    assert_eq!(new_names, vec!["Early Bird"]);
    assert!(outcome.milestone.is_none());
    assert_eq!(store.add_points_count(), 1);
}

#[tokio::test]
async fn multiplier_floors_the_award() {
    let store = Arc::new(TestStore::with_user(user(0, 0)));
    let awarder = Awarder::new(store.clone());

    let outcome = awarder.award(7, "get_like", 1.5).await.unwrap();
    assert_eq!(outcome.awarded_points, 7);
    let stats = store.stats().fetch(7).await.unwrap().unwrap();
    assert_eq!(stats.points, 7);
}

#[tokio::test]
async fn exact_meme_count_fires_milestone_bonus() {
    let store = Arc::new(TestStore::with_user(user(100, 5)));
    let awarder = Awarder::new(store.clone());

    let outcome = awarder.award(7, "create_meme", 1.0).await.unwrap();
    let milestone = outcome.milestone.expect("milestone should fire at 5 memes");
    assert_eq!(milestone.name, "first_five_memes");
    assert_eq!(milestone.bonus_points, 25);
    assert!(milestone.applied);

    // Base award and bonus are two distinct mutations.
    assert_eq!(store.add_points_count(), 2);
    let stats = store.stats().fetch(7).await.unwrap().unwrap();
    assert_eq!(stats.points, 100 + 10 + 25);
}

#[tokio::test]
async fn skipped_milestone_does_not_fire() {
    // Count went 4 -> 6 without ever resting at 5; the 5-meme bonus is
    // lost by design, not fired late.
    let store = Arc::new(TestStore::with_user(user(100, 6)));
    let awarder = Awarder::new(store.clone());

    let outcome = awarder.award(7, "create_meme", 1.0).await.unwrap();
    assert!(outcome.milestone.is_none());
    assert_eq!(store.add_points_count(), 1);
}

#[tokio::test]
async fn base_mutation_failure_aborts_the_award() {
    let mut store = TestStore::with_user(user(100, 5));
    store.fail_add_points_from = Some(0);
    let store = Arc::new(store);
    let awarder = Awarder::new(store.clone());

    let err = awarder.award(7, "create_meme", 1.0).await.unwrap_err();
    assert!(matches!(err, EngineError::Store(_)));
    // One failed attempt; no milestone evaluation afterwards.
    assert_eq!(store.add_points_count(), 1);
    let stats = store.stats().fetch(7).await.unwrap().unwrap();
    assert_eq!(stats.points, 100);
}

#[tokio::test]
async fn bonus_failure_is_reported_but_base_award_stands() {
    let mut store = TestStore::with_user(user(100, 5));
    store.fail_add_points_from = Some(1);
    let store = Arc::new(store);
    let awarder = Awarder::new(store.clone());

    let outcome = awarder.award(7, "create_meme", 1.0).await.unwrap();
    assert_eq!(outcome.awarded_points, 10);
    let milestone = outcome.milestone.expect("milestone still reported");
    assert!(!milestone.applied);

    let stats = store.stats().fetch(7).await.unwrap().unwrap();
    assert_eq!(stats.points, 110);
}
