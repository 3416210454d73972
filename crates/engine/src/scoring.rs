/// Decayed engagement score used only to order the feed. Only meaningful
/// relative to other items scored at the same instant.
///
/// Items at or below zero age get the raw engagement times the boost
/// factor, so brand-new content surfaces immediately regardless of how
/// little engagement it has. After that, decay halves the score around
/// the one-day mark and approaches (but never reaches) zero.
pub fn trending_score(likes: i64, comments: i64, age_hours: f64) -> f64 {
    const BOOST: f64 = 10.0;
    const DECAY_HOURS: f64 = 24.0;

    let engagement = (likes + comments) as f64;
    if age_hours <= 0.0 {
        return engagement * BOOST;
    }
    let decay = 1.0 / (1.0 + age_hours / DECAY_HOURS);
    engagement * decay * BOOST
}

/// Engagement per hour of life, with the first hour counted in full.
pub fn engagement_rate(likes: i64, comments: i64, age_hours: f64) -> f64 {
    if age_hours <= 0.0 {
        return 0.0;
    }
    (likes + comments) as f64 / age_hours.max(1.0)
}
