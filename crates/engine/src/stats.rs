use store::UserStatsRow;

use crate::error::{EngineError, Result};

/// Reject a snapshot with a negative counter instead of clamping it, so
/// corrupt upstream data is caught at the boundary.
pub fn validate(stats: &UserStatsRow) -> Result<()> {
    let counters = [
        ("points", stats.points),
        ("memes_count", stats.memes_count),
        ("total_likes", stats.total_likes),
        ("comments_made", stats.comments_made),
    ];
    for (field, value) in counters {
        if value < 0 {
            return Err(EngineError::MalformedStats { field, value });
        }
    }
    Ok(())
}
