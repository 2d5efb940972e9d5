/// Default page size when listing notifications
pub const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;

/// Number of reviews returned in the summary's recent list
pub const RECENT_REVIEWS_COUNT: usize = 5;

/// Reviewer feedback lines appended to a goal's comments carry this prefix
pub const REVIEWER_COMMENT_PREFIX: &str = "[Reviewer]";
