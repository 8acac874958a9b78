mod article;
mod category;
mod draft;

pub use article::{Affiliate, Article, Comment, LikeOutcome};
pub use category::Category;
pub use draft::{AiStatus, Draft};

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
