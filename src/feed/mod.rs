mod views;

pub use views::{for_category, hero, related, search, sort_by_recency};
