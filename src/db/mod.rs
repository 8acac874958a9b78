mod bookmarks;
mod engagement;
mod memory;
mod repository;
mod schema;
mod seed;
mod sqlite;
mod store;

pub use bookmarks::BookmarkTracker;
pub use engagement::EngagementTracker;
pub use memory::MemoryStore;
pub use repository::ArticleRepository;
pub use sqlite::SqliteStore;
pub use store::Store;
