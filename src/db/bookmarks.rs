use std::sync::Arc;

use crate::models::Article;

use super::repository::load_articles;
use super::store::{load_id_set, save_id_set, Store, BOOKMARKS_KEY};

#[derive(Clone)]
pub struct BookmarkTracker {
    store: Arc<dyn Store>,
}

impl BookmarkTracker {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Returns `true` when the article is bookmarked after the call.
    pub fn toggle(&self, id: &str) -> bool {
        let mut ids = self.ids();
        let was_bookmarked = ids.iter().any(|b| b == id);

        if was_bookmarked {
            ids.retain(|b| b != id);
        } else {
            ids.insert(0, id.to_string());
        }
        save_id_set(self.store.as_ref(), BOOKMARKS_KEY, &ids);

        !was_bookmarked
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.ids().iter().any(|b| b == id)
    }

    /// Newest first.
    pub fn ids(&self) -> Vec<String> {
        load_id_set(self.store.as_ref(), BOOKMARKS_KEY)
    }

    /// Bookmarked articles, newest bookmark first. Ids whose article no
    /// longer exists are skipped.
    pub fn list_bookmarked_articles(&self) -> Vec<Article> {
        let articles = load_articles(self.store.as_ref()).unwrap_or_default();
        self.ids()
            .iter()
            .filter_map(|id| articles.iter().find(|a| &a.id == id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{save, ARTICLES_KEY};
    use crate::db::seed::sample_articles;
    use crate::db::MemoryStore;

    fn tracker() -> BookmarkTracker {
        let store = Arc::new(MemoryStore::new());
        save(store.as_ref(), ARTICLES_KEY, &sample_articles(10_000_000)).unwrap();
        BookmarkTracker::new(store)
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let bookmarks = tracker();
        assert!(!bookmarks.is_bookmarked("2"));

        assert!(bookmarks.toggle("2"));
        assert!(bookmarks.is_bookmarked("2"));

        assert!(!bookmarks.toggle("2"));
        assert!(!bookmarks.is_bookmarked("2"));
        assert!(bookmarks.ids().is_empty());
    }

    #[test]
    fn newest_bookmark_is_listed_first() {
        let bookmarks = tracker();
        bookmarks.toggle("5");
        bookmarks.toggle("1");

        assert_eq!(bookmarks.ids(), vec!["1".to_string(), "5".to_string()]);
        let listed: Vec<_> = bookmarks
            .list_bookmarked_articles()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(listed, vec!["1".to_string(), "5".to_string()]);
    }

    #[test]
    fn dangling_bookmarks_are_dropped_from_listing() {
        let bookmarks = tracker();
        bookmarks.toggle("deleted-article");
        bookmarks.toggle("7");

        let listed = bookmarks.list_bookmarked_articles();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "7");
        assert!(bookmarks.is_bookmarked("deleted-article"));
    }
}
