use std::sync::Arc;

use crate::models::{Article, Comment, LikeOutcome};

use super::repository::{load_articles, save_articles};
use super::store::{load_id_set, save_id_set, Store, LIKED_KEY};

/// Views, likes and comments. Every mutation rewrites the whole collection.
#[derive(Clone)]
pub struct EngagementTracker {
    store: Arc<dyn Store>,
}

impl EngagementTracker {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Adds one view. Repeated calls are not deduplicated.
    pub fn increment_view(&self, id: &str) {
        let Some(mut articles) = load_articles(self.store.as_ref()) else {
            return;
        };
        let Some(article) = articles.iter_mut().find(|a| a.id == id) else {
            tracing::debug!("View for unknown article {}", id);
            return;
        };
        article.views = article.views.saturating_add(1);
        save_articles(self.store.as_ref(), &articles);
    }

    /// Flips this device's like on an article. An unknown id, or an
    /// unreadable collection, leaves everything untouched and reports a zero
    /// count.
    pub fn toggle_like(&self, id: &str) -> LikeOutcome {
        let mut liked = load_id_set(self.store.as_ref(), LIKED_KEY);
        let was_liked = liked.iter().any(|l| l == id);

        let mut articles = load_articles(self.store.as_ref()).unwrap_or_default();
        let Some(article) = articles.iter_mut().find(|a| a.id == id) else {
            tracing::debug!("Like for unknown article {}", id);
            return LikeOutcome {
                is_liked: was_liked,
                new_count: 0,
            };
        };

        article.likes = if was_liked {
            article.likes.saturating_sub(1)
        } else {
            article.likes.saturating_add(1)
        };
        let new_count = article.likes;
        save_articles(self.store.as_ref(), &articles);

        if was_liked {
            liked.retain(|l| l != id);
        } else {
            liked.push(id.to_string());
        }
        save_id_set(self.store.as_ref(), LIKED_KEY, &liked);

        LikeOutcome {
            is_liked: !was_liked,
            new_count,
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        load_id_set(self.store.as_ref(), LIKED_KEY)
            .iter()
            .any(|l| l == id)
    }

    /// Prepends a comment. Returns `None` without writing when the article
    /// does not exist.
    pub fn add_comment(&self, id: &str, mut comment: Comment) -> Option<Article> {
        let mut articles = load_articles(self.store.as_ref())?;
        let article = articles.iter_mut().find(|a| a.id == id)?;

        if article.comments.iter().any(|c| c.id == comment.id) {
            let base = comment.id.clone();
            let mut n = 1;
            while article.comments.iter().any(|c| c.id == comment.id) {
                comment.id = format!("{base}-{n}");
                n += 1;
            }
        }

        article.comments.insert(0, comment);
        let updated = article.clone();
        save_articles(self.store.as_ref(), &articles);
        Some(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{load, save, ARTICLES_KEY};
    use crate::db::seed::sample_articles;
    use crate::db::MemoryStore;

    fn seeded() -> (EngagementTracker, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        save(store.as_ref(), ARTICLES_KEY, &sample_articles(10_000_000)).unwrap();
        (EngagementTracker::new(store.clone()), store)
    }

    fn stored(store: &MemoryStore) -> Vec<Article> {
        load(store, ARTICLES_KEY).unwrap().unwrap()
    }

    #[test]
    fn two_like_toggles_restore_state_and_count() {
        let (tracker, store) = seeded();
        let before = stored(&store)[0].likes;

        let first = tracker.toggle_like("1");
        assert!(first.is_liked);
        assert_eq!(first.new_count, before + 1);
        assert!(tracker.is_liked("1"));

        let second = tracker.toggle_like("1");
        assert!(!second.is_liked);
        assert_eq!(second.new_count, before);
        assert!(!tracker.is_liked("1"));
        assert_eq!(stored(&store)[0].likes, before);
    }

    #[test]
    fn unlike_floors_at_zero() {
        let (tracker, store) = seeded();
        // liked on this device, but the stored count is already zero
        save(store.as_ref(), LIKED_KEY, &vec!["2".to_string()]).unwrap();

        let outcome = tracker.toggle_like("2");
        assert!(!outcome.is_liked);
        assert_eq!(outcome.new_count, 0);
        assert_eq!(stored(&store)[1].likes, 0);
    }

    #[test]
    fn like_on_unknown_article_changes_nothing() {
        let (tracker, _store) = seeded();
        let outcome = tracker.toggle_like("missing");
        assert_eq!(
            outcome,
            LikeOutcome {
                is_liked: false,
                new_count: 0
            }
        );
        assert!(!tracker.is_liked("missing"));
    }

    #[test]
    fn views_increase_by_exactly_k_for_one_article() {
        let (tracker, store) = seeded();
        let before = stored(&store);

        for _ in 0..5 {
            tracker.increment_view("3");
        }

        let after = stored(&store);
        for (b, a) in before.iter().zip(after.iter()) {
            if a.id == "3" {
                assert_eq!(a.views, b.views + 5);
            } else {
                assert_eq!(a.views, b.views);
                assert_eq!(a.likes, b.likes);
            }
        }
    }

    #[test]
    fn view_on_unknown_article_does_not_write() {
        let store = Arc::new(MemoryStore::new());
        let tracker = EngagementTracker::new(store.clone());
        tracker.increment_view("missing");
        assert!(store.get(ARTICLES_KEY).unwrap().is_none());

        let (tracker, store) = seeded();
        let before = stored(&store);
        tracker.increment_view("missing");
        assert_eq!(stored(&store), before);
    }

    #[test]
    fn unreadable_collection_survives_engagement() {
        let store = Arc::new(MemoryStore::new());
        let record = serde_json::json!([{
            "id": "u1",
            "headline": "খেলা",
            "previewText": "p",
            "content": "c",
            "category": "Sports",
            "createdAt": 1
        }]);
        store.set(ARTICLES_KEY, &record).unwrap();
        let tracker = EngagementTracker::new(store.clone());

        tracker.increment_view("1");
        assert_eq!(tracker.toggle_like("1").new_count, 0);
        assert!(!tracker.is_liked("1"));
        assert!(tracker.add_comment("1", Comment::new("a", "b", 1)).is_none());

        assert_eq!(store.get(ARTICLES_KEY).unwrap(), Some(record));
    }

    #[test]
    fn comments_are_prepended() {
        let (tracker, _store) = seeded();

        tracker
            .add_comment("4", Comment::new("Rina", "প্রথম", 100))
            .unwrap();
        let updated = tracker
            .add_comment("4", Comment::new("Amit", "দ্বিতীয়", 200))
            .unwrap();

        assert_eq!(updated.comments.len(), 2);
        assert_eq!(updated.comments[0].user, "Amit");
        assert_eq!(updated.comments[1].user, "Rina");
    }

    #[test]
    fn comment_ids_stay_unique_within_an_article() {
        let (tracker, _store) = seeded();

        tracker.add_comment("4", Comment::new("a", "x", 5)).unwrap();
        let updated = tracker.add_comment("4", Comment::new("b", "y", 5)).unwrap();

        assert_eq!(updated.comments[0].id, "5-1");
        assert_eq!(updated.comments[1].id, "5");
    }

    #[test]
    fn comment_on_unknown_article_does_not_write() {
        let store = Arc::new(MemoryStore::new());
        let tracker = EngagementTracker::new(store.clone());

        let result = tracker.add_comment("nope", Comment::new("a", "b", 1));
        assert!(result.is_none());
        assert!(store.get(ARTICLES_KEY).unwrap().is_none());

        let (tracker, store) = seeded();
        let before = stored(&store);
        assert!(tracker.add_comment("nope", Comment::new("a", "b", 1)).is_none());
        assert_eq!(stored(&store), before);
    }
}
