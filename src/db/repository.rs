use std::sync::Arc;
use std::time::Duration;

use crate::models::{now_millis, Article};
use crate::services::RemoteNews;

use super::seed::sample_articles;
use super::store::{load, save, Store, ARTICLES_KEY};

/// Two-tier article repository: optional remote backend in front of the
/// local cache. Remote failures never reach the caller.
#[derive(Clone)]
pub struct ArticleRepository {
    store: Arc<dyn Store>,
    remote: Option<Arc<dyn RemoteNews>>,
    remote_timeout: Duration,
}

impl ArticleRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            remote: None,
            remote_timeout: Duration::from_millis(2000),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteNews>, timeout: Duration) -> Self {
        self.remote = Some(remote);
        self.remote_timeout = timeout;
        self
    }

    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    /// Fetches from the remote when configured, falling back to the local
    /// cache, and finally to the built-in samples (which are then persisted).
    pub async fn list(&self) -> Vec<Article> {
        if let Some(articles) = self.fetch_remote().await {
            save_articles(self.store.as_ref(), &articles);
            return articles;
        }

        match load::<Vec<Article>>(self.store.as_ref(), ARTICLES_KEY) {
            Ok(Some(articles)) => articles,
            Ok(None) => self.seed(),
            Err(e) => {
                tracing::warn!("Local article cache unreadable, showing samples: {}", e);
                sample_articles(now_millis())
            }
        }
    }

    async fn fetch_remote(&self) -> Option<Vec<Article>> {
        let remote = self.remote.as_ref()?;

        match tokio::time::timeout(self.remote_timeout, remote.fetch_news()).await {
            Ok(Ok(articles)) if !articles.is_empty() => {
                tracing::debug!("Fetched {} articles from news API", articles.len());
                Some(articles)
            }
            Ok(Ok(_)) => {
                tracing::debug!("News API returned no articles, using local cache");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!("News API unavailable, using local cache: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    "News API timed out after {:?}, using local cache",
                    self.remote_timeout
                );
                None
            }
        }
    }

    fn seed(&self) -> Vec<Article> {
        let articles = sample_articles(now_millis());
        save_articles(self.store.as_ref(), &articles);
        articles
    }

    /// Stores a new article at the head of the local collection. The remote
    /// copy is posted in the background and its outcome only logged.
    pub async fn create(&self, mut article: Article) -> Article {
        if article.id.trim().is_empty() {
            article.id = now_millis().to_string();
        }

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let outgoing = article.clone();
            tokio::spawn(async move {
                match remote.publish(&outgoing).await {
                    Ok(()) => tracing::debug!("Published {} to news API", outgoing.id),
                    Err(e) => tracing::warn!("Failed to publish {} to news API: {}", outgoing.id, e),
                }
            });
        }

        match load_articles(self.store.as_ref()) {
            Some(mut articles) => {
                articles.insert(0, article.clone());
                save_articles(self.store.as_ref(), &articles);
            }
            None => tracing::warn!("Article {} not saved locally", article.id),
        }
        article
    }

    pub fn get_by_id(&self, id: &str) -> Option<Article> {
        self.cached().into_iter().find(|a| a.id == id)
    }

    /// Local collection, or the samples (unsaved) when nothing is stored yet
    /// or the stored record cannot be read.
    pub fn cached(&self) -> Vec<Article> {
        load_articles(self.store.as_ref()).unwrap_or_else(|| sample_articles(now_millis()))
    }
}

/// Stored collection, or the samples when the key is absent. `None` means a
/// record exists but cannot be read, and must not be written over.
pub(crate) fn load_articles(store: &dyn Store) -> Option<Vec<Article>> {
    match load::<Vec<Article>>(store, ARTICLES_KEY) {
        Ok(Some(articles)) => Some(articles),
        Ok(None) => Some(sample_articles(now_millis())),
        Err(e) => {
            tracing::warn!("Local article cache unreadable: {}", e);
            None
        }
    }
}

pub(crate) fn save_articles(store: &dyn Store, articles: &[Article]) {
    if let Err(e) = save(store, ARTICLES_KEY, articles) {
        tracing::warn!("Failed to write article cache: {}", e);
    }
}
