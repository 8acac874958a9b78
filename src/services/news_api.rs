use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Article;

/// Optional news backend the local cache syncs against.
#[async_trait]
pub trait RemoteNews: Send + Sync {
    async fn fetch_news(&self) -> Result<Vec<Article>>;
    async fn publish(&self, article: &Article) -> Result<()>;
}

pub struct NewsApiClient {
    client: Client,
    news_url: Url,
}

impl NewsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "news_api_url is not a base URL: {base_url}"
            )));
        }
        let news_url = Url::parse(&format!("{}/news", base.as_str().trim_end_matches('/')))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent("bongo-news/1.0")
            .build()?;

        Ok(Self { client, news_url })
    }

    pub fn news_url(&self) -> &Url {
        &self.news_url
    }
}

#[async_trait]
impl RemoteNews for NewsApiClient {
    async fn fetch_news(&self) -> Result<Vec<Article>> {
        let response = self.client.get(self.news_url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Failed to fetch news: HTTP {}", response.status()).into());
        }

        let articles: Vec<Article> = response.json().await?;
        Ok(articles)
    }

    async fn publish(&self, article: &Article) -> Result<()> {
        let response = self
            .client
            .post(self.news_url.clone())
            .json(article)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!("HTTP {status}: {body}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn news_url_joins_base_with_and_without_slash() {
        let timeout = Duration::from_millis(2000);

        let client = NewsApiClient::new("http://localhost:8080/api", timeout).unwrap();
        assert_eq!(client.news_url().as_str(), "http://localhost:8080/api/news");

        let client = NewsApiClient::new("http://localhost:8080/api/", timeout).unwrap();
        assert_eq!(client.news_url().as_str(), "http://localhost:8080/api/news");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let timeout = Duration::from_millis(2000);
        assert!(NewsApiClient::new("not a url", timeout).is_err());
        assert!(NewsApiClient::new("mailto:desk@example.com", timeout).is_err());
    }
}
