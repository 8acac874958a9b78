//! Admin editing session: authentication, draft fields, AI-assisted
//! research and publishing through the repository.

use url::Url;

use crate::db::ArticleRepository;
use crate::error::{AppError, Result};
use crate::models::{Affiliate, Article, Category, Draft};

const PREVIEW_CHARS: usize = 100;
const WORDS_PER_MINUTE: usize = 200;
const DEFAULT_LOCATION: &str = "West Bengal";
const DEFAULT_AFFILIATE_TEXT: &str = "Buy Now";

/// Field of the draft that a text prompt is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Topic,
    Headline,
    Content,
    Preview,
    Location,
    ImageUrl,
    AffiliateLink,
    AffiliateText,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Topic => "Research topic",
            DraftField::Headline => "Headline",
            DraftField::Content => "Content",
            DraftField::Preview => "Short preview",
            DraftField::Location => "Specific location",
            DraftField::ImageUrl => "Image URL",
            DraftField::AffiliateLink => "Affiliate link",
            DraftField::AffiliateText => "Affiliate button text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDraft {
    pub topic: String,
    pub headline: String,
    pub content: String,
    pub preview: String,
    pub category: Category,
    pub location: String,
    pub image_url: String,
    pub sponsored: bool,
    pub affiliate_link: String,
    pub affiliate_text: String,
    pub sources: Vec<String>,
}

impl Default for ArticleDraft {
    fn default() -> Self {
        Self {
            topic: String::new(),
            headline: String::new(),
            content: String::new(),
            preview: String::new(),
            category: Category::Breaking,
            location: String::new(),
            image_url: String::new(),
            sponsored: false,
            affiliate_link: String::new(),
            affiliate_text: String::new(),
            sources: Vec::new(),
        }
    }
}

impl ArticleDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Topic => &self.topic,
            DraftField::Headline => &self.headline,
            DraftField::Content => &self.content,
            DraftField::Preview => &self.preview,
            DraftField::Location => &self.location,
            DraftField::ImageUrl => &self.image_url,
            DraftField::AffiliateLink => &self.affiliate_link,
            DraftField::AffiliateText => &self.affiliate_text,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Topic => &mut self.topic,
            DraftField::Headline => &mut self.headline,
            DraftField::Content => &mut self.content,
            DraftField::Preview => &mut self.preview,
            DraftField::Location => &mut self.location,
            DraftField::ImageUrl => &mut self.image_url,
            DraftField::AffiliateLink => &mut self.affiliate_link,
            DraftField::AffiliateText => &mut self.affiliate_text,
        };
        *slot = value;
    }

    /// Fills content, sources and preview from a research result, and guesses
    /// a location from the text.
    pub fn apply_research(&mut self, draft: Draft) {
        self.preview = preview_of(&draft.content);
        if let Some(location) = guess_location(&draft.content) {
            self.location = location.to_string();
        }
        self.content = draft.content;
        self.sources = draft.sources;
    }

    pub fn fill_preview(&mut self) {
        if !self.content.is_empty() {
            self.preview = preview_of(&self.content);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.headline.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in Headline and Content".to_string(),
            ));
        }

        let link = self.affiliate_link.trim();
        if !link.is_empty() {
            Url::parse(link)
                .map_err(|e| AppError::Validation(format!("Invalid affiliate link: {e}")))?;
        }

        Ok(())
    }

    /// Builds the article to publish. `now` is epoch milliseconds.
    pub fn build_article(&self, now: i64) -> Result<Article> {
        self.validate()?;

        let preview = if self.preview.trim().is_empty() {
            preview_of(&self.content)
        } else {
            self.preview.clone()
        };
        let location = non_empty(&self.location).unwrap_or(DEFAULT_LOCATION);
        let image_url = match non_empty(&self.image_url) {
            Some(url) => url.to_string(),
            None => format!("https://picsum.photos/800/400?random={now}"),
        };
        let affiliate = non_empty(&self.affiliate_link).map(|link| Affiliate {
            link: link.to_string(),
            text: non_empty(&self.affiliate_text)
                .unwrap_or(DEFAULT_AFFILIATE_TEXT)
                .to_string(),
        });

        Ok(Article {
            id: now.to_string(),
            headline: self.headline.trim().to_string(),
            preview_text: preview,
            content: self.content.clone(),
            category: self.category,
            location: Some(location.to_string()),
            image_url: Some(image_url),
            created_at: now,
            read_time: Some(read_time(&self.content)),
            views: 0,
            likes: 0,
            comments: Vec::new(),
            is_sponsored: Some(self.sponsored),
            affiliate,
        })
    }
}

/// Admin session. Nothing can be published before `authenticate` succeeds.
pub struct Editor {
    password: String,
    authenticated: bool,
    pub draft: ArticleDraft,
}

impl Editor {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            authenticated: false,
            draft: ArticleDraft::default(),
        }
    }

    pub fn authenticate(&mut self, attempt: &str) -> Result<()> {
        if attempt == self.password {
            self.authenticated = true;
            Ok(())
        } else {
            tracing::warn!("Rejected admin login attempt");
            Err(AppError::Unauthorized)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    /// Validates and stores the draft, then starts a fresh one.
    pub async fn publish(&mut self, repository: &ArticleRepository, now: i64) -> Result<Article> {
        if !self.authenticated {
            return Err(AppError::Unauthorized);
        }

        let article = self.draft.build_article(now)?;
        let stored = repository.create(article).await;
        tracing::info!("Published article {}", stored.id);
        self.draft = ArticleDraft::default();
        Ok(stored)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// First 100 characters followed by an ellipsis.
pub fn preview_of(content: &str) -> String {
    let head: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Estimate at 200 words per minute, rounded up.
pub fn read_time(content: &str) -> String {
    let words = content.split(' ').count();
    format!("{} min", words.div_ceil(WORDS_PER_MINUTE))
}

/// A later match wins, so district-level text overrides a Kolkata mention.
pub fn guess_location(content: &str) -> Option<&'static str> {
    let mut location = None;
    if content.contains("কলকাতা") {
        location = Some("Kolkata");
    }
    if content.contains("জেলা") {
        location = Some("District");
    }
    location
}

/// Image URL rendered from a text-to-image prompt.
pub fn image_url_for_prompt(prompt: &str) -> String {
    format!(
        "https://image.pollinations.ai/prompt/{}?width=800&height=600&nologo=true",
        urlencoding::encode(prompt)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use std::sync::Arc;

    fn filled() -> ArticleDraft {
        ArticleDraft {
            headline: "শিরোনাম".to_string(),
            content: "এক দুই তিন".to_string(),
            ..ArticleDraft::default()
        }
    }

    #[test]
    fn validation_requires_headline_and_content() {
        let mut draft = ArticleDraft::default();
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));

        draft.headline = "h".to_string();
        assert!(draft.validate().is_err());

        draft.content = "   ".to_string();
        assert!(draft.validate().is_err());

        draft.content = "c".to_string();
        assert!(draft.validate().is_ok());

        draft.affiliate_link = "amazon".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn build_applies_defaults() {
        let article = filled().build_article(1_700_000_000_000).unwrap();

        assert_eq!(article.id, "1700000000000");
        assert_eq!(article.created_at, 1_700_000_000_000);
        assert_eq!(article.preview_text, "এক দুই তিন...");
        assert_eq!(article.location.as_deref(), Some("West Bengal"));
        assert_eq!(
            article.image_url.as_deref(),
            Some("https://picsum.photos/800/400?random=1700000000000")
        );
        assert_eq!(article.read_time.as_deref(), Some("1 min"));
        assert_eq!(article.category, Category::Breaking);
        assert_eq!((article.views, article.likes), (0, 0));
        assert!(article.affiliate.is_none());
    }

    #[test]
    fn affiliate_text_defaults_when_link_present() {
        let mut draft = filled();
        draft.affiliate_link = "https://amazon.in".to_string();

        let article = draft.build_article(1).unwrap();
        assert_eq!(
            article.affiliate,
            Some(Affiliate {
                link: "https://amazon.in".to_string(),
                text: "Buy Now".to_string(),
            })
        );
    }

    #[test]
    fn read_time_rounds_up() {
        assert_eq!(read_time("one"), "1 min");
        assert_eq!(read_time(&vec!["w"; 200].join(" ")), "1 min");
        assert_eq!(read_time(&vec!["w"; 201].join(" ")), "2 min");
    }

    #[test]
    fn research_fills_preview_and_location() {
        let mut draft = ArticleDraft::default();
        draft.apply_research(Draft {
            content: "কলকাতা জেলা প্রশাসন".to_string(),
            sources: vec!["https://a.example".to_string()],
        });

        assert_eq!(draft.location, "District");
        assert_eq!(draft.preview, "কলকাতা জেলা প্রশাসন...");
        assert_eq!(draft.sources.len(), 1);

        assert_eq!(guess_location("কলকাতা শহর"), Some("Kolkata"));
        assert_eq!(guess_location("Darjeeling"), None);
    }

    #[test]
    fn preview_truncates_by_characters() {
        let long = "ক".repeat(150);
        let preview = preview_of(&long);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn image_url_encodes_prompt() {
        assert_eq!(
            image_url_for_prompt("Howrah bridge traffic"),
            "https://image.pollinations.ai/prompt/Howrah%20bridge%20traffic?width=800&height=600&nologo=true"
        );
    }

    #[tokio::test]
    async fn publish_requires_login_and_resets_draft() {
        let repository = ArticleRepository::new(Arc::new(MemoryStore::new()));
        let mut editor = Editor::new("admin123");
        editor.draft = filled();

        let err = editor.publish(&repository, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        assert!(editor.authenticate("wrong").is_err());
        editor.authenticate("admin123").unwrap();
        assert!(editor.is_authenticated());

        let stored = editor.publish(&repository, 5).await.unwrap();
        assert_eq!(repository.cached()[0].id, stored.id);
        assert_eq!(editor.draft, ArticleDraft::default());
    }

    #[tokio::test]
    async fn invalid_draft_is_kept_for_correction() {
        let repository = ArticleRepository::new(Arc::new(MemoryStore::new()));
        let mut editor = Editor::new("admin123");
        editor.authenticate("admin123").unwrap();
        editor.draft.headline = "only a headline".to_string();

        let err = editor.publish(&repository, 1_700_000_000_000).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(editor.draft.headline, "only a headline");
        assert!(repository.get_by_id("1700000000000").is_none());
        assert_eq!(repository.cached().len(), 7);
    }
}
