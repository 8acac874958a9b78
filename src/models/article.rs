use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub headline: String,
    pub preview_text: String,
    pub content: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    /// Most recent first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sponsored: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate: Option<Affiliate>,
}

impl Article {
    /// Ranking weight for the trending feed; likes count five times a view.
    pub fn trending_score(&self) -> u64 {
        self.views.saturating_add(self.likes.saturating_mul(5))
    }

    pub fn sponsored(&self) -> bool {
        self.is_sponsored.unwrap_or(false)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliate {
    pub link: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Comment {
    pub fn new(user: impl Into<String>, text: impl Into<String>, now: i64) -> Self {
        Self {
            id: now.to_string(),
            user: user.into(),
            text: text.into(),
            timestamp: now,
        }
    }
}

/// Result of a like toggle on this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub is_liked: bool,
    pub new_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_engagement_fields_default_to_zero() {
        let json = r#"{
            "id": "42",
            "headline": "h",
            "previewText": "p",
            "content": "c",
            "category": "Kolkata",
            "createdAt": 1700000000000
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.views, 0);
        assert_eq!(article.likes, 0);
        assert!(article.comments.is_empty());
        assert!(article.location.is_none());
        assert!(!article.sponsored());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let article = Article {
            id: "1".to_string(),
            headline: "h".to_string(),
            preview_text: "p".to_string(),
            content: "c".to_string(),
            category: Category::State,
            location: Some("West Bengal".to_string()),
            image_url: None,
            created_at: 10,
            read_time: Some("2 min".to_string()),
            views: 3,
            likes: 1,
            comments: vec![],
            is_sponsored: Some(true),
            affiliate: Some(Affiliate {
                link: "https://amazon.in".to_string(),
                text: "Buy Now".to_string(),
            }),
        };

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["previewText"], "p");
        assert_eq!(value["createdAt"], 10);
        assert_eq!(value["readTime"], "2 min");
        assert_eq!(value["isSponsored"], true);
        assert_eq!(value["category"], "West Bengal");
        assert!(value.get("imageUrl").is_none());
        assert_eq!(article.trending_score(), 8);
    }
}
