use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::Draft;

pub const HEADLINE_FAILED: &str = "স্বয়ংক্রিয় শিরোনাম জেনারেশন ব্যর্থ হয়েছে";
pub const HEADLINE_EMPTY: &str = "Headline Generation Failed";
pub const DRAFT_EMPTY: &str = "Could not generate content.";
pub const IMAGE_PROMPT_FALLBACK: &str = "News West Bengal India generic";
pub const TRENDING_FALLBACK: [&str; 3] = [
    "Kolkata Weather",
    "West Bengal Politics",
    "Indian Cricket Team",
];

/// Prompt-in, text-out model. `research` may consult the web and reports
/// the source URLs it used.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
    async fn research(&self, prompt: &str) -> Result<Draft>;
}

/// Editorial helpers over a [`TextModel`]. Only `draft_from_topic` reports
/// failure; everything else degrades to a fallback value.
#[derive(Clone)]
pub struct DraftingGateway {
    model: Arc<dyn TextModel>,
}

impl DraftingGateway {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub async fn draft_from_topic(&self, topic: &str) -> Result<Draft> {
        let prompt = format!(
            r#"Search for the latest news regarding: "{topic}".
Prioritize recent events in West Bengal or India.
Based on the search results, write a comprehensive news report in Bengali.
The tone should be professional and journalistic.
Do not use Markdown formatting."#
        );

        let draft = self.model.research(&prompt).await.map_err(|e| {
            tracing::error!("Research for {:?} failed: {}", topic, e);
            AppError::ResearchFailed(e.to_string())
        })?;

        let content = strip_markdown(&draft.content);
        let mut sources: Vec<String> = Vec::with_capacity(draft.sources.len());
        for source in draft.sources {
            if !source.is_empty() && !sources.contains(&source) {
                sources.push(source);
            }
        }

        Ok(Draft {
            content: if content.is_empty() {
                DRAFT_EMPTY.to_string()
            } else {
                content
            },
            sources,
        })
    }

    pub async fn generate_headline(&self, text: &str) -> String {
        let prompt = format!(
            "You are a senior editor for a Bengali news portal.
Read the following text and generate a catchy, professional, and short newspaper-style headline in Bengali.
Only return the headline text, nothing else.

Text: {}...",
            truncate_chars(text, 2000)
        );

        match self.model.complete(&prompt).await {
            Ok(headline) => {
                let headline = strip_markdown(&headline);
                if headline.is_empty() {
                    HEADLINE_EMPTY.to_string()
                } else {
                    headline
                }
            }
            Err(e) => {
                tracing::error!("Headline generation failed: {}", e);
                HEADLINE_FAILED.to_string()
            }
        }
    }

    /// Proofreads raw (e.g. transcribed) text. Returns the input on failure.
    pub async fn clean_text(&self, text: &str) -> String {
        let prompt = format!(
            "You are a Bengali proofreader.
The following text is a raw transcription from a video.
Clean it up, fix punctuation, improve grammar, and make it read like a high-quality newspaper article in Bengali.
Do not change the core meaning. Keep it professional.

Raw Text: {text}"
        );

        match self.model.complete(&prompt).await {
            Ok(cleaned) if !cleaned.trim().is_empty() => cleaned.trim().to_string(),
            Ok(_) => text.to_string(),
            Err(e) => {
                tracing::error!("Text cleaning failed: {}", e);
                text.to_string()
            }
        }
    }

    pub async fn generate_image_prompt(&self, text: &str) -> String {
        let prompt = format!(
            r#"Read this Bengali news snippet and generate a short, visual English description (prompt) to generate a relevant image.
Focus on the visual scene (e.g., "Kolkata street crowd raining", "Traffic jam Howrah bridge").
Keep it under 10 words. Return ONLY the English prompt.

News: {}"#,
            truncate_chars(text, 500)
        );

        match self.model.complete(&prompt).await {
            Ok(image_prompt) => {
                let image_prompt = strip_markdown(&image_prompt);
                if image_prompt.is_empty() {
                    IMAGE_PROMPT_FALLBACK.to_string()
                } else {
                    image_prompt
                }
            }
            Err(e) => {
                tracing::error!("Image prompt generation failed: {}", e);
                IMAGE_PROMPT_FALLBACK.to_string()
            }
        }
    }

    pub async fn trending_topics(&self) -> Vec<String> {
        let prompt = "Find 3 currently trending specific news topics in West Bengal or Kolkata.
Return them as a simple comma-separated list of English phrases.
Example: Metro disruption, Hilsa price rise, Durga Puja prep";

        let topics = match self.model.research(prompt).await {
            Ok(draft) => draft
                .content
                .split(',')
                .map(strip_markdown)
                .filter(|t| !t.is_empty())
                .collect(),
            Err(e) => {
                tracing::error!("Trending topics lookup failed: {}", e);
                Vec::new()
            }
        };

        if topics.is_empty() {
            TRENDING_FALLBACK.iter().map(|t| t.to_string()).collect()
        } else {
            topics
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Removes emphasis/heading markers and wrapping quotes models tend to add.
fn strip_markdown(text: &str) -> String {
    static MARKUP: OnceLock<Option<Regex>> = OnceLock::new();
    let markup = MARKUP.get_or_init(|| Regex::new(r"(?m)^\s*#{1,6}\s+|\*\*|__").ok());

    let unquoted = trim_quotes(text);
    match markup {
        Some(re) => trim_quotes(&re.replace_all(unquoted, "")).to_string(),
        None => unquoted.to_string(),
    }
}

fn trim_quotes(text: &str) -> &str {
    text.trim()
        .trim_matches(|c| matches!(c, '"' | '“' | '”' | '\''))
        .trim()
}
