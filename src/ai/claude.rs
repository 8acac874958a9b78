use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Draft;

use super::TextModel;

const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

#[derive(Debug, Serialize)]
struct MessageRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    tool_type: String,
    name: String,
    max_uses: u32,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
    citations: Option<Vec<Citation>>,
    /// Present on `web_search_tool_result` blocks.
    content: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Citation {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    url: Option<String>,
}

pub struct ClaudeModel {
    client: Client,
    api_key: String,
    model: String,
}

impl ClaudeModel {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    pub fn model_version(&self) -> &str {
        &self.model
    }

    fn request(&self, prompt: &str, web_search: bool) -> MessageRequest {
        let tools = if web_search {
            vec![Tool {
                tool_type: "web_search_20250305".to_string(),
                name: "web_search".to_string(),
                max_uses: 5,
            }]
        } else {
            Vec::new()
        };

        MessageRequest {
            model: self.model.clone(),
            max_tokens: 2048,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            tools,
        }
    }

    async fn send(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let response = self
            .client
            .post(CLAUDE_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(AppError::ClaudeApi(format!("API error: {}", error_text)));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TextModel for ClaudeModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self.send(&self.request(prompt, false)).await?;
        Ok(collect_text(&response.content, "\n"))
    }

    async fn research(&self, prompt: &str) -> Result<Draft> {
        let response = self.send(&self.request(prompt, true)).await?;
        // Cited answers arrive as many text blocks split mid-sentence.
        let content = collect_text(&response.content, "");
        let sources = collect_sources(&response.content);
        Ok(Draft { content, sources })
    }
}

fn collect_text(blocks: &[ContentBlock], separator: &str) -> String {
    blocks
        .iter()
        .filter(|b| b.content_type == "text")
        .filter_map(|b| b.text.as_deref())
        .collect::<Vec<_>>()
        .join(separator)
}

fn collect_sources(blocks: &[ContentBlock]) -> Vec<String> {
    let mut sources = Vec::new();

    for block in blocks {
        match block.content_type.as_str() {
            "web_search_tool_result" => {
                let results = block
                    .content
                    .clone()
                    .and_then(|v| serde_json::from_value::<Vec<SearchResult>>(v).ok())
                    .unwrap_or_default();
                sources.extend(results.into_iter().filter_map(|r| r.url));
            }
            "text" => {
                if let Some(citations) = &block.citations {
                    sources.extend(citations.iter().filter_map(|c| c.url.clone()));
                }
            }
            _ => {}
        }
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ClaudeModel {
        ClaudeModel::new("test-key".to_string(), "claude-test".to_string()).unwrap()
    }

    #[test]
    fn plain_requests_omit_tools() {
        let value = serde_json::to_value(model().request("hi", false)).unwrap();
        assert!(value.get("tools").is_none());
        assert_eq!(value["model"], "claude-test");
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn research_requests_enable_web_search() {
        let value = serde_json::to_value(model().request("hi", true)).unwrap();
        assert_eq!(value["tools"][0]["type"], "web_search_20250305");
        assert_eq!(value["tools"][0]["name"], "web_search");
    }

    #[test]
    fn parses_text_and_sources_from_search_response() {
        let body = r#"{
            "content": [
                {"type": "text", "text": "খোঁজ করছি।"},
                {"type": "server_tool_use", "id": "srv_1", "name": "web_search", "input": {"query": "metro"}},
                {"type": "web_search_tool_result", "tool_use_id": "srv_1", "content": [
                    {"type": "web_search_result", "url": "https://news.example/metro", "title": "Metro"},
                    {"type": "web_search_result", "url": "https://news.example/rail", "title": "Rail"}
                ]},
                {"type": "text", "text": "নতুন মেট্রো চালু", "citations": [
                    {"type": "web_search_result_location", "url": "https://news.example/metro", "cited_text": "..."}
                ]},
                {"type": "text", "text": " হলো।", "citations": null}
            ]
        }"#;

        let response: MessageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            collect_text(&response.content, ""),
            "খোঁজ করছি।নতুন মেট্রো চালু হলো।"
        );
        assert_eq!(
            collect_sources(&response.content),
            vec![
                "https://news.example/metro",
                "https://news.example/rail",
                "https://news.example/metro",
            ]
        );
    }

    #[test]
    fn search_error_blocks_yield_no_sources() {
        let body = r#"{
            "content": [
                {"type": "web_search_tool_result", "tool_use_id": "srv_1",
                 "content": {"type": "web_search_tool_result_error", "error_code": "max_uses_exceeded"}},
                {"type": "text", "text": "ok"}
            ]
        }"#;

        let response: MessageResponse = serde_json::from_str(body).unwrap();
        assert!(collect_sources(&response.content).is_empty());
    }
}
