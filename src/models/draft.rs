use serde::{Deserialize, Serialize};

/// Research output from the drafting gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub content: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiStatus {
    #[default]
    Idle,
    Working,
    Done,
    Failed,
    NoApiKey,
}
