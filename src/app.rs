use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::ai::{ClaudeModel, DraftingGateway};
use crate::config::Config;
use crate::db::{
    ArticleRepository, BookmarkTracker, EngagementTracker, MemoryStore, SqliteStore, Store,
};
use crate::editor::{image_url_for_prompt, DraftField, Editor};
use crate::error::Result;
use crate::feed;
use crate::models::{now_millis, AiStatus, Article, Category, Comment, Draft};
use crate::services::NewsApiClient;
use crate::tui::AppAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Category(Category),
    Search(String),
    Bookmarks,
}

impl View {
    pub fn label(&self) -> String {
        match self {
            View::Category(category) => category.label().to_string(),
            View::Search(query) => format!("Search: {query}"),
            View::Bookmarks => "Bookmarks".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Feed,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    CommentAuthor,
    CommentText,
    Password,
    Field(DraftField),
}

impl InputMode {
    pub fn prompt(&self) -> &'static str {
        match self {
            InputMode::Search => "Search news",
            InputMode::CommentAuthor => "Your name",
            InputMode::CommentText => "Write a comment",
            InputMode::Password => "Admin password",
            InputMode::Field(field) => field.label(),
        }
    }
}

pub struct Researched {
    pub draft: Draft,
    pub headline: String,
    pub image_prompt: String,
}

// Message for a completed AI call
pub enum AiResult {
    Research(std::result::Result<Researched, String>),
    Headline(String),
    Cleaned(String),
    ImagePrompt(String),
    Trending(Vec<String>),
}

pub struct App {
    // Data
    pub articles: Vec<Article>,
    pub visible: Vec<Article>,
    pub trending_topics: Vec<String>,

    // UI State
    pub screen: Screen,
    pub view: View,
    pub selected_index: usize,
    pub opened_id: Option<String>,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    pub show_help: bool,
    pub input_mode: Option<InputMode>,
    pub input: String,
    pub status: Option<String>,
    comment_author: String,

    // Async state
    pub is_refreshing: bool,
    refresh_rx: mpsc::Receiver<Vec<Article>>,
    refresh_tx: mpsc::Sender<Vec<Article>>,
    pub ai_status: AiStatus,
    ai_rx: mpsc::Receiver<AiResult>,
    ai_tx: mpsc::Sender<AiResult>,

    // Services
    repository: ArticleRepository,
    engagement: EngagementTracker,
    bookmarks: BookmarkTracker,
    pub editor: Editor,
    gateway: Option<Arc<DraftingGateway>>,
    pub ai_model: Option<String>,
    my_area: String,
    fallback_region: String,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn Store> = match SqliteStore::open(&config.db_path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!(
                    "Cannot open {}, changes will not be saved: {}",
                    config.db_path,
                    e
                );
                Arc::new(MemoryStore::new())
            }
        };

        let mut repository = ArticleRepository::new(store);
        if let Some(url) = &config.news_api_url {
            match NewsApiClient::new(url, config.remote_timeout()) {
                Ok(client) => {
                    tracing::info!("Using news API at {}", client.news_url());
                    repository = repository.with_remote(Arc::new(client), config.remote_timeout())
                }
                Err(e) => tracing::warn!("News API disabled: {}", e),
            }
        }

        let (gateway, ai_model) = match &config.claude_api_key {
            Some(key) => {
                let model = ClaudeModel::new(key.clone(), config.claude_model.clone())?;
                let name = model.model_version().to_string();
                (Some(Arc::new(DraftingGateway::new(Arc::new(model)))), Some(name))
            }
            None => (None, None),
        };

        let mut app = Self::from_parts(
            repository,
            gateway,
            Editor::new(config.admin_password.clone()),
            config.resolved_location().to_string(),
            config.fallback_region.clone(),
        );
        app.ai_model = ai_model;
        app.articles = app.repository.list().await;
        app.reload_view(false);
        Ok(app)
    }

    pub fn from_parts(
        repository: ArticleRepository,
        gateway: Option<Arc<DraftingGateway>>,
        editor: Editor,
        my_area: String,
        fallback_region: String,
    ) -> Self {
        let store = repository.store();
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let (ai_tx, ai_rx) = mpsc::channel(4);

        let mut app = Self {
            articles: repository.cached(),
            visible: Vec::new(),
            trending_topics: Vec::new(),
            screen: Screen::Feed,
            view: View::Category(Category::All),
            selected_index: 0,
            opened_id: None,
            is_liked: false,
            is_bookmarked: false,
            show_help: false,
            input_mode: None,
            input: String::new(),
            status: None,
            comment_author: String::new(),
            is_refreshing: false,
            refresh_rx,
            refresh_tx,
            ai_status: if gateway.is_some() {
                AiStatus::Idle
            } else {
                AiStatus::NoApiKey
            },
            ai_rx,
            ai_tx,
            engagement: EngagementTracker::new(Arc::clone(&store)),
            bookmarks: BookmarkTracker::new(store),
            repository,
            editor,
            gateway,
            ai_model: None,
            my_area,
            fallback_region,
        };
        app.reload_view(false);
        app
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.visible.get(self.selected_index)
    }

    pub fn opened_article(&self) -> Option<&Article> {
        let article = self.selected_article()?;
        (self.opened_id.as_deref() == Some(article.id.as_str())).then_some(article)
    }

    /// Lead story for the current tab, if it has one.
    pub fn hero(&self) -> Option<&Article> {
        match &self.view {
            View::Category(category) => feed::hero(&self.articles, *category),
            _ => None,
        }
    }

    pub fn related(&self) -> Vec<Article> {
        match self.opened_article() {
            Some(article) => feed::related(&self.articles, article, 3),
            None => Vec::new(),
        }
    }

    pub fn is_input_active(&self) -> bool {
        self.input_mode.is_some()
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.on_selection_changed();
                }
            }

            AppAction::MoveDown => {
                if self.selected_index + 1 < self.visible.len() {
                    self.selected_index += 1;
                    self.on_selection_changed();
                }
            }

            AppAction::MoveToTop => {
                self.selected_index = 0;
                self.on_selection_changed();
            }

            AppAction::MoveToBottom => {
                self.selected_index = self.visible.len().saturating_sub(1);
                self.on_selection_changed();
            }

            AppAction::OpenArticle => {
                if let Some(id) = self.selected_article().map(|a| a.id.clone()) {
                    self.engagement.increment_view(&id);
                    self.opened_id = Some(id);
                    self.reload_articles();
                }
            }

            AppAction::CloseArticle => {
                self.opened_id = None;
            }

            AppAction::NextCategory => {
                let next = match &self.view {
                    View::Category(category) => category.cycle(),
                    _ => Category::All,
                };
                self.switch_view(View::Category(next));
            }

            AppAction::ShowBookmarks => {
                let view = if self.view == View::Bookmarks {
                    View::Category(Category::All)
                } else {
                    View::Bookmarks
                };
                self.switch_view(view);
            }

            AppAction::StartSearch => self.start_input(InputMode::Search, String::new()),

            AppAction::ToggleLike => {
                if let Some(id) = self.selected_article().map(|a| a.id.clone()) {
                    let outcome = self.engagement.toggle_like(&id);
                    let heart = if outcome.is_liked { "♥" } else { "♡" };
                    self.status = Some(format!("{heart} {} Likes", outcome.new_count));
                    self.reload_articles();
                }
            }

            AppAction::ToggleBookmark => {
                if let Some(id) = self.selected_article().map(|a| a.id.clone()) {
                    let saved = self.bookmarks.toggle(&id);
                    self.status = Some(if saved { "Saved" } else { "Removed" }.to_string());
                    self.reload_articles();
                }
            }

            AppAction::StartComment => {
                if self.selected_article().is_some() {
                    let author = self.comment_author.clone();
                    self.start_input(InputMode::CommentAuthor, author);
                }
            }

            AppAction::OpenLink => {
                let link = self
                    .selected_article()
                    .and_then(|a| self.repository.get_by_id(&a.id))
                    .and_then(|a| a.affiliate.map(|aff| aff.link).or(a.image_url));
                if let Some(url) = link {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("Failed to open {}: {}", url, e);
                        self.status = Some(format!("Could not open {url}"));
                    }
                }
            }

            AppAction::Refresh => self.refresh(),

            AppAction::OpenAdmin => {
                if self.editor.is_authenticated() {
                    self.screen = Screen::Admin;
                } else {
                    self.start_input(InputMode::Password, String::new());
                }
            }

            AppAction::ExitAdmin => {
                self.editor.logout();
                self.screen = Screen::Feed;
                self.status = None;
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::InputChar(c) => {
                self.input.push(c);
            }

            AppAction::InputBackspace => {
                self.input.pop();
            }

            AppAction::InputConfirm => self.submit_input(),

            AppAction::InputCancel => {
                self.input_mode = None;
                self.input.clear();
            }

            AppAction::EditField(field) => {
                let current = self.editor.draft.field(field).to_string();
                self.start_input(InputMode::Field(field), current);
            }

            AppAction::CycleDraftCategory => {
                self.editor.draft.category = self.editor.draft.category.cycle_publishable();
            }

            AppAction::ToggleSponsored => {
                self.editor.draft.sponsored = !self.editor.draft.sponsored;
            }

            AppAction::UseTrendingTopic(index) => {
                if let Some(topic) = self.trending_topics.get(index) {
                    self.editor.draft.topic = topic.clone();
                }
            }

            AppAction::Research => self.research(),

            AppAction::CleanText => {
                let content = self.editor.draft.content.clone();
                if content.is_empty() {
                    return Ok(false);
                }
                self.status = Some("Cleaning Text with AI...".to_string());
                self.spawn_ai(move |gateway| async move {
                    AiResult::Cleaned(gateway.clean_text(&content).await)
                });
            }

            AppAction::GenerateHeadline => {
                let content = self.editor.draft.content.clone();
                if content.is_empty() {
                    return Ok(false);
                }
                self.status = Some("Generating Headline with AI...".to_string());
                self.spawn_ai(move |gateway| async move {
                    AiResult::Headline(gateway.generate_headline(&content).await)
                });
            }

            AppAction::GenerateImage => {
                let content = self.editor.draft.content.clone();
                if content.is_empty() {
                    return Ok(false);
                }
                self.status = Some("Generating image prompt...".to_string());
                self.spawn_ai(move |gateway| async move {
                    AiResult::ImagePrompt(gateway.generate_image_prompt(&content).await)
                });
            }

            AppAction::LoadTrending => {
                self.status = Some("Looking up trending topics...".to_string());
                self.spawn_ai(|gateway| async move {
                    AiResult::Trending(gateway.trending_topics().await)
                });
            }

            AppAction::Publish => {
                match self.editor.publish(&self.repository, now_millis()).await {
                    Ok(_) => {
                        self.status = Some("News Published Successfully!".to_string());
                        self.reload_articles();
                    }
                    Err(e) => {
                        self.status = Some(e.to_string());
                    }
                }
            }
        }

        Ok(false)
    }

    fn start_input(&mut self, mode: InputMode, initial: String) {
        self.input_mode = Some(mode);
        self.input = initial;
    }

    fn submit_input(&mut self) {
        let Some(mode) = self.input_mode.take() else {
            return;
        };
        let value = std::mem::take(&mut self.input);
        let trimmed = value.trim();

        match mode {
            InputMode::Search => {
                if !trimmed.is_empty() {
                    self.switch_view(View::Search(trimmed.to_string()));
                }
            }

            InputMode::CommentAuthor => {
                if trimmed.is_empty() {
                    self.status = Some("Name is required to comment".to_string());
                } else {
                    self.comment_author = trimmed.to_string();
                    self.start_input(InputMode::CommentText, String::new());
                }
            }

            InputMode::CommentText => {
                if trimmed.is_empty() {
                    return;
                }
                let Some(id) = self.selected_article().map(|a| a.id.clone()) else {
                    return;
                };
                let comment = Comment::new(self.comment_author.clone(), trimmed, now_millis());
                self.status = Some(match self.engagement.add_comment(&id, comment) {
                    Some(_) => "Comment posted".to_string(),
                    None => "Article not found".to_string(),
                });
                self.reload_articles();
            }

            InputMode::Password => match self.editor.authenticate(&value) {
                Ok(()) => {
                    self.screen = Screen::Admin;
                    self.status = None;
                }
                Err(_) => {
                    self.status = Some("ভুল পাসওয়ার্ড (Incorrect Password)".to_string());
                }
            },

            InputMode::Field(field) => {
                self.editor.draft.set_field(field, value);
                if field == DraftField::Content {
                    self.editor.draft.fill_preview();
                }
            }
        }
    }

    fn on_selection_changed(&mut self) {
        self.opened_id = None;
        self.sync_selection_flags();
    }

    fn sync_selection_flags(&mut self) {
        let id = self.selected_article().map(|a| a.id.clone());
        self.is_liked = id
            .as_deref()
            .is_some_and(|id| self.engagement.is_liked(id));
        self.is_bookmarked = id
            .as_deref()
            .is_some_and(|id| self.bookmarks.is_bookmarked(id));
    }

    fn switch_view(&mut self, view: View) {
        self.view = view;
        self.opened_id = None;
        self.reload_view(false);
    }

    fn reload_articles(&mut self) {
        self.articles = self.repository.cached();
        self.reload_view(true);
    }

    /// Recomputes the visible list. With `keep_selection` the cursor stays on
    /// the same article if it is still listed.
    fn reload_view(&mut self, keep_selection: bool) {
        feed::sort_by_recency(&mut self.articles);
        let selected_id = keep_selection
            .then(|| self.selected_article().map(|a| a.id.clone()))
            .flatten();

        self.visible = match &self.view {
            View::Category(category) => {
                let mut articles = feed::for_category(
                    &self.articles,
                    *category,
                    Some(&self.my_area),
                    &self.fallback_region,
                );
                // The lead story sits in the ticker instead of the All list
                if *category == Category::All {
                    if let Some(hero) = feed::hero(&self.articles, Category::All) {
                        articles.retain(|a| a.id != hero.id);
                    }
                }
                articles
            }
            View::Search(query) => feed::search(&self.articles, query),
            View::Bookmarks => self.bookmarks.list_bookmarked_articles(),
        };

        self.selected_index = selected_id
            .and_then(|id| self.visible.iter().position(|a| a.id == id))
            .unwrap_or(0)
            .min(self.visible.len().saturating_sub(1));
        self.sync_selection_flags();
    }

    pub fn refresh(&mut self) {
        if self.is_refreshing {
            return;
        }
        self.is_refreshing = true;

        let repository = self.repository.clone();
        let tx = self.refresh_tx.clone();
        tokio::spawn(async move {
            let articles = repository.list().await;
            let _ = tx.send(articles).await;
        });
    }

    /// Poll for completed refresh results (non-blocking)
    pub fn poll_refresh_result(&mut self) {
        if let Ok(articles) = self.refresh_rx.try_recv() {
            tracing::debug!("Refreshed {} articles", articles.len());
            self.articles = articles;
            self.is_refreshing = false;
            self.reload_view(true);
        }
    }

    fn research(&mut self) {
        let topic = self.editor.draft.topic.trim().to_string();
        if topic.is_empty() {
            self.status = Some("Enter a research topic first (t)".to_string());
            return;
        }

        self.status = Some("Searching web & drafting...".to_string());
        self.spawn_ai(move |gateway| async move {
            match gateway.draft_from_topic(&topic).await {
                Ok(draft) => {
                    let (headline, image_prompt) = futures::join!(
                        gateway.generate_headline(&draft.content),
                        gateway.generate_image_prompt(&draft.content)
                    );
                    AiResult::Research(Ok(Researched {
                        draft,
                        headline,
                        image_prompt,
                    }))
                }
                Err(e) => AiResult::Research(Err(e.to_string())),
            }
        });
    }

    fn spawn_ai<F, Fut>(&mut self, job: F)
    where
        F: FnOnce(Arc<DraftingGateway>) -> Fut + Send + 'static,
        Fut: Future<Output = AiResult> + Send + 'static,
    {
        let Some(gateway) = &self.gateway else {
            self.ai_status = AiStatus::NoApiKey;
            self.status = Some("Claude API key not configured".to_string());
            return;
        };

        let gateway = Arc::clone(gateway);
        let tx = self.ai_tx.clone();
        self.ai_status = AiStatus::Working;

        tokio::spawn(async move {
            let result = job(gateway).await;
            let _ = tx.send(result).await;
        });
    }

    /// Poll for completed AI results (non-blocking)
    pub fn poll_ai_result(&mut self) {
        let Ok(result) = self.ai_rx.try_recv() else {
            return;
        };

        self.ai_status = AiStatus::Done;
        let draft = &mut self.editor.draft;
        match result {
            AiResult::Research(Ok(researched)) => {
                draft.apply_research(researched.draft);
                draft.headline = researched.headline;
                draft.image_url = image_url_for_prompt(&researched.image_prompt);
                self.status = Some("Draft Created!".to_string());
            }
            AiResult::Research(Err(e)) => {
                tracing::error!("Research failed: {}", e);
                self.ai_status = AiStatus::Failed;
                self.status = Some("Research failed. Press R to retry.".to_string());
            }
            AiResult::Headline(headline) => {
                draft.headline = headline;
                self.status = Some("Headline Generated!".to_string());
            }
            AiResult::Cleaned(content) => {
                draft.content = content;
                self.status = Some("Text Cleaned!".to_string());
            }
            AiResult::ImagePrompt(prompt) => {
                draft.image_url = image_url_for_prompt(&prompt);
                self.status = Some(format!("Image: {prompt}"));
            }
            AiResult::Trending(topics) => {
                self.trending_topics = topics;
                self.status = None;
            }
        }
    }
}
