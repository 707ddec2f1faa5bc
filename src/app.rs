use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::mpsc;
use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Article, LoadStatus};
use crate::news::{self, NewsFetcher, SearchPreferences};
use crate::refresh::RefreshIndicator;
use crate::tui::AppAction;

/// What caused a new search to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    InitialLoad,
    Search,
    Refresh,
    PreferenceChange,
}

pub enum LoadOutcome {
    Loaded(Vec<Article>),
    Offline,
}

// Message for a completed background search
pub struct FetchResult {
    pub generation: u64,
    pub outcome: LoadOutcome,
}

pub struct App {
    // Data
    pub articles: Vec<Article>,
    pub config: Config,
    pub query: Option<String>,

    // UI State
    pub selected_index: usize,
    pub show_help: bool,
    pub search_input_active: bool,
    pub search_input: String,
    pub status_message: Option<String>,
    pub refresh: RefreshIndicator,

    // Async state
    pub load_status: LoadStatus,
    generation: u64,
    fetch_rx: mpsc::Receiver<FetchResult>,
    fetch_tx: mpsc::Sender<FetchResult>,

    // Services
    fetcher: NewsFetcher,
    config_path: PathBuf,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let fetcher = NewsFetcher::new()?;

        let (fetch_tx, fetch_rx) = mpsc::channel(8);

        Ok(Self {
            articles: Vec::new(),
            config,
            query: None,
            selected_index: 0,
            show_help: false,
            search_input_active: false,
            search_input: String::new(),
            status_message: None,
            refresh: RefreshIndicator::default(),
            load_status: LoadStatus::Idle,
            generation: 0,
            fetch_rx,
            fetch_tx,
            fetcher,
            config_path,
        })
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected_index)
    }

    /// Text for the list area when there is nothing to show.
    pub fn empty_message(&self) -> String {
        match self.load_status {
            LoadStatus::Idle => String::new(),
            LoadStatus::Loading => "Loading news...".to_string(),
            LoadStatus::Offline => "No internet connection.".to_string(),
            LoadStatus::Loaded => match self.query.as_deref() {
                Some(q) => format!("No news found for \"{q}\"."),
                None => "No news found.".to_string(),
            },
        }
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }

            AppAction::MoveDown => {
                let len = self.articles.len();
                if len > 0 && self.selected_index < len - 1 {
                    self.selected_index += 1;
                }
            }

            AppAction::MoveToTop => {
                self.selected_index = 0;
            }

            AppAction::MoveToBottom => {
                self.selected_index = self.articles.len().saturating_sub(1);
            }

            AppAction::Refresh => {
                self.start_fetch(Trigger::Refresh);
            }

            AppAction::OpenInBrowser => {
                if let Some(article) = self.selected_article() {
                    let has_link = article.has_link();
                    let url = article.url.clone();
                    let title = article.title.clone();

                    if !has_link {
                        self.status_message = Some(format!("\"{title}\" is not available"));
                    } else if let Err(e) = open::that(&url) {
                        tracing::warn!("Failed to open {}: {}", url, e);
                        self.status_message = Some(format!("Could not open {url}"));
                    }
                }
            }

            AppAction::CycleOrderBy => {
                self.update_preferences(Config::cycle_order_by)?;
            }

            AppAction::CycleSection => {
                self.update_preferences(Config::cycle_section)?;
            }

            AppAction::CycleMaxResults => {
                self.update_preferences(Config::cycle_max_results)?;
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::SearchStart => {
                self.search_input_active = true;
                self.search_input = self.query.clone().unwrap_or_default();
            }

            AppAction::SearchInputChar(c) => {
                self.search_input.push(c);
            }

            AppAction::SearchInputBackspace => {
                self.search_input.pop();
            }

            AppAction::SearchInputConfirm => {
                let query = self.search_input.trim().to_string();
                self.query = (!query.is_empty()).then_some(query);
                self.search_input_active = false;
                self.search_input.clear();
                self.start_fetch(Trigger::Search);
            }

            AppAction::SearchInputCancel => {
                self.search_input_active = false;
                self.search_input.clear();
            }
        }

        Ok(false)
    }

    /// Re-read preferences from disk so edits made outside the app are
    /// never shadowed by the in-memory copy.
    fn reload_config(&mut self) {
        match Config::load_from(&self.config_path) {
            Ok(config) => self.config = config,
            Err(e) => tracing::warn!("Keeping previous preferences: {}", e),
        }
    }

    fn update_preferences(&mut self, change: fn(&mut Config)) -> Result<()> {
        self.reload_config();
        change(&mut self.config);
        self.config.save_to(&self.config_path)?;
        self.start_fetch(Trigger::PreferenceChange);
        Ok(())
    }

    fn request_url(&self) -> Result<Url> {
        let base = news::base_url(&self.config.endpoint, &self.config.api_key)?;
        let prefs = SearchPreferences::from(&self.config);
        Ok(news::build_search_url(&base, self.query.as_deref(), &prefs))
    }

    /// Dispatch a background search. Each dispatch gets a new generation;
    /// results from older generations are dropped when they arrive.
    pub fn start_fetch(&mut self, trigger: Trigger) {
        self.reload_config();
        self.status_message = None;

        if trigger == Trigger::Refresh {
            self.refresh.start(Instant::now());
        }

        let url = match self.request_url() {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Cannot build request URL: {}", e);
                self.status_message = Some(format!("Invalid endpoint: {e}"));
                self.refresh.complete();
                return;
            }
        };

        self.generation += 1;
        let generation = self.generation;
        self.load_status = LoadStatus::Loading;
        tracing::debug!("Dispatching {:?} fetch #{}", trigger, generation);

        let fetcher = self.fetcher.clone();
        let endpoint = self.config.endpoint.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            let outcome = if news::is_online(&endpoint).await {
                LoadOutcome::Loaded(news::fetch_articles(&fetcher, url.as_str()).await)
            } else {
                LoadOutcome::Offline
            };

            let _ = tx.send(FetchResult { generation, outcome }).await;
        });
    }

    /// Poll for completed searches (non-blocking)
    pub fn poll_fetch_result(&mut self) {
        while let Ok(result) = self.fetch_rx.try_recv() {
            if result.generation != self.generation {
                tracing::debug!(
                    "Discarding stale fetch #{} (latest is #{})",
                    result.generation,
                    self.generation
                );
                continue;
            }

            match result.outcome {
                LoadOutcome::Loaded(articles) => {
                    self.articles = articles;
                    self.load_status = LoadStatus::Loaded;
                }
                LoadOutcome::Offline => {
                    self.articles.clear();
                    self.load_status = LoadStatus::Offline;
                }
            }
            self.selected_index = 0;
            self.refresh.complete();
        }
    }

    pub fn tick(&mut self) {
        self.refresh.tick(Instant::now());
    }

    /// Run one search in the foreground, for headless use.
    pub async fn search_blocking(&mut self, query: Option<String>) -> Result<&[Article]> {
        self.reload_config();
        self.query = query.filter(|q| !q.trim().is_empty());

        let url = self.request_url()?;
        self.articles = news::fetch_articles(&self.fetcher, url.as_str()).await;
        self.load_status = LoadStatus::Loaded;

        Ok(&self.articles)
    }
}
