//! Shared application state.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::Client;
use tracing::warn;

use vastra_chat::{LLMConfig, Llm};
use vastra_core::VastraConfig;
use vastra_design::SdxlClient;
use vastra_scrape::{ApifyClient, SerpApiClient};
use vastra_store::{BookmarkStore, UserStore};

/// Base URL overrides for the third-party services. `None` means the
/// public endpoint.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    pub serpapi: Option<String>,
    pub apify: Option<String>,
    pub sdxl: Option<String>,
}

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: VastraConfig,
    pub users: UserStore,
    pub bookmarks: BookmarkStore,
    pub llm_config: RwLock<LLMConfig>,
    pub http: Client,
    pub endpoints: Endpoints,
}

impl AppState {
    /// Fails when the bookmarks file exists but cannot be loaded.
    pub fn new(config: VastraConfig, users: UserStore) -> vastra_core::Result<Self> {
        let bookmarks = BookmarkStore::new(&config.data_paths.bookmarks_file)?;
        let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);

        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("HTTP client build failed ({}), using defaults", e);
                Client::new()
            });

        Ok(Self {
            config,
            users,
            bookmarks,
            llm_config: RwLock::new(llm_config),
            http,
            endpoints: Endpoints::default(),
        })
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// The currently configured LLM, if any provider has a key.
    pub fn llm(&self) -> Option<Llm> {
        Llm::from_config(&self.llm_config.read(), self.http.clone())
    }

    pub fn serp(&self) -> Option<SerpApiClient> {
        let key = self.config.api_keys.serpapi.as_deref()?;
        Some(match &self.endpoints.serpapi {
            Some(base) => SerpApiClient::with_base_url(self.http.clone(), key, base),
            None => SerpApiClient::new(self.http.clone(), key),
        })
    }

    pub fn apify(&self) -> Option<ApifyClient> {
        let token = self.config.api_keys.apify.as_deref()?;
        Some(match &self.endpoints.apify {
            Some(base) => ApifyClient::with_base_url(self.http.clone(), token, base),
            None => ApifyClient::new(self.http.clone(), token),
        })
    }

    /// SDXL runs far longer than the shared timeout, so it gets a plain
    /// client and sets its own per-request limit.
    pub fn sdxl(&self) -> Option<SdxlClient> {
        let token = self.config.api_keys.huggingface.as_deref()?;
        Some(match &self.endpoints.sdxl {
            Some(url) => SdxlClient::with_model_url(Client::new(), token, url),
            None => SdxlClient::new(Client::new(), token),
        })
    }
}
