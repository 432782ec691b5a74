//! Page assembly for the catalog grid: offset browsing, text search, and an
//! accumulating feed that keeps loading further pages.

use crate::aggregate::load_summary;
use crate::config::CatalogConfig;
use crate::fetch::CreatureSource;
use crate::model::{sort_and_dedup, CreatureKey, CreatureSummary, SearchResult};
use crate::view::{RequestToken, RequestTokens};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Which page to assemble. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Browse { page: u32 },
    Search { query: String, page: u32 },
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        match self {
            PageRequest::Browse { page } | PageRequest::Search { page, .. } => *page,
        }
    }
}

/// Fetch one listing page and every entry's summary.
///
/// All entry lookups are issued at once and awaited together. Entries that
/// fail are skipped, so the page may be shorter than the listing. `has_more`
/// reflects the listing size, not the number of entries that resolved.
pub async fn assemble_page(
    source: &dyn CreatureSource,
    request: &PageRequest,
    config: &CatalogConfig,
) -> SearchResult {
    let page_size = config.page_size;
    let page_index = request.page().max(1);
    if page_size == 0 {
        tracing::warn!("page size is zero; nothing to list");
        return SearchResult::empty();
    }

    let keys: Vec<CreatureKey> = match request {
        PageRequest::Browse { .. } => {
            let Some(offset) = (page_index - 1).checked_mul(page_size) else {
                tracing::warn!(page = page_index, page_size, "page offset out of range");
                return SearchResult::empty();
            };
            match source.fetch_page(offset, page_size).await {
                Ok(listing) => listing
                    .results
                    .into_iter()
                    .map(|entry| match entry.id() {
                        Some(id) => CreatureKey::Id(id),
                        None => CreatureKey::name(&entry.name),
                    })
                    .collect(),
                Err(err) => {
                    tracing::warn!(offset, error = %err, "listing page unavailable");
                    return SearchResult::empty();
                }
            }
        }
        PageRequest::Search { query, .. } => {
            match source.search(query, page_index, page_size).await {
                Ok(hits) => hits
                    .pokemons
                    .into_iter()
                    .map(|hit| CreatureKey::Id(hit.id))
                    .collect(),
                Err(err) => {
                    tracing::warn!(%query, error = %err, "search unavailable");
                    return SearchResult::empty();
                }
            }
        }
    };

    let listed = keys.len();
    let lookups = keys
        .iter()
        .map(|key| load_summary(source, key, config.height_style));
    let mut creatures: Vec<CreatureSummary> = join_all(lookups)
        .await
        .into_iter()
        .zip(&keys)
        .filter_map(|(result, key)| match result {
            Ok(summary) => Some(summary),
            Err(err) => {
                tracing::warn!(%key, error = %err, "skipping entry");
                None
            }
        })
        .collect();
    sort_and_dedup(&mut creatures);

    tracing::debug!(listed, resolved = creatures.len(), "page assembled");
    SearchResult {
        creatures,
        has_more: listed >= page_size as usize,
    }
}

/// One page of the unfiltered catalog, published after the configured delay.
pub async fn browse(source: &dyn CreatureSource, page: u32, config: &CatalogConfig) -> SearchResult {
    let result = assemble_page(source, &PageRequest::Browse { page }, config).await;
    tokio::time::sleep(config.publish_delay()).await;
    result
}

/// Search by id or name, published after the configured delay.
///
/// A blank query yields an empty result. A query that parses as an integer
/// is a single id lookup with `has_more = false`.
pub async fn search(
    source: &dyn CreatureSource,
    query: &str,
    page: u32,
    config: &CatalogConfig,
) -> SearchResult {
    let query = query.trim();
    if query.is_empty() {
        return SearchResult::empty();
    }

    let result = match query.parse::<u32>() {
        Ok(id) => {
            let creatures = match load_summary(source, &CreatureKey::Id(id), config.height_style).await {
                Ok(summary) => vec![summary],
                Err(err) => {
                    tracing::warn!(id, error = %err, "id lookup failed");
                    Vec::new()
                }
            };
            SearchResult {
                creatures,
                has_more: false,
            }
        }
        Err(_) => {
            let request = PageRequest::Search {
                query: query.to_string(),
                page,
            };
            assemble_page(source, &request, config).await
        }
    };

    tokio::time::sleep(config.publish_delay()).await;
    result
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub query: Option<String>,
    pub creatures: Vec<CreatureSummary>,
    pub has_more: bool,
    pub loading: bool,
    /// Next page `load_more` will request.
    pub next_page: u32,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        FeedSnapshot {
            query: None,
            creatures: Vec::new(),
            has_more: true,
            loading: false,
            next_page: 1,
        }
    }
}

/// Accumulating catalog feed.
///
/// Every load takes a request token; a load superseded by a newer one is
/// dropped instead of published.
#[derive(Clone)]
pub struct CatalogFeed {
    source: Arc<dyn CreatureSource>,
    config: CatalogConfig,
    state: Arc<RwLock<FeedSnapshot>>,
    tokens: Arc<RequestTokens>,
}

impl CatalogFeed {
    pub fn new(source: Arc<dyn CreatureSource>, config: CatalogConfig) -> Self {
        Self {
            source,
            config,
            state: Arc::new(RwLock::new(FeedSnapshot::default())),
            tokens: Arc::new(RequestTokens::default()),
        }
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        self.state.read().await.clone()
    }

    /// Append the next page. Returns whether anything was published.
    pub async fn load_more(&self) -> bool {
        let token = self.tokens.issue();
        let (query, page) = {
            let mut state = self.state.write().await;
            if !state.has_more {
                return false;
            }
            state.loading = true;
            (state.query.clone(), state.next_page)
        };

        let result = match &query {
            Some(query) => search(self.source.as_ref(), query, page, &self.config).await,
            None => browse(self.source.as_ref(), page, &self.config).await,
        };

        let mut state = self.state.write().await;
        if !self.is_current(token) {
            return false;
        }
        state.creatures.extend(result.creatures);
        sort_and_dedup(&mut state.creatures);
        state.has_more = result.has_more;
        state.next_page = page + 1;
        state.loading = false;
        true
    }

    /// Replace the feed with the first page of `query`.
    pub async fn search(&self, query: &str) -> bool {
        let token = self.tokens.issue();
        {
            let mut state = self.state.write().await;
            *state = FeedSnapshot {
                query: Some(query.trim().to_string()),
                loading: true,
                ..FeedSnapshot::default()
            };
        }

        let result = search(self.source.as_ref(), query, 1, &self.config).await;

        let mut state = self.state.write().await;
        if !self.is_current(token) {
            return false;
        }
        state.creatures = result.creatures;
        state.has_more = result.has_more;
        state.next_page = 2;
        state.loading = false;
        true
    }

    /// Drop the query and any loaded pages; the next `load_more` browses from page 1.
    pub async fn clear(&self) {
        self.tokens.issue();
        *self.state.write().await = FeedSnapshot::default();
    }

    fn is_current(&self, token: RequestToken) -> bool {
        let current = self.tokens.is_current(token);
        if !current {
            tracing::debug!(?token, "discarding superseded page");
        }
        current
    }
}
