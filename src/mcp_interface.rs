//! Text-producing catalog commands shared by the CLI and the MCP server.
//!
//! Each function drives the catalog layers and returns the text a front end
//! should show. Failures are rendered as friendly messages, never raised.

use crate::config::CatalogConfig;
use crate::errors::CatalogResult;
use crate::fetch::{CreatureSource, PokeApiClient};
use crate::listing::{self, CatalogFeed};
use crate::model::CreatureKey;
use crate::render::DetailView;
use crate::route::Route;
use crate::view::{DetailTab, ViewContext};
use std::sync::Arc;

/// Everything a front end needs: the data source, the detail view and the feed.
#[derive(Clone)]
pub struct CatalogSession {
    pub source: Arc<dyn CreatureSource>,
    pub config: CatalogConfig,
    pub view: ViewContext,
    pub feed: CatalogFeed,
}

impl CatalogSession {
    pub fn new(source: Arc<dyn CreatureSource>, config: CatalogConfig) -> Self {
        Self {
            view: ViewContext::new(source.clone(), config.clone()),
            feed: CatalogFeed::new(source.clone(), config.clone()),
            source,
            config,
        }
    }

    /// Session over the live PokeAPI client.
    pub fn with_http(config: CatalogConfig) -> CatalogResult<Self> {
        let client = PokeApiClient::from_config(&config)?;
        Ok(Self::new(Arc::new(client), config))
    }
}

/// Parses a tab name, with the valid names in the error message
pub fn parse_tab(name: &str) -> Result<DetailTab, String> {
    name.trim().parse::<DetailTab>().map_err(|_| {
        format!(
            "Unknown tab '{}'. Use 'about', 'stats', 'moves', or 'evolutions'.",
            name.trim()
        )
    })
}

/// Returns one page of the unfiltered catalog
pub async fn browse_catalog(session: &CatalogSession, page: u32) -> String {
    let result = listing::browse(session.source.as_ref(), page.max(1), &session.config).await;
    format!("--- Pokédex (page {}) ---\n{}", page.max(1), result)
}

/// Returns one page of search results for an id or name
pub async fn search_catalog(session: &CatalogSession, query: &str, page: u32) -> String {
    if query.trim().is_empty() {
        return "What Pokémon do you want to search for? (e.g., 'pikachu' or '25')".to_string();
    }
    let result =
        listing::search(session.source.as_ref(), query, page.max(1), &session.config).await;
    format!("--- Search: {} ---\n{}", query.trim(), result)
}

/// Restarts the session feed with `query` and renders its first page
pub async fn search_feed(session: &CatalogSession, query: &str) -> String {
    if query.trim().is_empty() {
        session.feed.clear().await;
        return load_more(session).await;
    }
    session.feed.search(query).await;
    session.feed.snapshot().await.to_string()
}

/// Loads the next page into the session feed and renders the whole feed
pub async fn load_more(session: &CatalogSession) -> String {
    if !session.feed.load_more().await {
        let snapshot = session.feed.snapshot().await;
        if !snapshot.has_more {
            return format!("{}No more Pokémon to load.", snapshot);
        }
    }
    session.feed.snapshot().await.to_string()
}

/// Makes `key` the active creature and renders it
pub async fn show_creature(
    session: &CatalogSession,
    key: &CreatureKey,
    tab: Option<DetailTab>,
) -> String {
    if let Some(tab) = tab {
        session.view.select_tab(tab).await;
    }
    if !session.view.navigate(key).await {
        return format!("The Pokémon '{}' was not found.", key);
    }
    display_active_creature(session).await
}

/// Renders the active creature with its active tab
pub async fn display_active_creature(session: &CatalogSession) -> String {
    let state = session.view.snapshot().await;
    match &state.detail {
        Some(detail) => DetailView::new(detail, state.tab).to_string(),
        None => "No Pokémon selected. Use 'show' with an id or name first.".to_string(),
    }
}

/// Switches the active tab and renders the creature again
pub async fn select_tab(session: &CatalogSession, tab_name: &str) -> String {
    match parse_tab(tab_name) {
        Ok(tab) => {
            session.view.select_tab(tab).await;
            display_active_creature(session).await
        }
        Err(message) => message,
    }
}

/// Moves to the next (`forward`) or previous creature
pub async fn step_creature(session: &CatalogSession, forward: bool) -> String {
    if session.view.detail().await.is_none() {
        return "No Pokémon selected. Use 'show' with an id or name first.".to_string();
    }
    let moved = if forward {
        session.view.next().await
    } else {
        session.view.previous().await
    };
    if moved {
        display_active_creature(session).await
    } else if forward {
        "There is no next Pokémon.".to_string()
    } else {
        "There is no previous Pokémon.".to_string()
    }
}

/// Parses a client route, wrapping failures as a catalog error
pub fn parse_route(path: &str) -> CatalogResult<Route> {
    Ok(path.parse::<Route>()?)
}

/// Opens a client route such as `/pokemon/25` or `/pokemons`
pub async fn open_route(session: &CatalogSession, path: &str) -> String {
    match parse_route(path) {
        Ok(Route::Listing) => browse_catalog(session, 1).await,
        Ok(Route::Creature(key)) => show_creature(session, &key, None).await,
        Err(err) => err.to_string(),
    }
}
