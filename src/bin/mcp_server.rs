//! Pokédex MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes the Pokédex catalog for LLM interaction over stdio.


use pokedex::mcp_interface::{self, CatalogSession};
use pokedex::config::ENV_CONFIG_PATH;
use pokedex::{CatalogConfig, CreatureKey};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone)]
pub struct PokedexService {
    tool_router: ToolRouter<PokedexService>,
    session: CatalogSession,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BrowseRequest {
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "Pokemon id or (partial) name to search for")]
    pub query: String,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FeedSearchRequest {
    #[schemars(description = "Pokemon name to filter the feed by; empty to browse everything")]
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShowCreatureRequest {
    #[schemars(description = "Pokemon id (e.g. '25') or name (e.g. 'pikachu')")]
    pub key: String,
    #[schemars(description = "Tab to open: 'about', 'stats', 'moves', or 'evolutions'")]
    pub tab: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectTabRequest {
    #[schemars(description = "Tab to open: 'about', 'stats', 'moves', or 'evolutions'")]
    pub tab: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OpenRouteRequest {
    #[schemars(description = "Route to open, e.g. '/pokemons' or '/pokemon/25'")]
    pub route: String,
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl PokedexService {
    pub fn new(session: CatalogSession) -> Self {
        Self {
            tool_router: Self::tool_router(),
            session,
        }
    }

    #[tool(description = "List one page of the Pokedex catalog")]
    async fn browse_catalog(
        &self,
        Parameters(request): Parameters<BrowseRequest>,
    ) -> Result<CallToolResult, McpError> {
        let page = request.page.unwrap_or(1);
        text_result(mcp_interface::browse_catalog(&self.session, page).await)
    }

    #[tool(description = "Search the Pokedex by id or name")]
    async fn search_catalog(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let page = request.page.unwrap_or(1);
        text_result(mcp_interface::search_catalog(&self.session, &request.query, page).await)
    }

    #[tool(description = "Start a new scrolling feed filtered by name")]
    async fn search_feed(
        &self,
        Parameters(request): Parameters<FeedSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(mcp_interface::search_feed(&self.session, &request.query).await)
    }

    #[tool(description = "Load the next page of the scrolling feed")]
    async fn load_more(&self) -> Result<CallToolResult, McpError> {
        text_result(mcp_interface::load_more(&self.session).await)
    }

    #[tool(description = "Show details of a Pokemon by id or name")]
    async fn show_creature(
        &self,
        Parameters(request): Parameters<ShowCreatureRequest>,
    ) -> Result<CallToolResult, McpError> {
        let tab = match request.tab.as_deref().map(mcp_interface::parse_tab) {
            Some(Ok(tab)) => Some(tab),
            Some(Err(message)) => return text_result(message),
            None => None,
        };
        let key = CreatureKey::from(request.key.as_str());
        text_result(mcp_interface::show_creature(&self.session, &key, tab).await)
    }

    #[tool(description = "Switch the detail view to another tab")]
    async fn select_tab(
        &self,
        Parameters(request): Parameters<SelectTabRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(mcp_interface::select_tab(&self.session, &request.tab).await)
    }

    #[tool(description = "Show the next Pokemon by Pokedex number")]
    async fn next_creature(&self) -> Result<CallToolResult, McpError> {
        text_result(mcp_interface::step_creature(&self.session, true).await)
    }

    #[tool(description = "Show the previous Pokemon by Pokedex number")]
    async fn previous_creature(&self) -> Result<CallToolResult, McpError> {
        text_result(mcp_interface::step_creature(&self.session, false).await)
    }

    #[tool(description = "Open a client route such as '/pokemons' or '/pokemon/25'")]
    async fn open_route(
        &self,
        Parameters(request): Parameters<OpenRouteRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(mcp_interface::open_route(&self.session, &request.route).await)
    }
}

#[tool_handler]
impl ServerHandler for PokedexService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout is the protocol channel
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::var_os(ENV_CONFIG_PATH).map(std::path::PathBuf::from);
    let config = CatalogConfig::load(config_path.as_deref())?;
    tracing::info!(api = %config.api_base_url, "Pokedex MCP server starting");

    let service = PokedexService::new(CatalogSession::with_http(config)?);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    let quit_reason = server.waiting().await?;

    tracing::info!(?quit_reason, "Pokedex MCP server exiting");
    Ok(())
}
