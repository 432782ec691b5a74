//! HTTP access to the creature API and the catalog search endpoint.

use crate::config::CatalogConfig;
use crate::errors::{FetchError, FetchResult};
use crate::model::CreatureKey;
use async_trait::async_trait;
use schema::{CreatureRecord, EvolutionChainRecord, ListingPage, SearchPage, SpeciesRecord, TypeRecord};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Source of raw creature records.
///
/// Implemented over HTTP by [`PokeApiClient`]; tests substitute an in-memory source.
#[async_trait]
pub trait CreatureSource: Send + Sync {
    async fn fetch_creature(&self, key: &CreatureKey) -> FetchResult<CreatureRecord>;

    async fn fetch_species(&self, key: &CreatureKey) -> FetchResult<SpeciesRecord>;

    async fn fetch_page(&self, offset: u32, limit: u32) -> FetchResult<ListingPage>;

    async fn search(&self, query: &str, page: u32, page_size: u32) -> FetchResult<SearchPage>;

    /// `url` is the absolute chain URL named by a species record.
    async fn fetch_evolution_chain(&self, url: &str) -> FetchResult<EvolutionChainRecord>;

    async fn fetch_type(&self, name: &str) -> FetchResult<TypeRecord>;
}

/// Client for PokeAPI plus the catalog search endpoint
#[derive(Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    api_base_url: String,
    search_base_url: String,
}

impl PokeApiClient {
    /// Create a client with the given base URLs
    ///
    /// # Arguments
    /// * `api_base_url` - PokeAPI root, e.g. "https://pokeapi.co/api/v2"
    /// * `search_base_url` - Host serving `/pokemons/search`
    /// * `timeout` - Whole-request timeout
    pub fn new(
        api_base_url: impl Into<String>,
        search_base_url: impl Into<String>,
        timeout: Duration,
    ) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            api_base_url: api_base_url.into(),
            search_base_url: search_base_url.into(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> FetchResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.search_base_url.clone(),
            config.request_timeout(),
        )
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> FetchResult<T> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl CreatureSource for PokeApiClient {
    async fn fetch_creature(&self, key: &CreatureKey) -> FetchResult<CreatureRecord> {
        self.get_json(self.api_url(&format!("pokemon/{}", key))).await
    }

    async fn fetch_species(&self, key: &CreatureKey) -> FetchResult<SpeciesRecord> {
        self.get_json(self.api_url(&format!("pokemon-species/{}", key)))
            .await
    }

    async fn fetch_page(&self, offset: u32, limit: u32) -> FetchResult<ListingPage> {
        self.get_json(self.api_url(&format!("pokemon?offset={}&limit={}", offset, limit)))
            .await
    }

    async fn search(&self, query: &str, page: u32, page_size: u32) -> FetchResult<SearchPage> {
        let base = self.search_base_url.trim_end_matches('/');
        let url = reqwest::Url::parse_with_params(
            &format!("{}/pokemons/search", base),
            &[
                ("name", query.to_string()),
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )
        .map_err(|err| FetchError::InvalidUrl(format!("{}/pokemons/search: {}", base, err)))?;
        self.get_json(url.to_string()).await
    }

    async fn fetch_evolution_chain(&self, url: &str) -> FetchResult<EvolutionChainRecord> {
        self.get_json(url.to_string()).await
    }

    async fn fetch_type(&self, name: &str) -> FetchResult<TypeRecord> {
        self.get_json(self.api_url(&format!("type/{}", name))).await
    }
}
