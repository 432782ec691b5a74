//! Detail view state shared between consumers through an explicit context.

use crate::aggregate::creature_detail;
use crate::config::CatalogConfig;
use crate::fetch::CreatureSource;
use crate::model::{CreatureDetail, CreatureKey};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tokio::sync::RwLock;

/// Panels of the detail view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    Display,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DetailTab {
    #[default]
    About,
    Stats,
    Moves,
    Evolutions,
}

/// Issuance order of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Monotonic token counter. Only the most recently issued token is current.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: AtomicU64,
}

impl RequestTokens {
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub detail: Option<CreatureDetail>,
    pub tab: DetailTab,
}

/// Handle to the detail view state. Clones share the same state.
#[derive(Clone)]
pub struct ViewContext {
    source: Arc<dyn CreatureSource>,
    config: CatalogConfig,
    state: Arc<RwLock<ViewState>>,
    tokens: Arc<RequestTokens>,
}

impl ViewContext {
    pub fn new(source: Arc<dyn CreatureSource>, config: CatalogConfig) -> Self {
        Self {
            source,
            config,
            state: Arc::new(RwLock::new(ViewState::default())),
            tokens: Arc::new(RequestTokens::default()),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn detail(&self) -> Option<CreatureDetail> {
        self.state.read().await.detail.clone()
    }

    pub async fn tab(&self) -> DetailTab {
        self.state.read().await.tab
    }

    pub async fn select_tab(&self, tab: DetailTab) {
        self.state.write().await.tab = tab;
    }

    /// Load `key` and make it the active creature.
    ///
    /// Returns `false` when the lookup failed (the previous creature stays) or
    /// when a newer navigation was issued before this one completed.
    pub async fn navigate(&self, key: &CreatureKey) -> bool {
        let token = self.tokens.issue();
        let detail = creature_detail(self.source.as_ref(), key, &self.config).await;
        self.publish(token, detail).await
    }

    /// Navigate to the previous creature, if any.
    pub async fn previous(&self) -> bool {
        let prev = self
            .state
            .read()
            .await
            .detail
            .as_ref()
            .and_then(|d| d.prev_and_next.prev_id);
        match prev {
            Some(id) => self.navigate(&CreatureKey::Id(id)).await,
            None => false,
        }
    }

    /// Navigate to the next creature, if any.
    pub async fn next(&self) -> bool {
        let next = self
            .state
            .read()
            .await
            .detail
            .as_ref()
            .and_then(|d| d.prev_and_next.next_id);
        match next {
            Some(id) => self.navigate(&CreatureKey::Id(id)).await,
            None => false,
        }
    }

    /// Apply a response if `token` is still the latest issued.
    pub async fn publish(&self, token: RequestToken, detail: Option<CreatureDetail>) -> bool {
        let mut state = self.state.write().await;
        if !self.tokens.is_current(token) {
            tracing::debug!(?token, "discarding superseded creature response");
            return false;
        }
        match detail {
            Some(detail) => {
                state.detail = Some(detail);
                true
            }
            None => false,
        }
    }

    /// Reserve a token for a fetch driven outside [`ViewContext::navigate`].
    pub fn begin_request(&self) -> RequestToken {
        self.tokens.issue()
    }
}
