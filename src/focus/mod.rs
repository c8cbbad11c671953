//! Focus list: issues the user wants to keep in sight, enriched with their summary from the issue
//! tracker. Stored in insertion order in `focus.json`. Ids aren't unique, the same issue can be
//! added more than once.

use anyhow::Result;
use tracing::info;

use crate::{
    config::AppConfig,
    jira::IssueTracker,
    state::{entities::FocusItemEntity, StateKey, StateStore},
    utils::clock::Clock,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The tracker doesn't know the issue. Nothing was stored.
    NotFound,
    Added(FocusItemEntity),
}

pub struct FocusList<'a> {
    store: &'a StateStore,
    tracker: &'a dyn IssueTracker,
    clock: &'a dyn Clock,
    config: &'a AppConfig,
}

impl<'a> FocusList<'a> {
    pub fn new(
        store: &'a StateStore,
        tracker: &'a dyn IssueTracker,
        clock: &'a dyn Clock,
        config: &'a AppConfig,
    ) -> Self {
        Self {
            store,
            tracker,
            clock,
            config,
        }
    }

    async fn load(&self) -> Result<Vec<FocusItemEntity>> {
        Ok(self.store.load_or_init(StateKey::Focus).await?)
    }

    pub async fn add(&self, id: &str) -> Result<AddOutcome> {
        let mut items = self.load().await?;

        let Some(summary) = self.tracker.issue_summary(id).await? else {
            return Ok(AddOutcome::NotFound);
        };

        let item = FocusItemEntity {
            id: id.to_string(),
            summary,
            created: self.clock.time(),
            url: self.config.browse_url(id),
        };
        items.push(item.clone());
        self.store.save(StateKey::Focus, &items).await?;
        info!("Added focus item {}", item.id);
        Ok(AddOutcome::Added(item))
    }

    pub async fn list(&self) -> Result<Vec<FocusItemEntity>> {
        self.load().await
    }

    /// Removes the first item whose id matches, ignoring case.
    pub async fn remove(&self, id: &str) -> Result<Option<FocusItemEntity>> {
        let mut items = self.load().await?;
        let needle = id.to_lowercase();
        let Some(index) = items.iter().position(|v| v.id.to_lowercase() == needle) else {
            return Ok(None);
        };

        let removed = items.remove(index);
        self.store.save(StateKey::Focus, &items).await?;
        info!("Removed focus item {}", removed.id);
        Ok(Some(removed))
    }
}
