use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info};

use super::views::{HomeView, OpportunityCard, OpportunityPageView};
use crate::catalog::{
    Opportunity, OpportunityCategory, OpportunityId, OpportunityRepository, RepositoryError,
};
use crate::config::SiteConfig;
use crate::deadline::{days_until_deadline, DeadlinePolicy};
use crate::site::{SiteNavigation, TAGLINE};

/// Filters applied to the browse listing.
#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    pub category: Option<OpportunityCategory>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub include_closed: bool,
}

impl BrowseQuery {
    fn matches(&self, opportunity: &Opportunity, now: DateTime<Utc>) -> bool {
        if let Some(category) = self.category {
            if opportunity.category != category {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref() {
            if !opportunity.has_tag(tag) {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref() {
            if !opportunity.matches_text(search) {
                return false;
            }
        }

        self.include_closed || !is_closed(opportunity, now)
    }
}

/// Builds page view models over an opportunity repository.
pub struct OpportunityService<R> {
    repository: Arc<R>,
    policy: DeadlinePolicy,
    site: SiteConfig,
}

impl<R> OpportunityService<R>
where
    R: OpportunityRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: DeadlinePolicy, site: SiteConfig) -> Self {
        Self {
            repository,
            policy,
            site,
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Detail page for `id` as seen at `now`.
    pub fn page(
        &self,
        id: &OpportunityId,
        now: DateTime<Utc>,
    ) -> Result<OpportunityPageView, OpportunityServiceError> {
        debug!(%id, "rendering opportunity page");
        let Some(opportunity) = self.repository.fetch(id)? else {
            info!(%id, "opportunity not found");
            return Err(OpportunityServiceError::NotFound(id.clone()));
        };

        Ok(OpportunityPageView::build(
            opportunity,
            now,
            &self.policy,
            &self.site.base_url,
        ))
    }

    pub fn browse(
        &self,
        query: &BrowseQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<OpportunityCard>, OpportunityServiceError> {
        let cards: Vec<_> = self
            .repository
            .list()?
            .iter()
            .filter(|opportunity| query.matches(opportunity, now))
            .map(|opportunity| OpportunityCard::new(opportunity, now, &self.policy))
            .collect();
        debug!(results = cards.len(), ?query, "browse listing built");
        Ok(cards)
    }

    /// Open opportunities, soonest deadline first, rolling applications last.
    pub fn timeline(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<OpportunityCard>, OpportunityServiceError> {
        let mut open: Vec<_> = self
            .repository
            .list()?
            .into_iter()
            .filter(|opportunity| !is_closed(opportunity, now))
            .collect();
        open.sort_by(timeline_order);

        Ok(open
            .iter()
            .map(|opportunity| OpportunityCard::new(opportunity, now, &self.policy))
            .collect())
    }

    /// Landing page: the timeline dealt alternately into two carousels.
    pub fn home(&self, now: DateTime<Utc>) -> Result<HomeView, OpportunityServiceError> {
        let mut carousels: [Vec<OpportunityCard>; 2] = [Vec::new(), Vec::new()];
        for (position, card) in self.timeline(now)?.into_iter().enumerate() {
            carousels[position % 2].push(card);
        }

        Ok(HomeView {
            tagline: TAGLINE,
            carousels,
        })
    }

    pub fn navigation(&self, now: DateTime<Utc>) -> SiteNavigation {
        SiteNavigation::standard(now.year())
    }

    pub fn opportunity_ids(&self) -> Result<Vec<OpportunityId>, OpportunityServiceError> {
        Ok(self
            .repository
            .list()?
            .into_iter()
            .map(|opportunity| opportunity.id)
            .collect())
    }
}

fn is_closed(opportunity: &Opportunity, now: DateTime<Utc>) -> bool {
    opportunity
        .close_date
        .is_some_and(|date| days_until_deadline(date, now) < 0)
}

fn timeline_order(left: &Opportunity, right: &Opportunity) -> Ordering {
    match (left.close_date, right.close_date) {
        (Some(a), Some(b)) => a.cmp(&b).then_with(|| left.name.cmp(&right.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.name.cmp(&right.name),
    }
}

/// Error raised by the opportunity service.
#[derive(Debug, thiserror::Error)]
pub enum OpportunityServiceError {
    #[error("opportunity '{0}' not found")]
    NotFound(OpportunityId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
