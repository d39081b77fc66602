use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use url::Url;

use crate::catalog::{Opportunity, OpportunityCategory, OpportunityId};
use crate::deadline::{
    days_until_deadline, format_display_date, DeadlinePolicy, DeadlineStatus, DeadlineUrgency,
};
use crate::share::ShareIntent;
use crate::site::NavLink;

/// Deadline copy and badge styling for one opportunity at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineView {
    pub status: DeadlineStatus,
    pub headline: String,
    pub detail: String,
    pub urgency: DeadlineUrgency,
    pub urgency_label: &'static str,
    pub style_class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
}

impl DeadlineView {
    pub fn evaluate(
        close_date: Option<NaiveDate>,
        now: DateTime<Utc>,
        policy: &DeadlinePolicy,
    ) -> Self {
        let status = DeadlineStatus::evaluate(close_date, now);
        let urgency = policy.urgency(close_date, now);

        Self {
            status,
            headline: status.headline(),
            detail: status.detail(close_date),
            urgency,
            urgency_label: urgency.label(),
            style_class: urgency.style_class(),
            days_until: close_date.map(|date| days_until_deadline(date, now)),
            close_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunityCard {
    pub id: OpportunityId,
    pub name: String,
    pub organizer: String,
    pub category: OpportunityCategory,
    pub category_label: &'static str,
    pub tags: BTreeSet<String>,
    pub region: String,
    pub logo_url: String,
    pub href: String,
    pub deadline: DeadlineView,
}

impl OpportunityCard {
    pub fn new(opportunity: &Opportunity, now: DateTime<Utc>, policy: &DeadlinePolicy) -> Self {
        Self {
            id: opportunity.id.clone(),
            name: opportunity.name.clone(),
            organizer: opportunity.organizer.clone(),
            category: opportunity.category,
            category_label: opportunity.category.label(),
            tags: opportunity.tags.clone(),
            region: opportunity.region.clone(),
            logo_url: opportunity.logo_url.clone(),
            href: opportunity.href(),
            deadline: DeadlineView::evaluate(opportunity.close_date, now, policy),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub canonical_url: String,
}

/// Catalog record as shown on the detail page. The apply link is carried by
/// [`OpportunityPageView::apply_link`] so it can be withheld after closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunityDetails {
    pub id: OpportunityId,
    pub name: String,
    pub organizer: String,
    pub category: OpportunityCategory,
    pub category_label: &'static str,
    pub tags: BTreeSet<String>,
    pub description: String,
    pub full_description: String,
    pub eligibility: String,
    pub benefits: Vec<String>,
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub region: String,
    pub logo_url: String,
}

impl From<Opportunity> for OpportunityDetails {
    fn from(opportunity: Opportunity) -> Self {
        Self {
            id: opportunity.id,
            name: opportunity.name,
            organizer: opportunity.organizer,
            category: opportunity.category,
            category_label: opportunity.category.label(),
            tags: opportunity.tags,
            description: opportunity.description,
            full_description: opportunity.full_description,
            eligibility: opportunity.eligibility,
            benefits: opportunity.benefits,
            open_date: opportunity.open_date,
            close_date: opportunity.close_date,
            region: opportunity.region,
            logo_url: opportunity.logo_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunityPageView {
    pub opportunity: OpportunityDetails,
    pub metadata: PageMetadata,
    pub deadline: DeadlineView,
    pub closed: bool,
    /// Hidden once the deadline has passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<Url>,
    pub opens_label: String,
    pub share: ShareIntent,
    pub back_link: NavLink,
    pub calendar_available: bool,
}

impl OpportunityPageView {
    pub(crate) fn build(
        opportunity: Opportunity,
        now: DateTime<Utc>,
        policy: &DeadlinePolicy,
        base_url: &Url,
    ) -> Self {
        let deadline = DeadlineView::evaluate(opportunity.close_date, now, policy);
        let closed = deadline.status.is_closed();
        let apply_link = deadline
            .status
            .accepts_applications()
            .then(|| opportunity.apply_link.clone());
        let opens_label = opportunity
            .open_date
            .map(format_display_date)
            .unwrap_or_else(|| "N/A".to_string());

        let image = opportunity
            .share_image_url
            .as_deref()
            .unwrap_or(&opportunity.logo_url);
        let metadata = PageMetadata {
            title: format!("{} | {}", opportunity.name, crate::site::SITE_NAME),
            description: opportunity.description.clone(),
            image_url: absolute_asset_url(base_url, image),
            canonical_url: crate::site::absolute_url(base_url, &opportunity.href()),
        };

        Self {
            metadata,
            closed,
            apply_link,
            opens_label,
            share: ShareIntent::applied_to(&opportunity),
            back_link: NavLink::internal("Back to Browse", "/browse"),
            calendar_available: opportunity.close_date.is_some(),
            deadline,
            opportunity: opportunity.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub tagline: &'static str,
    pub carousels: [Vec<OpportunityCard>; 2],
}

fn absolute_asset_url(base_url: &Url, asset: &str) -> String {
    if asset.starts_with("http://") || asset.starts_with("https://") {
        asset.to_string()
    } else {
        crate::site::absolute_url(base_url, asset)
    }
}
