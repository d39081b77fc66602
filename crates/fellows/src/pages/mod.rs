//! Page view models built from catalog records and the deadline classifier,
//! plus the HTTP routes that serve them.

pub mod router;
pub mod service;
pub mod views;

pub use router::{opportunity_router, parse_date, BrowseParams, EvaluationParams};
pub use service::{BrowseQuery, OpportunityService, OpportunityServiceError};
pub use views::{
    DeadlineView, HomeView, OpportunityCard, OpportunityDetails, OpportunityPageView, PageMetadata,
};
