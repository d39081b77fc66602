use chrono::NaiveDate;
use fellows::catalog::{CatalogImporter, OpportunityCategory, OpportunityId, StaticCatalog};
use fellows::config::SiteConfig;
use fellows::deadline::{start_of_day, DeadlinePolicy, DeadlineStatus, DeadlineUrgency};
use fellows::pages::{BrowseQuery, OpportunityService, OpportunityServiceError};
use std::io::Cursor;
use std::sync::Arc;
use url::Url;

const CATALOG: &str = "\
id,name,organizer,category,tags,description,full_description,eligibility,benefits,open_date,close_date,region,apply_link,logo_url,share_image_url
new-year-fellowship,New Year Fellowship,Calendar Org,fellowship,research|ai,Closes on New Year's Day.,A fellowship that closes on January 1st.,Anyone,$10k|Mentorship,2024-11-01,2025-01-01,Global,https://example.com/new-year,/logos/new-year.png,https://cdn.example.com/og/new-year.png
rolling-grant,Rolling Grant,Grant Org,grant,research,Always open.,Always open grant.,Anyone,$5k,,,Global,https://example.com/grant,/logos/grant.png,
spring-hackathon,Spring Hackathon,Hack Org,hackathon,web3|remote,Builds in spring.,A remote spring hackathon.,Developers,Prizes,2024-12-01,2025-01-20,Remote,https://example.com/hack,/logos/hack.png,
winter-accelerator,Winter Accelerator,Accel Org,accelerator,startups,Closes after the holidays.,Accelerator closing in early January.,Founders,$100k,,2025-01-10,Europe,https://example.com/accel,/logos/accel.png,
";

fn service() -> OpportunityService<StaticCatalog> {
    let catalog = CatalogImporter::from_reader(Cursor::new(CATALOG)).expect("catalog loads");
    OpportunityService::new(
        Arc::new(catalog),
        DeadlinePolicy::default(),
        SiteConfig {
            base_url: Url::parse("https://fellows.best").expect("valid base url"),
        },
    )
}

fn day(value: &str) -> chrono::DateTime<chrono::Utc> {
    start_of_day(NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date"))
}

#[test]
fn open_page_shows_days_left_and_apply_link() {
    let view = service()
        .page(&OpportunityId::new("new-year-fellowship"), day("2024-12-29"))
        .expect("page renders");

    assert_eq!(view.deadline.status, DeadlineStatus::Open { days_left: 3 });
    assert_eq!(view.deadline.headline, "3 days left");
    assert_eq!(view.deadline.detail, "Closes Jan 1, 2025");
    assert_eq!(view.deadline.urgency, DeadlineUrgency::Urgent);
    assert!(view.deadline.style_class.contains("red"));
    assert_eq!(view.deadline.days_until, Some(3));
    assert!(!view.closed);
    assert_eq!(
        view.apply_link.as_ref().map(|url| url.as_str()),
        Some("https://example.com/new-year")
    );
    assert!(view.calendar_available);
    assert_eq!(view.opens_label, "Nov 1, 2024");
}

#[test]
fn closed_page_hides_apply_link_but_keeps_urgent_tier() {
    let view = service()
        .page(&OpportunityId::new("new-year-fellowship"), day("2025-01-02"))
        .expect("page renders");

    assert!(view.closed);
    assert_eq!(view.deadline.headline, "Closed");
    assert_eq!(view.deadline.days_until, Some(-1));
    assert_eq!(view.deadline.urgency, DeadlineUrgency::Urgent);
    assert!(view.apply_link.is_none());

    let json = serde_json::to_value(&view).expect("page serializes");
    assert_eq!(json["opportunity"]["id"], "new-year-fellowship");
    assert!(json["opportunity"].get("apply_link").is_none());
}

#[test]
fn rolling_page_uses_safe_tier_and_no_calendar() {
    let view = service()
        .page(&OpportunityId::new("rolling-grant"), day("2025-01-02"))
        .expect("page renders");

    assert_eq!(view.deadline.status, DeadlineStatus::Rolling);
    assert_eq!(view.deadline.headline, "Rolling Application");
    assert_eq!(view.deadline.detail, "Apply anytime");
    assert_eq!(view.deadline.urgency, DeadlineUrgency::Safe);
    assert!(view.deadline.days_until.is_none());
    assert!(view.apply_link.is_some());
    assert!(!view.calendar_available);
    assert_eq!(view.opens_label, "N/A");
}

#[test]
fn page_metadata_prefers_share_image_and_builds_canonical_url() {
    let service = service();

    let view = service
        .page(&OpportunityId::new("new-year-fellowship"), day("2024-12-01"))
        .expect("page renders");
    assert_eq!(view.metadata.title, "New Year Fellowship | fellows.best");
    assert_eq!(
        view.metadata.image_url,
        "https://cdn.example.com/og/new-year.png"
    );
    assert_eq!(
        view.metadata.canonical_url,
        "https://fellows.best/opportunity/new-year-fellowship"
    );
    assert_eq!(view.back_link.href, "/browse");
    assert!(view.share.url.starts_with("https://twitter.com/intent/tweet?text="));
    assert!(view.share.text.contains("New Year Fellowship"));

    let rolling = service
        .page(&OpportunityId::new("rolling-grant"), day("2024-12-01"))
        .expect("page renders");
    assert_eq!(
        rolling.metadata.image_url,
        "https://fellows.best/logos/grant.png"
    );
}

#[test]
fn unknown_id_is_not_found() {
    match service().page(&OpportunityId::new("ghost"), day("2025-01-01")) {
        Err(OpportunityServiceError::NotFound(id)) => assert_eq!(id.as_str(), "ghost"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn browse_hides_closed_unless_requested() {
    let service = service();
    let now = day("2025-01-05");

    let open: Vec<_> = service
        .browse(&BrowseQuery::default(), now)
        .expect("browse succeeds")
        .into_iter()
        .map(|card| card.id.0)
        .collect();
    assert_eq!(
        open,
        vec!["rolling-grant", "spring-hackathon", "winter-accelerator"]
    );

    let all = service
        .browse(
            &BrowseQuery {
                include_closed: true,
                ..BrowseQuery::default()
            },
            now,
        )
        .expect("browse succeeds");
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].deadline.headline, "Closed");
}

#[test]
fn browse_filters_by_category_tag_and_text() {
    let service = service();
    let now = day("2024-12-15");

    let grants = service
        .browse(
            &BrowseQuery {
                category: Some(OpportunityCategory::Grant),
                ..BrowseQuery::default()
            },
            now,
        )
        .expect("browse succeeds");
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].category_label, "Grant");

    let research = service
        .browse(
            &BrowseQuery {
                tag: Some("RESEARCH".to_string()),
                ..BrowseQuery::default()
            },
            now,
        )
        .expect("browse succeeds");
    assert_eq!(research.len(), 2);

    let searched = service
        .browse(
            &BrowseQuery {
                search: Some("hack org".to_string()),
                ..BrowseQuery::default()
            },
            now,
        )
        .expect("browse succeeds");
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].href, "/opportunity/spring-hackathon");
}

#[test]
fn timeline_orders_by_deadline_then_rolling() {
    let cards = service().timeline(day("2024-12-20")).expect("timeline builds");
    let ids: Vec<_> = cards.iter().map(|card| card.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "new-year-fellowship",
            "winter-accelerator",
            "spring-hackathon",
            "rolling-grant",
        ]
    );
    assert_eq!(cards[0].deadline.urgency, DeadlineUrgency::Warning);
    assert_eq!(cards[2].deadline.urgency, DeadlineUrgency::Safe);
}

#[test]
fn home_deals_timeline_into_two_carousels() {
    let home = service().home(day("2024-12-20")).expect("home builds");
    let [first, second] = &home.carousels;
    let first: Vec<_> = first.iter().map(|card| card.id.as_str()).collect();
    let second: Vec<_> = second.iter().map(|card| card.id.as_str()).collect();
    assert_eq!(first, vec!["new-year-fellowship", "spring-hackathon"]);
    assert_eq!(second, vec!["winter-accelerator", "rolling-grant"]);
}

#[test]
fn standard_catalog_has_unique_linkable_ids() {
    let catalog = StaticCatalog::standard().expect("standard catalog loads");
    let service = OpportunityService::new(
        Arc::new(catalog),
        DeadlinePolicy::default(),
        SiteConfig {
            base_url: Url::parse("https://fellows.best").expect("valid base url"),
        },
    );
    let ids = service.opportunity_ids().expect("ids list");
    assert!(ids.iter().any(|id| id.as_str() == "y-combinator"));
    for id in ids {
        service
            .page(&id, day("2026-10-16"))
            .expect("every standard entry renders");
    }
}
