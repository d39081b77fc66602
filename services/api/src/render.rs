use crate::cli::{CatalogArgs, ListArgs, ShowArgs, TimelineArgs};
use crate::infra::{build_pages, Pages};
use chrono::{DateTime, Utc};
use fellows::catalog::OpportunityId;
use fellows::config::AppConfig;
use fellows::deadline::start_of_day;
use fellows::error::AppError;
use fellows::pages::{BrowseQuery, OpportunityCard, OpportunityPageView};

fn prepare(args: CatalogArgs) -> Result<(Pages, DateTime<Utc>), AppError> {
    let config = AppConfig::load()?;
    let pages = build_pages(&config, args.catalog)?;
    let now = args.today.map(start_of_day).unwrap_or_else(Utc::now);
    Ok((pages, now))
}

pub(crate) fn run_opportunity_show(args: ShowArgs) -> Result<(), AppError> {
    let ShowArgs { id, catalog } = args;
    let (pages, now) = prepare(catalog)?;
    let view = pages.page(&OpportunityId(id), now)?;
    render_page(&view, now);
    Ok(())
}

pub(crate) fn run_opportunity_list(args: ListArgs) -> Result<(), AppError> {
    let ListArgs {
        category,
        tag,
        include_closed,
        catalog,
    } = args;
    let (pages, now) = prepare(catalog)?;
    let query = BrowseQuery {
        category,
        tag,
        search: None,
        include_closed,
    };
    let cards = pages.browse(&query, now)?;

    println!("Opportunities as of {}", now.date_naive());
    render_cards(&cards);
    Ok(())
}

pub(crate) fn run_timeline(args: TimelineArgs) -> Result<(), AppError> {
    let (pages, now) = prepare(args.catalog)?;
    let cards = pages.timeline(now)?;

    println!("Deadline timeline as of {}", now.date_naive());
    render_cards(&cards);
    Ok(())
}

fn render_page(view: &OpportunityPageView, now: DateTime<Utc>) {
    let opportunity = &view.opportunity;
    println!("{} ({})", opportunity.name, opportunity.category_label);
    println!("Organized by {} | {}", opportunity.organizer, opportunity.region);
    println!("Evaluated {}", now.date_naive());

    println!(
        "\n[{}] {} - {}",
        view.deadline.urgency_label, view.deadline.headline, view.deadline.detail
    );
    println!("Opens: {}", view.opens_label);

    println!("\n{}", opportunity.full_description);
    println!("\nEligibility: {}", opportunity.eligibility);
    if !opportunity.benefits.is_empty() {
        println!("Benefits:");
        for benefit in &opportunity.benefits {
            println!("  - {benefit}");
        }
    }
    if !opportunity.tags.is_empty() {
        let tags: Vec<_> = opportunity.tags.iter().map(String::as_str).collect();
        println!("Tags: {}", tags.join(", "));
    }

    match &view.apply_link {
        Some(link) => println!("\nApply: {link}"),
        None => println!("\nApplications are closed."),
    }
    println!("Share: {}", view.share.url);
    println!("Canonical: {}", view.metadata.canonical_url);
}

fn render_cards(cards: &[OpportunityCard]) {
    if cards.is_empty() {
        println!("No opportunities match.");
        return;
    }

    for card in cards {
        println!(
            "- [{}] {} ({}) {} | {}",
            card.deadline.urgency_label,
            card.name,
            card.category_label,
            card.deadline.headline,
            card.href
        );
    }
}
