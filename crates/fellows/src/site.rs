//! Site-wide metadata: crawler rules, sitemap, and footer navigation.

use serde::Serialize;
use url::Url;

use crate::catalog::{OpportunityCategory, OpportunityId};

pub const SITE_NAME: &str = "fellows.best";
pub const TAGLINE: &str = "Never miss a deadline again. Discover fellowships, grants, \
accelerators, and competitions tailored to your interests and timeline.";

const STATIC_PAGES: [&str; 4] = ["/", "/browse", "/timeline", "/submit"];
const DISALLOWED_PATHS: [&str; 2] = ["/_next", "/api/*"];

/// Absolute URL for a site-relative `path`.
pub fn absolute_url(base: &Url, path: &str) -> String {
    let root = base.as_str().trim_end_matches('/');
    if path.starts_with('/') {
        format!("{root}{path}")
    } else {
        format!("{root}/{path}")
    }
}

pub fn robots_txt(base: &Url) -> String {
    let mut body = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED_PATHS {
        body.push_str("Disallow: ");
        body.push_str(path);
        body.push('\n');
    }
    body.push_str(&format!(
        "\nSitemap: {}\n",
        absolute_url(base, "/sitemap.xml")
    ));
    body
}

pub fn sitemap_xml<'a, I>(base: &Url, opportunities: I) -> String
where
    I: IntoIterator<Item = &'a OpportunityId>,
{
    let mut body = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    let opportunity_paths = opportunities
        .into_iter()
        .map(|id| format!("/opportunity/{id}"));
    for path in STATIC_PAGES.iter().map(|p| p.to_string()).chain(opportunity_paths) {
        body.push_str("  <url><loc>");
        body.push_str(&escape_xml(&absolute_url(base, &path)));
        body.push_str("</loc></url>\n");
    }

    body.push_str("</urlset>\n");
    body
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

impl NavLink {
    pub fn internal(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            external: false,
        }
    }

    fn external(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            external: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteNavigation {
    pub site_name: &'static str,
    pub tagline: &'static str,
    pub sections: Vec<NavSection>,
    pub social: Vec<NavLink>,
    pub copyright: String,
}

impl SiteNavigation {
    pub fn standard(year: i32) -> Self {
        let categories = [
            OpportunityCategory::Fellowship,
            OpportunityCategory::Accelerator,
            OpportunityCategory::Grant,
            OpportunityCategory::Hackathon,
        ]
        .into_iter()
        .map(|category| {
            NavLink::internal(
                category.plural_label(),
                format!("/browse?category={}", category.slug()),
            )
        })
        .collect();

        Self {
            site_name: SITE_NAME,
            tagline: TAGLINE,
            sections: vec![
                NavSection {
                    title: "Quick Links",
                    links: vec![
                        NavLink::internal("Timeline", "/timeline"),
                        NavLink::internal("Browse All", "/browse"),
                        NavLink::internal("Submit Opportunity", "/submit"),
                        NavLink::internal("My Profile", "/profile"),
                    ],
                },
                NavSection {
                    title: "Categories",
                    links: categories,
                },
                NavSection {
                    title: "Legal",
                    links: vec![
                        NavLink::internal("Terms & Conditions", "/terms"),
                        NavLink::internal("Privacy Policy", "/privacy"),
                    ],
                },
            ],
            social: vec![
                NavLink::external("Twitter", "https://x.com/disamdev"),
                NavLink::external("GitHub", "https://github.com/samuelcorsan/ddfellows"),
            ],
            copyright: format!("© {year} {SITE_NAME}. All rights reserved."),
        }
    }
}
