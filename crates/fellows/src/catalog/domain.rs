use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use url::Url;

/// Unique key of an opportunity, also used as its URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpportunityId(pub String);

impl OpportunityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityCategory {
    Fellowship,
    Accelerator,
    Grant,
    Hackathon,
    Competition,
}

impl OpportunityCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Fellowship,
            Self::Accelerator,
            Self::Grant,
            Self::Hackathon,
            Self::Competition,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fellowship => "Fellowship",
            Self::Accelerator => "Accelerator",
            Self::Grant => "Grant",
            Self::Hackathon => "Hackathon",
            Self::Competition => "Competition",
        }
    }

    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Fellowship => "Fellowships",
            Self::Accelerator => "Accelerators",
            Self::Grant => "Grants",
            Self::Hackathon => "Hackathons",
            Self::Competition => "Competitions",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Fellowship => "fellowship",
            Self::Accelerator => "accelerator",
            Self::Grant => "grant",
            Self::Hackathon => "hackathon",
            Self::Competition => "competition",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|category| category.slug() == normalized)
    }
}

/// A single listing in the directory. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub name: String,
    pub organizer: String,
    pub category: OpportunityCategory,
    pub tags: BTreeSet<String>,
    pub description: String,
    pub full_description: String,
    pub eligibility: String,
    pub benefits: Vec<String>,
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub region: String,
    pub apply_link: Url,
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_image_url: Option<String>,
}

impl Opportunity {
    pub fn is_rolling(&self) -> bool {
        self.close_date.is_none()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(needle))
    }

    /// Relative link to the opportunity's detail page.
    pub fn href(&self) -> String {
        format!("/opportunity/{}", self.id)
    }

    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [&self.name, &self.organizer, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_slug_parsing_is_case_insensitive() {
        assert_eq!(
            OpportunityCategory::from_slug(" Grant "),
            Some(OpportunityCategory::Grant)
        );
        assert_eq!(OpportunityCategory::from_slug("residency"), None);
    }

    #[test]
    fn category_serializes_as_slug() {
        let json = serde_json::to_string(&OpportunityCategory::Hackathon).expect("serialize");
        assert_eq!(json, "\"hackathon\"");
    }
}
