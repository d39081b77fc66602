use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

use super::domain::{Opportunity, OpportunityCategory, OpportunityId};
use super::repository::{RepositoryError, StaticCatalog};

const LIST_SEPARATOR: char = '|';
const STANDARD_CATALOG: &str = include_str!("../../data/opportunities.csv");

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
    #[error("catalog rejected: {0}")]
    Repository(#[from] RepositoryError),
}

/// Loads opportunity catalogs from CSV exports.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<StaticCatalog, CatalogImportError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading opportunity catalog");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<StaticCatalog, CatalogImportError> {
        let records = parse_records(reader)?;
        Ok(StaticCatalog::new(records)?)
    }
}

impl StaticCatalog {
    /// The catalog bundled with the crate.
    pub fn standard() -> Result<Self, CatalogImportError> {
        CatalogImporter::from_reader(STANDARD_CATALOG.as_bytes())
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<Opportunity>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let raw = result?;
        let line = raw.position().map(|position| position.line()).unwrap_or(0);
        let row: CatalogRow = raw.deserialize(Some(&headers))?;
        records.push(row.into_opportunity(line)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    organizer: String,
    category: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    full_description: String,
    #[serde(default)]
    eligibility: String,
    #[serde(default)]
    benefits: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    open_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    close_date: Option<String>,
    #[serde(default)]
    region: String,
    apply_link: String,
    #[serde(default)]
    logo_url: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    share_image_url: Option<String>,
}

impl CatalogRow {
    fn into_opportunity(self, line: u64) -> Result<Opportunity, CatalogImportError> {
        let invalid = |reason: String| CatalogImportError::InvalidRow { line, reason };

        if self.id.is_empty() {
            return Err(invalid("missing id".to_string()));
        }
        if self.name.is_empty() {
            return Err(invalid(format!("opportunity '{}' has no name", self.id)));
        }

        let category = OpportunityCategory::from_slug(&self.category)
            .ok_or_else(|| invalid(format!("unknown category '{}'", self.category)))?;
        let apply_link = Url::parse(&self.apply_link)
            .map_err(|err| invalid(format!("invalid apply link '{}': {err}", self.apply_link)))?;

        let open_date = optional_date(line, "open_date", self.open_date.as_deref());
        let close_date = optional_date(line, "close_date", self.close_date.as_deref());
        let full_description = if self.full_description.is_empty() {
            self.description.clone()
        } else {
            self.full_description
        };

        Ok(Opportunity {
            id: OpportunityId(self.id),
            name: self.name,
            organizer: self.organizer,
            category,
            tags: split_list(&self.tags).collect(),
            description: self.description,
            full_description,
            eligibility: self.eligibility,
            benefits: split_list(&self.benefits).collect(),
            open_date,
            close_date,
            region: self.region,
            apply_link,
            logo_url: self.logo_url,
            share_image_url: self.share_image_url,
        })
    }
}

fn optional_date(line: u64, field: &'static str, value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?;
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        warn!(line, field, value = raw, "malformed date treated as absent");
    }
    parsed
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}
