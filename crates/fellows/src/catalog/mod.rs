//! Opportunity records and the read-only catalog that serves them.

pub mod domain;
mod import;
pub mod repository;

pub use domain::{Opportunity, OpportunityCategory, OpportunityId};
pub use import::{CatalogImportError, CatalogImporter};
pub use repository::{OpportunityRepository, RepositoryError, StaticCatalog};
