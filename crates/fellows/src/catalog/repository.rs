use std::collections::HashMap;
use std::sync::Arc;

use super::domain::{Opportunity, OpportunityId};

/// Read access to the opportunity collection.
pub trait OpportunityRepository: Send + Sync {
    /// `Ok(None)` when no opportunity carries `id`.
    fn fetch(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError>;
    fn list(&self) -> Result<Vec<Opportunity>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("duplicate opportunity id '{0}'")]
    Duplicate(OpportunityId),
}

/// Fixed, in-memory catalog. Cloning shares the underlying records.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Arc<Vec<Opportunity>>,
    index: Arc<HashMap<OpportunityId, usize>>,
}

impl StaticCatalog {
    pub fn new(records: Vec<Opportunity>) -> Result<Self, RepositoryError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(RepositoryError::Duplicate(record.id.clone()));
            }
        }

        Ok(Self {
            records: Arc::new(records),
            index: Arc::new(index),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &OpportunityId> {
        self.records.iter().map(|record| &record.id)
    }
}

impl OpportunityRepository for StaticCatalog {
    fn fetch(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError> {
        Ok(self
            .index
            .get(id)
            .and_then(|position| self.records.get(*position))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Opportunity>, RepositoryError> {
        Ok(self.records.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_ids() {
        let mut records = StaticCatalog::standard()
            .expect("standard catalog loads")
            .list()
            .expect("standard catalog lists");
        let first = records[0].clone();
        records.push(first.clone());

        match StaticCatalog::new(records) {
            Err(RepositoryError::Duplicate(id)) => assert_eq!(id, first.id),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn fetch_returns_none_for_unknown_id() {
        let catalog = StaticCatalog::standard().expect("standard catalog loads");
        let missing = catalog
            .fetch(&OpportunityId::new("does-not-exist"))
            .expect("fetch succeeds");
        assert!(missing.is_none());
    }

    #[test]
    fn list_preserves_source_order() {
        let catalog = StaticCatalog::standard().expect("standard catalog loads");
        let listed: Vec<_> = catalog
            .list()
            .expect("list succeeds")
            .into_iter()
            .map(|record| record.id)
            .collect();
        let ids: Vec<_> = catalog.ids().cloned().collect();
        assert_eq!(listed, ids);
    }
}
