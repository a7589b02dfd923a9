use crate::error::StoreError;
use crate::query::{Filter, SortKey};
use crate::store::core::{FindOptions, MemoryStore};
use serde_json::Value;
use std::sync::Arc;

const VAC_CENTER_COLLECTION: &str = "vaccenters";

/// Vaccine centers are retrieved in bulk only; no filtering or paging.
pub struct VacCenterStore {
    store: Arc<MemoryStore>,
}

impl VacCenterStore {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn get_all(&self) -> Vec<Value> {
        let options = FindOptions {
            sort: vec![SortKey {
                field: "name".to_string(),
                descending: false,
            }],
            ..FindOptions::default()
        };
        self.store
            .find(VAC_CENTER_COLLECTION, &Filter::default(), &options)
    }

    pub fn create(&self, document: Value) -> Result<Value, StoreError> {
        self.store.insert(VAC_CENTER_COLLECTION, document)
    }
}
