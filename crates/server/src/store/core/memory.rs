use crate::error::StoreError;
use crate::query::{Filter, ListParams, SortKey};
use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use uuid::Uuid;

/// Cursor-style options for a find: sort, projection, and index bounds.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub sort: Vec<SortKey>,
    pub select: Option<Vec<String>>,
    pub skip: u64,
    pub limit: Option<u64>,
}

impl From<&ListParams> for FindOptions {
    fn from(params: &ListParams) -> Self {
        FindOptions {
            sort: params.sort.clone(),
            select: params.select.clone(),
            skip: params.skip(),
            limit: Some(params.limit),
        }
    }
}

/// In-memory document store. Documents are JSON objects keyed by
/// `<collection>:<id>`; the store assigns `id` and `createdAt` on insert and
/// guarantees per-document atomicity only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<String, Value>,
}

fn document_key(collection: &str, id: &str) -> String {
    format!("{collection}:{id}")
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, mut document: Value) -> Result<Value, StoreError> {
        let Some(fields) = document.as_object_mut() else {
            return Err(StoreError::InvalidDocument(
                "document body must be a JSON object".to_string(),
            ));
        };

        let id = Uuid::new_v4().to_string();
        fields.insert("id".to_string(), Value::String(id.clone()));
        fields.insert(
            "createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );

        self.documents
            .insert(document_key(collection, &id), document.clone());
        Ok(document)
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        self.documents
            .get(&document_key(collection, id))
            .map(|entry| entry.value().clone())
    }

    pub fn count(&self, collection: &str) -> u64 {
        let prefix = format!("{collection}:");
        self.documents
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .count() as u64
    }

    pub fn find(&self, collection: &str, filter: &Filter, options: &FindOptions) -> Vec<Value> {
        let prefix = format!("{collection}:");
        let mut documents: Vec<Value> = self
            .documents
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .map(|entry| entry.value().clone())
            .filter(|document| filter.matches(document))
            .collect();

        sort_documents(&mut documents, &options.sort);

        let documents: Vec<Value> = documents
            .into_iter()
            .skip(options.skip as usize)
            .take(options.limit.unwrap_or(u64::MAX) as usize)
            .collect();

        match &options.select {
            Some(fields) => documents
                .into_iter()
                .map(|document| project(document, fields))
                .collect(),
            None => documents,
        }
    }

    /// Merges `changes` into the document, returning the updated document.
    /// `id` and `createdAt` are never overwritten.
    pub fn update(
        &self,
        collection: &str,
        id: &str,
        changes: &Value,
    ) -> Result<Option<Value>, StoreError> {
        let Some(changes) = changes.as_object() else {
            return Err(StoreError::InvalidDocument(
                "update body must be a JSON object".to_string(),
            ));
        };

        let Some(mut entry) = self.documents.get_mut(&document_key(collection, id)) else {
            return Ok(None);
        };
        if let Some(fields) = entry.value_mut().as_object_mut() {
            for (key, value) in changes {
                if key == "id" || key == "createdAt" {
                    continue;
                }
                fields.insert(key.clone(), value.clone());
            }
        }
        Ok(Some(entry.value().clone()))
    }

    pub fn delete(&self, collection: &str, id: &str) -> bool {
        self.documents.remove(&document_key(collection, id)).is_some()
    }
}

/// Field projection; `id` is always retained.
pub(crate) fn project(document: Value, fields: &[String]) -> Value {
    let Value::Object(source) = document else {
        return document;
    };
    let mut projected = Map::new();
    if let Some(id) = source.get("id") {
        projected.insert("id".to_string(), id.clone());
    }
    for field in fields {
        if let Some(value) = source.get(field) {
            projected.insert(field.clone(), value.clone());
        }
    }
    Value::Object(projected)
}

fn sort_documents(documents: &mut [Value], sort: &[SortKey]) {
    documents.sort_by(|a, b| {
        for key in sort {
            let mut ordering = compare_field(a, b, &key.field);
            if key.descending {
                ordering = ordering.reverse();
            }
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        // Tie-break on id so paging over equal keys stays deterministic.
        compare_field(a, b, "id")
    });
}

fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(x), Some(y)) => compare_values(x, y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    match (a.as_str(), b.as_str()) {
        (Some(x), Some(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
