use crate::error::StoreError;
use crate::query::{Filter, ListParams};
use crate::store::core::memory::project;
use crate::store::core::{FindOptions, MemoryStore};
use crate::store::domains::appointment_store::APPOINTMENT_COLLECTION;
use serde_json::Value;
use std::sync::Arc;

pub(crate) const HOSPITAL_COLLECTION: &str = "hospitals";

pub struct HospitalStore {
    store: Arc<MemoryStore>,
}

impl HospitalStore {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Runs the list query and returns the page of hospitals together with
    /// the unfiltered collection total used for pagination.
    pub fn list(&self, params: &ListParams) -> (Vec<Value>, u64) {
        let total = self.store.count(HOSPITAL_COLLECTION);

        // Appointments are populated before projection, so a `select` that
        // omits them drops the field.
        let options = FindOptions {
            select: None,
            ..FindOptions::from(params)
        };
        let mut hospitals = self.store.find(HOSPITAL_COLLECTION, &params.filter, &options);
        for hospital in &mut hospitals {
            self.attach_appointments(hospital);
        }

        if let Some(fields) = &params.select {
            hospitals = hospitals
                .into_iter()
                .map(|hospital| project(hospital, fields))
                .collect();
        }

        (hospitals, total)
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        let mut hospital = self.store.get(HOSPITAL_COLLECTION, id)?;
        self.attach_appointments(&mut hospital);
        Some(hospital)
    }

    pub fn create(&self, document: Value) -> Result<Value, StoreError> {
        self.store.insert(HOSPITAL_COLLECTION, document)
    }

    pub fn update(&self, id: &str, changes: &Value) -> Result<Option<Value>, StoreError> {
        let updated = self.store.update(HOSPITAL_COLLECTION, id, changes)?;
        Ok(updated.map(|mut hospital| {
            self.attach_appointments(&mut hospital);
            hospital
        }))
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        if !self.store.delete(HOSPITAL_COLLECTION, id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Referenced relation: appointments carry the hospital id; the hospital
    /// document itself never embeds them.
    fn attach_appointments(&self, hospital: &mut Value) {
        let Some(id) = hospital.get("id").and_then(Value::as_str) else {
            return;
        };
        let appointments = self.store.find(
            APPOINTMENT_COLLECTION,
            &Filter::equals("hospital", id),
            &FindOptions::default(),
        );
        if let Some(fields) = hospital.as_object_mut() {
            fields.insert("appointments".to_string(), Value::Array(appointments));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::domains::appointment_store::AppointmentStore;
    use serde_json::json;
    use std::collections::HashMap;

    fn list_params(pairs: &[(&str, &str)]) -> ListParams {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ListParams::from_query(&params).unwrap()
    }

    #[test]
    fn test_list_populates_appointments() {
        let store = Arc::new(MemoryStore::new());
        let hospitals = HospitalStore::new(store.clone());
        let appointments = AppointmentStore::new(store);

        let hospital = hospitals.create(json!({"name": "Central"})).unwrap();
        let hospital_id = hospital["id"].as_str().unwrap();
        appointments
            .create(json!({"aptDate": "2026-09-01T09:00:00Z", "hospital": hospital_id}))
            .unwrap();

        let (listed, total) = hospitals.list(&list_params(&[]));
        assert_eq!(total, 1);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["appointments"].as_array().unwrap().len(), 1);

        let fetched = hospitals.get(hospital_id).unwrap();
        assert_eq!(fetched["appointments"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_select_drops_unlisted_fields_including_appointments() {
        let store = Arc::new(MemoryStore::new());
        let hospitals = HospitalStore::new(store);
        hospitals
            .create(json!({"name": "Central", "tel": "02-000"}))
            .unwrap();

        let (listed, _) = hospitals.list(&list_params(&[("select", "name")]));
        assert_eq!(listed.len(), 1);
        assert!(listed[0].get("name").is_some());
        assert!(listed[0].get("id").is_some());
        assert!(listed[0].get("tel").is_none());
        assert!(listed[0].get("appointments").is_none());
    }

    #[test]
    fn test_delete_missing_hospital_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let hospitals = HospitalStore::new(store);
        assert!(matches!(
            hospitals.delete("missing"),
            Err(StoreError::NotFound(_))
        ));
    }
}
