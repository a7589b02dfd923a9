use crate::error::StoreError;
use crate::query::ListParams;
use crate::store::core::{FindOptions, MemoryStore};
use crate::store::domains::hospital_store::HOSPITAL_COLLECTION;
use serde_json::Value;
use std::sync::Arc;

pub(crate) const APPOINTMENT_COLLECTION: &str = "appointments";

pub struct AppointmentStore {
    store: Arc<MemoryStore>,
}

impl AppointmentStore {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self, params: &ListParams) -> (Vec<Value>, u64) {
        let total = self.store.count(APPOINTMENT_COLLECTION);
        let mut appointments =
            self.store
                .find(APPOINTMENT_COLLECTION, &params.filter, &FindOptions::from(params));
        for appointment in &mut appointments {
            self.attach_hospital(appointment);
        }
        (appointments, total)
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        let mut appointment = self.store.get(APPOINTMENT_COLLECTION, id)?;
        self.attach_hospital(&mut appointment);
        Some(appointment)
    }

    /// The referenced hospital must exist when an appointment is booked.
    pub fn create(&self, document: Value) -> Result<Value, StoreError> {
        let hospital_id = document
            .get("hospital")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StoreError::InvalidDocument("appointment requires a hospital id".to_string())
            })?;
        if self.store.get(HOSPITAL_COLLECTION, hospital_id).is_none() {
            return Err(StoreError::NotFound(hospital_id.to_string()));
        }
        self.store.insert(APPOINTMENT_COLLECTION, document)
    }

    /// A changed `hospital` reference must point at an existing hospital,
    /// same as on create.
    pub fn update(&self, id: &str, changes: &Value) -> Result<Option<Value>, StoreError> {
        if let Some(hospital_id) = changes.get("hospital").and_then(Value::as_str) {
            if self.store.get(HOSPITAL_COLLECTION, hospital_id).is_none() {
                return Err(StoreError::NotFound(hospital_id.to_string()));
            }
        }
        self.store.update(APPOINTMENT_COLLECTION, id, changes)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        if !self.store.delete(APPOINTMENT_COLLECTION, id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Replaces the hospital id reference with the hospital document when it
    /// still exists; a dangling reference is left as the raw id.
    fn attach_hospital(&self, appointment: &mut Value) {
        let Some(hospital_id) = appointment.get("hospital").and_then(Value::as_str) else {
            return;
        };
        if let Some(hospital) = self.store.get(HOSPITAL_COLLECTION, hospital_id) {
            if let Some(fields) = appointment.as_object_mut() {
                fields.insert("hospital".to_string(), hospital);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::domains::hospital_store::HospitalStore;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_create_requires_existing_hospital() {
        let store = Arc::new(MemoryStore::new());
        let appointments = AppointmentStore::new(store);

        let missing_hospital =
            appointments.create(json!({"aptDate": "2026-09-01T09:00:00Z", "hospital": "nope"}));
        assert!(matches!(missing_hospital, Err(StoreError::NotFound(_))));

        let missing_reference = appointments.create(json!({"aptDate": "2026-09-01T09:00:00Z"}));
        assert!(matches!(
            missing_reference,
            Err(StoreError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_update_rejects_unknown_hospital_reference() {
        let store = Arc::new(MemoryStore::new());
        let hospitals = HospitalStore::new(store.clone());
        let appointments = AppointmentStore::new(store);

        let hospital = hospitals.create(json!({"name": "Central"})).unwrap();
        let hospital_id = hospital["id"].as_str().unwrap();
        let appointment = appointments
            .create(json!({"aptDate": "2026-09-01T09:00:00Z", "hospital": hospital_id}))
            .unwrap();
        let id = appointment["id"].as_str().unwrap();

        let dangling = appointments.update(id, &json!({"hospital": "no-such-id"}));
        assert!(matches!(dangling, Err(StoreError::NotFound(_))));

        let other = hospitals.create(json!({"name": "North"})).unwrap();
        let moved = appointments
            .update(id, &json!({"hospital": other["id"].as_str().unwrap()}))
            .unwrap()
            .unwrap();
        assert_eq!(moved["hospital"], other["id"]);
    }

    #[test]
    fn test_list_populates_hospital() {
        let store = Arc::new(MemoryStore::new());
        let hospitals = HospitalStore::new(store.clone());
        let appointments = AppointmentStore::new(store);

        let hospital = hospitals.create(json!({"name": "Central"})).unwrap();
        let hospital_id = hospital["id"].as_str().unwrap();
        appointments
            .create(json!({"aptDate": "2026-09-01T09:00:00Z", "hospital": hospital_id}))
            .unwrap();

        let params = ListParams::from_query(&HashMap::new()).unwrap();
        let (listed, total) = appointments.list(&params);
        assert_eq!(total, 1);
        assert_eq!(listed[0]["hospital"]["name"], "Central");
    }
}
