use crate::store::core::MemoryStore;
use crate::store::domains::appointment_store::AppointmentStore;
use crate::store::domains::hospital_store::HospitalStore;
use crate::store::domains::vac_center_store::VacCenterStore;
use std::sync::Arc;

/// Per-resource stores over one shared document store, injected into
/// handlers through the application state.
pub struct StoreContext {
    pub hospital_store: Arc<HospitalStore>,
    pub vac_center_store: Arc<VacCenterStore>,
    pub appointment_store: Arc<AppointmentStore>,
}

impl StoreContext {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            hospital_store: Arc::new(HospitalStore::new(store.clone())),
            vac_center_store: Arc::new(VacCenterStore::new(store.clone())),
            appointment_store: Arc::new(AppointmentStore::new(store.clone())),
        }
    }
}
