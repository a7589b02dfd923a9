pub(crate) mod appointment_store;
pub(crate) mod hospital_store;
pub(crate) mod vac_center_store;

pub use appointment_store::AppointmentStore;
pub use hospital_store::HospitalStore;
pub use vac_center_store::VacCenterStore;
