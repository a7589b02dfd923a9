pub mod appointment;
pub mod hospital;
pub mod vac_center;

pub use appointment::AppointmentRequest;
pub use hospital::HospitalRequest;
pub use vac_center::VacCenterRequest;
