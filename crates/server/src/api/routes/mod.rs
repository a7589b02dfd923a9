pub(crate) mod appointments;
pub(crate) mod hospitals;
pub(crate) mod vac_centers;
