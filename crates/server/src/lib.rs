mod api;
mod error;
mod query;
mod store;

pub use api::server::{start_server, AppState};
pub use error::StoreError;
pub use query::{
    Comparison, Condition, Filter, ListParams, PageRef, Pagination, QueryError, SortKey,
};
pub use store::core::{FindOptions, MemoryStore, StoreContext};
pub use store::domains::{AppointmentStore, HospitalStore, VacCenterStore};
