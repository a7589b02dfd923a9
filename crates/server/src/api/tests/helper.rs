#[cfg(test)]
use crate::api::server::AppState;
#[cfg(test)]
use crate::store::core::{MemoryStore, StoreContext};
#[cfg(test)]
use actix_web::web::Data;
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
pub(crate) fn create_test_app_state() -> Data<AppState> {
    let store = Arc::new(MemoryStore::new());
    let store_context = Arc::new(StoreContext::new(store));
    Data::new(AppState { store_context })
}
