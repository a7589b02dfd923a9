use crate::api::routes::vac_centers::get_vac_centers;
use crate::api::server::AppState;
use crate::query::{ListParams, Pagination};
use actix_web::web::{self, delete, get, post, put, Data, Json, Path, Query};
use actix_web::{HttpResponse, Scope};
use log::{debug, error};
use serde_json::{json, Value};
use shared::models::HospitalRequest;
use std::collections::HashMap;

async fn get_hospitals(
    query: Query<HashMap<String, String>>,
    app_state: Data<AppState>,
) -> HttpResponse {
    let params = match ListParams::from_query(&query) {
        Ok(params) => params,
        Err(e) => {
            debug!("Rejecting hospital list query: {e}");
            return HttpResponse::BadRequest().json(json!({"success": false}));
        }
    };

    let (hospitals, total) = app_state.store_context.hospital_store.list(&params);
    let pagination = Pagination::build(params.page, params.limit, total);

    HttpResponse::Ok().json(json!({
        "success": true,
        "count": hospitals.len(),
        "pagination": pagination,
        "data": hospitals
    }))
}

async fn get_hospital(id: Path<String>, app_state: Data<AppState>) -> HttpResponse {
    match app_state.store_context.hospital_store.get(&id) {
        Some(hospital) => HttpResponse::Ok().json(json!({"success": true, "data": hospital})),
        None => HttpResponse::BadRequest().json(json!({"success": false})),
    }
}

async fn create_hospital(
    body: Json<HospitalRequest>,
    app_state: Data<AppState>,
) -> HttpResponse {
    match app_state
        .store_context
        .hospital_store
        .create(body.into_inner().into())
    {
        Ok(hospital) => HttpResponse::Created().json(json!({"success": true, "data": hospital})),
        Err(e) => {
            error!("Failed to create hospital: {e}");
            HttpResponse::BadRequest().json(json!({"success": false}))
        }
    }
}

async fn update_hospital(
    id: Path<String>,
    body: Json<Value>,
    app_state: Data<AppState>,
) -> HttpResponse {
    match app_state
        .store_context
        .hospital_store
        .update(&id, &body)
    {
        Ok(Some(hospital)) => HttpResponse::Ok().json(json!({"success": true, "data": hospital})),
        Ok(None) => HttpResponse::BadRequest().json(json!({"success": false})),
        Err(e) => {
            debug!("Rejecting hospital update: {e}");
            HttpResponse::BadRequest().json(json!({"success": false}))
        }
    }
}

async fn delete_hospital(id: Path<String>, app_state: Data<AppState>) -> HttpResponse {
    match app_state.store_context.hospital_store.delete(&id) {
        Ok(()) => HttpResponse::Ok().json(json!({"success": true, "data": {}})),
        Err(e) => {
            debug!("Rejecting hospital delete: {e}");
            HttpResponse::BadRequest().json(json!({"success": false}))
        }
    }
}

pub(crate) fn hospitals_routes() -> Scope {
    // vacCenters must be registered ahead of the {id} routes.
    web::scope("/api/v1/hospitals")
        .route("/vacCenters", get().to(get_vac_centers))
        .route("", get().to(get_hospitals))
        .route("", post().to(create_hospital))
        .route("/{id}", get().to(get_hospital))
        .route("/{id}", put().to(update_hospital))
        .route("/{id}", delete().to(delete_hospital))
}
