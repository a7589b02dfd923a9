use crate::api::server::AppState;
use crate::query::{ListParams, Pagination};
use actix_web::web::{self, delete, get, post, put, Data, Json, Path, Query};
use actix_web::{HttpResponse, Scope};
use log::debug;
use serde_json::{json, Value};
use shared::models::AppointmentRequest;
use std::collections::HashMap;

async fn get_appointments(
    query: Query<HashMap<String, String>>,
    app_state: Data<AppState>,
) -> HttpResponse {
    let params = match ListParams::from_query(&query) {
        Ok(params) => params,
        Err(e) => {
            debug!("Rejecting appointment list query: {e}");
            return HttpResponse::BadRequest().json(json!({"success": false}));
        }
    };

    let (appointments, total) = app_state.store_context.appointment_store.list(&params);
    let pagination = Pagination::build(params.page, params.limit, total);

    HttpResponse::Ok().json(json!({
        "success": true,
        "count": appointments.len(),
        "pagination": pagination,
        "data": appointments
    }))
}

async fn get_appointment(id: Path<String>, app_state: Data<AppState>) -> HttpResponse {
    match app_state.store_context.appointment_store.get(&id) {
        Some(appointment) => {
            HttpResponse::Ok().json(json!({"success": true, "data": appointment}))
        }
        None => HttpResponse::BadRequest().json(json!({"success": false})),
    }
}

async fn create_appointment(
    body: Json<AppointmentRequest>,
    app_state: Data<AppState>,
) -> HttpResponse {
    match app_state
        .store_context
        .appointment_store
        .create(body.into_inner().into())
    {
        Ok(appointment) => {
            HttpResponse::Created().json(json!({"success": true, "data": appointment}))
        }
        Err(e) => {
            debug!("Rejecting appointment create: {e}");
            HttpResponse::BadRequest().json(json!({"success": false}))
        }
    }
}

async fn update_appointment(
    id: Path<String>,
    body: Json<Value>,
    app_state: Data<AppState>,
) -> HttpResponse {
    match app_state
        .store_context
        .appointment_store
        .update(&id, &body)
    {
        Ok(Some(appointment)) => {
            HttpResponse::Ok().json(json!({"success": true, "data": appointment}))
        }
        Ok(None) => HttpResponse::BadRequest().json(json!({"success": false})),
        Err(e) => {
            debug!("Rejecting appointment update: {e}");
            HttpResponse::BadRequest().json(json!({"success": false}))
        }
    }
}

async fn delete_appointment(id: Path<String>, app_state: Data<AppState>) -> HttpResponse {
    match app_state.store_context.appointment_store.delete(&id) {
        Ok(()) => HttpResponse::Ok().json(json!({"success": true, "data": {}})),
        Err(e) => {
            debug!("Rejecting appointment delete: {e}");
            HttpResponse::BadRequest().json(json!({"success": false}))
        }
    }
}

pub(crate) fn appointments_routes() -> Scope {
    web::scope("/api/v1/appointments")
        .route("", get().to(get_appointments))
        .route("", post().to(create_appointment))
        .route("/{id}", get().to(get_appointment))
        .route("/{id}", put().to(update_appointment))
        .route("/{id}", delete().to(delete_appointment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::helper::create_test_app_state;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_create_appointment_for_existing_hospital() {
        let app_state = create_test_app_state();
        let hospital = app_state
            .store_context
            .hospital_store
            .create(json!({"name": "Central", "address": "x"}))
            .unwrap();
        let hospital_id = hospital["id"].as_str().unwrap().to_string();

        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(appointments_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/appointments")
            .set_json(json!({
                "aptDate": "2026-09-01T09:00:00Z",
                "user": "somchai",
                "hospital": hospital_id
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["user"], "somchai");
    }

    #[actix_web::test]
    async fn test_create_appointment_for_missing_hospital_returns_400() {
        let app_state = create_test_app_state();
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(appointments_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/appointments")
            .set_json(json!({"aptDate": "2026-09-01T09:00:00Z", "hospital": "no-such-id"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
    }

    #[actix_web::test]
    async fn test_list_appointments_populates_hospital() {
        let app_state = create_test_app_state();
        let hospital = app_state
            .store_context
            .hospital_store
            .create(json!({"name": "Central", "address": "x"}))
            .unwrap();
        let hospital_id = hospital["id"].as_str().unwrap().to_string();
        app_state
            .store_context
            .appointment_store
            .create(json!({"aptDate": "2026-09-01T09:00:00Z", "hospital": hospital_id}))
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(appointments_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/appointments")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["hospital"]["name"], "Central");
    }

    #[actix_web::test]
    async fn test_update_and_delete_appointment() {
        let app_state = create_test_app_state();
        let hospital = app_state
            .store_context
            .hospital_store
            .create(json!({"name": "Central", "address": "x"}))
            .unwrap();
        let hospital_id = hospital["id"].as_str().unwrap().to_string();
        let appointment = app_state
            .store_context
            .appointment_store
            .create(json!({"aptDate": "2026-09-01T09:00:00Z", "hospital": hospital_id}))
            .unwrap();
        let id = appointment["id"].as_str().unwrap().to_string();

        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(appointments_routes()),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/appointments/{id}"))
            .set_json(json!({"aptDate": "2026-09-02T10:00:00Z"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["aptDate"], "2026-09-02T10:00:00Z");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/appointments/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/appointments/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
