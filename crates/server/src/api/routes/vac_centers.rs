use crate::api::server::AppState;
use actix_web::web::Data;
use actix_web::HttpResponse;
use serde_json::json;

pub(crate) async fn get_vac_centers(app_state: Data<AppState>) -> HttpResponse {
    let centers = app_state.store_context.vac_center_store.get_all();
    HttpResponse::Ok().json(json!({
        "success": true,
        "count": centers.len(),
        "data": centers
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::hospitals::hospitals_routes;
    use crate::api::tests::helper::create_test_app_state;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_get_vac_centers() {
        let app_state = create_test_app_state();
        let vac_center_store = app_state.store_context.vac_center_store.clone();
        vac_center_store
            .create(json!({"name": "Bang Sue Grand Station", "tel": "02-111"}))
            .unwrap();
        vac_center_store
            .create(json!({"name": "Central Ladprao", "tel": "02-222"}))
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(hospitals_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/hospitals/vacCenters")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_vac_centers_route_is_not_shadowed_by_id_lookup() {
        let app_state = create_test_app_state();
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(hospitals_routes()),
        )
        .await;

        // An empty collection must still answer 200, not fall through to
        // the hospital-by-id handler's 400.
        let req = test::TestRequest::get()
            .uri("/api/v1/hospitals/vacCenters")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
