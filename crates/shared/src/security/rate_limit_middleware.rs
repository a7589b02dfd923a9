use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorTooManyRequests;
use actix_web::Error;
use dashmap::DashMap;
use futures_util::future::LocalBoxFuture;
use log::warn;
use serde_json::json;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW_SECS: u64 = 600;
pub const DEFAULT_MAX_REQUESTS: usize = 5;

/// Fixed-window rate limiter keyed by client address. One instance is shared
/// across all server workers; clones share the same window map.
#[derive(Clone)]
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    clients: Arc<DashMap<String, (Instant, usize)>>,
}

impl RateLimiter {
    pub fn new(window_secs: u64, max_requests: usize) -> Self {
        Self {
            window: Duration::from_secs(window_secs),
            max_requests,
            clients: Arc::new(DashMap::new()),
        }
    }

    fn check(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.clients.entry(client.to_string()).or_insert((now, 0));
        let (window_start, count) = entry.value_mut();

        if now.duration_since(*window_start) >= self.window {
            *window_start = now;
            *count = 1;
            true
        } else if *count >= self.max_requests {
            false
        } else {
            *count += 1;
            true
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS, DEFAULT_MAX_REQUESTS)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RateLimiterMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service,
            limiter: self.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: S,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = {
            let info = req.connection_info();
            info.realip_remote_addr().unwrap_or("unknown").to_string()
        };

        if !self.limiter.check(&client) {
            warn!("Rate limit exceeded for client: {client}");
            return Box::pin(async move {
                Err(ErrorTooManyRequests(json!({
                    "success": false,
                    "error": "Too many requests, please try again later"
                })))
            });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use std::net::SocketAddr;
    use std::str::FromStr;

    async fn test_handler() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_sixth_request_in_window_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimiter::new(600, 5))
                .route("/", web::get().to(test_handler)),
        )
        .await;

        let peer = SocketAddr::from_str("10.0.0.1:9000").unwrap();
        for _ in 0..5 {
            let req = test::TestRequest::get().uri("/").peer_addr(peer).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/").peer_addr(peer).to_request();
        let resp = test::try_call_service(&app, req).await;
        let err = resp.expect_err("sixth request should be rejected");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[actix_web::test]
    async fn test_clients_are_limited_independently() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimiter::new(600, 1))
                .route("/", web::get().to(test_handler)),
        )
        .await;

        let first = SocketAddr::from_str("10.0.0.1:9000").unwrap();
        let second = SocketAddr::from_str("10.0.0.2:9000").unwrap();

        let req = test::TestRequest::get().uri("/").peer_addr(first).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/").peer_addr(first).to_request();
        assert!(test::try_call_service(&app, req).await.is_err());

        let req = test::TestRequest::get().uri("/").peer_addr(second).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[::core::prelude::v1::test]
    fn test_window_reset_allows_requests_again() {
        let limiter = RateLimiter::new(0, 1);
        assert!(limiter.check("client"));
        // Zero-length window expires immediately, so the counter resets.
        assert!(limiter.check("client"));
    }
}
