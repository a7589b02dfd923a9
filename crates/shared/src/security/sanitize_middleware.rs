use actix_web::dev::Payload;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::{ErrorBadRequest, PayloadError};
use actix_web::http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use actix_web::http::uri::{PathAndQuery, Uri};
use actix_web::web::{Bytes, BytesMut};
use actix_web::{Error, HttpMessage};
use futures_util::future::{self, LocalBoxFuture};
use futures_util::{Stream, StreamExt};
use log::debug;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::pin::Pin;
use std::rc::Rc;

pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Request sanitizer: strips operator-injection keys (`$`-prefixed or dotted)
/// from JSON bodies and query strings, escapes angle brackets in body strings,
/// and deduplicates query parameters keeping the last occurrence. The body cap
/// should match the server's payload limit.
#[derive(Clone)]
pub struct SanitizeRequest {
    max_body_size: usize,
}

impl SanitizeRequest {
    pub fn new(max_body_size: usize) -> Self {
        Self { max_body_size }
    }
}

impl Default for SanitizeRequest {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_SIZE)
    }
}

impl<S, B> Transform<S, ServiceRequest> for SanitizeRequest
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SanitizeRequestMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SanitizeRequestMiddleware {
            service: Rc::new(service),
            max_body_size: self.max_body_size,
        }))
    }
}

pub struct SanitizeRequestMiddleware<S> {
    service: Rc<S>,
    max_body_size: usize,
}

impl<S, B> Service<ServiceRequest> for SanitizeRequestMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let max_body_size = self.max_body_size;

        Box::pin(async move {
            sanitize_query(&mut req)?;

            let is_json = req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|h| h.to_str().ok())
                .map(|ct| ct.starts_with("application/json"))
                .unwrap_or(false);

            if is_json {
                let mut body = BytesMut::new();
                let mut payload = req.take_payload();
                while let Some(chunk) = payload.next().await {
                    let chunk = chunk?;
                    if body.len() + chunk.len() > max_body_size {
                        return Err(ErrorBadRequest(json!({
                            "success": false,
                            "error": "Request body too large"
                        })));
                    }
                    body.extend_from_slice(chunk.as_ref());
                }

                let bytes = match serde_json::from_slice::<Value>(&body) {
                    Ok(mut value) => {
                        sanitize_value(&mut value);
                        match serde_json::to_vec(&value) {
                            Ok(sanitized) => Bytes::from(sanitized),
                            Err(e) => {
                                debug!("Failed to re-serialize sanitized body: {e}");
                                return Err(ErrorBadRequest(json!({"success": false})));
                            }
                        }
                    }
                    // Leave malformed JSON for the extractor to reject.
                    Err(_) => body.freeze(),
                };

                req.headers_mut()
                    .insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));

                let stream = futures_util::stream::once(future::ok::<Bytes, PayloadError>(bytes));
                let boxed_stream: Pin<Box<dyn Stream<Item = Result<Bytes, PayloadError>>>> =
                    Box::pin(stream);
                req.set_payload(Payload::from(boxed_stream));
            }

            service.call(req).await
        })
    }
}

fn forbidden_key(key: &str) -> bool {
    key.starts_with('$') || key.starts_with("%24") || key.contains('.')
}

/// Drops `$`-prefixed and dotted keys from every object, and escapes angle
/// brackets in string values.
fn sanitize_value(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            let forbidden: Vec<String> = fields
                .keys()
                .filter(|key| forbidden_key(key))
                .cloned()
                .collect();
            for key in forbidden {
                fields.remove(&key);
            }
            for nested in fields.values_mut() {
                sanitize_value(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                sanitize_value(item);
            }
        }
        Value::String(text) => {
            if text.contains('<') || text.contains('>') {
                *text = text.replace('<', "&lt;").replace('>', "&gt;");
            }
        }
        _ => {}
    }
}

/// Rewrites the query string: forbidden keys are dropped and duplicated
/// parameters collapse to their last occurrence.
fn sanitize_query(req: &mut ServiceRequest) -> Result<(), Error> {
    let Some(query) = req.uri().query() else {
        return Ok(());
    };

    let mut order: Vec<String> = Vec::new();
    let mut values: HashMap<String, String> = HashMap::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        };
        if forbidden_key(&key) {
            continue;
        }
        if !values.contains_key(&key) {
            order.push(key.clone());
        }
        values.insert(key, value);
    }

    let sanitized = order
        .iter()
        .map(|key| format!("{key}={}", values[key]))
        .collect::<Vec<_>>()
        .join("&");
    if sanitized == query {
        return Ok(());
    }

    let path = req.uri().path().to_string();
    let path_and_query = if sanitized.is_empty() {
        path
    } else {
        format!("{path}?{sanitized}")
    };

    let mut parts = req.uri().clone().into_parts();
    parts.path_and_query = Some(
        PathAndQuery::try_from(path_and_query.as_str())
            .map_err(|_| ErrorBadRequest(json!({"success": false})))?,
    );
    req.head_mut().uri =
        Uri::from_parts(parts).map_err(|_| ErrorBadRequest(json!({"success": false})))?;
    Ok(())
}
