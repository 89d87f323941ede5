//! Request middleware.

use std::collections::HashMap;

use actix_web::{
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::Next,
    web, Error,
};

use crate::constants::METHOD_OVERRIDE_PARAM;

/// Rewrite `POST ...?_method=PUT|DELETE|PATCH` into the named method.
///
/// HTML forms can only submit GET and POST. Any other request, or an
/// override naming a different method, passes through unchanged.
pub async fn method_override(
    mut req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    if req.method() == Method::POST {
        if let Some(method) = override_target(req.query_string()) {
            log::debug!("Overriding POST {} as {}", req.path(), method);
            req.head_mut().method = method;
        }
    }

    next.call(req).await
}

fn override_target(query: &str) -> Option<Method> {
    let params = web::Query::<HashMap<String, String>>::from_query(query).ok()?;
    let requested = params.get(METHOD_OVERRIDE_PARAM)?.to_ascii_uppercase();
    match requested.as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        "PATCH" => Some(Method::PATCH),
        _ => None,
    }
}
